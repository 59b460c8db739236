//! Auth service: email/password sign-in and sign-out.
//!
//! A successful sign-in installs the session's bearer token on the shared
//! client, so subsequent service calls run as the signed-in user.

use reqwest::Method;
use serde_json::json;
use tracing::info;

use crate::client::{RemoteClient, RemoteResult};
use crate::types::Session;

/// Sign-in / sign-out against the backend's auth endpoints.
pub struct AuthService<'a> {
    client: &'a RemoteClient,
}

impl<'a> AuthService<'a> {
    pub fn new(client: &'a RemoteClient) -> Self {
        AuthService { client }
    }

    /// Signs in with email and password; on success the session token is
    /// installed on the client.
    pub async fn sign_in(&self, email: &str, password: &str) -> RemoteResult<Session> {
        let body = json!({
            "email": email,
            "password": password,
        });

        let session: RemoteResult<Session> = self
            .client
            .request_json(
                Method::POST,
                &self.client.auth_url("token?grant_type=password"),
                &[],
                &[],
                Some(&body),
            )
            .await;

        if let Some(session) = &session.data {
            self.client.set_bearer(&session.access_token);
            info!(user_id = %session.user.id, "Signed in");
        }

        session
    }

    /// Signs out: revokes the session server-side and drops the local
    /// token either way.
    pub async fn sign_out(&self) -> RemoteResult<()> {
        let result = self
            .client
            .request_no_content(Method::POST, &self.client.auth_url("logout"), &[], &[], None)
            .await;

        // The local token is gone regardless of what the server said.
        self.client.clear_bearer();
        result
    }
}
