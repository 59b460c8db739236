//! Storage service: company logo upload.
//!
//! One logo per owner, stored at `<owner-id>/logo.<ext>` in the logos
//! bucket and overwritten in place on re-upload.

use crate::client::{RemoteClient, RemoteResult};
use crate::error::{RemoteError, RemoteErrorKind};

const BUCKET: &str = "logos";

/// Company logo upload.
pub struct StorageService<'a> {
    client: &'a RemoteClient,
}

impl<'a> StorageService<'a> {
    pub fn new(client: &'a RemoteClient) -> Self {
        StorageService { client }
    }

    /// Uploads the owner's logo, replacing any previous one, and returns
    /// its public URL.
    pub async fn upload_logo(
        &self,
        owner_id: &str,
        extension: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> RemoteResult<String> {
        let extension = extension.trim_start_matches('.');
        if extension.is_empty() {
            return RemoteResult::err(RemoteError::new(
                RemoteErrorKind::Backend,
                "Logo file has no extension",
            ));
        }

        let object_path = format!("{owner_id}/logo.{extension}");
        let url = self
            .client
            .storage_url(&format!("object/{BUCKET}/{object_path}"));

        let uploaded = self
            .client
            .upload_bytes(&url, content_type, bytes, true)
            .await;
        if let Some(error) = uploaded.error {
            return RemoteResult::err(error);
        }

        RemoteResult::ok(
            self.client
                .storage_url(&format!("object/public/{BUCKET}/{object_path}")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RemoteConfig;

    #[tokio::test]
    async fn test_missing_extension_is_refused_locally() {
        let client = RemoteClient::new(RemoteConfig::new("example.backend.co", "key")).unwrap();
        let storage = StorageService::new(&client);

        let result = storage
            .upload_logo("u1", "", "image/png", vec![1, 2, 3])
            .await;
        let err = result.into_result().unwrap_err();
        assert!(err.message.contains("extension"));
    }
}
