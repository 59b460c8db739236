//! # Store Settings
//!
//! Strongly typed store configuration consumed by the receipt formatter.
//!
//! ## Design Notes
//! - Every field has an explicit default and carries `#[serde(default)]`,
//!   so a persisted record from an older version (or with unknown/missing
//!   fields) falls back field-by-field instead of failing to load.
//! - Date/time formats deserialize leniently: an unrecognized stored value
//!   falls back to the default format rather than erroring.
//! - Settings are overwritten wholesale on save; there are no partial
//!   updates.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Date / Time Formats
// =============================================================================

/// Date format printed on receipts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum DateFormat {
    /// `31/12/2026` (the default)
    #[default]
    #[serde(rename = "DD/MM/YYYY")]
    DayMonthYear,

    /// `12/31/2026`
    #[serde(rename = "MM/DD/YYYY")]
    MonthDayYear,

    /// `2026-12-31`
    #[serde(rename = "YYYY-MM-DD")]
    YearMonthDay,
}

impl DateFormat {
    /// Lenient parse: unrecognized values fall back to the default.
    pub fn from_value(value: &str) -> Self {
        match value.trim() {
            "MM/DD/YYYY" => DateFormat::MonthDayYear,
            "YYYY-MM-DD" => DateFormat::YearMonthDay,
            _ => DateFormat::DayMonthYear,
        }
    }

    /// The chrono strftime pattern for this format.
    fn pattern(&self) -> &'static str {
        match self {
            DateFormat::DayMonthYear => "%d/%m/%Y",
            DateFormat::MonthDayYear => "%m/%d/%Y",
            DateFormat::YearMonthDay => "%Y-%m-%d",
        }
    }
}

impl<'de> Deserialize<'de> for DateFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(DateFormat::from_value(&value))
    }
}

/// Time format printed on receipts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum TimeFormat {
    /// `02:35:07 PM`
    #[serde(rename = "12hour")]
    TwelveHour,

    /// `14:35:07` (the default)
    #[default]
    #[serde(rename = "24hour")]
    TwentyFourHour,
}

impl TimeFormat {
    /// Lenient parse: unrecognized values fall back to the default.
    pub fn from_value(value: &str) -> Self {
        match value.trim() {
            "12hour" => TimeFormat::TwelveHour,
            _ => TimeFormat::TwentyFourHour,
        }
    }

    fn pattern(&self) -> &'static str {
        match self {
            TimeFormat::TwelveHour => "%I:%M:%S %p",
            TimeFormat::TwentyFourHour => "%H:%M:%S",
        }
    }
}

impl<'de> Deserialize<'de> for TimeFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(TimeFormat::from_value(&value))
    }
}

// =============================================================================
// Store Settings
// =============================================================================

/// Store configuration: identity strings, receipt visibility flags, label
/// strings, and date/time formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    // -- Store identity ------------------------------------------------------
    pub store_name: String,
    pub store_address: String,
    pub store_phone: String,

    // -- Section visibility --------------------------------------------------
    pub show_store_name: bool,
    pub show_store_address: bool,
    pub show_store_phone: bool,
    pub show_customer: bool,
    /// Render line items as a labeled table; when off, the compact
    /// `"index. name × qty — total"` listing is used instead.
    pub show_table_headers: bool,
    pub show_footer: bool,

    // -- Labels --------------------------------------------------------------
    pub serial_label: String,
    pub item_label: String,
    pub quantity_label: String,
    pub price_label: String,
    pub total_label: String,
    pub grand_total_label: String,
    pub footer_message: String,
    /// Placeholder customer name used when none is supplied.
    pub walk_in_label: String,
    /// Prefix for money values on the receipt. Empty by default so the
    /// grand total reads as a bare decimal (`310.00`).
    pub currency_symbol: String,

    // -- Formats -------------------------------------------------------------
    pub date_format: DateFormat,
    pub time_format: TimeFormat,

    // -- Features ------------------------------------------------------------
    /// When on, adding tracked items to the cart is refused once their
    /// stock is exhausted. Off by default (stock tracking is optional).
    pub enforce_stock: bool,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            store_name: "My Store".to_string(),
            store_address: String::new(),
            store_phone: String::new(),

            show_store_name: true,
            show_store_address: true,
            show_store_phone: true,
            show_customer: true,
            show_table_headers: true,
            show_footer: true,

            serial_label: "S.No".to_string(),
            item_label: "Item".to_string(),
            quantity_label: "Qty".to_string(),
            price_label: "Price".to_string(),
            total_label: "Total".to_string(),
            grand_total_label: "Grand Total".to_string(),
            footer_message: "Thank you, visit again!".to_string(),
            walk_in_label: "Walk-in Customer".to_string(),
            currency_symbol: String::new(),

            date_format: DateFormat::default(),
            time_format: TimeFormat::default(),

            enforce_stock: false,
        }
    }
}

impl StoreSettings {
    /// Load-time validation: trims labels and restores blank ones to their
    /// defaults so the receipt never renders an unlabeled column.
    pub fn normalize(mut self) -> Self {
        let defaults = StoreSettings::default();

        fn fix(value: &mut String, fallback: &str) {
            let trimmed = value.trim();
            *value = if trimmed.is_empty() {
                fallback.to_string()
            } else {
                trimmed.to_string()
            };
        }

        fix(&mut self.serial_label, &defaults.serial_label);
        fix(&mut self.item_label, &defaults.item_label);
        fix(&mut self.quantity_label, &defaults.quantity_label);
        fix(&mut self.price_label, &defaults.price_label);
        fix(&mut self.total_label, &defaults.total_label);
        fix(&mut self.grand_total_label, &defaults.grand_total_label);
        fix(&mut self.walk_in_label, &defaults.walk_in_label);

        // Identity strings, footer and currency symbol may legitimately be
        // blank; only trim them.
        self.store_name = self.store_name.trim().to_string();
        self.store_address = self.store_address.trim().to_string();
        self.store_phone = self.store_phone.trim().to_string();
        self.footer_message = self.footer_message.trim().to_string();
        self.currency_symbol = self.currency_symbol.trim().to_string();

        self
    }

    /// Formats a timestamp's date portion per the configured format.
    pub fn format_date<Tz: TimeZone>(&self, ts: &DateTime<Tz>) -> String
    where
        Tz::Offset: fmt::Display,
    {
        ts.format(self.date_format.pattern()).to_string()
    }

    /// Formats a timestamp's time portion per the configured format.
    pub fn format_time<Tz: TimeZone>(&self, ts: &DateTime<Tz>) -> String
    where
        Tz::Offset: fmt::Display,
    {
        ts.format(self.time_format.pattern()).to_string()
    }

    /// Formats a money value with the configured currency symbol.
    pub fn format_money(&self, amount: Money) -> String {
        format!("{}{}", self.currency_symbol, amount)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn sample_ts() -> DateTime<FixedOffset> {
        // 2026-08-23 14:35:07 +05:30
        FixedOffset::east_opt(5 * 3600 + 1800)
            .unwrap()
            .with_ymd_and_hms(2026, 8, 23, 14, 35, 7)
            .unwrap()
    }

    #[test]
    fn test_date_formats() {
        let ts = sample_ts();
        let mut settings = StoreSettings::default();

        assert_eq!(settings.format_date(&ts), "23/08/2026");

        settings.date_format = DateFormat::MonthDayYear;
        assert_eq!(settings.format_date(&ts), "08/23/2026");

        settings.date_format = DateFormat::YearMonthDay;
        assert_eq!(settings.format_date(&ts), "2026-08-23");
    }

    #[test]
    fn test_time_formats() {
        let ts = sample_ts();
        let mut settings = StoreSettings::default();

        assert_eq!(settings.format_time(&ts), "14:35:07");

        settings.time_format = TimeFormat::TwelveHour;
        assert_eq!(settings.format_time(&ts), "02:35:07 PM");
    }

    #[test]
    fn test_unrecognized_format_falls_back() {
        assert_eq!(DateFormat::from_value("DD-MM-YY"), DateFormat::DayMonthYear);
        assert_eq!(DateFormat::from_value(""), DateFormat::DayMonthYear);
        assert_eq!(TimeFormat::from_value("military"), TimeFormat::TwentyFourHour);
    }

    #[test]
    fn test_lenient_deserialize() {
        let settings: StoreSettings = serde_json::from_str(
            r#"{"date_format": "not-a-format", "time_format": "12hour"}"#,
        )
        .unwrap();

        assert_eq!(settings.date_format, DateFormat::DayMonthYear);
        assert_eq!(settings.time_format, TimeFormat::TwelveHour);
        // Missing fields fall back to defaults.
        assert_eq!(settings.walk_in_label, "Walk-in Customer");
    }

    #[test]
    fn test_round_trip_is_identical() {
        let mut settings = StoreSettings::default();
        settings.store_name = "Corner Shop".to_string();
        settings.show_footer = false;
        settings.date_format = DateFormat::YearMonthDay;
        settings.time_format = TimeFormat::TwelveHour;

        let json = serde_json::to_string(&settings).unwrap();
        let reloaded: StoreSettings = serde_json::from_str(&json).unwrap();

        assert_eq!(settings, reloaded);
    }

    #[test]
    fn test_normalize_restores_blank_labels() {
        let mut settings = StoreSettings::default();
        settings.grand_total_label = "   ".to_string();
        settings.item_label = "  Product ".to_string();
        settings.store_name = "  Corner Shop ".to_string();

        let settings = settings.normalize();
        assert_eq!(settings.grand_total_label, "Grand Total");
        assert_eq!(settings.item_label, "Product");
        assert_eq!(settings.store_name, "Corner Shop");
    }

    #[test]
    fn test_format_money_with_symbol() {
        let mut settings = StoreSettings::default();
        assert_eq!(settings.format_money(Money::from_cents(31000)), "310.00");

        settings.currency_symbol = "₹".to_string();
        assert_eq!(settings.format_money(Money::from_cents(31000)), "₹310.00");
    }
}
