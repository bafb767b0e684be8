//! Display values derived from a [`Record`](crate::model::Record).
//!
//! Everything here is a pure function of its inputs and never fails: absent
//! data turns into a fallback string or an explicit "unknown" value.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const NO_TITLE: &str = "No Title Available";
pub const UNKNOWN: &str = "Unknown";
pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_DESCRIPTION: &str = "No description available.";

/// Styling tier of a numeric rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingTier {
    Success,
    Warning,
    Error,
    /// No usable rating; rendered with neutral styling.
    Unknown,
}

impl RatingTier {
    pub fn from_rating(rating: Option<f64>) -> Self {
        match rating {
            Some(r) if r.is_nan() => RatingTier::Unknown,
            Some(r) if r > 4.5 => RatingTier::Success,
            Some(r) if r > 4.0 => RatingTier::Warning,
            Some(_) => RatingTier::Error,
            None => RatingTier::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RatingTier::Success => "success",
            RatingTier::Warning => "warning",
            RatingTier::Error => "error",
            RatingTier::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RatingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the struck-through comparison price is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountFormula {
    /// `price * (1 - discount / 100)`.
    #[default]
    Percentage,
    /// `floor(price + discount / 100)`, as the first product page computed it.
    Legacy,
}

impl DiscountFormula {
    pub fn apply(self, price: f64, discount_percentage: f64) -> f64 {
        match self {
            DiscountFormula::Percentage => {
                round_cents(price * (1.0 - discount_percentage / 100.0))
            }
            DiscountFormula::Legacy => (price + discount_percentage / 100.0).floor(),
        }
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

pub fn review_count(reviews: Option<&[serde_json::Value]>) -> usize {
    reviews.map_or(0, <[_]>::len)
}

pub fn review_label(count: usize) -> String {
    if count == 1 {
        "1 review".to_string()
    } else {
        format!("{} reviews", count)
    }
}

/// Formats a dollar amount: `$10` for whole amounts, `$9.99` otherwise.
pub fn format_price(amount: f64) -> String {
    let cents = round_cents(amount);
    if cents.fract() == 0.0 {
        format!("${:.0}", cents)
    } else {
        format!("${:.2}", cents)
    }
}

/// Formats a bare number the way it appears in the source data
/// (`4.6`, `20`, `12.5`).
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

pub fn rating_label(rating: Option<f64>) -> String {
    match rating {
        Some(r) if !r.is_nan() => format_number(r),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Returns the text when present and non-blank, otherwise the fallback.
pub fn text_or(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => fallback.to_string(),
    }
}

pub fn minutes_or_na(minutes: Option<u32>) -> String {
    match minutes {
        Some(m) if m > 0 => format!("{} mins", m),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn count_or_na(count: Option<u32>) -> String {
    match count {
        Some(n) if n > 0 => n.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}
