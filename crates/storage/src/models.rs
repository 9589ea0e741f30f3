use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Default number of records returned when `limit` is absent or unparseable.
pub const DEFAULT_LIMIT: i64 = 20;

/// Hard cap on `limit`.
pub const MAX_LIMIT: i64 = 50;

static TOKEN_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(([^)]+)\)").expect("token name pattern is valid")
});

// ─── Activity ───────────────────────────────────────────────────────────────

/// A logged wallet event (buy, buyback, claim) owned by the external store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Activity {
    pub id: String,
    pub wallet_id: Option<String>,
    pub activity_type: String,
    pub activity_description: Option<String>,
    pub transaction_signature: Option<String>,
    pub amount_sol: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    /// Token name embedded in the description, e.g. `"Bought own token (DOGE)"`.
    pub fn token_name(&self) -> Option<String> {
        self.activity_description
            .as_deref()
            .and_then(extract_token_name)
    }
}

/// An activity as served by the API, annotated with its token name.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedActivity {
    #[serde(flatten)]
    pub activity: Activity,
    pub token_name: Option<String>,
}

impl From<Activity> for EnrichedActivity {
    fn from(activity: Activity) -> Self {
        let token_name = activity.token_name();
        Self {
            activity,
            token_name,
        }
    }
}

/// First parenthesized group of `description`, if any.
pub fn extract_token_name(description: &str) -> Option<String> {
    TOKEN_NAME
        .captures(description)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

// ─── Filters ────────────────────────────────────────────────────────────────

/// Which slice of the activity log a caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityFilter {
    #[default]
    All,
    /// `activity_type` contains "buy" or "bought".
    Buy,
    /// `activity_type` contains "claim".
    Claim,
}

impl ActivityFilter {
    /// Unknown values fall back to [`ActivityFilter::All`].
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("buy") => Self::Buy,
            Some("claim") => Self::Claim,
            _ => Self::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Buy => "buy",
            Self::Claim => "claim",
        }
    }
}

/// Resolve a raw `limit` parameter into `0..=MAX_LIMIT`.
///
/// Only the leading integer counts, so `"7.9"` is 7 and `"10abc"` is 10.
/// Empty or non-numeric input gets [`DEFAULT_LIMIT`].
pub fn clamp_limit(raw: Option<&str>) -> i64 {
    raw.filter(|s| !s.is_empty())
        .and_then(leading_int)
        .unwrap_or(DEFAULT_LIMIT)
        .clamp(0, MAX_LIMIT)
}

/// Optional sign followed by decimal digits at the start of `s`.
fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    // Overflow saturates; the cap applies afterwards.
    let value = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn activity(description: Option<&str>) -> Activity {
        Activity {
            id: "1".into(),
            wallet_id: Some("w1".into()),
            activity_type: "self-buy".into(),
            activity_description: description.map(str::to_string),
            transaction_signature: Some("5abc".into()),
            amount_sol: Some(0.25),
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn token_name_from_parentheses() {
        assert_eq!(
            extract_token_name("Bought own token (DOGE)"),
            Some("DOGE".to_string())
        );
    }

    #[test]
    fn token_name_takes_first_group() {
        assert_eq!(
            extract_token_name("Bought (PEPE) with fees from (WIF)"),
            Some("PEPE".to_string())
        );
    }

    #[test]
    fn token_name_skips_empty_parentheses() {
        assert_eq!(extract_token_name("() then (BONK)"), Some("BONK".to_string()));
        assert_eq!(extract_token_name("Claimed fees"), None);
        assert_eq!(extract_token_name("unterminated (MEME"), None);
    }

    #[test]
    fn enriched_activity_flattens_fields() {
        let enriched = EnrichedActivity::from(activity(Some("Bought own token (DOGE)")));
        let json = serde_json::to_value(&enriched).unwrap();
        assert_eq!(json["token_name"], "DOGE");
        assert_eq!(json["activity_type"], "self-buy");
        assert_eq!(json["transaction_signature"], "5abc");

        let bare = EnrichedActivity::from(activity(None));
        let json = serde_json::to_value(&bare).unwrap();
        assert!(json["token_name"].is_null());
    }

    #[test]
    fn filter_parse_defaults_to_all() {
        assert_eq!(ActivityFilter::parse(None), ActivityFilter::All);
        assert_eq!(ActivityFilter::parse(Some("all")), ActivityFilter::All);
        assert_eq!(ActivityFilter::parse(Some("buy")), ActivityFilter::Buy);
        assert_eq!(ActivityFilter::parse(Some("claim")), ActivityFilter::Claim);
        assert_eq!(ActivityFilter::parse(Some("sell")), ActivityFilter::All);
    }

    #[test]
    fn limit_is_capped_and_defaulted() {
        assert_eq!(clamp_limit(None), 20);
        assert_eq!(clamp_limit(Some("10")), 10);
        assert_eq!(clamp_limit(Some("50")), 50);
        assert_eq!(clamp_limit(Some("500")), 50);
        assert_eq!(clamp_limit(Some("abc")), 20);
        assert_eq!(clamp_limit(Some("")), 20);
        assert_eq!(clamp_limit(Some("0")), 0);
        assert_eq!(clamp_limit(Some("-4")), 0);
    }

    #[test]
    fn limit_keeps_leading_digits() {
        assert_eq!(clamp_limit(Some("7.9")), 7);
        assert_eq!(clamp_limit(Some("10abc")), 10);
        assert_eq!(clamp_limit(Some("  12")), 12);
        assert_eq!(clamp_limit(Some("+3")), 3);
        assert_eq!(clamp_limit(Some("99999999999999999999999")), 50);
        assert_eq!(clamp_limit(Some("-")), 20);
        assert_eq!(clamp_limit(Some(".5")), 20);
    }
}
