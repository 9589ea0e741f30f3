use chrono::{DateTime, Utc};

/// Display classification of an activity, decided by substrings of its type.
///
/// Checked in order: "target", "self", "combined"; anything else is a plain buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    /// Fees used to buy a designated ecosystem token.
    TargetBuy,
    /// Fees used to buy back the launched token.
    Buyback,
    Combined,
    Buy,
}

impl ActivityKind {
    pub fn classify(activity_type: Option<&str>) -> Self {
        let Some(t) = activity_type else {
            return Self::Buy;
        };
        if t.contains("target") {
            Self::TargetBuy
        } else if t.contains("self") {
            Self::Buyback
        } else if t.contains("combined") {
            Self::Combined
        } else {
            Self::Buy
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::TargetBuy | Self::Combined => "MEME Buy",
            Self::Buyback => "Buyback",
            Self::Buy => "Buy",
        }
    }

    /// Short glyph used by the terminal renderer.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::TargetBuy => "▲",
            Self::Buyback => "↻",
            Self::Combined => "⚡",
            Self::Buy => "$",
        }
    }

    /// Icon accent used by the HTML renderer.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::TargetBuy => "icon-target",
            Self::Buyback => "icon-self",
            Self::Combined => "icon-combined",
            Self::Buy => "icon-buy",
        }
    }
}

/// Compact age of `created_at` relative to `now`: `45s`, `2m`, `2h`, `2d`.
pub fn time_ago(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - created_at).num_seconds().max(0);
    if seconds < 60 {
        return format!("{seconds}s");
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{minutes}m");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h");
    }
    format!("{}d", hours / 24)
}

/// SOL amount rounded half away from zero to four decimals; `"0"` when
/// absent or zero.
pub fn format_sol(amount: Option<f64>) -> String {
    match amount {
        Some(a) if a != 0.0 => format!("{:.4}", (a * 1e4).round() / 1e4),
        _ => "0".to_string(),
    }
}

/// Explorer link for a transaction, or `"#"` when there is no signature.
pub fn explorer_url(base: &str, signature: Option<&str>) -> String {
    match signature {
        Some(sig) if !sig.is_empty() => format!("{}/{}", base.trim_end_matches('/'), sig),
        _ => "#".to_string(),
    }
}
