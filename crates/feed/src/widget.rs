use chrono::{DateTime, Utc};

use crate::client::FeedItem;
use crate::display::{ActivityKind, explorer_url, format_sol, time_ago};

const SKELETON_ROWS: usize = 3;

/// What the feed currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FeedView {
    /// Nothing has loaded yet.
    #[default]
    Loading,
    Loaded(Vec<FeedItem>),
}

/// A fully formatted feed row.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedRow {
    pub kind: ActivityKind,
    pub title: String,
    pub label: &'static str,
    pub amount: String,
    pub age: String,
    pub link: String,
}

impl FeedRow {
    pub fn new(item: &FeedItem, now: DateTime<Utc>, explorer_base: &str) -> Self {
        let kind = ActivityKind::classify(item.activity_type.as_deref());
        let label = kind.label();
        Self {
            kind,
            title: item.token_name.clone().unwrap_or_else(|| label.to_string()),
            label,
            amount: format!("+{} SOL", format_sol(item.amount_sol)),
            age: time_ago(item.created_at, now),
            link: explorer_url(explorer_base, item.transaction_signature.as_deref()),
        }
    }
}

impl FeedView {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn rows(&self, now: DateTime<Utc>, explorer_base: &str) -> Vec<FeedRow> {
        match self {
            Self::Loading => Vec::new(),
            Self::Loaded(items) => items
                .iter()
                .map(|item| FeedRow::new(item, now, explorer_base))
                .collect(),
        }
    }

    /// Plain-text rendition. `None` once loaded with no records.
    pub fn render(&self, now: DateTime<Utc>, explorer_base: &str) -> Option<String> {
        let mut out = String::new();
        match self {
            Self::Loading => {
                out.push_str("● Recent Activity\n");
                for _ in 0..SKELETON_ROWS {
                    out.push_str("  ░░ ░░░░░░░░░░            ░░░░░░░░ ░░\n");
                }
            }
            Self::Loaded(items) if items.is_empty() => return None,
            Self::Loaded(items) => {
                out.push_str(&format!("● Recent Activity  ({} transactions)\n", items.len()));
                for row in self.rows(now, explorer_base) {
                    out.push_str(&format!(
                        "  {} {:<24} {:<9} {:>16} {:>4}  {}\n",
                        row.kind.glyph(),
                        row.title,
                        row.label,
                        row.amount,
                        row.age,
                        row.link
                    ));
                }
            }
        }
        Some(out)
    }
}
