//! Server-rendered pages: root layout, home with the recent-activity widget,
//! and the FAQ accordion.

use axum::{extract::State, response::Html};
use chrono::Utc;
use memeproto_feed::{FEED_LIMIT, FeedItem, widget::FeedRow};
use memeproto_storage::{
    self as storage,
    models::{ActivityFilter, EnrichedActivity},
};
use std::sync::Arc;

use crate::AppState;

const SITE_TITLE: &str = "Meme Protocol";
const SITE_DESCRIPTION: &str = "All Roads Lead to Meme";

const STYLE: &str = r#"
body { margin: 0; background: #000; color: #f5f5f7; font-family: 'Pixelify Sans', sans-serif; }
a { color: inherit; text-decoration: none; }
main { max-width: 42rem; margin: 0 auto; padding: 1.5rem; }
.back { position: absolute; top: 3%; left: 3%; color: #6b7280; font-size: 1.5rem; }
.faq details { background: #111; border-radius: .75rem; margin-bottom: 1rem; padding: 1.25rem 1.5rem; }
.faq summary { cursor: pointer; font-weight: 600; font-size: 1.125rem; }
.faq p { color: #d1d5db; line-height: 1.6; }
.feed { background: #0d0d0d; border: 1px solid #1c1c1e; border-radius: 1rem; overflow: hidden; }
.feed header { display: flex; justify-content: space-between; padding: .75rem 1.25rem; border-bottom: 1px solid #1c1c1e; font-size: 13px; }
.feed header span { color: #86868b; font-size: 11px; }
.feed ol { list-style: none; margin: 0; padding: .375rem; max-height: 420px; overflow-y: auto; }
.feed li a { display: flex; gap: .75rem; align-items: center; padding: .625rem .75rem; border-radius: .75rem; }
.feed li a:hover { background: #1c1c1e80; }
.feed .info { flex: 1; min-width: 0; }
.feed .label, .feed .age { color: #86868b; font-size: 12px; }
.feed .amount { color: #30d158; font-weight: 600; text-align: right; }
.icon { width: 2.25rem; height: 2.25rem; border-radius: 9999px; display: flex; align-items: center; justify-content: center; }
.icon-target { background: #3b82f61a; } .icon-self { background: #a855f71a; }
.icon-combined { background: #eab3081a; } .icon-buy { background: #22c55e1a; }
"#;

const FAQS: [(&str, &str); 5] = [
    (
        "How it works?",
        "Meme Protocol allows users to launch tokens on pump.fun and guarentee all value remains within the Meme Ecosystem. This leads to healthier markets and tokens. 100% of creator fees get used to support the token and the overall Meme Ecosystem.",
    ),
    (
        "What happens with fees?",
        "50% go to buying back the token and 50% go to buying $MEME which will then be strategically allocated to top performers. This creates a positive flywheel for the ecosystem.",
    ),
    (
        "Do I need to pay for launch?",
        "No. As of current we will fund all platform launches. In the future there may be a small fee to combat spam/low quality launches.",
    ),
    (
        "Why we need this?",
        "Most pump tokens get thousands of $$ extracted from their chart. With Meme Protocol 100% of value stays within the Meme Ecosystem strengthening all participants. It's simple really.",
    ),
    (
        "Who are we?",
        "We are a small group of chad devs and traders who are sick of the mass extraction. We set out to build a quality product the trenches genuinely need.",
    ),
];

// ─── Handlers ───────────────────────────────────────────────────────────────

/// GET / — landing page with the recent buys widget.
///
/// The page reloads itself on the feed interval, which stands in for the
/// widget's client-side polling.
pub async fn home(State(state): State<Arc<AppState>>) -> Html<String> {
    let rows: Vec<FeedRow> = match storage::repos::get_recent_activities(
        &state.pool,
        ActivityFilter::Buy,
        i64::from(FEED_LIMIT),
    )
    .await
    {
        Ok(activities) => {
            let now = Utc::now();
            activities
                .into_iter()
                .map(|a| feed_item(EnrichedActivity::from(a)))
                .map(|item| FeedRow::new(&item, now, &state.settings.explorer_tx_url))
                .collect()
        }
        Err(e) => {
            tracing::error!(error = %e, "Error fetching buys");
            Vec::new()
        }
    };

    let mut body = format!(
        r#"<main><h1>{}</h1><p>{}</p><nav><a href="/faq">FAQs</a></nav>"#,
        escape(SITE_TITLE),
        escape(SITE_DESCRIPTION)
    );
    if let Some(widget) = render_feed(&rows) {
        body.push_str(&widget);
    }
    body.push_str("</main>");

    Html(layout(&body, Some(state.settings.feed_poll_secs)))
}

/// GET /faq — accordion of fixed questions.
pub async fn faq() -> Html<String> {
    let mut body = String::from(
        r#"<a class="back" href="/" aria-label="Back">&larr;</a><main class="faq"><h1>FAQs</h1>"#,
    );
    for (question, answer) in FAQS {
        body.push_str(&format!(
            "<details><summary>{}</summary><p>{}</p></details>",
            escape(question),
            escape(answer)
        ));
    }
    body.push_str("</main>");
    Html(layout(&body, None))
}

// ─── Rendering ──────────────────────────────────────────────────────────────

/// Root document shell shared by every page.
fn layout(body: &str, refresh_secs: Option<u64>) -> String {
    let refresh = refresh_secs
        .map(|s| format!(r#"<meta http-equiv="refresh" content="{s}">"#))
        .unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="{description}">
{refresh}
<link rel="stylesheet" href="https://fonts.googleapis.com/css2?family=Pixelify+Sans&display=swap">
<style>{STYLE}</style>
</head>
<body>{body}</body>
</html>"#,
        title = escape(SITE_TITLE),
        description = escape(SITE_DESCRIPTION),
    )
}

/// Recent activity list; `None` when there is nothing to show.
fn render_feed(rows: &[FeedRow]) -> Option<String> {
    if rows.is_empty() {
        return None;
    }

    let mut html = format!(
        r#"<section class="feed"><header>Recent Activity<span>{} transactions</span></header><ol>"#,
        rows.len()
    );
    for row in rows {
        html.push_str(&format!(
            r#"<li><a href="{link}" target="_blank" rel="noopener noreferrer"><div class="icon {icon}">{glyph}</div><div class="info"><div>{title}</div><div class="label">{label}</div></div><div><div class="amount">{amount}</div><div class="age">{age}</div></div></a></li>"#,
            link = escape(&row.link),
            icon = row.kind.css_class(),
            glyph = escape(row.kind.glyph()),
            title = escape(&row.title),
            label = escape(row.label),
            amount = escape(&row.amount),
            age = escape(&row.age),
        ));
    }
    html.push_str("</ol></section>");
    Some(html)
}

fn feed_item(enriched: EnrichedActivity) -> FeedItem {
    let EnrichedActivity {
        activity,
        token_name,
    } = enriched;
    FeedItem {
        id: Some(activity.id),
        activity_type: Some(activity.activity_type),
        token_name,
        transaction_signature: activity.transaction_signature,
        amount_sol: activity.amount_sol,
        created_at: activity.created_at,
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
