//! Recent Activity feed in the terminal.
//!
//! Polls `/api/activity?type=buy&limit=20` on the configured interval and
//! reprints the widget whenever a fetch lands. Ctrl-C stops the timer.

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use eyre::Result;
use memeproto_core::{Settings, telemetry};
use memeproto_feed::{ActivityClient, FeedView, Poller};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();
    let settings = Settings::from_env()?;

    let client = ActivityClient::new(settings.api_url.as_str())?;
    tracing::info!(
        endpoint = %client.endpoint(),
        every_secs = settings.feed_poll_secs,
        "Starting activity feed"
    );

    let poller = Poller::spawn(
        Arc::new(client),
        Duration::from_secs(settings.feed_poll_secs),
    );
    let mut views = poller.subscribe();

    print_view(&FeedView::Loading, &settings);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::info!("Shutting down feed…");
                break;
            }
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                print_view(&view, &settings);
            }
        }
    }

    drop(poller);
    Ok(())
}

fn print_view(view: &FeedView, settings: &Settings) {
    // Clear the screen so the widget redraws in place.
    print!("\x1B[2J\x1B[H");
    if let Some(text) = view.render(Utc::now(), &settings.explorer_tx_url) {
        print!("{text}");
    }
}
