use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::client::ActivitySource;
use crate::widget::FeedView;

/// Background refresh of the feed.
///
/// Fetches once immediately, then on every tick. Each tick's fetch runs on its
/// own task and publishes whatever it gets, so overlapping fetches resolve as
/// last write wins. Dropping the poller stops the timer.
pub struct Poller {
    handle: JoinHandle<()>,
    rx: watch::Receiver<FeedView>,
}

impl Poller {
    pub fn spawn(source: Arc<dyn ActivitySource>, every: Duration) -> Self {
        let (tx, rx) = watch::channel(FeedView::Loading);
        let tx = Arc::new(tx);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let source = Arc::clone(&source);
                let tx = Arc::clone(&tx);
                tokio::spawn(async move { refresh(source.as_ref(), &tx).await });
            }
        });

        Self { handle, rx }
    }

    /// A receiver that sees every view published after spawn.
    pub fn subscribe(&self) -> watch::Receiver<FeedView> {
        self.rx.clone()
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn refresh(source: &dyn ActivitySource, tx: &watch::Sender<FeedView>) {
    match source.fetch_recent_buys().await {
        Ok(items) => {
            tracing::debug!(count = items.len(), "Feed refreshed");
            tx.send_replace(FeedView::Loaded(items));
        }
        Err(e) => {
            tracing::error!(error = %e, "Error fetching buys");
            // Keep the last good list; only leave the loading state.
            tx.send_if_modified(|view| {
                if view.is_loading() {
                    *view = FeedView::Loaded(Vec::new());
                    true
                } else {
                    false
                }
            });
        }
    }
}
