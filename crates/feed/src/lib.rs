//! Recent-activity feed: formatting helpers shared with the API's HTML
//! widget, an HTTP client for `/api/activity`, and a polling task.

pub mod client;
pub mod display;
pub mod poller;
pub mod widget;

pub use client::{ActivityClient, ActivitySource, FeedItem};
pub use poller::Poller;
pub use widget::FeedView;

/// Number of buy records the widget asks for.
pub const FEED_LIMIT: u32 = 20;
