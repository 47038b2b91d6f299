// src/feed/mod.rs

//! Feed retrieval abstractions.
//!
//! A [`FeedSource`] turns a court identifier into that court's docket
//! feed. Retrieval is unreliable I/O: a non-success status or a
//! transport failure surfaces as an error naming the court, which the
//! scrape treats as fatal for the whole run.

pub mod http;
pub mod rss;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::FeedEntry;

// Re-export for convenience
pub use http::HttpFeedSource;

/// A fetched court docket feed.
#[derive(Debug, Clone)]
pub struct Feed {
    /// HTTP status the feed document was served with
    pub status: u16,

    /// Entries in the order the feed returned them.
    ///
    /// Court feeds are assumed to list entries newest-first; the
    /// protocol does not guarantee it, and the scrape relies on it to
    /// stop at the watermark.
    pub entries: Vec<FeedEntry>,
}

/// Trait for court docket feed sources.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the docket feed for a single court.
    ///
    /// Fails with [`crate::error::AppError::Fetch`] when the feed is
    /// served with a non-success status.
    async fn fetch(&self, court: &str) -> Result<Feed>;
}
