// src/scrape.rs

//! The incremental scrape.
//!
//! One run polls every watched court's feed, walks each feed
//! newest-first down to the persisted watermark, dispatches a
//! notification for every entry whose case is followed, and advances
//! the watermark as it goes. Repeating a run against an unchanged feed
//! set produces no further notifications.

use log::info;

use crate::error::Result;
use crate::extract;
use crate::feed::{Feed, FeedSource};
use crate::models::WatchList;
use crate::notify::Notifier;
use crate::state::StateStore;

/// Summary of one scrape run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScrapeOutcome {
    /// Courts whose feeds were fetched and walked
    pub courts: usize,

    /// Entries inspected before reaching the watermark
    pub entries_scanned: usize,

    /// Entries that matched the watchlist and were dispatched
    pub matches: usize,

    /// Per-channel delivery failures across all matches
    pub delivery_failures: usize,
}

/// Orchestrates feed polling, matching, notification, and watermark
/// bookkeeping for a single run.
///
/// Designed for one non-overlapping invocation at a time; nothing here
/// guards against two concurrent runs racing on the state store.
pub struct Scraper<'a> {
    source: &'a dyn FeedSource,
    state: &'a dyn StateStore,
}

impl<'a> Scraper<'a> {
    pub fn new(source: &'a dyn FeedSource, state: &'a dyn StateStore) -> Self {
        Self { source, state }
    }

    /// Run one scrape over every court in the watchlist.
    ///
    /// A fetch failure for any single court aborts the whole run
    /// before any entries are walked. Per-entry extraction gaps and
    /// per-channel delivery failures never do.
    pub async fn run(&self, watchlist: &WatchList, notifier: &Notifier) -> Result<ScrapeOutcome> {
        info!("Loading feeds...");
        let mut feeds: Vec<(&str, Feed)> = Vec::new();
        for court in watchlist.courts() {
            feeds.push((court, self.source.fetch(court).await?));
        }
        info!("All feeds loaded.");

        // The floor is read once per run: entries at or below it were
        // handled by a previous run. Matches persist their own time
        // immediately, so a crash mid-run keeps the progress made so
        // far.
        let floor = self.state.watermark().await;
        let mut high_water = floor;

        let mut outcome = ScrapeOutcome::default();
        for (court, feed) in &feeds {
            outcome.courts += 1;

            let followed = watchlist
                .cases(court)
                .map(|cases| cases.iter().map(String::as_str).collect::<Vec<_>>())
                .unwrap_or_default();
            info!("Checking {} for {}.", court.to_uppercase(), followed.join(", "));

            for entry in &feed.entries {
                let published = entry.published.timestamp();

                // Entries are assumed newest-first; the first one at or
                // below the floor ends this court's scan.
                if published <= floor {
                    break;
                }
                outcome.entries_scanned += 1;

                if !watchlist.is_followed(court, case_id(&entry.link)) {
                    continue;
                }

                let filing = extract::extract(entry);
                info!(
                    "New entry in {}: {} (doc #{})",
                    court, filing.case_title, filing.document_number
                );

                let report = notifier.dispatch(&filing).await;
                outcome.matches += 1;
                outcome.delivery_failures += report.failures.len();

                // Ignore entries at or before this time from now on.
                // The watermark is one global scalar, not per-court, so
                // courts on a significant lag relative to each other can
                // lose entries to a faster court's newer matches.
                if published > high_water {
                    high_water = published;
                }
                self.state.set_watermark(high_water).await?;
            }
        }

        info!("Scrape completed.");
        Ok(outcome)
    }
}

/// Case identifier of an entry: whatever follows the last `?` of its
/// link, or the whole link when it has no query.
fn case_id(link: &str) -> &str {
    match link.rfind('?') {
        Some(index) => &link[index + 1..],
        None => link,
    }
}
