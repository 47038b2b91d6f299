//! Watchlist of courts and followed case numbers.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Mapping from court identifier to the set of case numbers of
/// interest in that court.
///
/// Static configuration, read-only during a run. Ordered maps keep
/// court iteration deterministic from run to run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct WatchList {
    courts: BTreeMap<String, BTreeSet<String>>,
}

impl WatchList {
    /// Create an empty watchlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow a case in a court, creating the court entry if needed.
    pub fn follow(&mut self, court: impl Into<String>, case: impl Into<String>) {
        self.courts.entry(court.into()).or_default().insert(case.into());
    }

    /// Add a court with no followed cases yet.
    ///
    /// Its feed is still fetched on every run.
    pub fn add_court(&mut self, court: impl Into<String>) {
        self.courts.entry(court.into()).or_default();
    }

    /// Iterate over watched court identifiers.
    pub fn courts(&self) -> impl Iterator<Item = &str> {
        self.courts.keys().map(String::as_str)
    }

    /// Case numbers followed in a court.
    pub fn cases(&self, court: &str) -> Option<&BTreeSet<String>> {
        self.courts.get(court)
    }

    /// Whether a case identifier is followed in a court.
    pub fn is_followed(&self, court: &str, case: &str) -> bool {
        self.courts.get(court).is_some_and(|cases| cases.contains(case))
    }

    /// Number of watched courts.
    pub fn court_count(&self) -> usize {
        self.courts.len()
    }

    /// True when no court is watched at all.
    pub fn is_empty(&self) -> bool {
        self.courts.is_empty()
    }
}
