// src/notify/mod.rs

//! Notification dispatch over the configured channels.
//!
//! Delivery is fire-and-forget: a failing channel is logged and
//! recorded in the report, and never stops the remaining channels or
//! the scrape. There is no confirmation or retry.

pub mod email;
pub mod oauth;
pub mod social;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Filing;

// Re-export for convenience
pub use email::{EmailChannel, EmailConfig};
pub use social::SocialChannel;

/// A single notification delivery channel.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Short channel name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Attempt to deliver one filing notification.
    async fn deliver(&self, filing: &Filing) -> Result<()>;
}

/// Outcome of dispatching one filing across every enabled channel.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Channels attempted
    pub attempted: usize,

    /// Channel name and error text for each failed attempt
    pub failures: Vec<(String, String)>,
}

impl DeliveryReport {
    /// True when every attempted channel delivered.
    pub fn fully_delivered(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Dispatches filings to the set of enabled channels.
#[derive(Default)]
pub struct Notifier {
    channels: Vec<Box<dyn Channel>>,
}

impl Notifier {
    /// Create a notifier with no channels enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable a delivery channel.
    pub fn with_channel(mut self, channel: Box<dyn Channel>) -> Self {
        self.channels.push(channel);
        self
    }

    /// Number of enabled channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Attempt delivery of a filing through every enabled channel.
    ///
    /// Failures are isolated per channel; the report is observability
    /// only and the caller's control flow must not depend on it.
    pub async fn dispatch(&self, filing: &Filing) -> DeliveryReport {
        let mut report = DeliveryReport::default();
        for channel in &self.channels {
            report.attempted += 1;
            if let Err(error) = channel.deliver(filing).await {
                log::warn!("{} delivery failed: {}", channel.name(), error);
                report
                    .failures
                    .push((channel.name().to_string(), error.to_string()));
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::error::AppError;

    struct CountingChannel {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl Channel for CountingChannel {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn deliver(&self, _filing: &Filing) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(AppError::delivery("counting", "boom"))
            } else {
                Ok(())
            }
        }
    }

    fn filing() -> Filing {
        Filing {
            document_number: "23".to_string(),
            link: "https://ecf.ilnd.uscourts.gov/doc1/1".to_string(),
            case_title: "Duffy v. Godfread et al".to_string(),
            court: "ilnd".to_string(),
            description: "Order".to_string(),
            time: Utc.timestamp_opt(1381154400, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_dispatch_with_no_channels() {
        let report = Notifier::new().dispatch(&filing()).await;
        assert_eq!(report.attempted, 0);
        assert!(report.fully_delivered());
    }

    #[tokio::test]
    async fn test_failing_channel_does_not_block_the_next() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let notifier = Notifier::new()
            .with_channel(Box::new(CountingChannel {
                calls: Arc::clone(&first),
                fail: true,
            }))
            .with_channel(Box::new(CountingChannel {
                calls: Arc::clone(&second),
                fail: false,
            }));

        let report = notifier.dispatch(&filing()).await;

        assert_eq!(report.attempted, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_report_names_the_failed_channel() {
        let notifier = Notifier::new().with_channel(Box::new(CountingChannel {
            calls: Arc::new(AtomicUsize::new(0)),
            fail: true,
        }));

        let report = notifier.dispatch(&filing()).await;

        assert!(!report.fully_delivered());
        assert_eq!(report.failures[0].0, "counting");
        assert!(report.failures[0].1.contains("boom"));
    }
}
