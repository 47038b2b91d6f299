// src/state.rs

//! Persisted scalar state: the watermark and the kill switch.
//!
//! Both values treat a missing or unreadable backing resource as
//! "never set". The watermark file holds one newline-terminated
//! decimal Unix timestamp; the kill switch is a marker file whose
//! first line must be non-trivial for the switch to count as engaged.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::Result;

/// Name of the watermark file inside the state directory.
const WATERMARK_FILE: &str = "lasttime";

/// Name of the kill-switch marker file.
const KILL_SWITCH_FILE: &str = "killswitch";

/// Store for the scrape's persisted scalar state.
///
/// The scrape reads the watermark once per run and writes it once per
/// matched entry; the kill switch is read once at process start and
/// only ever written by an operator.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Last successfully processed publication time, as a Unix
    /// timestamp; 0 when never set.
    async fn watermark(&self) -> i64;

    /// Overwrite the persisted watermark.
    async fn set_watermark(&self, time: i64) -> Result<()>;

    /// Whether the operator kill switch is engaged. Absence of the
    /// marker is not an error.
    async fn kill_switch_engaged(&self) -> bool;
}

/// File-backed store rooted at a state directory.
pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    /// Create a store rooted at the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_atomic(&self, name: &str, bytes: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.path(name);
        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Engage the kill switch. Done by an operator, never by a run.
    pub async fn engage_kill_switch(&self) -> Result<()> {
        self.write_atomic(KILL_SWITCH_FILE, b"script disabled\n").await
    }

    /// Clear the kill switch; clearing an absent switch is fine.
    pub async fn clear_kill_switch(&self) -> Result<()> {
        match tokio::fs::remove_file(self.path(KILL_SWITCH_FILE)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn watermark(&self) -> i64 {
        match tokio::fs::read_to_string(self.path(WATERMARK_FILE)).await {
            Ok(content) => content.trim().parse().unwrap_or_else(|_| {
                log::debug!("Watermark file held no parsable timestamp; treating as never set");
                0
            }),
            Err(_) => 0,
        }
    }

    async fn set_watermark(&self, time: i64) -> Result<()> {
        self.write_atomic(WATERMARK_FILE, format!("{time}\n").as_bytes())
            .await
    }

    async fn kill_switch_engaged(&self) -> bool {
        match tokio::fs::read_to_string(self.path(KILL_SWITCH_FILE)).await {
            Ok(content) => content
                .lines()
                .next()
                .is_some_and(|line| line.trim().len() > 1),
            Err(_) => false,
        }
    }
}

/// In-memory store for deterministic tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    watermark: AtomicI64,
    kill_switch: AtomicBool,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a given watermark.
    pub fn with_watermark(time: i64) -> Self {
        Self {
            watermark: AtomicI64::new(time),
            kill_switch: AtomicBool::new(false),
        }
    }

    pub fn set_kill_switch(&self, engaged: bool) {
        self.kill_switch.store(engaged, Ordering::SeqCst);
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn watermark(&self) -> i64 {
        self.watermark.load(Ordering::SeqCst)
    }

    async fn set_watermark(&self, time: i64) -> Result<()> {
        self.watermark.store(time, Ordering::SeqCst);
        Ok(())
    }

    async fn kill_switch_engaged(&self) -> bool {
        self.kill_switch.load(Ordering::SeqCst)
    }
}
