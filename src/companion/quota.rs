//! Daily request quota tracking and enforcement
//!
//! Counts how many AI requests were made on the current calendar day and
//! refuses further requests once the daily ceiling is reached. The count
//! lives in the key-value store under [`USAGE_KEY`] so it survives restarts.

use crate::error::SoulCareError;
use crate::storage::KeyValueStore;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Maximum number of AI requests allowed per calendar day
pub const MAX_DAILY_REQUESTS: u32 = 10;

/// Storage key for the persisted [`UsageRecord`]
pub const USAGE_KEY: &str = "apiUsage";

/// Persisted request count for one calendar day
///
/// `count` only applies when `date` is today; a stale date means no
/// requests have been made today.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Day the count applies to, e.g. `"Mon Oct 19 2026"`
    #[serde(default)]
    pub date: String,

    /// Requests made so far on `date`
    #[serde(default)]
    pub count: u32,
}

impl UsageRecord {
    fn is_for(&self, today: &str) -> bool {
        self.date == today
    }
}

/// Format a day the way usage records store it
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use soulcare::companion::quota::usage_date;
///
/// let day = NaiveDate::from_ymd_opt(2026, 10, 5).unwrap();
/// assert_eq!(usage_date(day), "Mon Oct 05 2026");
/// ```
pub fn usage_date(day: NaiveDate) -> String {
    day.format("%a %b %d %Y").to_string()
}

/// Today's date in local time, formatted for a usage record
pub fn today() -> String {
    usage_date(Local::now().date_naive())
}

/// Per-day request quota backed by a key-value store
///
/// Every call reads the record fresh from storage, so several trackers over
/// the same store see each other's writes. They do not coordinate, though:
/// concurrent read-modify-write cycles can lose an increment.
pub struct QuotaTracker<S: KeyValueStore> {
    store: S,
    ceiling: u32,
}

impl<S: KeyValueStore> QuotaTracker<S> {
    /// Creates a tracker enforcing [`MAX_DAILY_REQUESTS`]
    ///
    /// # Examples
    ///
    /// ```
    /// use soulcare::companion::QuotaTracker;
    /// use soulcare::storage::MemoryStore;
    ///
    /// let tracker = QuotaTracker::new(MemoryStore::new());
    /// assert_eq!(tracker.remaining(), 10);
    /// assert!(tracker.check_and_consume());
    /// assert_eq!(tracker.remaining(), 9);
    /// ```
    pub fn new(store: S) -> Self {
        Self::with_ceiling(store, MAX_DAILY_REQUESTS)
    }

    /// Creates a tracker with a custom daily ceiling
    pub fn with_ceiling(store: S, ceiling: u32) -> Self {
        Self { store, ceiling }
    }

    /// The daily ceiling this tracker enforces
    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    /// Checks the quota and consumes one request if any remain
    ///
    /// Returns `false` without touching storage when today's count has
    /// reached the ceiling. Otherwise increments the count, persists it, and
    /// returns `true`. A failed write is logged and the request is still
    /// allowed.
    pub fn check_and_consume(&self) -> bool {
        let today = today();
        let mut record = self.usage();

        if !record.is_for(&today) {
            record.date = today;
            record.count = 0;
        }

        if record.count >= self.ceiling {
            tracing::info!(
                count = record.count,
                ceiling = self.ceiling,
                "Daily request limit reached"
            );
            return false;
        }

        record.count += 1;
        if let Err(e) = self.persist(&record) {
            tracing::warn!("Failed to persist request usage: {}", e);
        }

        tracing::debug!(count = record.count, ceiling = self.ceiling, "Consumed request");
        true
    }

    /// Requests left today, never below zero
    ///
    /// Read-only: a stale record is reported as a full allowance but is not
    /// rewritten.
    pub fn remaining(&self) -> u32 {
        let record = self.usage();
        if !record.is_for(&today()) {
            return self.ceiling;
        }
        self.ceiling.saturating_sub(record.count)
    }

    /// The stored usage record, or the default if it is absent or unreadable
    pub fn usage(&self) -> UsageRecord {
        let raw = match self.store.get(USAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return UsageRecord::default(),
            Err(e) => {
                tracing::warn!("Failed to read request usage, assuming none: {}", e);
                return UsageRecord::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Malformed request usage record, assuming none: {}", e);
            UsageRecord::default()
        })
    }

    fn persist(&self, record: &UsageRecord) -> crate::error::Result<()> {
        let json = serde_json::to_string(record).map_err(SoulCareError::from)?;
        self.store.set(USAGE_KEY, &json)
    }
}
