//! Timestamped listing cache on top of a [`KeyValueStore`].

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{KeyValueStore, StorageError};

/// Stored form of a cached value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEnvelope<T> {
    /// Write time in milliseconds since the Unix epoch.
    pub ts: i64,
    pub data: T,
}

/// Read-through cache whose entries expire after a fixed TTL.
///
/// Anything unreadable (missing key, corrupt JSON, zero timestamp, expired)
/// reads as a miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedCache {
    ttl: Duration,
}

impl Default for TimedCache {
    fn default() -> Self {
        Self::new(Duration::milliseconds(Self::DEFAULT_TTL_MS))
    }
}

impl TimedCache {
    /// Listings are considered fresh for five minutes.
    pub const DEFAULT_TTL_MS: i64 = 5 * 60 * 1000;

    /// Create a cache with the given time-to-live.
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    /// The configured time-to-live.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Read a fresh value, or `None` on any kind of miss.
    pub fn read<T, S>(&self, store: &S, key: &str, now: DateTime<Utc>) -> Option<T>
    where
        T: DeserializeOwned,
        S: KeyValueStore + ?Sized,
    {
        let raw = match store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key, "Cache miss");
                return None;
            }
            Err(e) => {
                debug!(key, error = %e, "Cache read failed");
                return None;
            }
        };

        let envelope: CacheEnvelope<T> = match serde_json::from_str(&raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                debug!(key, error = %e, "Ignoring undecodable cache entry");
                return None;
            }
        };

        if envelope.ts <= 0 {
            return None;
        }

        let age_ms = now.timestamp_millis().saturating_sub(envelope.ts);
        if age_ms > self.ttl.num_milliseconds() {
            debug!(key, age_ms, "Cache entry expired");
            return None;
        }

        debug!(key, age_ms, "Cache hit");
        Some(envelope.data)
    }

    /// Store `data` stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be encoded or the store rejects
    /// the write.
    pub fn write<T, S>(
        &self,
        store: &mut S,
        key: &str,
        data: &T,
        now: DateTime<Utc>,
    ) -> Result<(), StorageError>
    where
        T: Serialize,
        S: KeyValueStore + ?Sized,
    {
        let envelope = CacheEnvelope {
            ts: now.timestamp_millis(),
            data,
        };
        let encoded = serde_json::to_string(&envelope)?;
        store.set(key, &encoded)
    }
}
