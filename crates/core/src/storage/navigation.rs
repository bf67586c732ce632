//! Return-to markers.
//!
//! Opening a work or product detail page records where the visitor came
//! from, so the listing can restore the selected service and scroll back to
//! the card. A marker is consumed by the first [`ReturnPoint::take`].

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Utc};

use super::{KeyValueStore, StorageError, keys};
use crate::types::{ProductId, WorkId};

/// Listing page a detail view was opened from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnSource {
    Home,
    Services,
    Products,
}

impl ReturnSource {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Services => "services",
            Self::Products => "products",
        }
    }
}

impl fmt::Display for ReturnSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReturnSource {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(Self::Home),
            "services" => Ok(Self::Services),
            "products" => Ok(Self::Products),
            other => Err(StorageError::Backend(format!(
                "unknown return source '{other}'"
            ))),
        }
    }
}

/// Where to send the visitor back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnPoint {
    pub source: ReturnSource,
    pub work_id: Option<WorkId>,
    pub product_id: Option<ProductId>,
    pub service_key: Option<String>,
    pub service_tag: Option<String>,
    pub recorded_at: Option<DateTime<Utc>>,
}

impl ReturnPoint {
    /// A marker pointing back at `source` with nothing selected.
    #[must_use]
    pub const fn new(source: ReturnSource) -> Self {
        Self {
            source,
            work_id: None,
            product_id: None,
            service_key: None,
            service_tag: None,
            recorded_at: None,
        }
    }

    /// Record this marker, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects a write.
    pub fn remember<S>(&self, store: &mut S, now: DateTime<Utc>) -> Result<(), StorageError>
    where
        S: KeyValueStore + ?Sized,
    {
        clear(store)?;
        store.set(keys::RETURN_TO_SOURCE, self.source.as_str())?;
        store.set(keys::RETURN_TO_TIME, &now.timestamp_millis().to_string())?;
        if let Some(id) = &self.work_id {
            store.set(keys::RETURN_TO_WORK_ID, id.as_str())?;
        }
        if let Some(id) = &self.product_id {
            store.set(keys::RETURN_TO_PRODUCT_ID, id.as_str())?;
        }
        if let Some(key) = &self.service_key {
            store.set(keys::RETURN_TO_SERVICE_KEY, key)?;
        }
        if let Some(tag) = &self.service_tag {
            store.set(keys::RETURN_TO_SERVICE_TAG, tag)?;
        }
        Ok(())
    }

    /// Read and delete the current marker.
    ///
    /// Returns `Ok(None)` when no marker (or an unrecognized one) is stored;
    /// the keys are cleared either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or cleared.
    pub fn take<S>(store: &mut S) -> Result<Option<Self>, StorageError>
    where
        S: KeyValueStore + ?Sized,
    {
        let source = store
            .get(keys::RETURN_TO_SOURCE)?
            .and_then(|s| s.parse::<ReturnSource>().ok());

        let point = match source {
            Some(source) => Some(Self {
                source,
                work_id: store.get(keys::RETURN_TO_WORK_ID)?.map(WorkId::from),
                product_id: store.get(keys::RETURN_TO_PRODUCT_ID)?.map(ProductId::from),
                service_key: store.get(keys::RETURN_TO_SERVICE_KEY)?,
                service_tag: store.get(keys::RETURN_TO_SERVICE_TAG)?,
                recorded_at: store
                    .get(keys::RETURN_TO_TIME)?
                    .and_then(|ms| ms.parse::<i64>().ok())
                    .and_then(DateTime::from_timestamp_millis),
            }),
            None => None,
        };

        clear(store)?;
        Ok(point)
    }
}

fn clear<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<(), StorageError> {
    for key in [
        keys::RETURN_TO_SOURCE,
        keys::RETURN_TO_WORK_ID,
        keys::RETURN_TO_PRODUCT_ID,
        keys::RETURN_TO_SERVICE_KEY,
        keys::RETURN_TO_SERVICE_TAG,
        keys::RETURN_TO_TIME,
    ] {
        store.remove(key)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_remember_then_take_consumes_marker() {
        let mut store = MemoryStore::new();
        let now = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();

        let point = ReturnPoint {
            work_id: Some(WorkId::new("w1")),
            service_key: Some("acoustic".to_string()),
            service_tag: Some("Acoustic".to_string()),
            ..ReturnPoint::new(ReturnSource::Services)
        };
        point.remember(&mut store, now).unwrap();

        let taken = ReturnPoint::take(&mut store).unwrap().unwrap();
        assert_eq!(taken.source, ReturnSource::Services);
        assert_eq!(taken.work_id, Some(WorkId::new("w1")));
        assert_eq!(taken.service_tag.as_deref(), Some("Acoustic"));
        assert_eq!(taken.recorded_at, Some(now));

        assert_eq!(ReturnPoint::take(&mut store).unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_remember_replaces_previous_marker() {
        let mut store = MemoryStore::new();
        let now = Utc::now();

        ReturnPoint {
            work_id: Some(WorkId::new("old")),
            ..ReturnPoint::new(ReturnSource::Services)
        }
        .remember(&mut store, now)
        .unwrap();

        ReturnPoint {
            product_id: Some(ProductId::new("p9")),
            ..ReturnPoint::new(ReturnSource::Products)
        }
        .remember(&mut store, now)
        .unwrap();

        let taken = ReturnPoint::take(&mut store).unwrap().unwrap();
        assert_eq!(taken.source, ReturnSource::Products);
        assert_eq!(taken.work_id, None);
        assert_eq!(taken.product_id, Some(ProductId::new("p9")));
    }

    #[test]
    fn test_unknown_source_is_discarded() {
        let mut store = MemoryStore::new();
        store.set(keys::RETURN_TO_SOURCE, "elsewhere").unwrap();
        store.set(keys::RETURN_TO_WORK_ID, "w1").unwrap();

        assert_eq!(ReturnPoint::take(&mut store).unwrap(), None);
        assert!(store.is_empty());
    }
}
