//! In-memory founders store.
//!
//! Evaluates the same [`ListingQuery`] conditions the Postgres adapter
//! renders to SQL, including latest-id-per-name deduplication. Used by the
//! test suite and for running the gateway without a database.

use crate::domain::{is_blank, FilterField, FounderRecord, ListingQuery};
use crate::ports::{FounderStore, StoreError};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Default)]
pub struct InMemoryFounderStore {
    rows: RwLock<Vec<FounderRecord>>,
    calls: AtomicU64,
    failing: AtomicBool,
}

impl InMemoryFounderStore {
    pub fn new(rows: Vec<FounderRecord>) -> Self {
        Self {
            rows: RwLock::new(rows),
            ..Self::default()
        }
    }

    /// Number of store operations served so far.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    /// Make every subsequent operation fail as if the database were down.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Relaxed);
    }

    fn enter(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if self.failing.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable("in-memory store set to fail".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl FounderStore for InMemoryFounderStore {
    async fn list(&self, query: &ListingQuery) -> Result<Vec<FounderRecord>, StoreError> {
        self.enter()?;

        // BTreeMap keeps names in ascending order, like ORDER BY name.
        let mut latest: BTreeMap<String, FounderRecord> = BTreeMap::new();
        for row in self.rows.read().iter().filter(|r| query.matches(r)) {
            match latest.get(&row.name) {
                Some(existing) if existing.id >= row.id => {}
                _ => {
                    latest.insert(row.name.clone(), row.clone());
                }
            }
        }

        Ok(latest.into_values().collect())
    }

    async fn distinct_values(&self, field: FilterField) -> Result<Vec<String>, StoreError> {
        self.enter()?;

        let column = field.column();
        let values: BTreeSet<String> = self
            .rows
            .read()
            .iter()
            .filter_map(|r| r.text(column))
            .filter(|v| !is_blank(v))
            .map(str::to_string)
            .collect();

        Ok(values.into_iter().collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.enter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recommended(id: i64, name: &str) -> FounderRecord {
        let mut record = FounderRecord::new(id, name);
        record.history = Some("recommended".into());
        record.tree_path = Some("tech/ai".into());
        record.access_date = Some("2024-05-01".into());
        record
    }

    #[tokio::test]
    async fn test_latest_id_wins() {
        let store = InMemoryFounderStore::new(vec![
            recommended(1, "Alice"),
            recommended(5, "Alice"),
            recommended(3, "Alice"),
            recommended(2, "Bob"),
        ]);

        let rows = store
            .list(&ListingQuery::Recommended { path: None })
            .await
            .unwrap();

        let ids: Vec<(String, i64)> = rows.into_iter().map(|r| (r.name, r.id)).collect();
        assert_eq!(ids, vec![("Alice".into(), 5), ("Bob".into(), 2)]);
    }

    #[tokio::test]
    async fn test_dedup_applies_after_filtering() {
        let mut newer_but_hidden = recommended(9, "Alice");
        newer_but_hidden.access_date = None;

        let store = InMemoryFounderStore::new(vec![recommended(4, "Alice"), newer_but_hidden]);
        let rows = store
            .list(&ListingQuery::Recommended { path: None })
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 4);
    }

    #[tokio::test]
    async fn test_distinct_values_skip_blank() {
        let mut rows = Vec::new();
        let locations = [
            (1, Some("SF")),
            (2, Some("")),
            (3, Some("NYC")),
            (4, None),
            (5, Some("SF")),
            (6, Some("  ")),
            (7, Some("\t\r\n")),
            (8, Some("\u{a0}")),
        ];
        for (id, location) in locations {
            let mut r = FounderRecord::new(id, format!("f{id}"));
            r.location = location.map(str::to_string);
            rows.push(r);
        }
        let store = InMemoryFounderStore::new(rows);

        let locations = store.distinct_values(FilterField::Location).await.unwrap();
        assert_eq!(locations, vec!["NYC", "SF", "\u{a0}"]);
    }

    #[tokio::test]
    async fn test_failing_store() {
        let store = InMemoryFounderStore::default();
        store.set_failing(true);
        assert!(store.ping().await.is_err());
        assert_eq!(store.calls(), 1);
    }
}
