use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio::sync::RwLock;

use crate::error::{Error, Result};

use super::query::QueryParams;
use super::{Record, RecordPatch, RecordStore};

/// In-memory fallback store. Mimics the hosted record API: collections of
/// records with unique incrementing identifiers, plus a small artificial
/// latency so callers exercise the same suspension points as in production.
///
/// All access goes through one `RwLock`, so a batched update is atomic with
/// respect to concurrent readers.
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Record>>>,
    latency: Duration,
}

impl MemoryStore {
    pub fn new(latency: Duration) -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            latency,
        }
    }

    /// Fallback store pre-populated with demo jobs and interview questions.
    pub fn with_seed(latency: Duration) -> Self {
        let store = Self::new(latency);
        {
            let mut guard = store
                .collections
                .try_write()
                .expect("fresh store lock is uncontended");
            for (collection, records) in super::seed::seed_records() {
                guard.insert(collection.to_string(), records);
            }
        }
        store
    }

    async fn simulate_latency(&self) {
        if self.latency.is_zero() {
            return;
        }
        let base = self.latency.as_millis() as u64;
        let jitter = rand::thread_rng().gen_range(0..=base / 4);
        tokio::time::sleep(Duration::from_millis(base + jitter)).await;
    }

    fn next_id(records: &[Record]) -> i64 {
        records.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn fetch(&self, collection: &str, params: QueryParams) -> Result<Vec<Record>> {
        self.simulate_latency().await;
        let guard = self.collections.read().await;
        let records = guard.get(collection).map(Vec::as_slice).unwrap_or(&[]);
        Ok(params.apply(records))
    }

    async fn get_by_id(&self, collection: &str, id: i64) -> Result<Option<Record>> {
        self.simulate_latency().await;
        let guard = self.collections.read().await;
        Ok(guard
            .get(collection)
            .and_then(|records| records.iter().find(|r| r.id == id).cloned()))
    }

    async fn create(&self, collection: &str, records: Vec<Record>) -> Result<Vec<Record>> {
        self.simulate_latency().await;
        let mut guard = self.collections.write().await;
        let existing = guard.entry(collection.to_string()).or_default();
        let mut next = Self::next_id(existing);
        let mut created = Vec::with_capacity(records.len());
        for mut record in records {
            record.id = next;
            next += 1;
            existing.push(record.clone());
            created.push(record);
        }
        Ok(created)
    }

    async fn update(&self, collection: &str, patches: Vec<RecordPatch>) -> Result<Vec<Record>> {
        self.simulate_latency().await;
        let mut guard = self.collections.write().await;
        let records = guard
            .get_mut(collection)
            .ok_or_else(|| Error::NotFound(format!("Collection {} is empty", collection)))?;

        // Validate the whole batch before touching anything, so a bad id
        // cannot leave the collection half-updated.
        for patch in &patches {
            if !records.iter().any(|r| r.id == patch.id) {
                return Err(Error::NotFound(format!(
                    "No record {} in {}",
                    patch.id, collection
                )));
            }
        }

        let mut updated = Vec::with_capacity(patches.len());
        for patch in patches {
            let record = records
                .iter_mut()
                .find(|r| r.id == patch.id)
                .expect("validated above");
            for (field, value) in patch.fields {
                record.fields.insert(field, value);
            }
            updated.push(record.clone());
        }
        Ok(updated)
    }

    async fn delete(&self, collection: &str, ids: Vec<i64>) -> Result<()> {
        self.simulate_latency().await;
        let mut guard = self.collections.write().await;
        let records = guard
            .get_mut(collection)
            .ok_or_else(|| Error::NotFound(format!("Collection {} is empty", collection)))?;

        for id in &ids {
            if !records.iter().any(|r| r.id == *id) {
                return Err(Error::NotFound(format!("No record {} in {}", id, collection)));
            }
        }

        records.retain(|r| !ids.contains(&r.id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> MemoryStore {
        MemoryStore::new(Duration::ZERO)
    }

    fn named(name: &str) -> Record {
        let mut r = Record::new(0);
        r.set("name", json!(name));
        r
    }

    #[tokio::test]
    async fn identifiers_start_at_one_and_increment_past_max() {
        let store = store();
        let first = store.create("things", vec![named("a")]).await.unwrap();
        assert_eq!(first[0].id, 1);

        let more = store
            .create("things", vec![named("b"), named("c")])
            .await
            .unwrap();
        assert_eq!(more[0].id, 2);
        assert_eq!(more[1].id, 3);

        store.delete("things", vec![2]).await.unwrap();
        let next = store.create("things", vec![named("d")]).await.unwrap();
        assert_eq!(next[0].id, 4);
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found_and_changes_nothing() {
        let store = store();
        store.create("things", vec![named("a")]).await.unwrap();

        let mut good = RecordPatch::new(1);
        good.set("name", json!("changed"));
        let bad = RecordPatch::new(99);

        let err = store.update("things", vec![good, bad]).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        let all = store.fetch("things", QueryParams::new()).await.unwrap();
        assert_eq!(all[0].text("name"), Some("a"));
    }

    #[tokio::test]
    async fn delete_missing_id_is_not_found_and_changes_nothing() {
        let store = store();
        store.create("things", vec![named("a")]).await.unwrap();

        let err = store.delete("things", vec![1, 42]).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        let all = store.fetch("things", QueryParams::new()).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn batched_update_applies_every_patch() {
        let store = store();
        store
            .create("things", vec![named("a"), named("b"), named("c")])
            .await
            .unwrap();

        let patches = (1..=3)
            .map(|id| {
                let mut p = RecordPatch::new(id);
                p.set("flag", json!(id == 2));
                p
            })
            .collect();
        store.update("things", patches).await.unwrap();

        let all = store.fetch("things", QueryParams::new()).await.unwrap();
        let flagged: Vec<i64> = all
            .iter()
            .filter(|r| r.boolean("flag") == Some(true))
            .map(|r| r.id)
            .collect();
        assert_eq!(flagged, vec![2]);
    }

    #[tokio::test]
    async fn fetch_on_unknown_collection_is_empty() {
        let store = store();
        let all = store.fetch("nothing", QueryParams::new()).await.unwrap();
        assert!(all.is_empty());
    }
}
