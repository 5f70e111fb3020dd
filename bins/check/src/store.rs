//! Entry store backed by a local JSON file.
//!
//! The file holds an array of `{ "id": .., "entry": { .. } }` records. Used
//! when running the checker without a backend.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use lancamento_core::ledger::{EntryPayload, EntryStore};
use lancamento_shared::types::EntryId;
use lancamento_shared::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry {
    id: EntryId,
    #[serde(rename = "entry")]
    payload: EntryPayload,
}

/// Saves entries into a JSON file.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Creates a store writing to `path`. The file is created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> AppResult<Vec<StoredEntry>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|err| {
                AppError::Internal(format!("{} is not an entry file: {err}", self.path.display()))
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(AppError::Internal(err.to_string())),
        }
    }

    async fn write_all(&self, entries: &[StoredEntry]) -> AppResult<()> {
        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|err| AppError::Internal(err.to_string()))?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|err| AppError::Internal(err.to_string()))
    }
}

#[async_trait]
impl EntryStore for JsonFileStore {
    async fn save(&self, payload: &EntryPayload) -> AppResult<EntryId> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;
        let last = entries.iter().map(|e| e.id.into_inner()).max().unwrap_or(0);
        let next = last.checked_add(1).ok_or_else(|| {
            AppError::Internal(format!("{} has no entry ids left", self.path.display()))
        })?;
        let id = EntryId::new(next);
        entries.push(StoredEntry {
            id,
            payload: payload.clone(),
        });
        self.write_all(&entries).await?;
        Ok(id)
    }

    async fn update(&self, id: EntryId, payload: &EntryPayload) -> AppResult<EntryId> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;
        let stored = entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| AppError::NotFound(format!("entry {id}")))?;
        stored.payload = payload.clone();
        self.write_all(&entries).await?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lancamento_core::ledger::{EntryKind, PayloadLine};
    use lancamento_shared::types::{AccountId, DescriptionId};
    use rust_decimal_macros::dec;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("lancamento-{}-{name}.json", std::process::id()))
    }

    fn payload(amount: rust_decimal::Decimal) -> EntryPayload {
        EntryPayload {
            entry_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            description: DescriptionId::new(1),
            note: None,
            line_items: vec![
                PayloadLine {
                    account: AccountId::new(10),
                    kind: EntryKind::Debit,
                    amount,
                },
                PayloadLine {
                    account: AccountId::new(20),
                    kind: EntryKind::Credit,
                    amount,
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_save_assigns_increasing_ids() {
        let path = temp_path("save");
        let _ = std::fs::remove_file(&path);
        let store = JsonFileStore::new(&path);

        assert_eq!(store.save(&payload(dec!(10))).await.unwrap(), EntryId::new(1));
        assert_eq!(store.save(&payload(dec!(20))).await.unwrap(), EntryId::new(2));
        assert_eq!(store.read_all().await.unwrap().len(), 2);

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_update_replaces_payload() {
        let path = temp_path("update");
        let _ = std::fs::remove_file(&path);
        let store = JsonFileStore::new(&path);

        let id = store.save(&payload(dec!(10))).await.unwrap();
        store.update(id, &payload(dec!(99))).await.unwrap();
        let entries = store.read_all().await.unwrap();
        assert_eq!(entries[0].payload.total(), dec!(99));

        let err = store.update(EntryId::new(5), &payload(dec!(1))).await.unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_save_after_largest_id_fails_without_writing() {
        let path = temp_path("exhausted");
        let stored = format!(
            r#"[{{"id": {}, "entry": {}}}]"#,
            i64::MAX,
            serde_json::to_string(&payload(dec!(10))).unwrap()
        );
        std::fs::write(&path, &stored).unwrap();
        let store = JsonFileStore::new(&path);

        let err = store.save(&payload(dec!(20))).await.unwrap_err();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), stored);

        std::fs::remove_file(&path).unwrap();
    }
}
