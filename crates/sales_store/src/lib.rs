use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;

use models::{Sale, SaleRecord};

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Sale not found: {0}")]
    SaleNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Backend(String),
}

/// Repository trait for the sale collection.
/// This abstraction allows swapping between file-based and in-memory (or
/// database-backed) implementations.
#[async_trait]
pub trait SaleRepository: Send + Sync {
    /// Persist a new sale; the store assigns id and timestamps.
    async fn create(&self, sale: &Sale) -> Result<String>;
    /// Replace the sale data for `id`, preserving id and creation timestamp.
    async fn update(&self, id: &str, sale: &Sale) -> Result<()>;
    async fn delete(&self, id: &str) -> Result<()>;
    /// All records, ordered by order date descending.
    async fn list(&self) -> Result<Vec<SaleRecord>>;
}

/// File-based implementation that keeps the whole collection as one JSON
/// array in a single file. Access goes through an RwLock so concurrent
/// writers never interleave a read-modify-write cycle.
pub struct JsonFileSaleRepository {
    path: PathBuf,
    lock: RwLock<()>,
    seq: AtomicU64,
}

impl JsonFileSaleRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: RwLock::new(()),
            seq: AtomicU64::new(0),
        }
    }

    /// Millisecond timestamp plus a per-process sequence number, so ids stay
    /// unique even when sequential imports land within the same millisecond.
    fn next_id(&self) -> String {
        format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            self.seq.fetch_add(1, Ordering::Relaxed)
        )
    }

    /// Load the collection; a missing file is an empty collection.
    async fn load(&self) -> Result<Vec<SaleRecord>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, records: &[SaleRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl SaleRepository for JsonFileSaleRepository {
    async fn create(&self, sale: &Sale) -> Result<String> {
        let _guard = self.lock.write().await;
        let mut records = self.load().await?;

        let id = self.next_id();
        let now = Utc::now().to_rfc3339();
        records.push(SaleRecord {
            id: id.clone(),
            sale: sale.clone(),
            created_at: now.clone(),
            updated_at: now,
        });

        self.save(&records).await?;
        Ok(id)
    }

    async fn update(&self, id: &str, sale: &Sale) -> Result<()> {
        let _guard = self.lock.write().await;
        let mut records = self.load().await?;

        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::SaleNotFound(id.to_string()))?;
        record.sale = sale.clone();
        record.updated_at = Utc::now().to_rfc3339();

        self.save(&records).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let _guard = self.lock.write().await;
        let mut records = self.load().await?;

        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(StoreError::SaleNotFound(id.to_string()));
        }

        self.save(&records).await
    }

    async fn list(&self) -> Result<Vec<SaleRecord>> {
        let _guard = self.lock.read().await;
        let mut records = self.load().await?;
        // ISO dates compare correctly as strings
        records.sort_by(|a, b| b.sale.date.cmp(&a.sale.date));
        Ok(records)
    }
}

/// In-memory implementation with the same contract; used by tests and as a
/// drop-in store for ephemeral deployments.
#[derive(Default)]
pub struct MemorySaleRepository {
    records: RwLock<Vec<SaleRecord>>,
    seq: AtomicU64,
}

impl MemorySaleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SaleRepository for MemorySaleRepository {
    async fn create(&self, sale: &Sale) -> Result<String> {
        let mut records = self.records.write().await;
        let id = format!("mem-{}", self.seq.fetch_add(1, Ordering::Relaxed));
        let now = Utc::now().to_rfc3339();
        records.push(SaleRecord {
            id: id.clone(),
            sale: sale.clone(),
            created_at: now.clone(),
            updated_at: now,
        });
        Ok(id)
    }

    async fn update(&self, id: &str, sale: &Sale) -> Result<()> {
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::SaleNotFound(id.to_string()))?;
        record.sale = sale.clone();
        record.updated_at = Utc::now().to_rfc3339();
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(StoreError::SaleNotFound(id.to_string()));
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<SaleRecord>> {
        let records = self.records.read().await;
        let mut out = records.clone();
        out.sort_by(|a, b| b.sale.date.cmp(&a.sale.date));
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sale(date: &str, name: &str) -> Sale {
        Sale {
            date: date.to_string(),
            customer_name: name.to_string(),
            contact: String::new(),
            cake: "Bento Cake".to_string(),
            size: "10cm".to_string(),
            quantity: 1,
            order_type: "Pickup".to_string(),
            pickup_date: date.to_string(),
            pickup_time: String::new(),
            price: 240000.0,
            payment: "Pending".to_string(),
            preparation: "Pending".to_string(),
            delivery: "Pending".to_string(),
            address: String::new(),
        }
    }

    #[tokio::test]
    async fn test_memory_create_and_list_date_desc() {
        let repo = MemorySaleRepository::new();
        repo.create(&sample_sale("2024-10-01", "A")).await.unwrap();
        repo.create(&sample_sale("2024-12-01", "B")).await.unwrap();
        repo.create(&sample_sale("2024-11-01", "C")).await.unwrap();

        let records = repo.list().await.unwrap();
        let dates: Vec<&str> = records.iter().map(|r| r.sale.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-12-01", "2024-11-01", "2024-10-01"]);
    }

    #[tokio::test]
    async fn test_memory_update_refreshes_sale() {
        let repo = MemorySaleRepository::new();
        let id = repo.create(&sample_sale("2024-10-01", "A")).await.unwrap();

        let mut updated = sample_sale("2024-10-01", "A");
        updated.payment = "Completed".to_string();
        repo.update(&id, &updated).await.unwrap();

        let records = repo.list().await.unwrap();
        assert_eq!(records[0].sale.payment, "Completed");
        assert_eq!(records[0].id, id);
    }

    #[tokio::test]
    async fn test_memory_update_unknown_id() {
        let repo = MemorySaleRepository::new();
        let err = repo
            .update("nope", &sample_sale("2024-10-01", "A"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::SaleNotFound(_)));
    }

    #[tokio::test]
    async fn test_memory_delete() {
        let repo = MemorySaleRepository::new();
        let id = repo.create(&sample_sale("2024-10-01", "A")).await.unwrap();
        repo.delete(&id).await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());

        let err = repo.delete(&id).await.unwrap_err();
        assert!(matches!(err, StoreError::SaleNotFound(_)));
    }

    fn temp_store_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "sales_store_test_{}_{}_{}.json",
            tag,
            std::process::id(),
            Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ))
    }

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let path = temp_store_path("roundtrip");
        let repo = JsonFileSaleRepository::new(&path);

        let id = repo.create(&sample_sale("2024-11-25", "Sari")).await.unwrap();
        let records = repo.list().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].sale.customer_name, "Sari");
        assert!(!records[0].created_at.is_empty());

        // A fresh repository over the same file sees the persisted record
        let reopened = JsonFileSaleRepository::new(&path);
        assert_eq!(reopened.list().await.unwrap().len(), 1);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_file_store_missing_file_is_empty() {
        let path = temp_store_path("missing");
        let repo = JsonFileSaleRepository::new(&path);
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_store_unique_ids() {
        let path = temp_store_path("ids");
        let repo = JsonFileSaleRepository::new(&path);

        let a = repo.create(&sample_sale("2024-11-25", "A")).await.unwrap();
        let b = repo.create(&sample_sale("2024-11-25", "B")).await.unwrap();
        assert_ne!(a, b);

        let _ = std::fs::remove_file(&path);
    }
}
