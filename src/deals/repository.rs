use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::deals::{DealError, ExpiryDeal, UpsertDealRequest};
use crate::storage::JsonFileStore;

/// Persisted document layout: a single object holding every deal.
/// The whole file is the unit of write.
#[derive(Debug, Default, Serialize, Deserialize)]
struct DealCatalog {
    deals: Vec<ExpiryDeal>,
}

/// File-backed store for expiry deals.
///
/// Reads are plain whole-file loads; the atomic rename in `JsonFileStore`
/// guarantees a reader never sees a partial document. Mutations hold
/// `write_lock` across the entire load-merge-save cycle: two concurrent
/// upserts of the same barcode would otherwise both read the old record and
/// the slower write would erase the faster one's merge.
#[derive(Clone)]
pub struct DealRepository {
    store: JsonFileStore,
    write_lock: Arc<Mutex<()>>,
}

impl DealRepository {
    /// Create a repository over the given store
    pub fn new(store: JsonFileStore) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// All stored deals, in no particular order
    pub async fn list(&self) -> Result<Vec<ExpiryDeal>, DealError> {
        let catalog: DealCatalog = self.store.load().await?;
        Ok(catalog.deals)
    }

    /// Point lookup by barcode
    pub async fn find_by_barcode(&self, barcode: &str) -> Result<Option<ExpiryDeal>, DealError> {
        let catalog: DealCatalog = self.store.load().await?;
        Ok(catalog.deals.into_iter().find(|d| d.barcode == barcode))
    }

    /// Insert-or-update keyed by barcode, merging present fields into the
    /// stored record and retaining the rest.
    ///
    /// Idempotent: repeating the same payload leaves the store unchanged
    /// and never creates a second record for the barcode.
    pub async fn upsert(&self, request: &UpsertDealRequest) -> Result<ExpiryDeal, DealError> {
        // The whole read-modify-write cycle runs under the lock so merges
        // against stale reads cannot drop a concurrent update.
        let _guard = self.write_lock.lock().await;

        let mut catalog: DealCatalog = self.store.load().await?;

        let merged = match catalog
            .deals
            .iter_mut()
            .find(|d| d.barcode == request.barcode)
        {
            Some(existing) => {
                apply_patch(existing, request);
                existing.clone()
            }
            None => {
                let deal = new_deal_from_request(request)?;
                catalog.deals.push(deal.clone());
                deal
            }
        };

        self.store.save(&catalog).await?;
        tracing::info!("upserted deal for barcode {}", merged.barcode);
        Ok(merged)
    }
}

/// Shallow field merge: overwrite what the payload carries, keep the rest
fn apply_patch(deal: &mut ExpiryDeal, request: &UpsertDealRequest) {
    if let Some(name) = &request.name {
        deal.name = name.clone();
    }
    if let Some(price) = request.original_price {
        deal.original_price = price;
    }
    if let Some(percent) = request.discount_percent {
        deal.discount_percent = percent;
    }
    if let Some(expiry) = request.expiry_date {
        deal.expiry_date = expiry;
    }
    if request.image.is_some() {
        deal.image = request.image.clone();
    }
}

/// Build a brand-new record; the first save of a barcode must carry enough
/// fields to make a displayable deal
fn new_deal_from_request(request: &UpsertDealRequest) -> Result<ExpiryDeal, DealError> {
    let name = request.name.clone().ok_or_else(|| {
        DealError::ValidationError("name is required for a new deal".to_string())
    })?;
    let expiry_date = request.expiry_date.ok_or_else(|| {
        DealError::ValidationError("expiryDate is required for a new deal".to_string())
    })?;

    Ok(ExpiryDeal {
        barcode: request.barcode.clone(),
        name,
        original_price: request.original_price.unwrap_or_default(),
        discount_percent: request.discount_percent.unwrap_or_default(),
        expiry_date,
        image: request.image.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    /// Unique store path per test so parallel tests never collide
    fn test_repository(tag: &str) -> DealRepository {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let counter = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "ecoretail-deals-{}-{}-{}.json",
            tag, timestamp, counter
        ));
        DealRepository::new(JsonFileStore::new(path))
    }

    fn milk_request() -> UpsertDealRequest {
        UpsertDealRequest {
            barcode: "123".to_string(),
            name: Some("Milk".to_string()),
            original_price: Some(dec!(100)),
            discount_percent: Some(dec!(20)),
            expiry_date: NaiveDate::from_ymd_opt(2026, 8, 8),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_list_starts_empty() {
        let repository = test_repository("empty");
        assert!(repository.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_creates_record() {
        let repository = test_repository("create");
        let deal = repository.upsert(&milk_request()).await.unwrap();

        assert_eq!(deal.barcode, "123");
        assert_eq!(deal.name, "Milk");
        assert_eq!(deal.original_price, dec!(100));

        let stored = repository.find_by_barcode("123").await.unwrap();
        assert_eq!(stored, Some(deal));
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent() {
        let repository = test_repository("idempotent");
        let first = repository.upsert(&milk_request()).await.unwrap();
        let second = repository.upsert(&milk_request()).await.unwrap();

        assert_eq!(first, second);
        let deals = repository.list().await.unwrap();
        assert_eq!(deals.len(), 1, "repeat upsert must not duplicate the record");
    }

    #[tokio::test]
    async fn test_upsert_merges_and_retains_omitted_fields() {
        let repository = test_repository("merge");
        repository.upsert(&milk_request()).await.unwrap();

        // Second save only touches the discount
        let patch = UpsertDealRequest {
            barcode: "123".to_string(),
            name: None,
            original_price: None,
            discount_percent: Some(dec!(50)),
            expiry_date: None,
            image: None,
        };
        let merged = repository.upsert(&patch).await.unwrap();

        assert_eq!(merged.discount_percent, dec!(50));
        assert_eq!(merged.name, "Milk", "omitted fields must be retained");
        assert_eq!(merged.original_price, dec!(100));
        assert_eq!(merged.expiry_date, NaiveDate::from_ymd_opt(2026, 8, 8).unwrap());
    }

    #[tokio::test]
    async fn test_new_deal_requires_name() {
        let repository = test_repository("requires-name");
        let request = UpsertDealRequest {
            barcode: "456".to_string(),
            name: None,
            original_price: Some(dec!(10)),
            discount_percent: None,
            expiry_date: NaiveDate::from_ymd_opt(2026, 8, 8),
            image: None,
        };

        let result = repository.upsert(&request).await;
        assert!(matches!(result, Err(DealError::ValidationError(_))));
        assert!(repository.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_new_deal_requires_expiry_date() {
        let repository = test_repository("requires-expiry");
        let request = UpsertDealRequest {
            barcode: "456".to_string(),
            name: Some("Yogurt".to_string()),
            original_price: None,
            discount_percent: None,
            expiry_date: None,
            image: None,
        };

        let result = repository.upsert(&request).await;
        assert!(matches!(result, Err(DealError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_new_deal_defaults_prices_to_zero() {
        let repository = test_repository("defaults");
        let request = UpsertDealRequest {
            barcode: "789".to_string(),
            name: Some("Bread".to_string()),
            original_price: None,
            discount_percent: None,
            expiry_date: NaiveDate::from_ymd_opt(2026, 8, 10),
            image: None,
        };

        let deal = repository.upsert(&request).await.unwrap();
        assert_eq!(deal.original_price, rust_decimal::Decimal::ZERO);
        assert_eq!(deal.discount_percent, rust_decimal::Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_concurrent_upserts_do_not_lose_updates() {
        let repository = test_repository("concurrent");
        repository.upsert(&milk_request()).await.unwrap();

        // Two concurrent merges touch disjoint fields of the same record;
        // with the per-store lock both must land regardless of order.
        let discount_patch = UpsertDealRequest {
            barcode: "123".to_string(),
            name: None,
            original_price: None,
            discount_percent: Some(dec!(40)),
            expiry_date: None,
            image: None,
        };
        let image_patch = UpsertDealRequest {
            barcode: "123".to_string(),
            name: None,
            original_price: None,
            discount_percent: None,
            expiry_date: None,
            image: Some("https://cdn.example.com/milk.jpg".to_string()),
        };

        let repo_a = repository.clone();
        let repo_b = repository.clone();
        let (a, b) = tokio::join!(
            tokio::spawn(async move { repo_a.upsert(&discount_patch).await }),
            tokio::spawn(async move { repo_b.upsert(&image_patch).await }),
        );
        a.unwrap().unwrap();
        b.unwrap().unwrap();

        let stored = repository.find_by_barcode("123").await.unwrap().unwrap();
        assert_eq!(stored.discount_percent, dec!(40));
        assert_eq!(
            stored.image.as_deref(),
            Some("https://cdn.example.com/milk.jpg")
        );
    }

    #[tokio::test]
    async fn test_concurrent_upserts_of_distinct_barcodes() {
        let repository = test_repository("concurrent-distinct");

        let mut handles = Vec::new();
        for i in 0..8 {
            let repo = repository.clone();
            handles.push(tokio::spawn(async move {
                let request = UpsertDealRequest {
                    barcode: format!("bc-{}", i),
                    name: Some(format!("Product {}", i)),
                    original_price: Some(dec!(10)),
                    discount_percent: Some(dec!(5)),
                    expiry_date: NaiveDate::from_ymd_opt(2026, 8, 20),
                    image: None,
                };
                repo.upsert(&request).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let deals = repository.list().await.unwrap();
        assert_eq!(deals.len(), 8, "every concurrent insert must survive");
    }

    #[tokio::test]
    async fn test_persisted_layout_is_deals_object() {
        let repository = test_repository("layout");
        repository.upsert(&milk_request()).await.unwrap();

        let raw = tokio::fs::read_to_string(repository.store.path()).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let deals = value.get("deals").and_then(|d| d.as_array()).unwrap();
        assert_eq!(deals.len(), 1);
        assert_eq!(deals[0]["barcode"], "123");
        assert_eq!(deals[0]["expiryDate"], "2026-08-08");
        assert!(deals[0]["originalPrice"].is_number());
    }
}
