use chrono::Utc;
use validator::Validate;

use crate::deals::{DealError, DealRepository, DealView, UpsertDealRequest};
use crate::validation;

/// Service layer for expiry-deal business logic
#[derive(Clone)]
pub struct DealService {
    repository: DealRepository,
}

impl DealService {
    /// Create a new DealService
    pub fn new(repository: DealRepository) -> Self {
        Self { repository }
    }

    /// All deals with display state, sorted by expiry date ascending.
    ///
    /// Derived fields are computed against the current clock on every call;
    /// nothing here is cached, so a deal crossing a tier boundary shows the
    /// new tier on the very next read.
    pub async fn list_deals(&self) -> Result<Vec<DealView>, DealError> {
        let mut deals = self.repository.list().await?;
        deals.sort_by(|a, b| a.expiry_date.cmp(&b.expiry_date));

        let now = Utc::now();
        Ok(deals
            .into_iter()
            .map(|deal| DealView::from_deal(deal, now))
            .collect())
    }

    /// Point lookup with display state
    pub async fn get_deal(&self, barcode: &str) -> Result<DealView, DealError> {
        let deal = self
            .repository
            .find_by_barcode(barcode)
            .await?
            .ok_or_else(|| DealError::NotFound(barcode.to_string()))?;

        Ok(DealView::from_deal(deal, Utc::now()))
    }

    /// Upsert a deal by barcode
    ///
    /// This method:
    /// 1. Validates the request shape
    /// 2. Applies the domain rules (barcode format, discount range, price sign)
    /// 3. Merges into the store under the per-store lock
    /// 4. Returns the merged record with fresh display state
    pub async fn upsert_deal(&self, request: UpsertDealRequest) -> Result<DealView, DealError> {
        // 1. Structural validation
        request.validate()?;

        // 2. Domain rules
        validation::validate_barcode(&request.barcode)
            .map_err(|_| DealError::ValidationError("barcode is missing or malformed".to_string()))?;
        if let Some(percent) = request.discount_percent {
            validation::validate_discount_percent(percent).map_err(|_| {
                DealError::ValidationError("discount must be between 0 and 100".to_string())
            })?;
        }
        if let Some(price) = request.original_price {
            validation::validate_non_negative_price(price).map_err(|_| {
                DealError::ValidationError("original price must be non-negative".to_string())
            })?;
        }

        // 3. Merge into the store
        let merged = self.repository.upsert(&request).await?;

        // 4. Fresh view
        Ok(DealView::from_deal(merged, Utc::now()))
    }
}
