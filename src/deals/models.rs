use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::deals::tier::{derive_state, UrgencyTier};

/// A discounted soon-to-expire product, keyed by barcode.
///
/// This is the persisted shape: exactly what lands in the deals file.
/// Wire names are camelCase, matching the JSON contract of the storefront.
/// Urgency and discounted price are never stored; see `DealView`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryDeal {
    /// Stable product identifier, the upsert key
    #[schema(example = "8901030865278")]
    pub barcode: String,
    #[schema(example = "Organic Milk 1L")]
    pub name: String,
    #[schema(value_type = f64, example = 100.0)]
    pub original_price: Decimal,
    /// Percent in [0, 100]; 0 means no discount applied yet
    #[schema(value_type = f64, example = 20.0)]
    pub discount_percent: Decimal,
    pub expiry_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Request payload for upserting a deal by barcode.
///
/// Merge semantics: fields present here overwrite the stored record, fields
/// omitted are retained. A barcode that is not in the store yet creates a
/// new record, which additionally requires `name` and `expiryDate`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertDealRequest {
    #[validate(length(min = 1, message = "barcode is required"))]
    #[schema(example = "8901030865278")]
    pub barcode: String,
    #[validate(length(min = 1, message = "name cannot be empty"))]
    #[schema(example = "Organic Milk 1L")]
    pub name: Option<String>,
    #[schema(value_type = f64, example = 100.0)]
    pub original_price: Option<Decimal>,
    #[schema(value_type = f64, example = 20.0)]
    pub discount_percent: Option<Decimal>,
    pub expiry_date: Option<NaiveDate>,
    pub image: Option<String>,
}

/// A deal as presented to clients: the stored record plus display state
/// recomputed from the expiry date at read time
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DealView {
    pub barcode: String,
    pub name: String,
    #[schema(value_type = f64)]
    pub original_price: Decimal,
    #[schema(value_type = f64)]
    pub discount_percent: Decimal,
    pub expiry_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Ceil of time-to-expiry in days; negative once expired
    pub days_left: i64,
    pub urgency_tier: UrgencyTier,
    #[schema(value_type = f64)]
    pub discounted_price: Decimal,
}

impl DealView {
    /// Build the client-facing view of a deal at the given instant
    pub fn from_deal(deal: ExpiryDeal, now: DateTime<Utc>) -> Self {
        let derived = derive_state(
            deal.expiry_date,
            deal.original_price,
            deal.discount_percent,
            now,
        );
        Self {
            barcode: deal.barcode,
            name: deal.name,
            original_price: deal.original_price,
            discount_percent: deal.discount_percent,
            expiry_date: deal.expiry_date,
            image: deal.image,
            days_left: derived.days_left,
            urgency_tier: derived.urgency_tier,
            discounted_price: derived.discounted_price,
        }
    }
}

/// Response wrapper for the deal listing, mirroring the persisted layout
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DealListResponse {
    pub deals: Vec<DealView>,
}
