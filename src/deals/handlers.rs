// HTTP handlers for the expiry-deals endpoints
// Thin adapters: decode the request, call the service, encode the result.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::deals::{DealError, DealListResponse, DealView, UpsertDealRequest};

/// Handler for GET /api/expiry-deals
/// Lists every deal with freshly derived display state
#[utoipa::path(
    get,
    path = "/api/expiry-deals",
    responses(
        (status = 200, description = "All deals, sorted by expiry date", body = DealListResponse),
        (status = 500, description = "Storage failure")
    ),
    tag = "expiry-deals"
)]
pub async fn list_deals_handler(
    State(state): State<crate::AppState>,
) -> Result<Json<DealListResponse>, DealError> {
    tracing::debug!("listing expiry deals");
    let deals = state.deals.list_deals().await?;
    tracing::debug!("returning {} deals", deals.len());
    Ok(Json(DealListResponse { deals }))
}

/// Handler for POST /api/expiry-deals
/// Upserts a deal by barcode and returns the merged record
#[utoipa::path(
    post,
    path = "/api/expiry-deals",
    request_body = UpsertDealRequest,
    responses(
        (status = 200, description = "The merged deal", body = DealView),
        (status = 400, description = "Missing barcode or invalid fields"),
        (status = 500, description = "Storage failure")
    ),
    tag = "expiry-deals"
)]
pub async fn upsert_deal_handler(
    State(state): State<crate::AppState>,
    Json(request): Json<UpsertDealRequest>,
) -> Result<(StatusCode, Json<DealView>), DealError> {
    tracing::debug!("upserting deal for barcode {}", request.barcode);
    let deal = state.deals.upsert_deal(request).await?;
    Ok((StatusCode::OK, Json(deal)))
}

/// Handler for GET /api/expiry-deals/:barcode
/// Point lookup for a single deal
#[utoipa::path(
    get,
    path = "/api/expiry-deals/{barcode}",
    params(
        ("barcode" = String, Path, description = "Product barcode")
    ),
    responses(
        (status = 200, description = "Deal found", body = DealView),
        (status = 404, description = "No deal stored for this barcode"),
        (status = 500, description = "Storage failure")
    ),
    tag = "expiry-deals"
)]
pub async fn get_deal_handler(
    State(state): State<crate::AppState>,
    Path(barcode): Path<String>,
) -> Result<Json<DealView>, DealError> {
    tracing::debug!("fetching deal for barcode {}", barcode);
    let deal = state.deals.get_deal(&barcode).await?;
    Ok(Json(deal))
}
