// HTTP handlers for the rewards endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::rewards::{
    Activity, ActivityListResponse, ModerateActivityRequest, RedeemRequest, RedemptionOutcome,
    RewardsError, SubmitActivityRequest, SubmitActivityResponse, UserBalance,
};

/// Handler for GET /api/rewards/activities
/// Moderation view: the full activity log, oldest first
#[utoipa::path(
    get,
    path = "/api/rewards/activities",
    responses(
        (status = 200, description = "All recorded activities", body = ActivityListResponse)
    ),
    tag = "rewards"
)]
pub async fn list_activities_handler(
    State(state): State<crate::AppState>,
) -> Json<ActivityListResponse> {
    let activities = state.rewards.list_activities().await;
    tracing::debug!("returning {} activities for review", activities.len());
    Json(ActivityListResponse { activities })
}

/// Handler for POST /api/rewards/activities
/// Submits a sustainability activity for the calling user
#[utoipa::path(
    post,
    path = "/api/rewards/activities",
    request_body = SubmitActivityRequest,
    responses(
        (status = 201, description = "Activity recorded", body = SubmitActivityResponse),
        (status = 400, description = "Missing fields or unknown activity type")
    ),
    tag = "rewards"
)]
pub async fn submit_activity_handler(
    State(state): State<crate::AppState>,
    Json(request): Json<SubmitActivityRequest>,
) -> Result<(StatusCode, Json<SubmitActivityResponse>), RewardsError> {
    let response = state.rewards.submit_activity(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for PUT /api/rewards/activities/:id
/// Applies a moderation decision to a pending or previously moderated activity
#[utoipa::path(
    put,
    path = "/api/rewards/activities/{id}",
    params(
        ("id" = String, Path, description = "Activity id")
    ),
    request_body = ModerateActivityRequest,
    responses(
        (status = 200, description = "Updated activity", body = Activity),
        (status = 400, description = "Unknown decision"),
        (status = 404, description = "Activity not found")
    ),
    tag = "rewards"
)]
pub async fn moderate_activity_handler(
    State(state): State<crate::AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ModerateActivityRequest>,
) -> Result<Json<Activity>, RewardsError> {
    let activity = state.rewards.moderate_activity(id, &request.decision).await?;
    Ok(Json(activity))
}

/// Handler for POST /api/rewards/redeem
/// Attempts to redeem points for a voucher.
/// Insufficient balance is a business outcome, not an error: always 200.
#[utoipa::path(
    post,
    path = "/api/rewards/redeem",
    request_body = RedeemRequest,
    responses(
        (status = 200, description = "Redemption outcome", body = RedemptionOutcome),
        (status = 400, description = "Missing userId")
    ),
    tag = "rewards"
)]
pub async fn redeem_points_handler(
    State(state): State<crate::AppState>,
    Json(request): Json<RedeemRequest>,
) -> Result<Json<RedemptionOutcome>, RewardsError> {
    let outcome = state.rewards.redeem_points(request).await?;
    Ok(Json(outcome))
}

/// Handler for GET /api/rewards/users/:user_id
/// Current balance view; unknown users read as a zeroed balance
#[utoipa::path(
    get,
    path = "/api/rewards/users/{user_id}",
    params(
        ("user_id" = String, Path, description = "Opaque user identifier")
    ),
    responses(
        (status = 200, description = "Balance for the user", body = UserBalance)
    ),
    tag = "rewards"
)]
pub async fn get_balance_handler(
    State(state): State<crate::AppState>,
    Path(user_id): Path<String>,
) -> Json<UserBalance> {
    Json(state.rewards.get_balance(&user_id).await)
}
