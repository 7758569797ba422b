mod deals;
mod extract;
mod rewards;
mod storage;
mod validation;

use axum::{
    routing::{get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use deals::{DealRepository, DealService};
use rewards::RewardsService;
use storage::JsonFileStore;

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        deals::handlers::list_deals_handler,
        deals::handlers::upsert_deal_handler,
        deals::handlers::get_deal_handler,
        rewards::handlers::list_activities_handler,
        rewards::handlers::submit_activity_handler,
        rewards::handlers::moderate_activity_handler,
        rewards::handlers::redeem_points_handler,
        rewards::handlers::get_balance_handler,
    ),
    components(
        schemas(
            deals::ExpiryDeal,
            deals::UpsertDealRequest,
            deals::DealView,
            deals::DealListResponse,
            deals::UrgencyTier,
            rewards::ActivityType,
            rewards::Decision,
            rewards::Activity,
            rewards::ActivityListResponse,
            rewards::SubmitActivityRequest,
            rewards::SubmitActivityResponse,
            rewards::ModerateActivityRequest,
            rewards::RedeemRequest,
            rewards::RedemptionOutcome,
            rewards::UserBalance,
        )
    ),
    tags(
        (name = "expiry-deals", description = "Discounted soon-to-expire products"),
        (name = "rewards", description = "Green-points activities, moderation and redemption")
    ),
    info(
        title = "EcoRetail API",
        version = "1.0.0",
        description = "RESTful API for expiry smart deals and the green-points rewards program",
        contact(
            name = "API Support",
            email = "support@ecoretail.example"
        )
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    deals: DealService,
    rewards: RewardsService,
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS middleware
fn create_router(state: AppState) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Expiry deals
        .route("/api/expiry-deals", get(deals::list_deals_handler))
        .route("/api/expiry-deals", post(deals::upsert_deal_handler))
        .route("/api/expiry-deals/:barcode", get(deals::get_deal_handler))
        // Rewards
        .route("/api/rewards/activities", get(rewards::list_activities_handler))
        .route("/api/rewards/activities", post(rewards::submit_activity_handler))
        .route("/api/rewards/activities/:id", put(rewards::moderate_activity_handler))
        .route("/api/rewards/redeem", post(rewards::redeem_points_handler))
        .route("/api/rewards/users/:user_id", get(rewards::get_balance_handler))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("EcoRetail API - Starting...");

    // Get configuration from environment variables
    let deals_file = std::env::var("EXPIRY_DEALS_FILE")
        .unwrap_or_else(|_| "data/expiry-deals.json".to_string());
    let host = std::env::var("HOST")
        .unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string());

    tracing::info!("Using deal store at {}", deals_file);
    let state = AppState {
        deals: DealService::new(DealRepository::new(JsonFileStore::new(deals_file))),
        rewards: RewardsService::new(),
    };

    // Create the application router
    let app = create_router(state);

    // Start the Axum server
    let addr = format!("{}:{}", host, port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("EcoRetail API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
