use crate::handlers::{
    applications::{
        get_posting_applications, get_user_applications, respond_to_application,
        submit_application, withdraw_application,
    },
    dismissals::{dismiss_congratulation, get_pending_congratulations},
    health::health_check,
    offers::{get_employer_offers, get_seeker_offers, issue_offer, respond_to_offer, sweep_offers},
    postings::{close_posting, create_posting, delete_posting, get_posting, get_postings},
    users::{create_user, delete_user, get_user, get_users, update_user},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // User CRUD routes
        .route("/api/v1/users", post(create_user))
        .route("/api/v1/users", get(get_users))
        .route("/api/v1/users/:user_id", get(get_user))
        .route("/api/v1/users/:user_id", put(update_user))
        .route("/api/v1/users/:user_id", delete(delete_user))
        // Posting routes
        .route("/api/v1/postings", post(create_posting))
        .route("/api/v1/postings", get(get_postings))
        .route("/api/v1/postings/:posting_id", get(get_posting))
        .route("/api/v1/postings/:posting_id", delete(delete_posting))
        .route("/api/v1/postings/:posting_id/close", post(close_posting))
        // Application routes
        .route("/api/v1/applications", post(submit_application))
        .route(
            "/api/v1/postings/:posting_id/applications",
            get(get_posting_applications),
        )
        .route(
            "/api/v1/users/:user_id/applications",
            get(get_user_applications),
        )
        .route(
            "/api/v1/applications/:application_id/respond",
            post(respond_to_application),
        )
        .route(
            "/api/v1/applications/:application_id/withdraw",
            post(withdraw_application),
        )
        // Offer routes
        .route("/api/v1/offers", post(issue_offer))
        .route("/api/v1/offers", get(get_employer_offers))
        .route("/api/v1/users/:user_id/offers", get(get_seeker_offers))
        .route("/api/v1/offers/:offer_id/respond", post(respond_to_offer))
        .route("/api/v1/offers/sweep", post(sweep_offers))
        // Congratulations routes
        .route(
            "/api/v1/congratulations/dismiss",
            post(dismiss_congratulation),
        )
        .route(
            "/api/v1/users/:user_id/congratulations",
            get(get_pending_congratulations),
        )
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
