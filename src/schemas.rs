use axum::http::StatusCode;
use axum::response::Json;
use common::{PostingPhase, PostingProgress};
use lifecycle::LifecycleError;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Map a lifecycle error onto an HTTP status and error body.
///
/// Each variant keeps its own code so clients can distinguish "position
/// filled" from "already applied" without parsing the message text.
pub fn lifecycle_error_response(err: LifecycleError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, code) = match &err {
        LifecycleError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
        LifecycleError::ClosedPosting(_) => (StatusCode::CONFLICT, "POSTING_CLOSED"),
        LifecycleError::PostingFull(_) => (StatusCode::CONFLICT, "POSTING_FULL"),
        LifecycleError::DuplicateApplication { .. } => {
            (StatusCode::CONFLICT, "DUPLICATE_APPLICATION")
        }
        LifecycleError::AlreadyResponded { .. } => (StatusCode::CONFLICT, "ALREADY_RESPONDED"),
        LifecycleError::InvalidExpiry => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_EXPIRY"),
        LifecycleError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        LifecycleError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
    };

    let error = match &err {
        // Do not leak database internals to clients.
        LifecycleError::Database(db_err) => {
            tracing::error!("Database error: {}", db_err);
            "Internal server error".to_string()
        }
        other => other.to_string(),
    };

    (
        status,
        Json(ErrorResponse {
            error,
            code: code.to_string(),
            success: false,
        }),
    )
}

/// Shortcut for handler-level input validation failures.
pub fn validation_error(message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(ErrorResponse {
            error: message.into(),
            code: "VALIDATION_ERROR".to_string(),
            success: false,
        }),
    )
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::users::create_user,
        crate::handlers::users::get_users,
        crate::handlers::users::get_user,
        crate::handlers::users::update_user,
        crate::handlers::users::delete_user,
        crate::handlers::postings::create_posting,
        crate::handlers::postings::get_postings,
        crate::handlers::postings::get_posting,
        crate::handlers::postings::close_posting,
        crate::handlers::postings::delete_posting,
        crate::handlers::applications::submit_application,
        crate::handlers::applications::get_posting_applications,
        crate::handlers::applications::get_user_applications,
        crate::handlers::applications::respond_to_application,
        crate::handlers::applications::withdraw_application,
        crate::handlers::offers::issue_offer,
        crate::handlers::offers::get_seeker_offers,
        crate::handlers::offers::get_employer_offers,
        crate::handlers::offers::respond_to_offer,
        crate::handlers::offers::sweep_offers,
        crate::handlers::dismissals::dismiss_congratulation,
        crate::handlers::dismissals::get_pending_congratulations,
    ),
    components(
        schemas(
            ApiResponse<crate::handlers::users::UserResponse>,
            ApiResponse<Vec<crate::handlers::users::UserResponse>>,
            ApiResponse<crate::handlers::postings::PostingResponse>,
            ApiResponse<Vec<crate::handlers::postings::PostingResponse>>,
            ApiResponse<crate::handlers::applications::ApplicationResponse>,
            ApiResponse<Vec<crate::handlers::applications::ApplicationResponse>>,
            ApiResponse<crate::handlers::offers::OfferResponse>,
            ApiResponse<Vec<crate::handlers::offers::OfferResponse>>,
            ApiResponse<crate::handlers::offers::SweepResponse>,
            ApiResponse<crate::handlers::dismissals::DismissalResponse>,
            ApiResponse<String>,
            ErrorResponse,
            HealthResponse,
            PostingPhase,
            PostingProgress,
            crate::handlers::users::CreateUserRequest,
            crate::handlers::users::UpdateUserRequest,
            crate::handlers::users::SeekerProfilePayload,
            crate::handlers::users::EmployerProfilePayload,
            crate::handlers::users::UserResponse,
            crate::handlers::postings::CreatePostingRequest,
            crate::handlers::postings::PostingResponse,
            crate::handlers::applications::SubmitApplicationRequest,
            crate::handlers::applications::RespondToApplicationRequest,
            crate::handlers::applications::WithdrawApplicationRequest,
            crate::handlers::applications::ApplicationResponse,
            crate::handlers::offers::IssueOfferRequest,
            crate::handlers::offers::RespondToOfferRequest,
            crate::handlers::offers::OfferResponse,
            crate::handlers::offers::SweepResponse,
            crate::handlers::dismissals::DismissRequest,
            crate::handlers::dismissals::DismissalResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "Seeker and employer account endpoints"),
        (name = "postings", description = "Job posting endpoints"),
        (name = "applications", description = "Job application endpoints"),
        (name = "offers", description = "Direct job offer endpoints"),
        (name = "congratulations", description = "Congratulations banner endpoints"),
    ),
    info(
        title = "KaamSet API",
        description = "Domestic work job marketplace - postings, applications, offers and hiring lifecycle",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
