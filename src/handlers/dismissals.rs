use crate::schemas::{lifecycle_error_response, ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use lifecycle::dismissal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;

use super::applications::ApplicationResponse;

/// Request body for dismissing a congratulations banner
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct DismissRequest {
    /// Seeker dismissing the banner
    pub user_id: i32,
    pub job_id: i32,
    pub application_id: i32,
}

/// Dismissal state for one accepted application
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct DismissalResponse {
    pub user_id: i32,
    pub job_id: i32,
    pub application_id: i32,
    pub dismissed: bool,
}

/// Dismiss a congratulations banner for an accepted application.
///
/// Replays are accepted silently, dismissal is set membership.
#[utoipa::path(
    post,
    path = "/api/v1/congratulations/dismiss",
    tag = "congratulations",
    request_body = DismissRequest,
    responses(
        (status = 200, description = "Banner dismissed", body = ApiResponse<DismissalResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn dismiss_congratulation(
    State(state): State<AppState>,
    Json(request): Json<DismissRequest>,
) -> Result<Json<ApiResponse<DismissalResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering dismiss_congratulation function");

    dismissal::dismiss(
        &state.db,
        request.user_id,
        request.job_id,
        request.application_id,
    )
    .await
    .map_err(lifecycle_error_response)?;

    info!(
        "User {} dismissed congratulations for application {}",
        request.user_id, request.application_id
    );
    Ok(Json(ApiResponse {
        data: DismissalResponse {
            user_id: request.user_id,
            job_id: request.job_id,
            application_id: request.application_id,
            dismissed: true,
        },
        message: "Banner dismissed".to_string(),
        success: true,
    }))
}

/// Recently accepted applications the seeker has not yet dismissed
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/congratulations",
    tag = "congratulations",
    params(
        ("user_id" = i32, Path, description = "Seeker user ID"),
    ),
    responses(
        (status = 200, description = "Pending congratulations retrieved", body = ApiResponse<Vec<ApplicationResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_pending_congratulations(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ApplicationResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_pending_congratulations function");

    let hires = dismissal::pending_congratulations(&state.db, user_id, Utc::now().naive_utc())
        .await
        .map_err(lifecycle_error_response)?;

    debug!(
        "User {} has {} undismissed congratulations",
        user_id,
        hires.len()
    );
    Ok(Json(ApiResponse {
        data: hires.into_iter().map(ApplicationResponse::from).collect(),
        message: "Pending congratulations retrieved".to_string(),
        success: true,
    }))
}
