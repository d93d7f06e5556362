use crate::schemas::{lifecycle_error_response, ApiResponse, AppState, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDateTime;
use common::PostingProgress;
use lifecycle::posting::{self, CloseReason, NewPosting};
use model::entities::job_posting::{self, PostingStatus};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;

/// Request body for creating a job posting
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreatePostingRequest {
    /// Employer account creating the posting
    pub employer_id: i32,
    pub title: String,
    pub description: String,
    pub requirements: Option<String>,
    pub benefits: Option<String>,
    pub location: String,
    /// Kind of work (cook, driver, maid, ...)
    pub job_type: String,
    /// Monthly salary in rupees
    pub salary: i32,
    /// Number of positions to fill (1-50)
    pub required_candidates: i32,
}

/// Job posting response model
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PostingResponse {
    pub id: i32,
    pub employer_id: i32,
    pub title: String,
    pub description: String,
    pub requirements: Option<String>,
    pub benefits: Option<String>,
    pub location: String,
    pub job_type: String,
    pub salary: i32,
    pub is_closed: bool,
    pub auto_closed: bool,
    pub posted_date: NaiveDateTime,
    pub closed_date: Option<NaiveDateTime>,
    /// Capacity counters and the derived display phase
    pub progress: PostingProgress,
}

impl From<job_posting::Model> for PostingResponse {
    fn from(model: job_posting::Model) -> Self {
        let progress = PostingProgress::from_counts(
            model.status == PostingStatus::Deleted,
            model.is_closed,
            model.auto_closed,
            model.required_candidates,
            model.hired_count,
            model.applications_count,
        );
        Self {
            id: model.id,
            employer_id: model.user_id,
            title: model.title,
            description: model.description,
            requirements: model.requirements,
            benefits: model.benefits,
            location: model.location,
            job_type: model.job_type,
            salary: model.salary,
            is_closed: model.is_closed,
            auto_closed: model.auto_closed,
            posted_date: model.posted_date,
            closed_date: model.closed_date,
            progress,
        }
    }
}

/// Query parameters for listing postings
#[derive(Debug, Deserialize, ToSchema)]
pub struct PostingsQuery {
    /// Only postings owned by this employer
    pub employer_id: Option<i32>,
    /// Include closed postings (the default only shows open ones)
    pub include_closed: Option<bool>,
}

/// Query parameters identifying the acting employer
#[derive(Debug, Deserialize, ToSchema)]
pub struct EmployerQuery {
    pub employer_id: i32,
}

/// Create a job posting
#[utoipa::path(
    post,
    path = "/api/v1/postings",
    tag = "postings",
    request_body = CreatePostingRequest,
    responses(
        (status = 201, description = "Posting created successfully", body = ApiResponse<PostingResponse>),
        (status = 404, description = "Employer not found", body = ErrorResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(employer_id = request.employer_id))]
pub async fn create_posting(
    State(state): State<AppState>,
    Json(request): Json<CreatePostingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PostingResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_posting function");
    debug!("Creating posting '{}'", request.title);

    let attrs = NewPosting {
        title: request.title,
        description: request.description,
        requirements: request.requirements,
        benefits: request.benefits,
        location: request.location,
        job_type: request.job_type,
        salary: request.salary,
        required_candidates: request.required_candidates,
    };

    let model = posting::create_posting(&state.db, request.employer_id, attrs)
        .await
        .map_err(lifecycle_error_response)?;

    info!("Posting {} created by employer {}", model.id, model.user_id);
    let response = ApiResponse {
        data: PostingResponse::from(model),
        message: "Posting created successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// List postings for browsing or an employer dashboard
#[utoipa::path(
    get,
    path = "/api/v1/postings",
    tag = "postings",
    params(
        ("employer_id" = Option<i32>, Query, description = "Only postings owned by this employer"),
        ("include_closed" = Option<bool>, Query, description = "Include closed postings"),
    ),
    responses(
        (status = 200, description = "Postings retrieved successfully", body = ApiResponse<Vec<PostingResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_postings(
    State(state): State<AppState>,
    Query(query): Query<PostingsQuery>,
) -> Result<Json<ApiResponse<Vec<PostingResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_postings function");

    // Soft-deleted postings never surface through the listing.
    let mut select = job_posting::Entity::find()
        .filter(job_posting::Column::Status.eq(PostingStatus::Active))
        .order_by_desc(job_posting::Column::PostedDate);

    if let Some(employer_id) = query.employer_id {
        select = select.filter(job_posting::Column::UserId.eq(employer_id));
    }
    if !query.include_closed.unwrap_or(false) {
        select = select.filter(job_posting::Column::IsClosed.eq(false));
    }

    let postings = select
        .all(&state.db)
        .await
        .map_err(|e| lifecycle_error_response(e.into()))?;

    debug!("Retrieved {} postings", postings.len());
    Ok(Json(ApiResponse {
        data: postings.into_iter().map(PostingResponse::from).collect(),
        message: "Postings retrieved successfully".to_string(),
        success: true,
    }))
}

/// Get a single posting
#[utoipa::path(
    get,
    path = "/api/v1/postings/{posting_id}",
    tag = "postings",
    params(
        ("posting_id" = i32, Path, description = "Posting ID"),
    ),
    responses(
        (status = 200, description = "Posting retrieved successfully", body = ApiResponse<PostingResponse>),
        (status = 404, description = "Posting not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_posting(
    Path(posting_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PostingResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_posting function");

    let model = posting::find_active(&state.db, posting_id)
        .await
        .map_err(lifecycle_error_response)?
        .ok_or_else(|| {
            lifecycle_error_response(lifecycle::LifecycleError::not_found("posting", posting_id))
        })?;

    Ok(Json(ApiResponse {
        data: PostingResponse::from(model),
        message: "Posting retrieved successfully".to_string(),
        success: true,
    }))
}

/// Close a posting to further applications
#[utoipa::path(
    post,
    path = "/api/v1/postings/{posting_id}/close",
    tag = "postings",
    params(
        ("posting_id" = i32, Path, description = "Posting ID"),
    ),
    responses(
        (status = 200, description = "Posting closed", body = ApiResponse<PostingResponse>),
        (status = 404, description = "Posting not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn close_posting(
    Path(posting_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PostingResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering close_posting function");

    let model = posting::close_posting(&state.db, posting_id, CloseReason::Manual)
        .await
        .map_err(lifecycle_error_response)?;

    info!("Posting {} closed manually", posting_id);
    Ok(Json(ApiResponse {
        data: PostingResponse::from(model),
        message: "Posting closed".to_string(),
        success: true,
    }))
}

/// Soft-delete a posting owned by the given employer
#[utoipa::path(
    delete,
    path = "/api/v1/postings/{posting_id}",
    tag = "postings",
    params(
        ("posting_id" = i32, Path, description = "Posting ID"),
        ("employer_id" = i32, Query, description = "Owning employer ID"),
    ),
    responses(
        (status = 200, description = "Posting deleted", body = ApiResponse<String>),
        (status = 404, description = "Posting not found or not owned by employer", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_posting(
    Path(posting_id): Path<i32>,
    Query(query): Query<EmployerQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering delete_posting function");

    posting::delete_posting(&state.db, posting_id, query.employer_id)
        .await
        .map_err(lifecycle_error_response)?;

    Ok(Json(ApiResponse {
        data: format!("Posting {} deleted", posting_id),
        message: "Posting deleted".to_string(),
        success: true,
    }))
}
