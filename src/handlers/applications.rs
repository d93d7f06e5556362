use crate::schemas::{
    lifecycle_error_response, validation_error, ApiResponse, AppState, ErrorResponse,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDateTime;
use lifecycle::application::{self, Decision};
use model::entities::application as application_entity;
use model::entities::application::ApplicationStatus;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;

/// Request body for submitting an application
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SubmitApplicationRequest {
    /// Seeker account applying
    pub applicant_id: i32,
    /// Posting being applied to
    pub job_id: i32,
}

/// Request body for an employer decision on an application
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RespondToApplicationRequest {
    /// "accept" or "reject"
    pub decision: String,
    /// Optional message shown to the applicant
    pub message: Option<String>,
}

/// Request body for withdrawing an application
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct WithdrawApplicationRequest {
    /// Seeker account withdrawing; must own the application
    pub applicant_id: i32,
}

/// Application response model.
///
/// Applicant and posting fields are the snapshot taken at submission time,
/// not a live join.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ApplicationResponse {
    pub id: i32,
    pub job_id: i32,
    pub applicant_id: i32,
    pub employer_id: i32,
    pub job_title: String,
    pub employer_name: String,
    pub applicant_name: String,
    pub applicant_phone: String,
    pub applicant_email: String,
    pub applicant_experience: Option<String>,
    pub status: String,
    pub applied_date: NaiveDateTime,
    pub response_date: Option<NaiveDateTime>,
    pub response_message: Option<String>,
}

impl From<application_entity::Model> for ApplicationResponse {
    fn from(model: application_entity::Model) -> Self {
        Self {
            id: model.id,
            job_id: model.job_id,
            applicant_id: model.applicant_id,
            employer_id: model.employer_id,
            job_title: model.job_title,
            employer_name: model.employer_name,
            applicant_name: model.applicant_name,
            applicant_phone: model.applicant_phone,
            applicant_email: model.applicant_email,
            applicant_experience: model.applicant_experience,
            status: match model.status {
                ApplicationStatus::Pending => "pending",
                ApplicationStatus::Accepted => "accepted",
                ApplicationStatus::Rejected => "rejected",
                ApplicationStatus::Withdrawn => "withdrawn",
            }
            .to_string(),
            applied_date: model.applied_date,
            response_date: model.response_date,
            response_message: model.response_message,
        }
    }
}

/// Submit an application from a seeker to an open posting
#[utoipa::path(
    post,
    path = "/api/v1/applications",
    tag = "applications",
    request_body = SubmitApplicationRequest,
    responses(
        (status = 201, description = "Application submitted", body = ApiResponse<ApplicationResponse>),
        (status = 404, description = "Posting or applicant not found", body = ErrorResponse),
        (status = 409, description = "Posting closed or duplicate application", body = ErrorResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn submit_application(
    State(state): State<AppState>,
    Json(request): Json<SubmitApplicationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ApplicationResponse>>), (StatusCode, Json<ErrorResponse>)>
{
    trace!("Entering submit_application function");
    debug!(
        "Applicant {} applying to posting {}",
        request.applicant_id, request.job_id
    );

    let model = application::submit(&state.db, request.applicant_id, request.job_id)
        .await
        .map_err(lifecycle_error_response)?;

    info!(
        "Application {} submitted by seeker {} for posting {}",
        model.id, model.applicant_id, model.job_id
    );
    let response = ApiResponse {
        data: ApplicationResponse::from(model),
        message: "Application submitted".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Applications received by a posting, newest first
#[utoipa::path(
    get,
    path = "/api/v1/postings/{posting_id}/applications",
    tag = "applications",
    params(
        ("posting_id" = i32, Path, description = "Posting ID"),
    ),
    responses(
        (status = 200, description = "Applications retrieved", body = ApiResponse<Vec<ApplicationResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_posting_applications(
    Path(posting_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ApplicationResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_posting_applications function");

    let applications = application::for_posting(&state.db, posting_id)
        .await
        .map_err(lifecycle_error_response)?;

    debug!(
        "Retrieved {} applications for posting {}",
        applications.len(),
        posting_id
    );
    Ok(Json(ApiResponse {
        data: applications
            .into_iter()
            .map(ApplicationResponse::from)
            .collect(),
        message: "Applications retrieved".to_string(),
        success: true,
    }))
}

/// Applications a seeker has submitted, newest first
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/applications",
    tag = "applications",
    params(
        ("user_id" = i32, Path, description = "Seeker user ID"),
    ),
    responses(
        (status = 200, description = "Applications retrieved", body = ApiResponse<Vec<ApplicationResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_user_applications(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ApplicationResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_user_applications function");

    let applications = application::for_applicant(&state.db, user_id)
        .await
        .map_err(lifecycle_error_response)?;

    Ok(Json(ApiResponse {
        data: applications
            .into_iter()
            .map(ApplicationResponse::from)
            .collect(),
        message: "Applications retrieved".to_string(),
        success: true,
    }))
}

/// Accept or reject a pending application
#[utoipa::path(
    post,
    path = "/api/v1/applications/{application_id}/respond",
    tag = "applications",
    params(
        ("application_id" = i32, Path, description = "Application ID"),
    ),
    request_body = RespondToApplicationRequest,
    responses(
        (status = 200, description = "Decision recorded", body = ApiResponse<ApplicationResponse>),
        (status = 404, description = "Application not found", body = ErrorResponse),
        (status = 409, description = "Already responded or posting full", body = ErrorResponse),
        (status = 422, description = "Unknown decision", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn respond_to_application(
    Path(application_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<RespondToApplicationRequest>,
) -> Result<Json<ApiResponse<ApplicationResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering respond_to_application function");

    let decision = match request.decision.as_str() {
        "accept" => Decision::Accept,
        "reject" => Decision::Reject,
        _ => return Err(validation_error("decision must be 'accept' or 'reject'")),
    };

    let model = application::respond(&state.db, application_id, decision, request.message)
        .await
        .map_err(lifecycle_error_response)?;

    info!(
        "Application {} moved to {} state",
        application_id, request.decision
    );
    Ok(Json(ApiResponse {
        data: ApplicationResponse::from(model),
        message: "Decision recorded".to_string(),
        success: true,
    }))
}

/// Withdraw a pending application
#[utoipa::path(
    post,
    path = "/api/v1/applications/{application_id}/withdraw",
    tag = "applications",
    params(
        ("application_id" = i32, Path, description = "Application ID"),
    ),
    request_body = WithdrawApplicationRequest,
    responses(
        (status = 200, description = "Application withdrawn", body = ApiResponse<ApplicationResponse>),
        (status = 404, description = "Application not found", body = ErrorResponse),
        (status = 409, description = "Application already responded to", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn withdraw_application(
    Path(application_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<WithdrawApplicationRequest>,
) -> Result<Json<ApiResponse<ApplicationResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering withdraw_application function");

    let model = application::withdraw(&state.db, application_id, request.applicant_id)
        .await
        .map_err(lifecycle_error_response)?;

    info!("Application {} withdrawn", application_id);
    Ok(Json(ApiResponse {
        data: ApplicationResponse::from(model),
        message: "Application withdrawn".to_string(),
        success: true,
    }))
}
