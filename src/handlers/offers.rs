use crate::schemas::{
    lifecycle_error_response, validation_error, ApiResponse, AppState, ErrorResponse,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{NaiveDateTime, Utc};
use lifecycle::offer::{self, Decision, OfferTerms};
use model::entities::job_offer::{self, OfferStatus};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use utoipa::ToSchema;

/// Request body for issuing a direct job offer
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct IssueOfferRequest {
    /// Employer making the offer
    pub employer_id: i32,
    /// Seeker receiving the offer
    pub job_seeker_id: i32,
    /// Posting the offer fills a position on
    pub job_id: i32,
    pub job_title: String,
    pub job_description: String,
    pub location: String,
    /// Offered monthly salary in rupees
    pub salary_offered: i32,
    /// Response deadline; defaults to 24 hours from now when omitted
    pub expires_at: Option<NaiveDateTime>,
}

/// Request body for a seeker decision on an offer
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RespondToOfferRequest {
    /// "accept" or "decline"
    pub decision: String,
    pub message: Option<String>,
}

/// Job offer response model
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct OfferResponse {
    pub id: i32,
    pub job_id: i32,
    pub employer_id: i32,
    pub job_seeker_id: i32,
    pub job_title: String,
    pub job_description: String,
    pub location: String,
    pub employer_name: String,
    pub salary_offered: i32,
    pub status: String,
    pub offered_date: NaiveDateTime,
    pub expires_at: NaiveDateTime,
    pub response_date: Option<NaiveDateTime>,
    pub response_message: Option<String>,
}

impl From<job_offer::Model> for OfferResponse {
    fn from(model: job_offer::Model) -> Self {
        Self {
            id: model.id,
            job_id: model.job_id,
            employer_id: model.employer_id,
            job_seeker_id: model.job_seeker_id,
            job_title: model.job_title,
            job_description: model.job_description,
            location: model.location,
            employer_name: model.employer_name,
            salary_offered: model.salary_offered,
            status: match model.status {
                OfferStatus::Pending => "pending",
                OfferStatus::Accepted => "accepted",
                OfferStatus::Declined => "declined",
                OfferStatus::Expired => "expired",
            }
            .to_string(),
            offered_date: model.offered_date,
            expires_at: model.expires_at,
            response_date: model.response_date,
            response_message: model.response_message,
        }
    }
}

/// Result of an expiry sweep
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SweepResponse {
    /// Number of offers flipped to expired
    pub expired: u64,
}

/// Query parameters identifying the offering employer
#[derive(Debug, Deserialize, ToSchema)]
pub struct EmployerOffersQuery {
    pub employer_id: i32,
}

/// Issue a direct offer from an employer to a seeker
#[utoipa::path(
    post,
    path = "/api/v1/offers",
    tag = "offers",
    request_body = IssueOfferRequest,
    responses(
        (status = 201, description = "Offer issued", body = ApiResponse<OfferResponse>),
        (status = 404, description = "Posting, employer or seeker not found", body = ErrorResponse),
        (status = 409, description = "Posting closed", body = ErrorResponse),
        (status = 422, description = "Invalid request or expiry in the past", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(employer_id = request.employer_id))]
pub async fn issue_offer(
    State(state): State<AppState>,
    Json(request): Json<IssueOfferRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OfferResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering issue_offer function");
    debug!(
        "Employer {} offering posting {} to seeker {}",
        request.employer_id, request.job_id, request.job_seeker_id
    );

    let terms = OfferTerms {
        job_title: request.job_title,
        job_description: request.job_description,
        location: request.location,
        salary_offered: request.salary_offered,
        expires_at: request
            .expires_at
            .unwrap_or_else(|| offer::default_expiry(Utc::now().naive_utc())),
    };

    let model = offer::issue(
        &state.db,
        request.employer_id,
        request.job_seeker_id,
        request.job_id,
        terms,
    )
    .await
    .map_err(lifecycle_error_response)?;

    info!(
        "Offer {} issued to seeker {} (expires {})",
        model.id, model.job_seeker_id, model.expires_at
    );
    let response = ApiResponse {
        data: OfferResponse::from(model),
        message: "Offer issued".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Offers received by a seeker, newest first
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/offers",
    tag = "offers",
    params(
        ("user_id" = i32, Path, description = "Seeker user ID"),
    ),
    responses(
        (status = 200, description = "Offers retrieved", body = ApiResponse<Vec<OfferResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_seeker_offers(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<OfferResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_seeker_offers function");

    let offers = offer::for_seeker(&state.db, user_id)
        .await
        .map_err(lifecycle_error_response)?;

    debug!("Retrieved {} offers for seeker {}", offers.len(), user_id);
    Ok(Json(ApiResponse {
        data: offers.into_iter().map(OfferResponse::from).collect(),
        message: "Offers retrieved".to_string(),
        success: true,
    }))
}

/// Offers an employer has issued, newest first
#[utoipa::path(
    get,
    path = "/api/v1/offers",
    tag = "offers",
    params(
        ("employer_id" = i32, Query, description = "Offering employer ID"),
    ),
    responses(
        (status = 200, description = "Offers retrieved", body = ApiResponse<Vec<OfferResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_employer_offers(
    State(state): State<AppState>,
    Query(query): Query<EmployerOffersQuery>,
) -> Result<Json<ApiResponse<Vec<OfferResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_employer_offers function");

    let offers = offer::for_employer(&state.db, query.employer_id)
        .await
        .map_err(lifecycle_error_response)?;

    Ok(Json(ApiResponse {
        data: offers.into_iter().map(OfferResponse::from).collect(),
        message: "Offers retrieved".to_string(),
        success: true,
    }))
}

/// Accept or decline a pending offer
#[utoipa::path(
    post,
    path = "/api/v1/offers/{offer_id}/respond",
    tag = "offers",
    params(
        ("offer_id" = i32, Path, description = "Offer ID"),
    ),
    request_body = RespondToOfferRequest,
    responses(
        (status = 200, description = "Decision recorded", body = ApiResponse<OfferResponse>),
        (status = 404, description = "Offer not found", body = ErrorResponse),
        (status = 409, description = "Offer expired, already responded, or posting full", body = ErrorResponse),
        (status = 422, description = "Unknown decision", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn respond_to_offer(
    Path(offer_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<RespondToOfferRequest>,
) -> Result<Json<ApiResponse<OfferResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering respond_to_offer function");

    let decision = match request.decision.as_str() {
        "accept" => Decision::Accept,
        "decline" => Decision::Decline,
        _ => return Err(validation_error("decision must be 'accept' or 'decline'")),
    };

    let model = offer::respond(&state.db, offer_id, decision, request.message)
        .await
        .map_err(lifecycle_error_response)?;

    info!("Offer {} moved to {} state", offer_id, request.decision);
    Ok(Json(ApiResponse {
        data: OfferResponse::from(model),
        message: "Decision recorded".to_string(),
        success: true,
    }))
}

/// Expire every pending offer whose deadline has passed.
///
/// The serve loop runs this periodically; the endpoint exists so operators
/// can force a sweep.
#[utoipa::path(
    post,
    path = "/api/v1/offers/sweep",
    tag = "offers",
    responses(
        (status = 200, description = "Sweep completed", body = ApiResponse<SweepResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn sweep_offers(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SweepResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering sweep_offers function");

    let expired = offer::expire_stale(&state.db, Utc::now().naive_utc())
        .await
        .map_err(lifecycle_error_response)?;

    info!("Expiry sweep flipped {} offers", expired);
    Ok(Json(ApiResponse {
        data: SweepResponse { expired },
        message: "Sweep completed".to_string(),
        success: true,
    }))
}
