use crate::schemas::{
    lifecycle_error_response, validation_error, ApiResponse, AppState, ErrorResponse,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use model::entities::{employer_profile, seeker_profile, user, user::UserRole};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, IntoActiveModel, QueryFilter, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace};
use utoipa::ToSchema;

/// Seeker profile fields, used both on signup and in responses
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct SeekerProfilePayload {
    /// Work experience bracket (e.g. "2-5 years")
    pub experience: Option<String>,
    pub education: Option<String>,
    /// Expected monthly salary in rupees
    pub expected_salary: Option<i32>,
    /// Job types the seeker will take (cook, driver, maid, ...)
    #[serde(default)]
    pub job_types: Vec<String>,
    /// Availability windows (full-time, part-time, live-in, ...)
    #[serde(default)]
    pub availability: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
}

/// Employer profile fields, used both on signup and in responses
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct EmployerProfilePayload {
    /// Company or household name shown to applicants
    pub company_name: String,
    pub company_type: Option<String>,
    pub industry: Option<String>,
    pub business_description: Option<String>,
}

/// Request body for creating a new user
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    /// Phone number (must be unique)
    pub phone: String,
    /// Email address (must be unique)
    pub email: String,
    /// Account role: "seeker" or "employer"
    pub role: String,
    /// Required when role is "seeker"; forbidden otherwise
    pub seeker_profile: Option<SeekerProfilePayload>,
    /// Required when role is "employer"; forbidden otherwise
    pub employer_profile: Option<EmployerProfilePayload>,
}

/// Request body for updating a user
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    /// Seeker availability flag ("available", "not_available")
    pub availability_status: Option<String>,
    pub seeker_profile: Option<SeekerProfilePayload>,
    pub employer_profile: Option<EmployerProfilePayload>,
}

/// User response model
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub role: String,
    pub availability_status: Option<String>,
    pub seeker_profile: Option<SeekerProfilePayload>,
    pub employer_profile: Option<EmployerProfilePayload>,
}

impl UserResponse {
    fn from_parts(
        user: user::Model,
        seeker: Option<seeker_profile::Model>,
        employer: Option<employer_profile::Model>,
    ) -> Self {
        Self {
            id: user.id,
            name: user.name,
            phone: user.phone,
            email: user.email,
            role: match user.role {
                UserRole::Seeker => "seeker".to_string(),
                UserRole::Employer => "employer".to_string(),
            },
            availability_status: user.availability_status,
            seeker_profile: seeker.map(|p| SeekerProfilePayload {
                experience: p.experience,
                education: p.education,
                expected_salary: p.expected_salary,
                job_types: p.job_types.0,
                availability: p.availability.0,
                languages: p.languages.0,
            }),
            employer_profile: employer.map(|p| EmployerProfilePayload {
                company_name: p.company_name,
                company_type: p.company_type,
                industry: p.industry,
                business_description: p.business_description,
            }),
        }
    }
}

/// Query parameters for listing users
#[derive(Debug, Deserialize, ToSchema)]
pub struct UsersQuery {
    /// Restrict the listing to one role ("seeker" or "employer")
    pub role: Option<String>,
}

fn parse_role(raw: &str) -> Option<UserRole> {
    match raw {
        "seeker" => Some(UserRole::Seeker),
        "employer" => Some(UserRole::Employer),
        _ => None,
    }
}

fn unique_violation(db_error: &DbErr) -> bool {
    let message = db_error.to_string().to_lowercase();
    message.contains("unique") || message.contains("constraint")
}

/// Register a new seeker or employer together with their role profile
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = ApiResponse<UserResponse>),
        (status = 409, description = "Phone or email already registered", body = ErrorResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request), fields(phone = %request.phone))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_user function");

    let Some(role) = parse_role(&request.role) else {
        return Err(validation_error("role must be 'seeker' or 'employer'"));
    };
    if request.name.trim().is_empty() {
        return Err(validation_error("name must not be empty"));
    }
    match role {
        UserRole::Seeker if request.employer_profile.is_some() => {
            return Err(validation_error("seeker accounts cannot carry an employer profile"));
        }
        UserRole::Employer if request.seeker_profile.is_some() => {
            return Err(validation_error("employer accounts cannot carry a seeker profile"));
        }
        UserRole::Employer if request.employer_profile.is_none() => {
            return Err(validation_error("employer accounts require an employer profile"));
        }
        _ => {}
    }

    debug!("Creating {} account for {}", request.role, request.name);

    let txn = state
        .db
        .begin()
        .await
        .map_err(|e| lifecycle_error_response(e.into()))?;

    let new_user = user::ActiveModel {
        name: Set(request.name.clone()),
        phone: Set(request.phone.clone()),
        email: Set(request.email.clone()),
        role: Set(role),
        availability_status: Set(match role {
            UserRole::Seeker => Some("available".to_string()),
            UserRole::Employer => None,
        }),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    let user_model = match new_user.insert(&txn).await {
        Ok(model) => model,
        Err(db_error) => {
            error!("Failed to create user '{}': {}", request.phone, db_error);
            let response = if unique_violation(&db_error) {
                (
                    StatusCode::CONFLICT,
                    Json(ErrorResponse {
                        error: "Phone number or email is already registered".to_string(),
                        code: "PHONE_OR_EMAIL_EXISTS".to_string(),
                        success: false,
                    }),
                )
            } else {
                lifecycle_error_response(db_error.into())
            };
            return Err(response);
        }
    };

    let mut seeker = None;
    let mut employer = None;
    match role {
        UserRole::Seeker => {
            let payload = request.seeker_profile.unwrap_or(SeekerProfilePayload {
                experience: None,
                education: None,
                expected_salary: None,
                job_types: Vec::new(),
                availability: Vec::new(),
                languages: Vec::new(),
            });
            let profile = seeker_profile::ActiveModel {
                user_id: Set(user_model.id),
                experience: Set(payload.experience),
                education: Set(payload.education),
                expected_salary: Set(payload.expected_salary),
                job_types: Set(payload.job_types.into()),
                availability: Set(payload.availability.into()),
                languages: Set(payload.languages.into()),
            };
            seeker = Some(
                profile
                    .insert(&txn)
                    .await
                    .map_err(|e| lifecycle_error_response(e.into()))?,
            );
        }
        UserRole::Employer => {
            // Checked above, employer signups always carry a profile.
            let payload = request.employer_profile.unwrap_or(EmployerProfilePayload {
                company_name: String::new(),
                company_type: None,
                industry: None,
                business_description: None,
            });
            let profile = employer_profile::ActiveModel {
                user_id: Set(user_model.id),
                company_name: Set(payload.company_name),
                company_type: Set(payload.company_type),
                industry: Set(payload.industry),
                business_description: Set(payload.business_description),
            };
            employer = Some(
                profile
                    .insert(&txn)
                    .await
                    .map_err(|e| lifecycle_error_response(e.into()))?,
            );
        }
    }

    txn.commit()
        .await
        .map_err(|e| lifecycle_error_response(e.into()))?;

    info!(
        "User created successfully with ID: {}, role: {}",
        user_model.id, request.role
    );
    let response = ApiResponse {
        data: UserResponse::from_parts(user_model, seeker, employer),
        message: "User created successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// List users, optionally narrowed to one role
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    params(
        ("role" = Option<String>, Query, description = "Filter by role: seeker or employer"),
    ),
    responses(
        (status = 200, description = "Users retrieved successfully", body = ApiResponse<Vec<UserResponse>>),
        (status = 422, description = "Unknown role filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
    Query(query): Query<UsersQuery>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_users function");

    let role_filter = match query.role.as_deref() {
        None => None,
        Some(raw) => match parse_role(raw) {
            Some(role) => Some(role),
            None => return Err(validation_error("role must be 'seeker' or 'employer'")),
        },
    };

    let users = match role_filter {
        // Role-filtered listings carry the matching profile so seeker
        // browsing shows skills and salary expectations in one round trip.
        Some(UserRole::Seeker) => user::Entity::find()
            .filter(user::Column::Role.eq(UserRole::Seeker))
            .find_also_related(seeker_profile::Entity)
            .all(&state.db)
            .await
            .map_err(|e| lifecycle_error_response(e.into()))?
            .into_iter()
            .map(|(u, p)| UserResponse::from_parts(u, p, None))
            .collect(),
        Some(UserRole::Employer) => user::Entity::find()
            .filter(user::Column::Role.eq(UserRole::Employer))
            .find_also_related(employer_profile::Entity)
            .all(&state.db)
            .await
            .map_err(|e| lifecycle_error_response(e.into()))?
            .into_iter()
            .map(|(u, p)| UserResponse::from_parts(u, None, p))
            .collect(),
        None => user::Entity::find()
            .all(&state.db)
            .await
            .map_err(|e| lifecycle_error_response(e.into()))?
            .into_iter()
            .map(|u| UserResponse::from_parts(u, None, None))
            .collect::<Vec<_>>(),
    };

    debug!("Retrieved {} users", users.len());
    Ok(Json(ApiResponse {
        data: users,
        message: "Users retrieved successfully".to_string(),
        success: true,
    }))
}

/// Get a single user with their role profile
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "User retrieved successfully", body = ApiResponse<UserResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_user(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<UserResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_user function");

    let user_model = user::Entity::find_by_id(user_id)
        .one(&state.db)
        .await
        .map_err(|e| lifecycle_error_response(e.into()))?
        .ok_or_else(|| {
            lifecycle_error_response(lifecycle::LifecycleError::not_found("user", user_id))
        })?;

    let (seeker, employer) = match user_model.role {
        UserRole::Seeker => (
            seeker_profile::Entity::find_by_id(user_id)
                .one(&state.db)
                .await
                .map_err(|e| lifecycle_error_response(e.into()))?,
            None,
        ),
        UserRole::Employer => (
            None,
            employer_profile::Entity::find_by_id(user_id)
                .one(&state.db)
                .await
                .map_err(|e| lifecycle_error_response(e.into()))?,
        ),
    };

    Ok(Json(ApiResponse {
        data: UserResponse::from_parts(user_model, seeker, employer),
        message: "User retrieved successfully".to_string(),
        success: true,
    }))
}

/// Update account fields and the role profile
#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = ApiResponse<UserResponse>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn update_user(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering update_user function");

    let txn = state
        .db
        .begin()
        .await
        .map_err(|e| lifecycle_error_response(e.into()))?;

    let user_model = user::Entity::find_by_id(user_id)
        .one(&txn)
        .await
        .map_err(|e| lifecycle_error_response(e.into()))?
        .ok_or_else(|| {
            lifecycle_error_response(lifecycle::LifecycleError::not_found("user", user_id))
        })?;
    let role = user_model.role;

    match role {
        UserRole::Seeker if request.employer_profile.is_some() => {
            return Err(validation_error("seeker accounts cannot carry an employer profile"));
        }
        UserRole::Employer if request.seeker_profile.is_some() => {
            return Err(validation_error("employer accounts cannot carry a seeker profile"));
        }
        _ => {}
    }

    let mut active = user_model.into_active_model();
    if let Some(name) = request.name {
        if name.trim().is_empty() {
            return Err(validation_error("name must not be empty"));
        }
        active.name = Set(name);
    }
    if let Some(status) = request.availability_status {
        active.availability_status = Set(Some(status));
    }
    let user_model = active
        .update(&txn)
        .await
        .map_err(|e| lifecycle_error_response(e.into()))?;

    let mut seeker = None;
    let mut employer = None;
    if let Some(payload) = request.seeker_profile {
        let profile = seeker_profile::ActiveModel {
            user_id: Set(user_id),
            experience: Set(payload.experience),
            education: Set(payload.education),
            expected_salary: Set(payload.expected_salary),
            job_types: Set(payload.job_types.into()),
            availability: Set(payload.availability.into()),
            languages: Set(payload.languages.into()),
        };
        seeker = Some(
            profile
                .update(&txn)
                .await
                .map_err(|e| lifecycle_error_response(e.into()))?,
        );
    } else if role == UserRole::Seeker {
        seeker = seeker_profile::Entity::find_by_id(user_id)
            .one(&txn)
            .await
            .map_err(|e| lifecycle_error_response(e.into()))?;
    }
    if let Some(payload) = request.employer_profile {
        let profile = employer_profile::ActiveModel {
            user_id: Set(user_id),
            company_name: Set(payload.company_name),
            company_type: Set(payload.company_type),
            industry: Set(payload.industry),
            business_description: Set(payload.business_description),
        };
        employer = Some(
            profile
                .update(&txn)
                .await
                .map_err(|e| lifecycle_error_response(e.into()))?,
        );
    } else if role == UserRole::Employer {
        employer = employer_profile::Entity::find_by_id(user_id)
            .one(&txn)
            .await
            .map_err(|e| lifecycle_error_response(e.into()))?;
    }

    txn.commit()
        .await
        .map_err(|e| lifecycle_error_response(e.into()))?;

    info!("User {} updated successfully", user_id);
    Ok(Json(ApiResponse {
        data: UserResponse::from_parts(user_model, seeker, employer),
        message: "User updated successfully".to_string(),
        success: true,
    }))
}

/// Delete a user account and everything hanging off it
#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i32, Path, description = "User ID"),
    ),
    responses(
        (status = 200, description = "User deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_user(
    Path(user_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering delete_user function");

    // Profiles, postings, applications, offers and dismissals all cascade.
    let result = user::Entity::delete_by_id(user_id)
        .exec(&state.db)
        .await
        .map_err(|e| lifecycle_error_response(e.into()))?;

    if result.rows_affected == 0 {
        return Err(lifecycle_error_response(
            lifecycle::LifecycleError::not_found("user", user_id),
        ));
    }

    info!("User {} deleted", user_id);
    Ok(Json(ApiResponse {
        data: format!("User {} deleted", user_id),
        message: "User deleted successfully".to_string(),
        success: true,
    }))
}
