use thiserror::Error;

/// Error types for the job lifecycle module.
///
/// Capacity and duplicate-submission failures get their own variants so the
/// calling layer can render actionable messages ("position filled" vs
/// "already applied") instead of a generic failure.
#[derive(Error, Debug)]
pub enum LifecycleError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Malformed or out-of-range input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Action attempted on a posting that no longer accepts it
    #[error("Posting {0} is closed")]
    ClosedPosting(i32),

    /// A hire was attempted but every position is already filled
    #[error("Posting {0} has no remaining positions")]
    PostingFull(i32),

    /// The applicant already has an active application for this posting
    #[error("Applicant {applicant_id} already has an active application for posting {job_id}")]
    DuplicateApplication { applicant_id: i32, job_id: i32 },

    /// The application or offer has already reached a terminal state
    #[error("{entity} {id} has already been responded to")]
    AlreadyResponded { entity: &'static str, id: i32 },

    /// An offer expiry deadline that is not in the future
    #[error("Offer expiry must be in the future")]
    InvalidExpiry,

    /// A referenced row does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
}

impl LifecycleError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn already_responded(entity: &'static str, id: i32) -> Self {
        Self::AlreadyResponded { entity, id }
    }
}

/// Type alias for Result with LifecycleError
pub type Result<T> = std::result::Result<T, LifecycleError>;
