use chrono::Utc;
use model::entities::job_posting::{self, PostingStatus};
use model::entities::user::{self, UserRole};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
};
use tracing::{debug, info, instrument};

use crate::error::{LifecycleError, Result};

/// Upper bound on positions per posting, mirroring the posting form.
pub const MAX_REQUIRED_CANDIDATES: i32 = 50;

/// Attributes supplied by the employer when creating a posting.
#[derive(Debug, Clone)]
pub struct NewPosting {
    pub title: String,
    pub description: String,
    pub requirements: Option<String>,
    pub benefits: Option<String>,
    pub location: String,
    pub job_type: String,
    pub salary: i32,
    pub required_candidates: i32,
}

/// Why a posting is being closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Manual,
    Auto,
}

/// Create a posting with zeroed counters for an existing employer.
#[instrument(skip(conn, attrs), fields(title = %attrs.title))]
pub async fn create_posting<C: ConnectionTrait>(
    conn: &C,
    employer_id: i32,
    attrs: NewPosting,
) -> Result<job_posting::Model> {
    if attrs.required_candidates < 1 || attrs.required_candidates > MAX_REQUIRED_CANDIDATES {
        return Err(LifecycleError::Validation(format!(
            "required_candidates must be between 1 and {}",
            MAX_REQUIRED_CANDIDATES
        )));
    }
    if attrs.title.trim().is_empty() {
        return Err(LifecycleError::Validation("title must not be empty".into()));
    }
    if attrs.salary <= 0 {
        return Err(LifecycleError::Validation("salary must be positive".into()));
    }

    let employer = user::Entity::find_by_id(employer_id)
        .one(conn)
        .await?
        .ok_or_else(|| LifecycleError::not_found("user", employer_id))?;
    if employer.role != UserRole::Employer {
        return Err(LifecycleError::Validation(format!(
            "user {} is not an employer",
            employer_id
        )));
    }

    let posting = job_posting::ActiveModel {
        user_id: Set(employer_id),
        title: Set(attrs.title.trim().to_string()),
        description: Set(attrs.description),
        requirements: Set(attrs.requirements),
        benefits: Set(attrs.benefits),
        location: Set(attrs.location),
        job_type: Set(attrs.job_type),
        salary: Set(attrs.salary),
        required_candidates: Set(attrs.required_candidates),
        applications_count: Set(0),
        hired_count: Set(0),
        is_closed: Set(false),
        auto_closed: Set(false),
        status: Set(PostingStatus::Active),
        posted_date: Set(Utc::now().naive_utc()),
        closed_date: Set(None),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    info!(
        "Created posting {} for employer {} with {} position(s)",
        posting.id, employer_id, posting.required_candidates
    );
    Ok(posting)
}

/// Count a new submission against the posting.
///
/// The increment is a single conditional UPDATE so a posting that closes
/// concurrently is never counted against.
#[instrument(skip(conn))]
pub async fn record_application<C: ConnectionTrait>(conn: &C, job_id: i32) -> Result<()> {
    let updated = job_posting::Entity::update_many()
        .col_expr(
            job_posting::Column::ApplicationsCount,
            Expr::col(job_posting::Column::ApplicationsCount).add(1),
        )
        .filter(job_posting::Column::Id.eq(job_id))
        .filter(job_posting::Column::Status.eq(PostingStatus::Active))
        .filter(job_posting::Column::IsClosed.eq(false))
        .exec(conn)
        .await?;

    if updated.rows_affected == 0 {
        return Err(match find_active(conn, job_id).await? {
            Some(_) => LifecycleError::ClosedPosting(job_id),
            None => LifecycleError::not_found("posting", job_id),
        });
    }
    debug!("Recorded application against posting {}", job_id);
    Ok(())
}

/// Record a hire and auto-close the posting once capacity is reached.
///
/// The capacity check and the increment are one guarded UPDATE
/// (`hired_count < required_candidates`), so two concurrent hires on the
/// last slot resolve to exactly one success; the loser sees zero rows
/// affected and gets `PostingFull`.
#[instrument(skip(conn))]
pub async fn record_hire<C: ConnectionTrait>(conn: &C, job_id: i32) -> Result<job_posting::Model> {
    let hired = job_posting::Entity::update_many()
        .col_expr(
            job_posting::Column::HiredCount,
            Expr::col(job_posting::Column::HiredCount).add(1),
        )
        .filter(job_posting::Column::Id.eq(job_id))
        .filter(job_posting::Column::Status.eq(PostingStatus::Active))
        .filter(job_posting::Column::IsClosed.eq(false))
        .filter(
            Expr::col(job_posting::Column::HiredCount)
                .lt(Expr::col(job_posting::Column::RequiredCandidates)),
        )
        .exec(conn)
        .await?;

    if hired.rows_affected == 0 {
        return Err(match job_posting::Entity::find_by_id(job_id).one(conn).await? {
            Some(p) if p.status == PostingStatus::Deleted => {
                LifecycleError::not_found("posting", job_id)
            }
            Some(_) => LifecycleError::PostingFull(job_id),
            None => LifecycleError::not_found("posting", job_id),
        });
    }

    // Capacity-triggered closure; a no-op while slots remain or if another
    // writer already closed the posting.
    let closed = job_posting::Entity::update_many()
        .col_expr(job_posting::Column::IsClosed, Expr::value(true))
        .col_expr(job_posting::Column::AutoClosed, Expr::value(true))
        .col_expr(
            job_posting::Column::ClosedDate,
            Expr::value(Utc::now().naive_utc()),
        )
        .filter(job_posting::Column::Id.eq(job_id))
        .filter(job_posting::Column::IsClosed.eq(false))
        .filter(
            Expr::col(job_posting::Column::HiredCount)
                .gte(Expr::col(job_posting::Column::RequiredCandidates)),
        )
        .exec(conn)
        .await?;

    let posting = job_posting::Entity::find_by_id(job_id)
        .one(conn)
        .await?
        .ok_or_else(|| LifecycleError::not_found("posting", job_id))?;

    if closed.rows_affected > 0 {
        info!(
            "Posting {} auto-closed: all {} position(s) filled",
            job_id, posting.required_candidates
        );
    } else {
        debug!(
            "Recorded hire on posting {}: {} of {} filled",
            job_id, posting.hired_count, posting.required_candidates
        );
    }
    Ok(posting)
}

/// Close a posting. Idempotent: closing an already-closed posting is a no-op
/// and already-pending applications and offers are left to resolve on their
/// own.
#[instrument(skip(conn))]
pub async fn close_posting<C: ConnectionTrait>(
    conn: &C,
    job_id: i32,
    reason: CloseReason,
) -> Result<job_posting::Model> {
    let updated = job_posting::Entity::update_many()
        .col_expr(job_posting::Column::IsClosed, Expr::value(true))
        .col_expr(
            job_posting::Column::AutoClosed,
            Expr::value(reason == CloseReason::Auto),
        )
        .col_expr(
            job_posting::Column::ClosedDate,
            Expr::value(Utc::now().naive_utc()),
        )
        .filter(job_posting::Column::Id.eq(job_id))
        .filter(job_posting::Column::Status.eq(PostingStatus::Active))
        .filter(job_posting::Column::IsClosed.eq(false))
        .exec(conn)
        .await?;

    let posting = job_posting::Entity::find_by_id(job_id)
        .one(conn)
        .await?
        .filter(|p| p.status == PostingStatus::Active)
        .ok_or_else(|| LifecycleError::not_found("posting", job_id))?;

    if updated.rows_affected > 0 {
        info!("Posting {} closed ({:?})", job_id, reason);
    } else {
        debug!("Posting {} was already closed", job_id);
    }
    Ok(posting)
}

/// Soft-delete a posting owned by the given employer.
#[instrument(skip(conn))]
pub async fn delete_posting<C: ConnectionTrait>(
    conn: &C,
    job_id: i32,
    employer_id: i32,
) -> Result<()> {
    let updated = job_posting::Entity::update_many()
        .col_expr(
            job_posting::Column::Status,
            Expr::value(PostingStatus::Deleted),
        )
        .filter(job_posting::Column::Id.eq(job_id))
        .filter(job_posting::Column::UserId.eq(employer_id))
        .filter(job_posting::Column::Status.eq(PostingStatus::Active))
        .exec(conn)
        .await?;

    if updated.rows_affected == 0 {
        return Err(LifecycleError::not_found("posting", job_id));
    }
    info!("Posting {} soft-deleted by employer {}", job_id, employer_id);
    Ok(())
}

/// Fetch a posting, treating soft-deleted rows as absent.
pub async fn find_active<C: ConnectionTrait>(
    conn: &C,
    job_id: i32,
) -> Result<Option<job_posting::Model>> {
    let posting = job_posting::Entity::find_by_id(job_id).one(conn).await?;
    Ok(posting.filter(|p| p.status == PostingStatus::Active))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use model::entities::job_posting::PostingStatus;

    #[tokio::test]
    async fn create_rejects_non_positive_capacity() {
        let db = testing::setup_db().await;
        let employer = testing::seed_employer(&db, "Asha").await;

        let err = create_posting(&db, employer.id, testing::posting_attrs(0))
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::Validation(_)));

        let err = create_posting(&db, employer.id, testing::posting_attrs(51))
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::Validation(_)));
    }

    #[tokio::test]
    async fn create_rejects_seeker_owner() {
        let db = testing::setup_db().await;
        let seeker = testing::seed_seeker(&db, "Ravi").await;

        let err = create_posting(&db, seeker.id, testing::posting_attrs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::Validation(_)));
    }

    #[tokio::test]
    async fn hire_count_never_exceeds_capacity() {
        let db = testing::setup_db().await;
        let employer = testing::seed_employer(&db, "Asha").await;
        let posting = create_posting(&db, employer.id, testing::posting_attrs(1))
            .await
            .unwrap();

        let mut successes = 0;
        let mut full_errors = 0;
        for _ in 0..5 {
            match record_hire(&db, posting.id).await {
                Ok(_) => successes += 1,
                Err(LifecycleError::PostingFull(id)) => {
                    assert_eq!(id, posting.id);
                    full_errors += 1;
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(full_errors, 4);

        let stored = find_by_id(&db, posting.id).await;
        assert_eq!(stored.hired_count, 1);
        assert!(stored.is_closed);
        assert!(stored.auto_closed);
        assert!(stored.closed_date.is_some());
    }

    #[tokio::test]
    async fn auto_close_fires_exactly_at_capacity() {
        let db = testing::setup_db().await;
        let employer = testing::seed_employer(&db, "Asha").await;
        let posting = create_posting(&db, employer.id, testing::posting_attrs(2))
            .await
            .unwrap();

        let after_first = record_hire(&db, posting.id).await.unwrap();
        assert_eq!(after_first.hired_count, 1);
        assert!(!after_first.is_closed);

        let after_second = record_hire(&db, posting.id).await.unwrap();
        assert_eq!(after_second.hired_count, 2);
        assert!(after_second.is_closed);
        assert!(after_second.auto_closed);
    }

    #[tokio::test]
    async fn record_application_fails_on_closed_posting() {
        let db = testing::setup_db().await;
        let employer = testing::seed_employer(&db, "Asha").await;
        let posting = create_posting(&db, employer.id, testing::posting_attrs(1))
            .await
            .unwrap();

        record_application(&db, posting.id).await.unwrap();
        close_posting(&db, posting.id, CloseReason::Manual)
            .await
            .unwrap();

        let err = record_application(&db, posting.id).await.unwrap_err();
        assert!(matches!(err, LifecycleError::ClosedPosting(_)));

        let stored = find_by_id(&db, posting.id).await;
        assert_eq!(stored.applications_count, 1);
    }

    #[tokio::test]
    async fn close_posting_is_idempotent() {
        let db = testing::setup_db().await;
        let employer = testing::seed_employer(&db, "Asha").await;
        let posting = create_posting(&db, employer.id, testing::posting_attrs(3))
            .await
            .unwrap();

        let first = close_posting(&db, posting.id, CloseReason::Manual)
            .await
            .unwrap();
        let second = close_posting(&db, posting.id, CloseReason::Manual)
            .await
            .unwrap();

        assert!(first.is_closed);
        assert!(!first.auto_closed);
        assert_eq!(first.is_closed, second.is_closed);
        assert_eq!(first.auto_closed, second.auto_closed);
        assert_eq!(first.closed_date, second.closed_date);
    }

    #[tokio::test]
    async fn close_posting_missing_id_is_not_found() {
        let db = testing::setup_db().await;
        let err = close_posting(&db, 999, CloseReason::Manual)
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::NotFound { .. }));
    }

    #[tokio::test]
    async fn deleted_posting_behaves_as_absent() {
        let db = testing::setup_db().await;
        let employer = testing::seed_employer(&db, "Asha").await;
        let posting = create_posting(&db, employer.id, testing::posting_attrs(1))
            .await
            .unwrap();

        delete_posting(&db, posting.id, employer.id).await.unwrap();

        let err = record_hire(&db, posting.id).await.unwrap_err();
        assert!(matches!(err, LifecycleError::NotFound { .. }));
        assert!(find_active(&db, posting.id).await.unwrap().is_none());

        // A second delete is not silently accepted
        let err = delete_posting(&db, posting.id, employer.id)
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::NotFound { .. }));

        let stored = find_by_id(&db, posting.id).await;
        assert_eq!(stored.status, PostingStatus::Deleted);
    }

    #[tokio::test]
    async fn close_posting_fails_on_deleted_posting() {
        let db = testing::setup_db().await;
        let employer = testing::seed_employer(&db, "Asha").await;
        let posting = create_posting(&db, employer.id, testing::posting_attrs(1))
            .await
            .unwrap();

        delete_posting(&db, posting.id, employer.id).await.unwrap();

        let err = close_posting(&db, posting.id, CloseReason::Manual)
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::NotFound { .. }));

        let stored = find_by_id(&db, posting.id).await;
        assert!(!stored.is_closed);
        assert!(stored.closed_date.is_none());
    }

    async fn find_by_id(
        db: &sea_orm::DatabaseConnection,
        id: i32,
    ) -> model::entities::job_posting::Model {
        model::entities::job_posting::Entity::find_by_id(id)
            .one(db)
            .await
            .unwrap()
            .expect("posting not found")
    }
}
