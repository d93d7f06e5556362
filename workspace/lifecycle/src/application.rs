use chrono::{Duration, NaiveDateTime, Utc};
use common::{ApplicantSnapshot, employer_display_name};
use model::entities::application::{self, ApplicationStatus};
use model::entities::job_posting::{self, PostingStatus};
use model::entities::user::{self, UserRole};
use model::entities::{employer_profile, seeker_profile};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::{debug, info, instrument};

use crate::error::{LifecycleError, Result};
use crate::posting;

/// Employer verdict on a pending application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
}

/// How long an accepted application keeps feeding the congratulations
/// surface.
pub const CONGRATULATIONS_WINDOW_DAYS: i64 = 7;

/// Submit an application from a seeker to an open posting.
///
/// Runs in one transaction: the duplicate check, the snapshot insert and the
/// `applications_count` increment either all land or none do.
#[instrument(skip(db))]
pub async fn submit(
    db: &DatabaseConnection,
    applicant_id: i32,
    job_id: i32,
) -> Result<application::Model> {
    let txn = db.begin().await?;

    let posting = job_posting::Entity::find_by_id(job_id)
        .one(&txn)
        .await?
        .filter(|p| p.status == PostingStatus::Active)
        .ok_or_else(|| LifecycleError::not_found("posting", job_id))?;
    if posting.is_closed {
        return Err(LifecycleError::ClosedPosting(job_id));
    }

    let applicant = user::Entity::find_by_id(applicant_id)
        .one(&txn)
        .await?
        .ok_or_else(|| LifecycleError::not_found("user", applicant_id))?;
    if applicant.role != UserRole::Seeker {
        return Err(LifecycleError::Validation(format!(
            "user {} is not a seeker",
            applicant_id
        )));
    }

    // Withdrawn and rejected applications do not block a fresh attempt.
    let duplicate = application::Entity::find()
        .filter(application::Column::ApplicantId.eq(applicant_id))
        .filter(application::Column::JobId.eq(job_id))
        .filter(
            application::Column::Status
                .is_in([ApplicationStatus::Pending, ApplicationStatus::Accepted]),
        )
        .one(&txn)
        .await?;
    if duplicate.is_some() {
        return Err(LifecycleError::DuplicateApplication {
            applicant_id,
            job_id,
        });
    }

    let employer = user::Entity::find_by_id(posting.user_id)
        .one(&txn)
        .await?
        .ok_or_else(|| LifecycleError::not_found("user", posting.user_id))?;
    let company = employer_profile::Entity::find_by_id(posting.user_id)
        .one(&txn)
        .await?;
    let profile = seeker_profile::Entity::find_by_id(applicant_id)
        .one(&txn)
        .await?;

    let snapshot = ApplicantSnapshot {
        name: applicant.name.clone(),
        phone: applicant.phone.clone(),
        email: applicant.email.clone(),
        experience: profile.and_then(|p| p.experience),
    };
    let employer_name = employer_display_name(
        company.as_ref().map(|c| c.company_name.as_str()),
        &employer.name,
    );

    let saved = application::ActiveModel {
        job_id: Set(job_id),
        applicant_id: Set(applicant_id),
        employer_id: Set(posting.user_id),
        job_title: Set(posting.title.clone()),
        employer_name: Set(employer_name),
        applicant_name: Set(snapshot.name),
        applicant_phone: Set(snapshot.phone),
        applicant_email: Set(snapshot.email),
        applicant_experience: Set(snapshot.experience),
        status: Set(ApplicationStatus::Pending),
        applied_date: Set(Utc::now().naive_utc()),
        response_date: Set(None),
        response_message: Set(None),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    posting::record_application(&txn, job_id).await?;
    txn.commit().await?;

    info!(
        "Application {} submitted by seeker {} to posting {}",
        saved.id, applicant_id, job_id
    );
    Ok(saved)
}

/// Apply the employer's decision to a pending application.
///
/// The status flip is a conditional UPDATE guarded on `pending`, so a second
/// responder loses cleanly with `AlreadyResponded`. Accepting also records
/// the hire inside the same transaction; if the posting filled up in the
/// meantime the whole transaction rolls back and the application stays
/// `pending` for manual reconciliation rather than being auto-rejected.
#[instrument(skip(db, message))]
pub async fn respond(
    db: &DatabaseConnection,
    application_id: i32,
    decision: Decision,
    message: Option<String>,
) -> Result<application::Model> {
    let target = match decision {
        Decision::Accept => ApplicationStatus::Accepted,
        Decision::Reject => ApplicationStatus::Rejected,
    };

    let txn = db.begin().await?;

    let updated = application::Entity::update_many()
        .col_expr(application::Column::Status, Expr::value(target))
        .col_expr(
            application::Column::ResponseDate,
            Expr::value(Utc::now().naive_utc()),
        )
        .col_expr(
            application::Column::ResponseMessage,
            Expr::value(message.clone()),
        )
        .filter(application::Column::Id.eq(application_id))
        .filter(application::Column::Status.eq(ApplicationStatus::Pending))
        .exec(&txn)
        .await?;

    if updated.rows_affected == 0 {
        return Err(
            match application::Entity::find_by_id(application_id)
                .one(&txn)
                .await?
            {
                Some(_) => LifecycleError::already_responded("application", application_id),
                None => LifecycleError::not_found("application", application_id),
            },
        );
    }

    let app = application::Entity::find_by_id(application_id)
        .one(&txn)
        .await?
        .ok_or_else(|| LifecycleError::not_found("application", application_id))?;

    if decision == Decision::Accept {
        // Full-capacity guard; a PostingFull here rolls everything back.
        posting::record_hire(&txn, app.job_id).await?;
    }

    txn.commit().await?;
    info!(
        "Application {} {} by employer {}",
        application_id,
        match decision {
            Decision::Accept => "accepted",
            Decision::Reject => "rejected",
        },
        app.employer_id
    );
    Ok(app)
}

/// Withdraw a pending application. Terminal like the employer decisions.
#[instrument(skip(db))]
pub async fn withdraw(
    db: &DatabaseConnection,
    application_id: i32,
    applicant_id: i32,
) -> Result<application::Model> {
    let updated = application::Entity::update_many()
        .col_expr(
            application::Column::Status,
            Expr::value(ApplicationStatus::Withdrawn),
        )
        .col_expr(
            application::Column::ResponseDate,
            Expr::value(Utc::now().naive_utc()),
        )
        .filter(application::Column::Id.eq(application_id))
        .filter(application::Column::ApplicantId.eq(applicant_id))
        .filter(application::Column::Status.eq(ApplicationStatus::Pending))
        .exec(db)
        .await?;

    if updated.rows_affected == 0 {
        let existing = application::Entity::find_by_id(application_id)
            .one(db)
            .await?
            .filter(|a| a.applicant_id == applicant_id);
        return Err(match existing {
            Some(_) => LifecycleError::already_responded("application", application_id),
            None => LifecycleError::not_found("application", application_id),
        });
    }

    debug!(
        "Application {} withdrawn by applicant {}",
        application_id, applicant_id
    );
    application::Entity::find_by_id(application_id)
        .one(db)
        .await?
        .ok_or_else(|| LifecycleError::not_found("application", application_id))
}

/// Applications a posting has received, newest first.
pub async fn for_posting(
    db: &DatabaseConnection,
    job_id: i32,
) -> Result<Vec<application::Model>> {
    Ok(application::Entity::find()
        .filter(application::Column::JobId.eq(job_id))
        .order_by_desc(application::Column::AppliedDate)
        .all(db)
        .await?)
}

/// Applications a seeker has submitted, newest first.
pub async fn for_applicant(
    db: &DatabaseConnection,
    applicant_id: i32,
) -> Result<Vec<application::Model>> {
    Ok(application::Entity::find()
        .filter(application::Column::ApplicantId.eq(applicant_id))
        .order_by_desc(application::Column::AppliedDate)
        .all(db)
        .await?)
}

/// Applications of this seeker accepted within the congratulations window.
pub async fn recent_hires(
    db: &DatabaseConnection,
    applicant_id: i32,
    now: NaiveDateTime,
) -> Result<Vec<application::Model>> {
    let cutoff = now - Duration::days(CONGRATULATIONS_WINDOW_DAYS);
    Ok(application::Entity::find()
        .filter(application::Column::ApplicantId.eq(applicant_id))
        .filter(application::Column::Status.eq(ApplicationStatus::Accepted))
        .filter(application::Column::ResponseDate.gte(cutoff))
        .order_by_desc(application::Column::ResponseDate)
        .all(db)
        .await?)
}
