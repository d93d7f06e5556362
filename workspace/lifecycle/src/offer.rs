use chrono::{Duration, NaiveDateTime, Utc};
use common::employer_display_name;
use model::entities::employer_profile;
use model::entities::job_offer::{self, OfferStatus};
use model::entities::job_posting;
use model::entities::user::{self, UserRole};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::{debug, info, instrument};

use crate::error::{LifecycleError, Result};
use crate::posting;

/// Seeker verdict on a pending offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Decline,
}

/// Default lifetime of an offer when the employer does not pick a deadline.
pub const DEFAULT_EXPIRY_HOURS: i64 = 24;

/// Terms of an offer as entered by the employer.
#[derive(Debug, Clone)]
pub struct OfferTerms {
    pub job_title: String,
    pub job_description: String,
    pub location: String,
    pub salary_offered: i32,
    pub expires_at: NaiveDateTime,
}

/// Deadline used when the employer leaves expiry unset.
pub fn default_expiry(now: NaiveDateTime) -> NaiveDateTime {
    now + Duration::hours(DEFAULT_EXPIRY_HOURS)
}

/// Issue an offer from an employer to a seeker for an open posting.
#[instrument(skip(db, terms), fields(job_title = %terms.job_title))]
pub async fn issue(
    db: &DatabaseConnection,
    employer_id: i32,
    seeker_id: i32,
    job_id: i32,
    terms: OfferTerms,
) -> Result<job_offer::Model> {
    let now = Utc::now().naive_utc();
    if terms.expires_at <= now {
        return Err(LifecycleError::InvalidExpiry);
    }
    if terms.job_title.trim().is_empty() {
        return Err(LifecycleError::Validation(
            "job_title must not be empty".into(),
        ));
    }
    if terms.salary_offered <= 0 {
        return Err(LifecycleError::Validation(
            "salary_offered must be positive".into(),
        ));
    }

    let posting = posting::find_active(db, job_id)
        .await?
        .ok_or_else(|| LifecycleError::not_found("posting", job_id))?;
    if posting.is_closed {
        return Err(LifecycleError::ClosedPosting(job_id));
    }

    let employer = user::Entity::find_by_id(employer_id)
        .one(db)
        .await?
        .ok_or_else(|| LifecycleError::not_found("user", employer_id))?;
    if employer.role != UserRole::Employer {
        return Err(LifecycleError::Validation(format!(
            "user {} is not an employer",
            employer_id
        )));
    }
    let seeker = user::Entity::find_by_id(seeker_id)
        .one(db)
        .await?
        .ok_or_else(|| LifecycleError::not_found("user", seeker_id))?;
    if seeker.role != UserRole::Seeker {
        return Err(LifecycleError::Validation(format!(
            "user {} is not a seeker",
            seeker_id
        )));
    }

    let company = employer_profile::Entity::find_by_id(employer_id)
        .one(db)
        .await?;
    let employer_name = employer_display_name(
        company.as_ref().map(|c| c.company_name.as_str()),
        &employer.name,
    );

    let offer = job_offer::ActiveModel {
        job_id: Set(job_id),
        employer_id: Set(employer_id),
        job_seeker_id: Set(seeker_id),
        job_title: Set(terms.job_title.trim().to_string()),
        job_description: Set(terms.job_description),
        location: Set(terms.location),
        employer_name: Set(employer_name),
        salary_offered: Set(terms.salary_offered),
        status: Set(OfferStatus::Pending),
        offered_date: Set(now),
        expires_at: Set(terms.expires_at),
        response_date: Set(None),
        response_message: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        "Offer {} issued by employer {} to seeker {} for posting {}",
        offer.id, employer_id, seeker_id, job_id
    );
    Ok(offer)
}

/// Apply the seeker's decision to a pending offer.
///
/// An offer whose deadline has passed is expired first, so a late responder
/// gets `AlreadyResponded` rather than reviving it. Accepting records the
/// hire under the same full-capacity guard as applications.
#[instrument(skip(db, message))]
pub async fn respond(
    db: &DatabaseConnection,
    offer_id: i32,
    decision: Decision,
    message: Option<String>,
) -> Result<job_offer::Model> {
    let now = Utc::now().naive_utc();

    // Lazy expiry; whoever writes first wins, the loser becomes a no-op.
    job_offer::Entity::update_many()
        .col_expr(job_offer::Column::Status, Expr::value(OfferStatus::Expired))
        .filter(job_offer::Column::Id.eq(offer_id))
        .filter(job_offer::Column::Status.eq(OfferStatus::Pending))
        .filter(job_offer::Column::ExpiresAt.lte(now))
        .exec(db)
        .await?;

    let target = match decision {
        Decision::Accept => OfferStatus::Accepted,
        Decision::Decline => OfferStatus::Declined,
    };

    let txn = db.begin().await?;

    let updated = job_offer::Entity::update_many()
        .col_expr(job_offer::Column::Status, Expr::value(target))
        .col_expr(job_offer::Column::ResponseDate, Expr::value(now))
        .col_expr(
            job_offer::Column::ResponseMessage,
            Expr::value(message.clone()),
        )
        .filter(job_offer::Column::Id.eq(offer_id))
        .filter(job_offer::Column::Status.eq(OfferStatus::Pending))
        .exec(&txn)
        .await?;

    if updated.rows_affected == 0 {
        return Err(
            match job_offer::Entity::find_by_id(offer_id).one(&txn).await? {
                Some(_) => LifecycleError::already_responded("offer", offer_id),
                None => LifecycleError::not_found("offer", offer_id),
            },
        );
    }

    let offer = job_offer::Entity::find_by_id(offer_id)
        .one(&txn)
        .await?
        .ok_or_else(|| LifecycleError::not_found("offer", offer_id))?;

    if decision == Decision::Accept {
        // A PostingFull here rolls the offer back to pending.
        posting::record_hire(&txn, offer.job_id).await?;
    }

    txn.commit().await?;
    info!(
        "Offer {} {} by seeker {}",
        offer_id,
        match decision {
            Decision::Accept => "accepted",
            Decision::Decline => "declined",
        },
        offer.job_seeker_id
    );
    Ok(offer)
}

/// Sweep all pending offers whose deadline has passed.
///
/// Stateless and idempotent: a row already transitioned by a concurrent
/// responder simply does not match the filter, which counts as success.
#[instrument(skip(db))]
pub async fn expire_stale(db: &DatabaseConnection, now: NaiveDateTime) -> Result<u64> {
    let expired = job_offer::Entity::update_many()
        .col_expr(job_offer::Column::Status, Expr::value(OfferStatus::Expired))
        .filter(job_offer::Column::Status.eq(OfferStatus::Pending))
        .filter(job_offer::Column::ExpiresAt.lte(now))
        .exec(db)
        .await?;

    if expired.rows_affected > 0 {
        info!("Expired {} stale offer(s)", expired.rows_affected);
    } else {
        debug!("No stale offers to expire");
    }
    Ok(expired.rows_affected)
}

/// Offers a seeker has received, newest first.
pub async fn for_seeker(db: &DatabaseConnection, seeker_id: i32) -> Result<Vec<job_offer::Model>> {
    Ok(job_offer::Entity::find()
        .filter(job_offer::Column::JobSeekerId.eq(seeker_id))
        .order_by_desc(job_offer::Column::OfferedDate)
        .all(db)
        .await?)
}

/// Offers an employer has issued, newest first.
pub async fn for_employer(
    db: &DatabaseConnection,
    employer_id: i32,
) -> Result<Vec<job_offer::Model>> {
    Ok(job_offer::Entity::find()
        .filter(job_offer::Column::EmployerId.eq(employer_id))
        .order_by_desc(job_offer::Column::OfferedDate)
        .all(db)
        .await?)
}
