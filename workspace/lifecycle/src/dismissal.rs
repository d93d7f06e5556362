use chrono::{NaiveDateTime, Utc};
use model::entities::{application, congratulation_dismissal};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};
use tracing::{debug, instrument};

use crate::application::recent_hires;
use crate::error::Result;

/// Mark a congratulations notification as dismissed.
///
/// Idempotent set membership: the unique (user, job, application) index plus
/// ON CONFLICT DO NOTHING makes the second call a no-op, never an error.
#[instrument(skip(conn))]
pub async fn dismiss<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
    job_id: i32,
    application_id: i32,
) -> Result<()> {
    let marker = congratulation_dismissal::ActiveModel {
        user_id: Set(user_id),
        job_id: Set(job_id),
        application_id: Set(application_id),
        dismissed_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    };

    congratulation_dismissal::Entity::insert(marker)
        .on_conflict(
            OnConflict::columns([
                congratulation_dismissal::Column::UserId,
                congratulation_dismissal::Column::JobId,
                congratulation_dismissal::Column::ApplicationId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    debug!(
        "Dismissal recorded for user {} / job {} / application {}",
        user_id, job_id, application_id
    );
    Ok(())
}

/// Whether the user has already dismissed this notification.
pub async fn is_dismissed<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
    job_id: i32,
    application_id: i32,
) -> Result<bool> {
    let count = congratulation_dismissal::Entity::find()
        .filter(congratulation_dismissal::Column::UserId.eq(user_id))
        .filter(congratulation_dismissal::Column::JobId.eq(job_id))
        .filter(congratulation_dismissal::Column::ApplicationId.eq(application_id))
        .count(conn)
        .await?;
    Ok(count > 0)
}

/// Recently accepted applications the user has not yet dismissed; drives the
/// congratulations surface.
pub async fn pending_congratulations(
    db: &DatabaseConnection,
    user_id: i32,
    now: NaiveDateTime,
) -> Result<Vec<application::Model>> {
    let mut undismissed = Vec::new();
    for app in recent_hires(db, user_id, now).await? {
        if !is_dismissed(db, user_id, app.job_id, app.id).await? {
            undismissed.push(app);
        }
    }
    Ok(undismissed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{Decision, respond, submit};
    use crate::posting::create_posting;
    use crate::testing;
    use model::entities::congratulation_dismissal;
    use sea_orm::EntityTrait;

    #[tokio::test]
    async fn dismiss_is_idempotent() {
        let db = testing::setup_db().await;
        let seeker = testing::seed_seeker(&db, "Ravi").await;

        assert!(!is_dismissed(&db, seeker.id, 7, 42).await.unwrap());

        dismiss(&db, seeker.id, 7, 42).await.unwrap();
        dismiss(&db, seeker.id, 7, 42).await.unwrap();

        assert!(is_dismissed(&db, seeker.id, 7, 42).await.unwrap());
        let rows = congratulation_dismissal::Entity::find()
            .all(&db)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn distinct_triples_are_separate_markers() {
        let db = testing::setup_db().await;
        let seeker = testing::seed_seeker(&db, "Ravi").await;

        dismiss(&db, seeker.id, 7, 42).await.unwrap();
        dismiss(&db, seeker.id, 7, 43).await.unwrap();

        assert!(is_dismissed(&db, seeker.id, 7, 42).await.unwrap());
        assert!(is_dismissed(&db, seeker.id, 7, 43).await.unwrap());
        assert!(!is_dismissed(&db, seeker.id, 8, 42).await.unwrap());
    }

    #[tokio::test]
    async fn pending_congratulations_filters_dismissed() {
        let db = testing::setup_db().await;
        let employer = testing::seed_employer(&db, "Asha").await;
        let seeker = testing::seed_seeker(&db, "Ravi").await;
        let posting = create_posting(&db, employer.id, testing::posting_attrs(2))
            .await
            .unwrap();
        let app = submit(&db, seeker.id, posting.id).await.unwrap();
        respond(&db, app.id, Decision::Accept, None).await.unwrap();

        let now = Utc::now().naive_utc();
        let before = pending_congratulations(&db, seeker.id, now).await.unwrap();
        assert_eq!(before.len(), 1);
        assert_eq!(before[0].id, app.id);

        dismiss(&db, seeker.id, posting.id, app.id).await.unwrap();
        let after = pending_congratulations(&db, seeker.id, now).await.unwrap();
        assert!(after.is_empty());
    }
}
