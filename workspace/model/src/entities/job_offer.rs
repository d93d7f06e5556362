use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle state of an offer. Mirrors `ApplicationStatus` but with
/// `Declined` in place of `Rejected`, plus automatic `Expired`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "declined")]
    Declined,
    #[sea_orm(string_value = "expired")]
    Expired,
}

impl OfferStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, OfferStatus::Pending)
    }
}

/// An employer-initiated proposal of employment for a posting.
///
/// Symmetric to `application` but flowing the other way; carries its own
/// snapshot of the terms (`job_title`, `job_description`, `salary_offered`,
/// `employer_name`) plus an expiry deadline after which a pending offer is
/// swept to `expired`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "job_offers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub job_id: i32,
    /// Issuing employer at offer time. Snapshot, not a foreign key.
    pub employer_id: i32,
    pub job_seeker_id: i32,
    pub job_title: String,
    pub job_description: String,
    pub location: String,
    pub employer_name: String,
    /// Monthly salary offered.
    pub salary_offered: i32,
    pub status: OfferStatus,
    pub offered_date: DateTime,
    pub expires_at: DateTime,
    pub response_date: Option<DateTime>,
    pub response_message: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::job_posting::Entity",
        from = "Column::JobId",
        to = "super::job_posting::Column::Id",
        on_delete = "Cascade"
    )]
    JobPosting,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::JobSeekerId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    JobSeeker,
}

impl Related<super::job_posting::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobPosting.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobSeeker.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
