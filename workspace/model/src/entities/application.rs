use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle state of an application. `Pending` is the only non-terminal
/// state; every transition out of it is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "withdrawn")]
    Withdrawn,
}

impl ApplicationStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, ApplicationStatus::Pending)
    }

    /// Whether an application in this state still blocks a re-application
    /// to the same posting.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Pending | ApplicationStatus::Accepted
        )
    }
}

/// A seeker's request to be considered for a posting.
///
/// The `job_title`, `employer_name` and `applicant_*` columns are deliberate
/// denormalization: they capture the state of the posting and the applicant
/// at submission time so the row renders stably even if the source records
/// change or disappear later.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub job_id: i32,
    pub applicant_id: i32,
    /// Posting owner at submission time. Snapshot, not a foreign key.
    pub employer_id: i32,
    pub job_title: String,
    pub employer_name: String,
    pub applicant_name: String,
    pub applicant_phone: String,
    pub applicant_email: String,
    pub applicant_experience: Option<String>,
    pub status: ApplicationStatus,
    pub applied_date: DateTime,
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
        from = "Column::ApplicantId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Applicant,
}

impl Related<super::job_posting::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobPosting.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applicant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
