use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Visibility of a posting. Deletion is soft so employers can review history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum PostingStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "deleted")]
    Deleted,
}

/// A job vacancy listed by an employer.
///
/// Capacity bookkeeping lives here: `required_candidates` is the number of
/// positions, `hired_count` the accepted hires so far and `applications_count`
/// a running total of submissions. `hired_count <= required_candidates` must
/// hold at all times; the lifecycle crate enforces it with guarded updates.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "job_postings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// The employer who owns this posting.
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub requirements: Option<String>,
    pub benefits: Option<String>,
    pub location: String,
    pub job_type: String,
    /// Monthly salary on offer.
    pub salary: i32,
    /// Number of positions to fill. Always at least 1.
    pub required_candidates: i32,
    #[sea_orm(default_value = "0")]
    pub applications_count: i32,
    #[sea_orm(default_value = "0")]
    pub hired_count: i32,
    /// Closed postings accept no further applications.
    #[sea_orm(default_value = "false")]
    pub is_closed: bool,
    /// True when the closure was capacity-triggered rather than manual.
    #[sea_orm(default_value = "false")]
    pub auto_closed: bool,
    pub status: PostingStatus,
    pub posted_date: DateTime,
    pub closed_date: Option<DateTime>,
}

impl Model {
    /// Positions still open on this posting.
    pub fn remaining_slots(&self) -> i32 {
        (self.required_candidates - self.hired_count).max(0)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Employer,
    #[sea_orm(has_many = "super::application::Entity")]
    Application,
    #[sea_orm(has_many = "super::job_offer::Entity")]
    JobOffer,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employer.def()
    }
}

impl Related<super::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Application.def()
    }
}

impl Related<super::job_offer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobOffer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
