use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role discriminator for a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[sea_orm(string_value = "seeker")]
    Seeker,
    #[sea_orm(string_value = "employer")]
    Employer,
}

/// Common identity record for every person on the platform.
/// Role-specific attributes live in `seeker_profile` / `employer_profile`,
/// so a user row never carries fields that do not apply to its role.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub phone: String,
    #[sea_orm(unique)]
    pub email: String,
    pub role: UserRole,
    /// Free-text availability flag shown on seeker cards, e.g. "available".
    pub availability_status: Option<String>,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::seeker_profile::Entity")]
    SeekerProfile,
    #[sea_orm(has_one = "super::employer_profile::Entity")]
    EmployerProfile,
    /// Postings owned by an employer.
    #[sea_orm(has_many = "super::job_posting::Entity")]
    JobPosting,
    /// Applications submitted by a seeker.
    #[sea_orm(has_many = "super::application::Entity")]
    Application,
    /// Offers received by a seeker.
    #[sea_orm(has_many = "super::job_offer::Entity")]
    JobOffer,
    #[sea_orm(has_many = "super::congratulation_dismissal::Entity")]
    CongratulationDismissal,
}

impl Related<super::seeker_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SeekerProfile.def()
    }
}

impl Related<super::employer_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmployerProfile.def()
    }
}

impl Related<super::job_posting::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobPosting.def()
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

impl Related<super::congratulation_dismissal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CongratulationDismissal.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
