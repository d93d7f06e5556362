use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A JSON-encoded array of strings.
///
/// The storage contract requires `job_types`, `availability` and `languages`
/// to be persisted as JSON arrays of strings, so they round-trip as typed
/// lists instead of free text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct StringList(pub Vec<String>);

impl From<Vec<String>> for StringList {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

/// Seeker-specific profile payload, 1:1 with a `users` row of role `seeker`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "seeker_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i32,
    /// Experience bracket, e.g. "Fresher" or "2-5 years".
    pub experience: Option<String>,
    pub education: Option<String>,
    /// Expected monthly salary.
    pub expected_salary: Option<i32>,
    #[sea_orm(column_type = "Json")]
    pub job_types: StringList,
    #[sea_orm(column_type = "Json")]
    pub availability: StringList,
    #[sea_orm(column_type = "Json")]
    pub languages: StringList,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
