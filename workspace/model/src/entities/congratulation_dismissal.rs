use sea_orm::entity::prelude::*;

/// Records that a user has dismissed the congratulations notification for a
/// specific hired application. Membership is idempotent: a unique index over
/// (user_id, job_id, application_id) is created by the migration, and writers
/// insert with ON CONFLICT DO NOTHING.
///
/// Cascades from `users` only; posting/application deletion leaves the marker
/// behind, which is harmless since lookups are keyed by the full triple.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "congratulations_dismissed")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub job_id: i32,
    pub application_id: i32,
    pub dismissed_at: DateTime,
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
