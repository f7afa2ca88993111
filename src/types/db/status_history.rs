use sea_orm::entity::prelude::*;

use super::idea::IdeaStatus;

/// Append-only ledger of status transitions. Rows are never updated or
/// deleted independently of their parent idea; the most recent row always
/// reflects the idea's current status.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "idea_status_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub idea_id: String,
    pub status: IdeaStatus,
    pub changed_by: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub comment: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::idea::Entity",
        from = "Column::IdeaId",
        to = "super::idea::Column::Id"
    )]
    Idea,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ChangedBy",
        to = "super::user::Column::Id"
    )]
    ChangedByUser,
}

impl Related<super::idea::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Idea.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChangedByUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
