use sea_orm::entity::prelude::*;

/// A sheet. Owns columns and rows; never hard-deleted by the API.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tables")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    /// Display position. Advisory only: duplicates allowed, never renumbered.
    pub order: i32,
    pub deleted_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::column::Entity")]
    Column,
    #[sea_orm(has_many = "super::row::Entity")]
    Row,
}

impl Related<super::column::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Column.def()
    }
}

impl Related<super::row::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Row.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
