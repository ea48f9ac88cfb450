use sea_orm::entity::prelude::*;

/// A single value at (row, column). Unique per pair; upserted, never deleted by the API.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cells")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub row_id: String,
    pub column_id: String,
    /// Stored as text whatever the column type.
    pub value: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::row::Entity",
        from = "Column::RowId",
        to = "super::row::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Row,
    #[sea_orm(
        belongs_to = "super::column::Entity",
        from = "Column::ColumnId",
        to = "super::column::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Column,
}

impl Related<super::row::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Row.def()
    }
}

impl Related<super::column::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Column.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
