use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set, sea_query::OnConflict};

use super::{StoreError, StoreResult, new_id, now};
use crate::entity::cell;

#[derive(Debug, Clone)]
pub struct CellWrite {
    pub row_id: String,
    pub column_id: String,
    pub value: Option<String>,
}

pub async fn find_at<C: ConnectionTrait>(
    conn: &C,
    row_id: &str,
    column_id: &str,
) -> StoreResult<Option<cell::Model>> {
    Ok(cell::Entity::find()
        .filter(cell::Column::RowId.eq(row_id))
        .filter(cell::Column::ColumnId.eq(column_id))
        .one(conn)
        .await?)
}

/// Insert the cell at (row, column), or overwrite its value if one exists.
/// A single `INSERT .. ON CONFLICT` so concurrent writers to the same pair
/// update one cell. `id` and `created_at` of an existing cell are preserved.
pub async fn upsert<C: ConnectionTrait>(conn: &C, write: CellWrite) -> StoreResult<cell::Model> {
    let stamp = now();
    cell::Entity::insert(cell::ActiveModel {
        id: Set(new_id()),
        row_id: Set(write.row_id.clone()),
        column_id: Set(write.column_id.clone()),
        value: Set(write.value),
        created_at: Set(stamp),
        updated_at: Set(stamp),
    })
    .on_conflict(
        OnConflict::columns([cell::Column::RowId, cell::Column::ColumnId])
            .update_columns([cell::Column::Value, cell::Column::UpdatedAt])
            .to_owned(),
    )
    .exec_without_returning(conn)
    .await
    .map_err(|e| StoreError::from_insert(e, "Row or column", "Cell"))?;

    find_at(conn, &write.row_id, &write.column_id)
        .await?
        .ok_or(StoreError::NotFound("Cell"))
}
