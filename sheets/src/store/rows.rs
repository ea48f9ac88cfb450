use sea_orm::{ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use super::{StoreError, StoreResult, new_id, now};
use crate::entity::row;

#[derive(Debug, Clone, Default)]
pub struct RowPatch {
    pub order: Option<i32>,
}

pub async fn find<C: ConnectionTrait>(conn: &C, id: &str) -> StoreResult<row::Model> {
    row::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(StoreError::NotFound("Row"))
}

pub async fn create<C: ConnectionTrait>(
    conn: &C,
    table_id: &str,
    order: i32,
) -> StoreResult<row::Model> {
    let id = new_id();
    let stamp = now();
    row::Entity::insert(row::ActiveModel {
        id: Set(id.clone()),
        table_id: Set(table_id.to_string()),
        order: Set(order),
        deleted_at: Set(None),
        created_at: Set(stamp),
        updated_at: Set(stamp),
    })
    .exec_without_returning(conn)
    .await
    .map_err(|e| StoreError::from_insert(e, "Table", "Row"))?;

    find(conn, &id).await
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    id: &str,
    patch: RowPatch,
) -> StoreResult<row::Model> {
    row::Entity::update_many()
        .set(row::ActiveModel {
            order: patch.order.map_or(NotSet, Set),
            updated_at: Set(now()),
            ..Default::default()
        })
        .filter(row::Column::Id.eq(id))
        .exec(conn)
        .await?;

    find(conn, id).await
}

pub async fn soft_delete<C: ConnectionTrait>(conn: &C, id: &str) -> StoreResult<()> {
    row::Entity::update_many()
        .set(row::ActiveModel {
            deleted_at: Set(Some(now())),
            ..Default::default()
        })
        .filter(row::Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(())
}
