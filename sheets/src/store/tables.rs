use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait, LoaderTrait, QueryFilter,
    QueryOrder, Set,
};

use super::{StoreError, StoreResult, new_id, now};
use crate::entity::{cell, column, row, table};

#[derive(Debug, Clone)]
pub struct NewTable {
    pub name: String,
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct TablePatch {
    pub name: Option<String>,
}

/// Which columns a detail read includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnScope {
    /// Only columns with `deleted_at` null.
    Live,
    /// Every column, soft-deleted or not.
    All,
}

/// A table with its columns and rows, each row carrying its cells.
#[derive(Debug, Clone)]
pub struct TableDetail {
    pub table: table::Model,
    pub columns: Vec<column::Model>,
    pub rows: Vec<(row::Model, Vec<cell::Model>)>,
}

/// Non-deleted tables, ascending by `order`.
pub async fn list_live<C: ConnectionTrait>(conn: &C) -> StoreResult<Vec<table::Model>> {
    Ok(table::Entity::find()
        .filter(table::Column::DeletedAt.is_null())
        .order_by_asc(table::Column::Order)
        .order_by_asc(table::Column::CreatedAt)
        .all(conn)
        .await?)
}

/// One more than the highest order across all tables, soft-deleted included; 1 when empty.
pub async fn next_order<C: ConnectionTrait>(conn: &C) -> StoreResult<i32> {
    let top = table::Entity::find()
        .order_by_desc(table::Column::Order)
        .one(conn)
        .await?;
    top.map_or(0, |t| t.order).checked_add(1).ok_or_else(|| {
        StoreError::Conflict("Table order is at its maximum; pass an explicit order".to_string())
    })
}

pub async fn find<C: ConnectionTrait>(conn: &C, id: &str) -> StoreResult<table::Model> {
    table::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(StoreError::NotFound("Table"))
}

pub async fn create<C: ConnectionTrait>(conn: &C, new: NewTable) -> StoreResult<table::Model> {
    let order = match new.order {
        Some(order) => order,
        None => next_order(conn).await?,
    };

    let id = new_id();
    let stamp = now();
    table::Entity::insert(table::ActiveModel {
        id: Set(id.clone()),
        name: Set(new.name),
        order: Set(order),
        deleted_at: Set(None),
        created_at: Set(stamp),
        updated_at: Set(stamp),
    })
    .exec_without_returning(conn)
    .await
    .map_err(|e| StoreError::from_insert(e, "Table", "Table"))?;

    find(conn, &id).await
}

/// Load a table (whatever its deletion state) with columns and rows.
///
/// Rows are never filtered by `deleted_at`; columns follow `scope`.
/// Both are sorted by `order` ascending.
pub async fn detail<C: ConnectionTrait>(
    conn: &C,
    id: &str,
    scope: ColumnScope,
) -> StoreResult<TableDetail> {
    let table = find(conn, id).await?;

    let mut columns = column::Entity::find()
        .filter(column::Column::TableId.eq(id))
        .order_by_asc(column::Column::Order)
        .order_by_asc(column::Column::CreatedAt);
    if scope == ColumnScope::Live {
        columns = columns.filter(column::Column::DeletedAt.is_null());
    }
    let columns = columns.all(conn).await?;

    let rows = row::Entity::find()
        .filter(row::Column::TableId.eq(id))
        .order_by_asc(row::Column::Order)
        .order_by_asc(row::Column::CreatedAt)
        .all(conn)
        .await?;
    let cells = rows.load_many(cell::Entity, conn).await?;

    Ok(TableDetail {
        table,
        columns,
        rows: rows.into_iter().zip(cells).collect(),
    })
}

/// Apply present fields and restamp `updated_at`, then read back.
pub async fn update<C: ConnectionTrait>(
    conn: &C,
    id: &str,
    patch: TablePatch,
) -> StoreResult<table::Model> {
    table::Entity::update_many()
        .set(table::ActiveModel {
            name: patch.name.map_or(NotSet, Set),
            updated_at: Set(now()),
            ..Default::default()
        })
        .filter(table::Column::Id.eq(id))
        .exec(conn)
        .await?;

    find(conn, id).await
}

/// Mark deleted. Unknown ids are not an error; nothing cascades.
pub async fn soft_delete<C: ConnectionTrait>(conn: &C, id: &str) -> StoreResult<()> {
    table::Entity::update_many()
        .set(table::ActiveModel {
            deleted_at: Set(Some(now())),
            ..Default::default()
        })
        .filter(table::Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{columns, rows, test_support::setup_db};
    use crate::column_type::ColumnType;

    fn named(name: &str) -> NewTable {
        NewTable {
            name: name.to_string(),
            order: None,
        }
    }

    #[tokio::test]
    async fn order_defaults_to_max_plus_one() {
        let db = setup_db().await;
        assert_eq!(create(&db, named("Sheet1")).await.unwrap().order, 1);
        assert_eq!(create(&db, named("Sheet2")).await.unwrap().order, 2);

        let explicit = create(
            &db,
            NewTable {
                name: "Pinned".to_string(),
                order: Some(10),
            },
        )
        .await
        .unwrap();
        soft_delete(&db, &explicit.id).await.unwrap();

        // Soft-deleted tables still count towards the maximum.
        assert_eq!(create(&db, named("Sheet3")).await.unwrap().order, 11);
    }

    #[tokio::test]
    async fn default_order_after_max_is_a_conflict() {
        let db = setup_db().await;
        create(
            &db,
            NewTable {
                name: "Last".to_string(),
                order: Some(i32::MAX),
            },
        )
        .await
        .unwrap();

        let err = create(&db, named("Next")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        // An explicit order still works.
        let pinned = create(
            &db,
            NewTable {
                name: "Pinned".to_string(),
                order: Some(3),
            },
        )
        .await
        .unwrap();
        assert_eq!(pinned.order, 3);
    }

    #[tokio::test]
    async fn list_excludes_soft_deleted_and_sorts_by_order() {
        let db = setup_db().await;
        let b = create(&db, NewTable { name: "b".into(), order: Some(5) }).await.unwrap();
        let a = create(&db, NewTable { name: "a".into(), order: Some(2) }).await.unwrap();
        let gone = create(&db, named("gone")).await.unwrap();
        soft_delete(&db, &gone.id).await.unwrap();

        let ids: Vec<_> = list_live(&db).await.unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn detail_filters_columns_but_not_rows() {
        let db = setup_db().await;
        let t = create(&db, named("t")).await.unwrap();
        let keep = columns::create(&db, columns::NewColumn::new(&t.id, "keep", ColumnType::Text, 0))
            .await
            .unwrap();
        let drop = columns::create(&db, columns::NewColumn::new(&t.id, "drop", ColumnType::Text, 1))
            .await
            .unwrap();
        columns::soft_delete(&db, &drop.id).await.unwrap();
        let r0 = rows::create(&db, &t.id, 0).await.unwrap();
        let r1 = rows::create(&db, &t.id, 1).await.unwrap();
        rows::soft_delete(&db, &r1.id).await.unwrap();

        let live = detail(&db, &t.id, ColumnScope::Live).await.unwrap();
        assert_eq!(live.columns.iter().map(|c| &c.id).collect::<Vec<_>>(), vec![&keep.id]);
        assert_eq!(live.rows.len(), 2);
        assert_eq!(live.rows[0].0.id, r0.id);

        let all = detail(&db, &t.id, ColumnScope::All).await.unwrap();
        assert_eq!(all.columns.len(), 2);
    }

    #[tokio::test]
    async fn soft_deleted_table_is_still_found_by_id() {
        let db = setup_db().await;
        let t = create(&db, named("t")).await.unwrap();
        soft_delete(&db, &t.id).await.unwrap();
        let found = find(&db, &t.id).await.unwrap();
        assert!(found.deleted_at.is_some());
    }

    #[tokio::test]
    async fn update_only_touches_present_fields() {
        let db = setup_db().await;
        let t = create(&db, named("before")).await.unwrap();

        let same = update(&db, &t.id, TablePatch::default()).await.unwrap();
        assert_eq!(same.name, "before");
        assert!(same.updated_at >= t.updated_at);

        let renamed = update(&db, &t.id, TablePatch { name: Some("after".into()) })
            .await
            .unwrap();
        assert_eq!(renamed.name, "after");
        assert_eq!(renamed.created_at, t.created_at);
    }

    #[tokio::test]
    async fn update_of_unknown_table_is_not_found() {
        let db = setup_db().await;
        let err = update(&db, "missing", TablePatch::default()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound("Table")));
    }

    #[tokio::test]
    async fn soft_delete_of_unknown_table_succeeds() {
        let db = setup_db().await;
        soft_delete(&db, "missing").await.unwrap();
    }
}
