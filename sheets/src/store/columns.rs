use sea_orm::{ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use super::{StoreError, StoreResult, new_id, now};
use crate::column_type::ColumnType;
use crate::entity::column;

#[derive(Debug, Clone)]
pub struct NewColumn {
    pub table_id: String,
    pub name: String,
    pub column_type: ColumnType,
    pub order: i32,
    pub options: Option<String>,
}

impl NewColumn {
    pub fn new(table_id: &str, name: &str, column_type: ColumnType, order: i32) -> Self {
        Self {
            table_id: table_id.to_string(),
            name: name.to_string(),
            column_type,
            order,
            options: None,
        }
    }
}

/// Absent fields are left alone. `options: Some(None)` clears the list.
#[derive(Debug, Clone, Default)]
pub struct ColumnPatch {
    pub name: Option<String>,
    pub column_type: Option<ColumnType>,
    pub order: Option<i32>,
    pub options: Option<Option<String>>,
}

pub async fn find<C: ConnectionTrait>(conn: &C, id: &str) -> StoreResult<column::Model> {
    column::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(StoreError::NotFound("Column"))
}

pub async fn create<C: ConnectionTrait>(conn: &C, new: NewColumn) -> StoreResult<column::Model> {
    let id = new_id();
    let stamp = now();
    column::Entity::insert(column::ActiveModel {
        id: Set(id.clone()),
        table_id: Set(new.table_id),
        name: Set(new.name),
        column_type: Set(new.column_type.as_str().to_string()),
        order: Set(new.order),
        options: Set(new.options),
        deleted_at: Set(None),
        created_at: Set(stamp),
        updated_at: Set(stamp),
    })
    .exec_without_returning(conn)
    .await
    .map_err(|e| StoreError::from_insert(e, "Table", "Column"))?;

    find(conn, &id).await
}

pub async fn update<C: ConnectionTrait>(
    conn: &C,
    id: &str,
    patch: ColumnPatch,
) -> StoreResult<column::Model> {
    column::Entity::update_many()
        .set(column::ActiveModel {
            name: patch.name.map_or(NotSet, Set),
            column_type: patch
                .column_type
                .map_or(NotSet, |t| Set(t.as_str().to_string())),
            order: patch.order.map_or(NotSet, Set),
            options: patch.options.map_or(NotSet, Set),
            updated_at: Set(now()),
            ..Default::default()
        })
        .filter(column::Column::Id.eq(id))
        .exec(conn)
        .await?;

    find(conn, id).await
}

pub async fn soft_delete<C: ConnectionTrait>(conn: &C, id: &str) -> StoreResult<()> {
    column::Entity::update_many()
        .set(column::ActiveModel {
            deleted_at: Set(Some(now())),
            ..Default::default()
        })
        .filter(column::Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{tables, test_support::setup_db};

    async fn table(db: &sea_orm::DatabaseConnection) -> String {
        tables::create(
            db,
            tables::NewTable {
                name: "t".into(),
                order: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn create_stores_canonical_type_and_options() {
        let db = setup_db().await;
        let table_id = table(&db).await;
        let mut new = NewColumn::new(&table_id, "Status", ColumnType::TextSelect, 0);
        new.options = Some("Todo, Doing, Done".into());

        let col = create(&db, new).await.unwrap();
        assert_eq!(col.column_type, "text-select");
        assert_eq!(col.options.as_deref(), Some("Todo, Doing, Done"));
        assert!(col.deleted_at.is_none());
    }

    #[tokio::test]
    async fn create_under_unknown_table_is_missing_reference() {
        let db = setup_db().await;
        let err = create(&db, NewColumn::new("nope", "x", ColumnType::Text, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingReference("Table")));
    }

    #[tokio::test]
    async fn patch_applies_present_fields_only() {
        let db = setup_db().await;
        let table_id = table(&db).await;
        let mut new = NewColumn::new(&table_id, "Tags", ColumnType::TextMultiSelect, 3);
        new.options = Some("a, b".into());
        let col = create(&db, new).await.unwrap();

        let renamed = update(
            &db,
            &col.id,
            ColumnPatch {
                name: Some("Labels".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(renamed.name, "Labels");
        assert_eq!(renamed.order, 3);
        assert_eq!(renamed.options.as_deref(), Some("a, b"));

        let cleared = update(
            &db,
            &col.id,
            ColumnPatch {
                column_type: Some(ColumnType::Number),
                options: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(cleared.column_type, "number");
        assert_eq!(cleared.options, None);
        assert_eq!(cleared.name, "Labels");
    }

    #[tokio::test]
    async fn soft_delete_keeps_the_row() {
        let db = setup_db().await;
        let table_id = table(&db).await;
        let col = create(&db, NewColumn::new(&table_id, "x", ColumnType::Text, 0))
            .await
            .unwrap();
        soft_delete(&db, &col.id).await.unwrap();
        assert!(find(&db, &col.id).await.unwrap().deleted_at.is_some());
    }
}
