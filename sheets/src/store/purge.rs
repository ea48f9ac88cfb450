//! Out-of-band storage reclamation.
//!
//! The DELETE endpoints only stamp `deleted_at`; rows, columns and cells of
//! a deleted table stay behind. This is the explicit collaborator that hard
//! deletes them. It is never called from a request handler.

use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
    QueryTrait, TransactionTrait,
    sea_query::SelectStatement,
};
use serde::Serialize;

use super::StoreResult;
use crate::entity::{cell, column, row, table};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PurgeReport {
    pub tables: u64,
    pub columns: u64,
    pub rows: u64,
    pub cells: u64,
}

fn deleted_table_ids() -> SelectStatement {
    table::Entity::find()
        .select_only()
        .column(table::Column::Id)
        .filter(table::Column::DeletedAt.is_not_null())
        .into_query()
}

fn doomed_rows() -> Condition {
    Condition::any()
        .add(row::Column::DeletedAt.is_not_null())
        .add(row::Column::TableId.in_subquery(deleted_table_ids()))
}

fn doomed_columns() -> Condition {
    Condition::any()
        .add(column::Column::DeletedAt.is_not_null())
        .add(column::Column::TableId.in_subquery(deleted_table_ids()))
}

fn doomed_cells() -> Condition {
    let rows = row::Entity::find()
        .select_only()
        .column(row::Column::Id)
        .filter(doomed_rows())
        .into_query();
    let columns = column::Entity::find()
        .select_only()
        .column(column::Column::Id)
        .filter(doomed_columns())
        .into_query();
    Condition::any()
        .add(cell::Column::RowId.in_subquery(rows))
        .add(cell::Column::ColumnId.in_subquery(columns))
}

async fn count<C: ConnectionTrait>(conn: &C) -> StoreResult<PurgeReport> {
    Ok(PurgeReport {
        tables: table::Entity::find()
            .filter(table::Column::DeletedAt.is_not_null())
            .count(conn)
            .await?,
        columns: column::Entity::find().filter(doomed_columns()).count(conn).await?,
        rows: row::Entity::find().filter(doomed_rows()).count(conn).await?,
        cells: cell::Entity::find().filter(doomed_cells()).count(conn).await?,
    })
}

/// Hard-delete soft-deleted tables, rows and columns along with everything
/// hanging off them. With `dry_run` only the counts are computed.
pub async fn purge_deleted<C: TransactionTrait>(db: &C, dry_run: bool) -> StoreResult<PurgeReport> {
    let txn = db.begin().await?;

    if dry_run {
        let report = count(&txn).await?;
        txn.rollback().await?;
        return Ok(report);
    }

    // Children first: cells reference rows and columns, which reference tables.
    let cells = cell::Entity::delete_many()
        .filter(doomed_cells())
        .exec(&txn)
        .await?
        .rows_affected;
    let rows = row::Entity::delete_many()
        .filter(doomed_rows())
        .exec(&txn)
        .await?
        .rows_affected;
    let columns = column::Entity::delete_many()
        .filter(doomed_columns())
        .exec(&txn)
        .await?
        .rows_affected;
    let tables = table::Entity::delete_many()
        .filter(table::Column::DeletedAt.is_not_null())
        .exec(&txn)
        .await?
        .rows_affected;

    txn.commit().await?;

    let report = PurgeReport {
        tables,
        columns,
        rows,
        cells,
    };
    tracing::info!(
        tables = report.tables,
        columns = report.columns,
        rows = report.rows,
        cells = report.cells,
        "purged soft-deleted data"
    );
    Ok(report)
}
