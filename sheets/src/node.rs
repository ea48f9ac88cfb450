//! Wire representation of tables, columns, rows and cells.
//!
//! Shared by the API handlers (serialise) and the client (deserialise).
//! Timestamps are whole Unix seconds.

use serde::{Deserialize, Serialize};

use crate::entity::{cell, column, row, table};
use crate::time::{to_unix_time, to_unix_time_opt};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableNode {
    pub id: String,
    pub name: String,
    pub order: i32,
    pub deleted_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
    pub columns: Vec<ColumnNode>,
    pub rows: Vec<RowNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnNode {
    pub id: String,
    pub table_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    pub order: i32,
    #[serde(default)]
    pub options: Option<String>,
    pub deleted_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowNode {
    pub id: String,
    pub table_id: String,
    pub order: i32,
    pub deleted_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
    pub cells: Vec<CellNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellNode {
    pub id: String,
    pub row_id: String,
    pub column_id: String,
    pub value: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Body returned by every DELETE endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessNode {
    pub success: bool,
}

impl SuccessNode {
    pub const OK: SuccessNode = SuccessNode { success: true };
}

impl TableNode {
    /// Summary form used by list and create: no columns, no rows.
    pub fn summary(m: table::Model) -> Self {
        Self::with_children(m, Vec::new(), Vec::new())
    }

    pub fn with_children(m: table::Model, columns: Vec<ColumnNode>, rows: Vec<RowNode>) -> Self {
        Self {
            id: m.id,
            name: m.name,
            order: m.order,
            deleted_at: to_unix_time_opt(m.deleted_at),
            created_at: to_unix_time(m.created_at),
            updated_at: to_unix_time(m.updated_at),
            columns,
            rows,
        }
    }
}

impl From<column::Model> for ColumnNode {
    fn from(m: column::Model) -> Self {
        Self {
            id: m.id,
            table_id: m.table_id,
            name: m.name,
            column_type: m.column_type,
            order: m.order,
            options: m.options,
            deleted_at: to_unix_time_opt(m.deleted_at),
            created_at: to_unix_time(m.created_at),
            updated_at: to_unix_time(m.updated_at),
        }
    }
}

impl RowNode {
    pub fn with_cells(m: row::Model, cells: Vec<cell::Model>) -> Self {
        Self {
            id: m.id,
            table_id: m.table_id,
            order: m.order,
            deleted_at: to_unix_time_opt(m.deleted_at),
            created_at: to_unix_time(m.created_at),
            updated_at: to_unix_time(m.updated_at),
            cells: cells.into_iter().map(CellNode::from).collect(),
        }
    }

    /// Cells are not fetched on row create/update; the array is always empty.
    pub fn without_cells(m: row::Model) -> Self {
        Self::with_cells(m, Vec::new())
    }

    /// Linear scan for the cell at `column_id`.
    pub fn cell(&self, column_id: &str) -> Option<&CellNode> {
        self.cells.iter().find(|c| c.column_id == column_id)
    }
}

impl From<cell::Model> for CellNode {
    fn from(m: cell::Model) -> Self {
        Self {
            id: m.id,
            row_id: m.row_id,
            column_id: m.column_id,
            value: m.value,
            created_at: to_unix_time(m.created_at),
            updated_at: to_unix_time(m.updated_at),
        }
    }
}
