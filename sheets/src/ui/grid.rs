//! The sheet grid: one header per live column, one line per row.

use crate::node::{ColumnNode, TableNode};

use super::widget::CellWidget;

#[derive(Debug, Clone)]
pub struct GridCell {
    pub column_id: String,
    pub value: Option<String>,
    pub widget: CellWidget,
}

#[derive(Debug, Clone)]
pub struct GridRow {
    pub id: String,
    /// First segment of the row id.
    pub label: String,
    pub deleted: bool,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone)]
pub struct GridView {
    pub table_id: String,
    pub title: String,
    pub columns: Vec<ColumnNode>,
    pub rows: Vec<GridRow>,
}

pub fn row_label(row_id: &str) -> &str {
    row_id.split('-').next().unwrap_or(row_id)
}

impl GridView {
    pub fn from_table(table: &TableNode) -> Self {
        let columns = table.columns.clone();
        let widgets: Vec<CellWidget> = columns.iter().map(CellWidget::for_column).collect();

        let rows = table
            .rows
            .iter()
            .map(|row| GridRow {
                id: row.id.clone(),
                label: row_label(&row.id).to_string(),
                deleted: row.deleted_at.is_some(),
                cells: columns
                    .iter()
                    .zip(&widgets)
                    .map(|(column, widget)| GridCell {
                        column_id: column.id.clone(),
                        value: row.cell(&column.id).and_then(|c| c.value.clone()),
                        widget: widget.clone(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            table_id: table.id.clone(),
            title: table.name.clone(),
            columns,
            rows,
        }
    }

    /// Order for a row appended with "Add row".
    pub fn next_row_order(&self) -> i32 {
        i32::try_from(self.rows.len()).unwrap_or(i32::MAX)
    }

    /// Look a column up by id, then by exact name.
    pub fn column(&self, key: &str) -> Option<&ColumnNode> {
        self.columns
            .iter()
            .find(|c| c.id == key)
            .or_else(|| self.columns.iter().find(|c| c.name == key))
    }

    /// Look a row up by full id or by its label.
    pub fn row(&self, key: &str) -> Option<&GridRow> {
        self.rows
            .iter()
            .find(|r| r.id == key)
            .or_else(|| self.rows.iter().find(|r| r.label == key))
    }

    pub fn cell(&self, row_id: &str, column_id: &str) -> Option<&GridCell> {
        self.row(row_id)?
            .cells
            .iter()
            .find(|c| c.column_id == column_id)
    }

    /// Plain-text table with padded columns. Deleted rows are marked `x`.
    pub fn render(&self) -> String {
        let mut lines: Vec<Vec<String>> = Vec::with_capacity(self.rows.len() + 1);
        let mut header = vec!["row".to_string()];
        header.extend(self.columns.iter().map(|c| c.name.clone()));
        lines.push(header);

        for row in &self.rows {
            let mark = if row.deleted { " x" } else { "" };
            let mut line = vec![format!("{}{}", row.label, mark)];
            line.extend(
                row.cells
                    .iter()
                    .map(|cell| cell.widget.display(cell.value.as_deref())),
            );
            lines.push(line);
        }

        let widths: Vec<usize> = (0..=self.columns.len())
            .map(|i| {
                lines
                    .iter()
                    .map(|l| l[i].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = format!("# {}\n", self.title);
        for line in &lines {
            let padded: Vec<String> = line
                .iter()
                .zip(&widths)
                .map(|(text, w)| format!("{text:<w$}"))
                .collect();
            out.push_str(padded.join(" | ").trim_end());
            out.push('\n');
        }
        out
    }
}
