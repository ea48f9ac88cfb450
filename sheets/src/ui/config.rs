//! Table settings: rename the table, and per column the name, type and
//! select options. Edits stay in local drafts until saved.

use chrono::NaiveDateTime;

use crate::api::dto::{CreateColumnRequest, UpdateColumnRequest};
use crate::client::{ClientError, Session};
use crate::column_type::ColumnType;
use crate::node::{ColumnNode, TableNode};
use crate::time::from_unix_time;

use super::widget::split_options;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDraft {
    pub id: String,
    pub name: String,
    pub column_type: ColumnType,
    pub options: Vec<String>,
}

impl ColumnDraft {
    pub fn from_column(column: &ColumnNode) -> Self {
        Self {
            id: column.id.clone(),
            name: column.name.clone(),
            column_type: ColumnType::from_tag(&column.column_type),
            options: split_options(column.options.as_deref()),
        }
    }

    /// Ignores blanks and duplicates.
    pub fn add_option(&mut self, option: &str) {
        let option = option.trim();
        if !option.is_empty() && !self.options.iter().any(|o| o == option) {
            self.options.push(option.to_string());
        }
    }

    pub fn remove_option(&mut self, option: &str) {
        self.options.retain(|o| o != option.trim());
    }

    /// Non-select types always clear their options.
    pub fn request(&self) -> UpdateColumnRequest {
        let options = if self.column_type.has_options() && !self.options.is_empty() {
            Some(self.options.join(", "))
        } else {
            None
        };
        UpdateColumnRequest {
            name: Some(self.name.clone()),
            column_type: Some(self.column_type),
            order: None,
            options: Some(options),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigView {
    pub table_id: String,
    pub table_name: String,
    pub updated_at: Option<NaiveDateTime>,
    pub columns: Vec<ColumnDraft>,
}

impl ConfigView {
    pub fn from_table(table: &TableNode) -> Self {
        Self {
            table_id: table.id.clone(),
            table_name: table.name.clone(),
            updated_at: from_unix_time(Some(table.updated_at)),
            columns: table.columns.iter().map(ColumnDraft::from_column).collect(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!("# {}  ({})\n", self.table_name, self.table_id);
        if let Some(at) = self.updated_at {
            out.push_str(&format!("updated {}\n", at.format("%Y-%m-%d %H:%M:%S")));
        }
        for c in &self.columns {
            out.push_str(&format!("- {} [{}]  {}", c.name, c.column_type.label(), c.id));
            if c.column_type.has_options() {
                out.push_str(&format!("  options: {}", c.options.join(", ")));
            }
            out.push('\n');
        }
        out
    }

    pub fn column_mut(&mut self, id: &str) -> Option<&mut ColumnDraft> {
        self.columns.iter_mut().find(|c| c.id == id)
    }

    pub fn add_column_request(&self) -> CreateColumnRequest {
        CreateColumnRequest {
            table_id: self.table_id.clone(),
            name: "new".to_string(),
            column_type: ColumnType::Text,
            order: i32::try_from(self.columns.len()).unwrap_or(i32::MAX),
            options: None,
        }
    }

    pub async fn save_table(&self, session: &mut Session) -> Result<TableNode, ClientError> {
        session.rename_table(&self.table_id, &self.table_name).await
    }

    pub async fn save_column(
        &self,
        session: &mut Session,
        draft: &ColumnDraft,
    ) -> Result<TableNode, ClientError> {
        session
            .update_column(&self.table_id, &draft.id, draft.request())
            .await
    }

    pub async fn add_column(&self, session: &mut Session) -> Result<TableNode, ClientError> {
        session.add_column(self.add_column_request()).await
    }

    pub async fn delete_column(
        &self,
        session: &mut Session,
        column_id: &str,
    ) -> Result<TableNode, ClientError> {
        session.delete_column(&self.table_id, column_id).await
    }

    pub async fn delete_table(&self, session: &mut Session) -> Result<(), ClientError> {
        session.delete_table(&self.table_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(column_type: &str, options: Option<&str>) -> ColumnNode {
        ColumnNode {
            id: "c1".into(),
            table_id: "t".into(),
            name: "Status".into(),
            column_type: column_type.into(),
            order: 0,
            options: options.map(str::to_string),
            deleted_at: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn select_column_sends_joined_options() {
        let mut draft = ColumnDraft::from_column(&column("TEXT-SELECT", Some("Todo,Doing")));
        draft.add_option(" Done ");
        draft.add_option("Todo");
        draft.remove_option("Doing");
        let req = draft.request();
        assert_eq!(req.column_type, Some(ColumnType::TextSelect));
        assert_eq!(req.options, Some(Some("Todo, Done".to_string())));
    }

    #[test]
    fn other_types_clear_options() {
        let mut draft = ColumnDraft::from_column(&column("text-select", Some("a")));
        draft.column_type = ColumnType::Number;
        assert_eq!(draft.request().options, Some(None));

        let empty = ColumnDraft::from_column(&column("text-multi-select", None));
        assert_eq!(empty.request().options, Some(None));
    }

    #[test]
    fn new_column_is_text_named_new_at_the_end() {
        let table = TableNode {
            id: "t".into(),
            name: "Sheet".into(),
            order: 1,
            deleted_at: None,
            created_at: 0,
            updated_at: 0,
            columns: vec![column("text", None)],
            rows: Vec::new(),
        };
        let mut view = ConfigView::from_table(&table);
        let req = view.add_column_request();
        assert_eq!(req.name, "new");
        assert_eq!(req.column_type, ColumnType::Text);
        assert_eq!(req.order, 1);

        if let Some(draft) = view.column_mut("c1") {
            draft.name = "Renamed".into();
        }
        assert_eq!(view.columns[0].name, "Renamed");
    }

    #[test]
    fn render_lists_columns_with_labels() {
        let table = TableNode {
            id: "t".into(),
            name: "Sheet".into(),
            order: 1,
            deleted_at: None,
            created_at: 0,
            updated_at: 86_400,
            columns: vec![column("TEXT-SELECT", Some("a, b"))],
            rows: Vec::new(),
        };
        assert_eq!(
            ConfigView::from_table(&table).render(),
            "# Sheet  (t)\nupdated 1970-01-02 00:00:00\n- Status [Select]  c1  options: a, b\n"
        );
    }
}
