use crate::api::dto::CreateTableRequest;
use crate::node::TableNode;

/// Sidebar of live tables with one selected.
#[derive(Debug, Clone, Default)]
pub struct ListView {
    pub tables: Vec<TableNode>,
    selected: Option<String>,
}

impl ListView {
    /// Selects the first table, if any.
    pub fn new(tables: Vec<TableNode>) -> Self {
        let selected = tables.first().map(|t| t.id.clone());
        Self { tables, selected }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Returns false and keeps the current selection when `key` matches
    /// no table. Matches id first, then name.
    pub fn select(&mut self, key: &str) -> bool {
        let found = self
            .tables
            .iter()
            .find(|t| t.id == key)
            .or_else(|| self.tables.iter().find(|t| t.name == key));
        match found {
            Some(t) => {
                self.selected = Some(t.id.clone());
                true
            }
            None => false,
        }
    }

    /// Body for the "add table" button.
    pub fn new_table_request(&self) -> CreateTableRequest {
        CreateTableRequest {
            name: "new".to_string(),
            order: Some(i32::try_from(self.tables.len()).unwrap_or(i32::MAX)),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for t in &self.tables {
            let mark = if self.selected.as_deref() == Some(t.id.as_str()) {
                '>'
            } else {
                ' '
            };
            out.push_str(&format!("{mark} {}  {}\n", t.name, t.id));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(id: &str, name: &str) -> TableNode {
        TableNode {
            id: id.into(),
            name: name.into(),
            order: 0,
            deleted_at: None,
            created_at: 0,
            updated_at: 0,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    #[test]
    fn first_table_is_selected_by_default() {
        assert_eq!(ListView::new(vec![table("a", "A"), table("b", "B")]).selected(), Some("a"));
        assert_eq!(ListView::new(Vec::new()).selected(), None);
    }

    #[test]
    fn select_by_id_or_name() {
        let mut view = ListView::new(vec![table("a", "A"), table("b", "B")]);
        assert!(view.select("B"));
        assert_eq!(view.selected(), Some("b"));
        assert!(!view.select("zzz"));
        assert_eq!(view.selected(), Some("b"));
        assert_eq!(view.render(), "  A  a\n> B  b\n");
    }

    #[test]
    fn new_table_goes_last() {
        let view = ListView::new(vec![table("a", "A")]);
        let req = view.new_table_request();
        assert_eq!(req.name, "new");
        assert_eq!(req.order, Some(1));
    }
}
