use std::collections::HashMap;

use crate::node::TableNode;

/// Identifies one cached read: the table list, or one table's detail.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Tables,
    Table(String),
}

#[derive(Debug, Clone)]
enum Entry {
    Tables(Vec<TableNode>),
    Table(TableNode),
}

/// Last fetched result per query. Nothing expires on its own; callers
/// invalidate after a mutation.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, Entry>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tables(&self) -> Option<&[TableNode]> {
        match self.entries.get(&QueryKey::Tables) {
            Some(Entry::Tables(list)) => Some(list),
            _ => None,
        }
    }

    pub fn table(&self, id: &str) -> Option<&TableNode> {
        match self.entries.get(&QueryKey::Table(id.to_string())) {
            Some(Entry::Table(node)) => Some(node),
            _ => None,
        }
    }

    pub fn put_tables(&mut self, list: Vec<TableNode>) {
        self.entries.insert(QueryKey::Tables, Entry::Tables(list));
    }

    pub fn put_table(&mut self, node: TableNode) {
        self.entries
            .insert(QueryKey::Table(node.id.clone()), Entry::Table(node));
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns whether anything was dropped.
    pub fn invalidate(&mut self, key: &QueryKey) -> bool {
        self.entries.remove(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> TableNode {
        TableNode {
            id: id.to_string(),
            name: id.to_uppercase(),
            order: 1,
            deleted_at: None,
            created_at: 0,
            updated_at: 0,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    #[test]
    fn keys_are_independent() {
        let mut cache = QueryCache::new();
        cache.put_tables(vec![node("a"), node("b")]);
        cache.put_table(node("a"));

        assert!(cache.invalidate(&QueryKey::Table("a".into())));
        assert!(cache.table("a").is_none());
        assert_eq!(cache.tables().map(<[_]>::len), Some(2));
        assert!(!cache.invalidate(&QueryKey::Table("a".into())));
    }
}
