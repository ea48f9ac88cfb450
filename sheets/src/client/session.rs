use crate::api::dto::{
    CreateColumnRequest, CreateRowRequest, CreateTableRequest, UpdateColumnRequest,
    UpdateTableRequest, UpsertCellRequest,
};
use crate::node::TableNode;

use super::{ClientError, QueryCache, QueryKey, SheetsClient};

/// One client plus its cache, created when the app starts and dropped when
/// it exits. Views borrow it; nothing is global.
///
/// Reads go through the cache. Every mutation invalidates what it touched
/// and returns the owning table freshly fetched.
#[derive(Debug)]
pub struct Session {
    client: SheetsClient,
    cache: QueryCache,
}

impl Session {
    pub fn new(client: SheetsClient) -> Self {
        Self {
            client,
            cache: QueryCache::new(),
        }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    // ---------- queries ----------

    pub async fn tables(&mut self) -> Result<Vec<TableNode>, ClientError> {
        if let Some(list) = self.cache.tables() {
            return Ok(list.to_vec());
        }
        let list = self.client.list_tables().await?;
        self.cache.put_tables(list.clone());
        Ok(list)
    }

    pub async fn table(&mut self, id: &str) -> Result<TableNode, ClientError> {
        if let Some(node) = self.cache.table(id) {
            return Ok(node.clone());
        }
        let node = self.client.get_table(id).await?;
        self.cache.put_table(node.clone());
        Ok(node)
    }

    /// Drop the cached detail and fetch it again.
    pub async fn refetch(&mut self, id: &str) -> Result<TableNode, ClientError> {
        self.cache.invalidate(&QueryKey::Table(id.to_string()));
        self.table(id).await
    }

    // ---------- table mutations ----------

    pub async fn create_table(&mut self, body: CreateTableRequest) -> Result<TableNode, ClientError> {
        let created = self.client.create_table(&body).await?;
        self.cache.invalidate(&QueryKey::Tables);
        self.table(&created.id).await
    }

    pub async fn rename_table(&mut self, id: &str, name: &str) -> Result<TableNode, ClientError> {
        self.client
            .update_table(
                id,
                &UpdateTableRequest {
                    name: Some(name.to_string()),
                },
            )
            .await?;
        self.cache.invalidate(&QueryKey::Tables);
        self.refetch(id).await
    }

    pub async fn delete_table(&mut self, id: &str) -> Result<(), ClientError> {
        self.client.delete_table(id).await?;
        self.cache.invalidate(&QueryKey::Tables);
        self.cache.invalidate(&QueryKey::Table(id.to_string()));
        Ok(())
    }

    // ---------- column mutations ----------

    pub async fn add_column(&mut self, body: CreateColumnRequest) -> Result<TableNode, ClientError> {
        let table_id = body.table_id.clone();
        self.client.create_column(&body).await?;
        self.refetch(&table_id).await
    }

    pub async fn update_column(
        &mut self,
        table_id: &str,
        column_id: &str,
        body: UpdateColumnRequest,
    ) -> Result<TableNode, ClientError> {
        self.client.update_column(column_id, &body).await?;
        self.refetch(table_id).await
    }

    pub async fn delete_column(
        &mut self,
        table_id: &str,
        column_id: &str,
    ) -> Result<TableNode, ClientError> {
        self.client.delete_column(column_id).await?;
        self.refetch(table_id).await
    }

    // ---------- row and cell mutations ----------

    pub async fn add_row(&mut self, table_id: &str, order: i32) -> Result<TableNode, ClientError> {
        self.client
            .create_row(&CreateRowRequest {
                table_id: table_id.to_string(),
                order,
            })
            .await?;
        self.refetch(table_id).await
    }

    pub async fn delete_row(&mut self, table_id: &str, row_id: &str) -> Result<TableNode, ClientError> {
        self.client.delete_row(row_id).await?;
        self.refetch(table_id).await
    }

    pub async fn set_cell(
        &mut self,
        table_id: &str,
        row_id: &str,
        column_id: &str,
        value: Option<String>,
    ) -> Result<TableNode, ClientError> {
        self.client
            .upsert_cell(&UpsertCellRequest {
                row_id: row_id.to_string(),
                column_id: column_id.to_string(),
                value: Some(value),
            })
            .await?;
        self.refetch(table_id).await
    }
}
