//! HTTP client for the `/api` surface, plus the query cache and session
//! that the views read through.

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::api::dto::{
    CreateColumnRequest, CreateRowRequest, CreateTableRequest, UpdateColumnRequest,
    UpdateRowRequest, UpdateTableRequest, UpsertCellRequest,
};
use crate::node::{CellNode, ColumnNode, RowNode, SuccessNode, TableNode};

pub mod cache;
pub mod session;

pub use cache::{QueryCache, QueryKey};
pub use session::Session;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http(e) => e.status(),
            ClientError::Api { status, .. } => Some(*status),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Thin typed wrapper over the REST endpoints. Holds no state besides the
/// connection pool, so cloning is cheap.
#[derive(Debug, Clone)]
pub struct SheetsClient {
    http: reqwest::Client,
    base_url: String,
}

impl SheetsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}/api{}", self.base_url, path))
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|b| b.message)
                .unwrap_or(text);
            tracing::debug!(%status, %message, "api error");
            return Err(ClientError::Api { status, message });
        }
        Ok(response.json().await?)
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send(self.request(method, path).json(body)).await
    }

    // ---------- tables ----------

    pub async fn list_tables(&self) -> Result<Vec<TableNode>, ClientError> {
        self.send(self.request(Method::GET, "/tables")).await
    }

    pub async fn create_table(&self, body: &CreateTableRequest) -> Result<TableNode, ClientError> {
        self.send_json(Method::POST, "/tables", body).await
    }

    pub async fn get_table(&self, id: &str) -> Result<TableNode, ClientError> {
        self.send(self.request(Method::GET, &format!("/tables/{id}")))
            .await
    }

    pub async fn update_table(
        &self,
        id: &str,
        body: &UpdateTableRequest,
    ) -> Result<TableNode, ClientError> {
        self.send_json(Method::PATCH, &format!("/tables/{id}"), body)
            .await
    }

    pub async fn delete_table(&self, id: &str) -> Result<SuccessNode, ClientError> {
        self.send(self.request(Method::DELETE, &format!("/tables/{id}")))
            .await
    }

    // ---------- columns ----------

    pub async fn create_column(
        &self,
        body: &CreateColumnRequest,
    ) -> Result<ColumnNode, ClientError> {
        self.send_json(Method::POST, "/columns", body).await
    }

    pub async fn update_column(
        &self,
        id: &str,
        body: &UpdateColumnRequest,
    ) -> Result<ColumnNode, ClientError> {
        self.send_json(Method::PATCH, &format!("/columns/{id}"), body)
            .await
    }

    pub async fn delete_column(&self, id: &str) -> Result<SuccessNode, ClientError> {
        self.send(self.request(Method::DELETE, &format!("/columns/{id}")))
            .await
    }

    // ---------- rows ----------

    pub async fn create_row(&self, body: &CreateRowRequest) -> Result<RowNode, ClientError> {
        self.send_json(Method::POST, "/rows", body).await
    }

    pub async fn update_row(&self, id: &str, body: &UpdateRowRequest) -> Result<RowNode, ClientError> {
        self.send_json(Method::PATCH, &format!("/rows/{id}"), body)
            .await
    }

    pub async fn delete_row(&self, id: &str) -> Result<SuccessNode, ClientError> {
        self.send(self.request(Method::DELETE, &format!("/rows/{id}")))
            .await
    }

    // ---------- cells ----------

    pub async fn upsert_cell(&self, body: &UpsertCellRequest) -> Result<CellNode, ClientError> {
        self.send_json(Method::POST, "/cells", body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_reports_status() {
        let err = ClientError::Api {
            status: StatusCode::NOT_FOUND,
            message: "Table not found".to_string(),
        };
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.to_string(), "404 Not Found: Table not found");
    }
}
