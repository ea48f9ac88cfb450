//! Request bodies. Responses are the wire nodes in [`crate::node`].

use serde::{Deserialize, Deserializer, Serialize};

use super::Validate;
use crate::column_type::ColumnType;

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ---------- tables ----------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTableRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl Validate for CreateTableRequest {
    fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("name must not be empty".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTableRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Validate for UpdateTableRequest {}

// ---------- columns ----------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateColumnRequest {
    pub table_id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
    pub order: i32,
    #[serde(default)]
    pub options: Option<String>,
}

impl Validate for CreateColumnRequest {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateColumnRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub column_type: Option<ColumnType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub options: Option<Option<String>>,
}

impl Validate for UpdateColumnRequest {}

// ---------- rows ----------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRowRequest {
    pub table_id: String,
    pub order: i32,
}

impl Validate for CreateRowRequest {}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRowRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl Validate for UpdateRowRequest {}

// ---------- cells ----------

/// `value` is required but may be `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertCellRequest {
    pub row_id: String,
    pub column_id: String,
    #[serde(default, deserialize_with = "double_option")]
    pub value: Option<Option<String>>,
}

impl Validate for UpsertCellRequest {
    fn validate(&self) -> Result<(), String> {
        match self.value {
            Some(_) => Ok(()),
            None => Err("value is required (use null to clear)".to_string()),
        }
    }
}
