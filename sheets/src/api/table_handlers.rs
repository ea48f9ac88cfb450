use axum::{
    extract::{Path, State},
    response::Json,
};
use sea_orm::TransactionTrait;

use crate::node::{ColumnNode, RowNode, SuccessNode, TableNode};
use crate::store::tables::{self, ColumnScope, NewTable, TableDetail, TablePatch};

use super::{
    ApiErr, ApiState, ValidJson,
    dto::{CreateTableRequest, UpdateTableRequest},
};

// ---------- helper: build the full TableNode ----------

/// `upper_types` reproduces the detail read path, which reports column
/// types upper-cased; the post-update read path leaves them as stored.
fn detail_node(detail: TableDetail, upper_types: bool) -> TableNode {
    let columns = detail
        .columns
        .into_iter()
        .map(|m| {
            let mut node = ColumnNode::from(m);
            if upper_types {
                node.column_type = node.column_type.to_uppercase();
            }
            node
        })
        .collect();
    let rows = detail
        .rows
        .into_iter()
        .map(|(row, cells)| RowNode::with_cells(row, cells))
        .collect();
    TableNode::with_children(detail.table, columns, rows)
}

// ---------- GET /tables ----------

pub async fn list_tables(State(state): State<ApiState>) -> Result<Json<Vec<TableNode>>, ApiErr> {
    let tables = tables::list_live(&state.db).await?;
    Ok(Json(tables.into_iter().map(TableNode::summary).collect()))
}

// ---------- POST /tables ----------

pub async fn create_table(
    State(state): State<ApiState>,
    ValidJson(body): ValidJson<CreateTableRequest>,
) -> Result<Json<TableNode>, ApiErr> {
    let txn = state.db.begin().await.map_err(ApiErr::internal)?;
    let table = tables::create(
        &txn,
        NewTable {
            name: body.name,
            order: body.order,
        },
    )
    .await?;
    txn.commit().await.map_err(ApiErr::internal)?;

    tracing::debug!(table_id = %table.id, order = table.order, "table created");
    Ok(Json(TableNode::summary(table)))
}

// ---------- GET /tables/{id} ----------

pub async fn get_table(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<TableNode>, ApiErr> {
    let detail = tables::detail(&state.db, &id, ColumnScope::Live).await?;
    Ok(Json(detail_node(detail, true)))
}

// ---------- PATCH /tables/{id} ----------

pub async fn update_table(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<UpdateTableRequest>,
) -> Result<Json<TableNode>, ApiErr> {
    let txn = state.db.begin().await.map_err(ApiErr::internal)?;
    tables::update(&txn, &id, TablePatch { name: body.name }).await?;
    let detail = tables::detail(&txn, &id, ColumnScope::All).await?;
    txn.commit().await.map_err(ApiErr::internal)?;

    Ok(Json(detail_node(detail, false)))
}

// ---------- DELETE /tables/{id} ----------

pub async fn delete_table(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessNode>, ApiErr> {
    tables::soft_delete(&state.db, &id).await?;
    Ok(Json(SuccessNode::OK))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::api::test_support::{app, send};

    #[tokio::test]
    async fn create_assigns_sequential_orders() {
        let app = app().await;
        let (status, first) = send(&app, Method::POST, "/api/tables", Some(json!({"name": "Sheet1"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["order"], 1);
        assert_eq!(first["columns"], json!([]));
        assert_eq!(first["rows"], json!([]));
        assert!(first["deletedAt"].is_null());
        assert!(first["createdAt"].is_i64());

        let (_, second) = send(&app, Method::POST, "/api/tables", Some(json!({"name": "Sheet2"}))).await;
        assert_eq!(second["order"], 2);
    }

    #[tokio::test]
    async fn create_keeps_explicit_order() {
        let app = app().await;
        let (_, t) = send(
            &app,
            Method::POST,
            "/api/tables",
            Some(json!({"name": "x", "order": 7})),
        )
        .await;
        assert_eq!(t["order"], 7);
    }

    #[tokio::test]
    async fn create_after_max_order_is_409() {
        let app = app().await;
        send(
            &app,
            Method::POST,
            "/api/tables",
            Some(json!({"name": "last", "order": i32::MAX})),
        )
        .await;
        let (status, body) = send(&app, Method::POST, "/api/tables", Some(json!({"name": "next"}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn create_rejects_empty_or_missing_name() {
        let app = app().await;
        let (status, body) = send(&app, Method::POST, "/api/tables", Some(json!({"name": ""}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());

        let (status, body) = send(&app, Method::POST, "/api/tables", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn list_hides_deleted_tables() {
        let app = app().await;
        let (_, a) = send(&app, Method::POST, "/api/tables", Some(json!({"name": "a"}))).await;
        let (_, b) = send(&app, Method::POST, "/api/tables", Some(json!({"name": "b"}))).await;
        let uri = format!("/api/tables/{}", a["id"].as_str().unwrap());
        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));

        let (_, list) = send(&app, Method::GET, "/api/tables", None).await;
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["id"], b["id"]);

        // Still reachable directly.
        let (status, detail) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(detail["deletedAt"].is_i64());
    }

    #[tokio::test]
    async fn delete_unknown_table_still_succeeds() {
        let app = app().await;
        let (status, body) = send(&app, Method::DELETE, "/api/tables/does-not-exist", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));
    }

    #[tokio::test]
    async fn get_unknown_table_is_404() {
        let app = app().await;
        let (status, body) = send(&app, Method::GET, "/api/tables/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"message": "Table not found"}));
    }

    #[tokio::test]
    async fn detail_upper_cases_types_but_patch_does_not() {
        let app = app().await;
        let (_, t) = send(&app, Method::POST, "/api/tables", Some(json!({"name": "t"}))).await;
        let table_id = t["id"].as_str().unwrap();
        send(
            &app,
            Method::POST,
            "/api/columns",
            Some(json!({"tableId": table_id, "name": "When", "type": "date-time", "order": 0})),
        )
        .await;

        let uri = format!("/api/tables/{table_id}");
        let (_, detail) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(detail["columns"][0]["type"], "DATE-TIME");

        let (status, patched) = send(&app, Method::PATCH, &uri, Some(json!({"name": "renamed"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(patched["name"], "renamed");
        assert_eq!(patched["columns"][0]["type"], "date-time");
    }

    #[tokio::test]
    async fn patch_orders_children_and_keeps_deleted_columns() {
        let app = app().await;
        let (_, t) = send(&app, Method::POST, "/api/tables", Some(json!({"name": "t"}))).await;
        let table_id = t["id"].as_str().unwrap();
        for (name, order) in [("b", 2), ("a", 1)] {
            send(
                &app,
                Method::POST,
                "/api/columns",
                Some(json!({"tableId": table_id, "name": name, "order": order})),
            )
            .await;
        }
        for order in [5, 3] {
            send(&app, Method::POST, "/api/rows", Some(json!({"tableId": table_id, "order": order}))).await;
        }

        let uri = format!("/api/tables/{table_id}");
        let (_, detail) = send(&app, Method::GET, &uri, None).await;
        let doomed = detail["columns"][1]["id"].as_str().unwrap().to_string();
        send(&app, Method::DELETE, &format!("/api/columns/{doomed}"), None).await;

        let (_, patched) = send(&app, Method::PATCH, &uri, Some(json!({}))).await;
        let names: Vec<_> = patched["columns"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        let orders: Vec<_> = patched["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["order"].as_i64().unwrap())
            .collect();
        assert_eq!(orders, vec![3, 5]);
        assert_eq!(patched["name"], "t");

        let (_, detail) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(detail["columns"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn patch_unknown_table_is_404() {
        let app = app().await;
        let (status, body) = send(
            &app,
            Method::PATCH,
            "/api/tables/ghost",
            Some(json!({"name": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Table not found");
    }
}
