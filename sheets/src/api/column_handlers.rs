use axum::{
    extract::{Path, State},
    response::Json,
};
use sea_orm::TransactionTrait;

use crate::node::{ColumnNode, SuccessNode};
use crate::store::columns::{self, ColumnPatch, NewColumn};

use super::{
    ApiErr, ApiState, ValidJson,
    dto::{CreateColumnRequest, UpdateColumnRequest},
};

// ---------- POST /columns ----------

pub async fn create_column(
    State(state): State<ApiState>,
    ValidJson(body): ValidJson<CreateColumnRequest>,
) -> Result<Json<ColumnNode>, ApiErr> {
    let txn = state.db.begin().await.map_err(ApiErr::internal)?;
    let column = columns::create(
        &txn,
        NewColumn {
            table_id: body.table_id,
            name: body.name,
            column_type: body.column_type,
            order: body.order,
            options: body.options,
        },
    )
    .await?;
    txn.commit().await.map_err(ApiErr::internal)?;

    Ok(Json(ColumnNode::from(column)))
}

// ---------- PATCH /columns/{id} ----------

pub async fn update_column(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<UpdateColumnRequest>,
) -> Result<Json<ColumnNode>, ApiErr> {
    let txn = state.db.begin().await.map_err(ApiErr::internal)?;
    let column = columns::update(
        &txn,
        &id,
        ColumnPatch {
            name: body.name,
            column_type: body.column_type,
            order: body.order,
            options: body.options,
        },
    )
    .await?;
    txn.commit().await.map_err(ApiErr::internal)?;

    Ok(Json(ColumnNode::from(column)))
}

// ---------- DELETE /columns/{id} ----------

pub async fn delete_column(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessNode>, ApiErr> {
    columns::soft_delete(&state.db, &id).await?;
    Ok(Json(SuccessNode::OK))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::api::test_support::{app, send};

    async fn table_id(app: &axum::Router) -> String {
        let (_, t) = send(app, Method::POST, "/api/tables", Some(json!({"name": "t"}))).await;
        t["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn create_defaults_type_to_text() {
        let app = app().await;
        let table_id = table_id(&app).await;
        let (status, col) = send(
            &app,
            Method::POST,
            "/api/columns",
            Some(json!({"tableId": table_id, "name": "Name", "order": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(col["type"], "text");
        assert_eq!(col["tableId"], table_id.as_str());
        assert!(col["options"].is_null());
        assert!(col["deletedAt"].is_null());
    }

    #[tokio::test]
    async fn create_normalises_type_and_keeps_options() {
        let app = app().await;
        let table_id = table_id(&app).await;
        let (_, col) = send(
            &app,
            Method::POST,
            "/api/columns",
            Some(json!({
                "tableId": table_id,
                "name": "Status",
                "type": "TEXT-SELECT",
                "order": 1,
                "options": "Todo, Done"
            })),
        )
        .await;
        assert_eq!(col["type"], "text-select");
        assert_eq!(col["options"], "Todo, Done");
    }

    #[tokio::test]
    async fn create_rejects_unknown_type_and_missing_order() {
        let app = app().await;
        let table_id = table_id(&app).await;
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/columns",
            Some(json!({"tableId": table_id, "name": "x", "type": "emoji", "order": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/columns",
            Some(json!({"tableId": table_id, "name": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_under_unknown_table_is_404() {
        let app = app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/columns",
            Some(json!({"tableId": "ghost", "name": "x", "order": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Table not found");
    }

    #[tokio::test]
    async fn patch_updates_present_fields() {
        let app = app().await;
        let table_id = table_id(&app).await;
        let (_, col) = send(
            &app,
            Method::POST,
            "/api/columns",
            Some(json!({"tableId": table_id, "name": "Tags", "type": "text-multi-select", "order": 0, "options": "a, b"})),
        )
        .await;
        let uri = format!("/api/columns/{}", col["id"].as_str().unwrap());

        let (status, patched) = send(&app, Method::PATCH, &uri, Some(json!({"order": 4}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(patched["order"], 4);
        assert_eq!(patched["name"], "Tags");
        assert_eq!(patched["options"], "a, b");

        let (_, patched) = send(
            &app,
            Method::PATCH,
            &uri,
            Some(json!({"type": "number", "options": null})),
        )
        .await;
        assert_eq!(patched["type"], "number");
        assert!(patched["options"].is_null());
    }

    #[tokio::test]
    async fn patch_unknown_column_is_404() {
        let app = app().await;
        let (status, body) = send(&app, Method::PATCH, "/api/columns/ghost", Some(json!({"name": "x"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Column not found");
    }

    #[tokio::test]
    async fn delete_always_succeeds() {
        let app = app().await;
        let (status, body) = send(&app, Method::DELETE, "/api/columns/ghost", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));
    }
}
