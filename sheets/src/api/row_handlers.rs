use axum::{
    extract::{Path, State},
    response::Json,
};
use sea_orm::TransactionTrait;

use crate::node::{RowNode, SuccessNode};
use crate::store::rows::{self, RowPatch};

use super::{
    ApiErr, ApiState, ValidJson,
    dto::{CreateRowRequest, UpdateRowRequest},
};

// ---------- POST /rows ----------

pub async fn create_row(
    State(state): State<ApiState>,
    ValidJson(body): ValidJson<CreateRowRequest>,
) -> Result<Json<RowNode>, ApiErr> {
    let txn = state.db.begin().await.map_err(ApiErr::internal)?;
    let row = rows::create(&txn, &body.table_id, body.order).await?;
    txn.commit().await.map_err(ApiErr::internal)?;

    Ok(Json(RowNode::without_cells(row)))
}

// ---------- PATCH /rows/{id} ----------

/// The response never carries cells, even when the row has some.
pub async fn update_row(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    ValidJson(body): ValidJson<UpdateRowRequest>,
) -> Result<Json<RowNode>, ApiErr> {
    let txn = state.db.begin().await.map_err(ApiErr::internal)?;
    let row = rows::update(&txn, &id, RowPatch { order: body.order }).await?;
    txn.commit().await.map_err(ApiErr::internal)?;

    Ok(Json(RowNode::without_cells(row)))
}

// ---------- DELETE /rows/{id} ----------

pub async fn delete_row(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessNode>, ApiErr> {
    rows::soft_delete(&state.db, &id).await?;
    Ok(Json(SuccessNode::OK))
}
