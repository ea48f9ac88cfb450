use axum::{extract::State, response::Json};
use sea_orm::TransactionTrait;

use crate::node::CellNode;
use crate::store::cells::{self, CellWrite};

use super::{ApiErr, ApiState, ValidJson, dto::UpsertCellRequest};

// ---------- POST /cells ----------

/// Create the cell at (row, column) or overwrite its value.
pub async fn upsert_cell(
    State(state): State<ApiState>,
    ValidJson(body): ValidJson<UpsertCellRequest>,
) -> Result<Json<CellNode>, ApiErr> {
    let txn = state.db.begin().await.map_err(ApiErr::internal)?;
    let cell = cells::upsert(
        &txn,
        CellWrite {
            row_id: body.row_id,
            column_id: body.column_id,
            value: body.value.flatten(),
        },
    )
    .await?;
    txn.commit().await.map_err(ApiErr::internal)?;

    Ok(Json(CellNode::from(cell)))
}
