use axum::{
    Json, Router,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use sea_orm::DatabaseConnection;
use serde::de::DeserializeOwned;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::NormalizePath;
use tower_http::services::ServeDir;
use tower_http::set_header::response::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::store::StoreError;

pub mod cell_handlers;
pub mod column_handlers;
pub mod dto;
pub mod row_handlers;
pub mod table_handlers;

// ---------- shared state ----------

/// Per-request handlers share nothing but the connection pool.
#[derive(Clone)]
pub struct ApiState {
    pub db: DatabaseConnection,
}

// ---------- error type ----------

/// A JSON error response: `{"message": "..."}` with an HTTP status.
#[derive(Debug)]
pub struct ApiErr(StatusCode, String);

impl ApiErr {
    pub fn internal(e: impl std::fmt::Display) -> Self {
        let msg = e.to_string();
        tracing::error!(error = %msg, "request failed");
        Self(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self(StatusCode::NOT_FOUND, msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(StatusCode::BAD_REQUEST, msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self(StatusCode::CONFLICT, msg.into())
    }
}

impl IntoResponse for ApiErr {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "message": self.1 });
        (self.0, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiErr {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict(msg) => ApiErr::conflict(msg),
            StoreError::Db(e) => ApiErr::internal(e),
            missing => ApiErr::not_found(missing.to_string()),
        }
    }
}

/// Malformed or mistyped bodies are 400; a missing content type keeps its 415.
impl From<JsonRejection> for ApiErr {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection {
            JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };
        Self(status, rejection.body_text())
    }
}

// ---------- validated JSON body ----------

/// Request-level checks serde alone cannot express.
pub trait Validate {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// `Json<T>` that also runs [`Validate`]; every rejection is an [`ApiErr`].
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiErr;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate().map_err(ApiErr::bad_request)?;
        Ok(Self(value))
    }
}

// ---------- router ----------

pub fn router(state: ApiState, config: &Config) -> Router {
    let allowed_origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    let cors = if allowed_origins.is_empty() {
        CorsLayer::new() // no origins allowed = same-origin only
    } else {
        CorsLayer::new()
            .allow_origin(allowed_origins)
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true)
    };

    let mut app = Router::new()
        .route("/health", get(|| async { StatusCode::OK }))
        .nest("/api", api());

    if let Some(dir) = &config.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// [`router`] behind trailing-slash normalisation. The rewrite has to run
/// before routing, so it wraps the router instead of being a route layer.
pub fn service(state: ApiState, config: &Config) -> NormalizePath<Router> {
    NormalizePath::trim_trailing_slash(router(state, config))
}

fn api() -> Router<ApiState> {
    Router::new()
        // tables
        .route(
            "/tables",
            get(table_handlers::list_tables).post(table_handlers::create_table),
        )
        .route(
            "/tables/{id}",
            get(table_handlers::get_table)
                .patch(table_handlers::update_table)
                .delete(table_handlers::delete_table),
        )
        // columns
        .route("/columns", post(column_handlers::create_column))
        .route(
            "/columns/{id}",
            patch(column_handlers::update_column).delete(column_handlers::delete_column),
        )
        // rows
        .route("/rows", post(row_handlers::create_row))
        .route(
            "/rows/{id}",
            patch(row_handlers::update_row).delete(row_handlers::delete_row),
        )
        // cells
        .route("/cells", post(cell_handlers::upsert_cell))
}
