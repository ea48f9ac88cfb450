//! Sheets - a small spreadsheet-style table editor.
//!
//! The server side is an axum REST API over SeaORM; the client side is a
//! typed HTTP client with a query cache and text-mode views.

pub mod api;
pub mod client;
pub mod column_type;
pub mod config;
pub mod entity;
pub mod node;
pub mod store;
pub mod time;
pub mod ui;
