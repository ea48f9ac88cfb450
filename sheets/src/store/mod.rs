//! Data access: one module per entity, plus out-of-band reclamation.
//!
//! Every helper is generic over [`ConnectionTrait`] so handlers can run a
//! write and its read-back inside one transaction. Nothing here applies
//! business rules beyond timestamp stamping and soft-delete filtering.

use chrono::{NaiveDateTime, Utc};
use sea_orm::{DbErr, SqlErr};
use uuid::Uuid;

pub mod cells;
pub mod columns;
pub mod purge;
pub mod rows;
pub mod tables;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Lookup (or read-back after a write) found nothing.
    #[error("{0} not found")]
    NotFound(&'static str),
    /// Insert referenced a parent that does not exist.
    #[error("{0} not found")]
    MissingReference(&'static str),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Db(#[from] DbErr),
}

impl StoreError {
    /// Classify an insert failure: foreign-key and unique violations become
    /// their own kinds, everything else stays a database error.
    fn from_insert(e: DbErr, parent: &'static str, what: &'static str) -> Self {
        match e.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => StoreError::MissingReference(parent),
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                StoreError::Conflict(format!("{what} already exists"))
            }
            _ => StoreError::Db(e),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

pub(crate) fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Random v4 UUID. The grid labels rows by its first segment.
pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}
