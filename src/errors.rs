//! Unified error taxonomy for the data-access core.
//!
//! Every storage failure is normalized into one of the variants below before
//! it crosses the crate boundary; callers never see raw driver error codes.
//! Consumers are expected to pattern-match the variants exhaustively instead
//! of downcasting.

use sea_orm::{ConnAcquireErr, DbErr, SqlErr};
use thiserror::Error;

/// Error kinds produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad caller input. Never worth retrying.
    #[error("{message}")]
    Validation {
        /// Human-readable description of the violated rule
        message: String,
        /// Name of the offending field, when the rule is field-scoped
        field: Option<String>,
    },

    /// A referenced resource does not exist.
    #[error("{}", not_found_message(.resource, .id.as_deref()))]
    NotFound {
        /// Resource kind, e.g. `"Employee"`
        resource: String,
        /// Identifier that failed to resolve, when known
        id: Option<String>,
    },

    /// A uniqueness guarantee was violated.
    #[error("{message}")]
    Conflict {
        /// Description naming the conflicting field
        message: String,
    },

    /// Transient or unknown storage failure. The only kind worth retrying.
    #[error("{message}")]
    Database {
        /// Description of the failure
        message: String,
        /// Storage-layer code, when one was detected
        code: Option<String>,
        /// Originating driver error, preserved for diagnostics
        #[source]
        source: Option<DbErr>,
    },

    /// Configuration error (missing or malformed settings).
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what is missing or malformed
        message: String,
    },

    /// I/O error while reading configuration files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Builds a field-tagged validation error.
    pub fn validation(message: impl Into<String>, field: &str) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.to_string()),
        }
    }

    /// Builds a not-found error for a resource looked up by id.
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.to_string(),
            id: Some(id.to_string()),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

fn not_found_message(resource: &str, id: Option<&str>) -> String {
    match id {
        Some(id) => format!("{resource} with id {id} not found"),
        None => format!("{resource} not found"),
    }
}

/// Extracts the first column name from a database constraint message.
///
/// `SQLite` reports unique violations as
/// `"UNIQUE constraint failed: employees.email"`, with composite constraints
/// listing every column comma-separated after the colon. The first listed
/// `table.column` entry names the conflict. Falls back to the literal
/// `"field"` when the message has no recognizable column.
fn constraint_field(detail: &str) -> &str {
    detail
        .rsplit(':')
        .next()
        .and_then(|columns| columns.split(',').next())
        .map(str::trim)
        .and_then(|column| column.rsplit('.').next())
        .filter(|segment| {
            !segment.is_empty() && segment.chars().all(|c| c.is_alphanumeric() || c == '_')
        })
        .unwrap_or("field")
}

/// Normalizes a raw `SeaORM` error into the crate taxonomy.
///
/// Unique violations become [`Error::Conflict`] naming the conflicting
/// column, foreign-key and required-relation violations become
/// [`Error::Validation`], missing records become [`Error::NotFound`], and
/// connection-level failures become [`Error::Database`] with a code and the
/// original error preserved as the source. Anything unrecognized is carried
/// through as [`Error::Database`] with the driver message verbatim.
pub fn translate_db_err(err: DbErr) -> Error {
    if let Some(sql_err) = err.sql_err() {
        match sql_err {
            SqlErr::UniqueConstraintViolation(detail) => {
                let field = constraint_field(&detail);
                return Error::Conflict {
                    message: format!("{field} already exists"),
                };
            }
            SqlErr::ForeignKeyConstraintViolation(_) => {
                return Error::Validation {
                    message: "Referenced record does not exist".to_string(),
                    field: None,
                };
            }
            _ => {}
        }
    }

    match err {
        DbErr::RecordNotFound(resource) => Error::NotFound { resource, id: None },
        timeout @ DbErr::ConnectionAcquire(ConnAcquireErr::Timeout) => Error::Database {
            message: "Database operation timed out".to_string(),
            code: Some("acquire_timeout".to_string()),
            source: Some(timeout),
        },
        conn @ (DbErr::Conn(_) | DbErr::ConnectionAcquire(_)) => Error::Database {
            message: "Unable to connect to database".to_string(),
            code: Some("connection".to_string()),
            source: Some(conn),
        },
        other => {
            let message = other.to_string();
            if message.contains("NOT NULL constraint failed") {
                return Error::Validation {
                    message: "Required relation is missing".to_string(),
                    field: None,
                };
            }
            Error::Database {
                message,
                code: None,
                source: Some(other),
            }
        }
    }
}

impl From<DbErr> for Error {
    fn from(err: DbErr) -> Self {
        translate_db_err(err)
    }
}
