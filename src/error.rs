use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("connection error: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("query error: {0}")]
    Query(#[source] sqlx::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Splits a driver error into the two recoverable classes: session-level
    /// failures (cannot reach the store) vs. statement-level failures (store
    /// reached, statement failed or rows would not decode).
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Configuration(_) => AppError::Connection(e),
            _ => AppError::Query(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::Connection(_) | AppError::Query(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeout_classifies_as_connection() {
        let e = AppError::from_sqlx(sqlx::Error::PoolTimedOut);
        assert!(matches!(e, AppError::Connection(_)));
    }

    #[test]
    fn row_not_found_classifies_as_query() {
        let e = AppError::from_sqlx(sqlx::Error::RowNotFound);
        assert!(matches!(e, AppError::Query(_)));
    }
}
