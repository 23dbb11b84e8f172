use reqwest::StatusCode;
use thiserror::Error;

use crate::query::FilterError;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    InvalidFilter(#[from] FilterError),

    #[error("Request failed: {status}")]
    Request { status: StatusCode, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Dataset(String),

    #[error("{0}")]
    MissingSetting(String),

    #[error("Invalid dotenv file: {0}")]
    Dotenv(#[from] dotenvy::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Do not know how to process type {type_name} for field {column}")]
    UnsupportedColumn { column: String, type_name: String },

    #[error("Unsupported database URL {0:?} (expected sqlite: or postgres://)")]
    UnsupportedDatabase(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Response body of a rejected request, if any.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Error::Request { body, .. } if !body.is_empty() => Some(body),
            _ => None,
        }
    }
}
