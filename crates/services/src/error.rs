//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use guide_core::ValidationError;
use guide_core::assessment::SessionError;
use guide_core::model::{CatalogError, ResultSet, TreeError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `AssessmentService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Session(#[from] SessionError),
    /// The session was scored but the results could not be stored. The
    /// scores are handed back so the caller can show them and retry.
    #[error("results could not be saved: {source}")]
    Unsaved {
        results: ResultSet,
        source: StorageError,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `RoadmapService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RoadmapServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `DashboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DashboardServiceError {
    #[error(transparent)]
    Assessment(#[from] AssessmentServiceError),
    #[error(transparent)]
    Roadmap(#[from] RoadmapServiceError),
}

/// Errors emitted while reading configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{var} cannot be empty")]
    Empty { var: &'static str },
    #[error("invalid {var} value (expected true/false): {raw}")]
    InvalidBool { var: &'static str, raw: String },
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
