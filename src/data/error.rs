use std::path::PathBuf;

use thiserror::Error;

/// Why a dataset could not be made available to the dashboard.
///
/// When a load returns one of these, no aggregation is attempted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataUnavailable {
    #[error("dataset file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("unsupported file extension: .{extension}")]
    UnsupportedFormat { extension: String },

    #[error("could not read {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("required column '{column}' is missing")]
    MissingColumn { column: &'static str },

    #[error("{} contains no records", path.display())]
    Empty { path: PathBuf },
}
