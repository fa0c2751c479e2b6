//! Error types for default resolution and table formatting.

use lcdata_model::SchemaError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors from [`get_default_value`](crate::get_default_value).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefaultValueError {
    /// The key is required and has no default.
    #[error("key '{key}' is required")]
    MissingRequiredKey { key: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Errors from [`format_table`](crate::format_table).
#[derive(Debug, Error)]
pub enum FormatError {
    /// A required key matched none of its aliases in the input table.
    #[error("couldn't find required key '{key}'; possible aliases {aliases:?}")]
    UnresolvableRequiredColumn { key: String, aliases: Vec<String> },

    #[error(transparent)]
    DefaultValue(#[from] DefaultValueError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

pub type Result<T, E = FormatError> = std::result::Result<T, E>;
