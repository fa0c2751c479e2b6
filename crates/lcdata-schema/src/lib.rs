//! Schema-driven table normalization.
//!
//! This crate canonicalizes tables whose columns are named and typed
//! inconsistently:
//!
//! - **alias**: column-name normalization and alias lookup
//! - **defaults**: default values for missing or masked keys
//! - **verify**: schema consistency checks
//! - **format**: reorder, rename, cast, and backfill a table against a schema
//! - **table**: the table container and its polars dtype mapping
//! - **builtin**: light curve and metadata schemas
//! - **object_id**: generated object identifiers

pub mod alias;
pub mod builtin;
pub mod defaults;
pub mod error;
pub mod format;
pub mod object_id;
pub mod table;
pub mod verify;

pub use alias::{find_alias, normalize_name};
pub use builtin::{light_curve_schema, metadata_schema, verify_builtin_schemas};
pub use defaults::{DefaultValue, get_default_value};
pub use error::{DefaultValueError, FormatError, Result};
pub use format::{
    FormatOptions, FormatReport, KeyOutcome, KeyReport, format_table, format_table_with_report,
};
pub use object_id::{ObjectIdGenerator, generate_object_id};
pub use table::{Table, TableMeta};
pub use verify::verify_schema;

// Re-export the model so callers need a single dependency.
pub use lcdata_model::{DType, DTypeKind, KeySpec, Presence, Schema, SchemaError, Value};
