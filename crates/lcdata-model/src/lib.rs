//! Data model for schema-driven table normalization.
//!
//! - **dtype**: target element types and their compatibility kinds
//! - **value**: scalar default values
//! - **schema**: ordered schemas, key specifications, and presence policies
//! - **error**: schema consistency errors

pub mod dtype;
pub mod error;
pub mod schema;
pub mod value;

pub use dtype::{DType, DTypeKind};
pub use error::SchemaError;
pub use schema::{DefaultFn, KeySpec, Presence, Schema, SchemaKey};
pub use value::Value;
