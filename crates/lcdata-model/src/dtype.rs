//! Column element types declared by a schema.
//!
//! A schema names a concrete [`DType`] for every key, but compatibility
//! between an existing column and a key is decided by [`DTypeKind`]: a
//! `Float32` column satisfies a `Float64` key without conversion.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Broad family of a column element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DTypeKind {
    /// Floating point numbers of any width.
    Float,
    /// Signed or unsigned integers of any width.
    Int,
    /// Booleans.
    Bool,
    /// UTF-8 strings.
    Str,
    /// Raw byte strings.
    Bytes,
}

impl DTypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DTypeKind::Float => "float",
            DTypeKind::Int => "int",
            DTypeKind::Bool => "bool",
            DTypeKind::Str => "str",
            DTypeKind::Bytes => "bytes",
        }
    }

    /// Returns true for the string-like kinds.
    pub fn is_string_like(&self) -> bool {
        matches!(self, DTypeKind::Str | DTypeKind::Bytes)
    }
}

impl fmt::Display for DTypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Target element type of a schema key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DType {
    Float64,
    Float32,
    Int64,
    Int32,
    Bool,
    Str,
    Bytes,
}

impl DType {
    /// Returns the kind used for compatibility checks.
    pub fn kind(&self) -> DTypeKind {
        match self {
            DType::Float64 | DType::Float32 => DTypeKind::Float,
            DType::Int64 | DType::Int32 => DTypeKind::Int,
            DType::Bool => DTypeKind::Bool,
            DType::Str => DTypeKind::Str,
            DType::Bytes => DTypeKind::Bytes,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DType::Float64 => "float64",
            DType::Float32 => "float32",
            DType::Int64 => "int64",
            DType::Int32 => "int32",
            DType::Bool => "bool",
            DType::Str => "str",
            DType::Bytes => "bytes",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DType {
    type Err = String;

    /// Parse a dtype name (case-insensitive). Accepts the short aliases
    /// `float`, `int`, `string` and `binary`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();

        match normalized.as_str() {
            "float64" | "f64" | "float" | "double" => Ok(DType::Float64),
            "float32" | "f32" => Ok(DType::Float32),
            "int64" | "i64" | "int" => Ok(DType::Int64),
            "int32" | "i32" => Ok(DType::Int32),
            "bool" | "boolean" => Ok(DType::Bool),
            "str" | "string" | "utf8" => Ok(DType::Str),
            "bytes" | "binary" => Ok(DType::Bytes),
            _ => Err(format!("Unknown dtype: {s}")),
        }
    }
}
