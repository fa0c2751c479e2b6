//! Table container and dtype mapping onto polars.
//!
//! [`Table`] pairs a polars [`DataFrame`] with an opaque metadata map. Masked
//! cells are polars nulls.

use std::sync::Arc;

use lcdata_model::{DType, DTypeKind};
use polars::prelude::{DataFrame, DataType};

/// Opaque per-table metadata, carried through formatting unchanged.
pub type TableMeta = serde_json::Map<String, serde_json::Value>;

/// A table of named, typed columns plus shared metadata.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Column data.
    pub data: DataFrame,
    /// Metadata shared between a table and the tables formatted from it.
    pub meta: Arc<TableMeta>,
}

impl Table {
    /// Create a table with empty metadata.
    pub fn new(data: DataFrame) -> Self {
        Self {
            data,
            meta: Arc::default(),
        }
    }

    pub fn with_meta(mut self, meta: TableMeta) -> Self {
        self.meta = Arc::new(meta);
        self
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.data.height()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.data.width()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }
}

impl From<DataFrame> for Table {
    fn from(data: DataFrame) -> Self {
        Self::new(data)
    }
}

/// The polars dtype a schema dtype is stored as.
pub fn polars_dtype(dtype: DType) -> DataType {
    match dtype {
        DType::Float64 => DataType::Float64,
        DType::Float32 => DataType::Float32,
        DType::Int64 => DataType::Int64,
        DType::Int32 => DataType::Int32,
        DType::Bool => DataType::Boolean,
        DType::Str => DataType::String,
        DType::Bytes => DataType::Binary,
    }
}

/// Kind of a polars dtype, or `None` for dtypes no schema key can hold
/// (temporal, nested, null).
pub fn dtype_kind(dtype: &DataType) -> Option<DTypeKind> {
    match dtype {
        DataType::Float32 | DataType::Float64 => Some(DTypeKind::Float),
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => Some(DTypeKind::Int),
        DataType::Boolean => Some(DTypeKind::Bool),
        DataType::String => Some(DTypeKind::Str),
        DataType::Binary => Some(DTypeKind::Bytes),
        _ => None,
    }
}

/// Returns true when a column of `actual` dtype satisfies a key of `expected`
/// dtype without conversion.
pub fn is_compatible(actual: &DataType, expected: DType) -> bool {
    dtype_kind(actual) == Some(expected.kind())
}
