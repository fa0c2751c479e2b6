//! Table formatting against a schema.
//!
//! [`format_table`] reorders, renames, casts, and backfills the columns of a
//! [`Table`] so that it follows a [`Schema`]:
//!
//! 1. If the leading columns already carry the schema keys, in order and with
//!    compatible dtypes, the input is returned as is.
//! 2. Otherwise every schema key is resolved against the input columns through
//!    its aliases. A matched column is consumed and cannot serve a later key.
//! 3. Keys without a match get a column built from their default; matched
//!    columns are cast to the key dtype when the kinds differ and their null
//!    cells are replaced by the key default.
//! 4. Unconsumed input columns follow the schema columns in their original
//!    order, and the metadata is shared with the input.

use std::borrow::Cow;
use std::sync::Arc;

use lcdata_model::{DType, Schema, SchemaError, SchemaKey, Value};
use polars::prelude::{AnyValue, BooleanChunked, Column, DataFrame, Series};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::alias::find_alias;
use crate::defaults::{DefaultValue, get_default_value};
use crate::error::{DefaultValueError, FormatError, Result};
use crate::table::{Table, is_compatible, polars_dtype};

/// Emit a formatting step at `info` when verbose and at `debug` otherwise.
macro_rules! step {
    ($verbose:expr, $($arg:tt)+) => {
        if $verbose {
            tracing::info!($($arg)+)
        } else {
            tracing::debug!($($arg)+)
        }
    };
}

/// Options for [`format_table`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatOptions {
    /// Report every formatting step at `info` level.
    pub verbose: bool,
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// How a schema key obtained its column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum KeyOutcome {
    /// Taken from an input column.
    Column {
        /// Name of the input column.
        source: String,
        /// Original dtype, when the column had to be cast.
        converted_from: Option<String>,
        /// Number of masked cells replaced by the default.
        filled: usize,
    },
    /// Built entirely from the key default.
    Default { value: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyReport {
    pub key: String,
    pub outcome: KeyOutcome,
}

/// Summary of a [`format_table_with_report`] call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormatReport {
    /// The input already followed the schema and was returned unchanged.
    pub compliant: bool,
    /// One entry per schema key, in schema order. Empty when compliant.
    pub keys: Vec<KeyReport>,
    /// Input columns appended after the schema columns.
    pub leftover_columns: Vec<String>,
}

impl FormatReport {
    pub fn outcome(&self, key: &str) -> Option<&KeyOutcome> {
        self.keys
            .iter()
            .find(|report| report.key == key)
            .map(|report| &report.outcome)
    }
}

/// Format `table` to follow `schema`.
///
/// Returns the input itself when it is already compliant, otherwise a newly
/// built table. See the module docs for the rules.
///
/// # Errors
///
/// - [`FormatError::UnresolvableRequiredColumn`] when a required key matches
///   no input column.
/// - [`FormatError::DefaultValue`] when a matched column has masked cells but
///   the key has no default.
/// - [`FormatError::Schema`] for keys without a dtype or aliases.
pub fn format_table<'a>(
    table: &'a Table,
    schema: &Schema,
    options: &FormatOptions,
) -> Result<Cow<'a, Table>> {
    format_table_with_report(table, schema, options).map(|(table, _)| table)
}

/// Same as [`format_table`], also returning what was done for every key.
pub fn format_table_with_report<'a>(
    table: &'a Table,
    schema: &Schema,
    options: &FormatOptions,
) -> Result<(Cow<'a, Table>, FormatReport)> {
    let verbose = options.verbose;

    if is_compliant(table, schema) {
        step!(verbose, "table is compliant, returning it as is");
        let report = FormatReport {
            compliant: true,
            ..FormatReport::default()
        };
        return Ok((Cow::Borrowed(table), report));
    }

    step!(
        verbose,
        columns = table.width(),
        rows = table.height(),
        "formatting table"
    );

    let height = table.height();
    let mut remaining: Vec<Column> = table.data.get_columns().to_vec();
    let mut columns: Vec<Column> = Vec::with_capacity(schema.len() + remaining.len());
    let mut report = FormatReport::default();

    for key in schema.iter() {
        let dtype = key.spec.dtype.ok_or_else(|| SchemaError::MissingDtype {
            key: key.name.clone(),
        })?;
        let aliases = key
            .spec
            .aliases
            .as_deref()
            .ok_or_else(|| SchemaError::MissingAliases {
                key: key.name.clone(),
            })?;

        let matched = {
            let names: Vec<&str> = remaining.iter().map(|c| c.name().as_str()).collect();
            find_alias(&names, aliases)
        }
        .and_then(|source| remaining.iter().position(|c| c.name().as_str() == source));

        let (column, outcome) = match matched {
            Some(index) => {
                let column = remaining.remove(index);
                conform_column(schema, key, dtype, &column, verbose)?
            }
            None => {
                let default = match get_default_value(schema, &key.name, Some(height)) {
                    Ok(default) => default,
                    Err(DefaultValueError::MissingRequiredKey { .. }) => {
                        return Err(FormatError::UnresolvableRequiredColumn {
                            key: key.name.clone(),
                            aliases: aliases.to_vec(),
                        });
                    }
                    Err(err) => return Err(err.into()),
                };
                step!(verbose, key = %key.name, default = %default, "using default value");
                let column = default_column(&key.name, &default, height, dtype)?;
                let outcome = KeyOutcome::Default {
                    value: default.to_string(),
                };
                (column, outcome)
            }
        };

        columns.push(column);
        report.keys.push(KeyReport {
            key: key.name.clone(),
            outcome,
        });
    }

    if !remaining.is_empty() {
        report.leftover_columns = remaining.iter().map(|c| c.name().to_string()).collect();
        step!(
            verbose,
            columns = ?report.leftover_columns,
            "keeping columns outside the schema"
        );
    }
    columns.extend(remaining);

    let formatted = Table {
        data: DataFrame::new(columns)?,
        meta: Arc::clone(&table.meta),
    };
    Ok((Cow::Owned(formatted), report))
}

/// Returns true when the leading columns match the schema keys by name and
/// dtype kind. Null cells are not inspected.
fn is_compliant(table: &Table, schema: &Schema) -> bool {
    if table.width() < schema.len() {
        return false;
    }
    table
        .data
        .get_columns()
        .iter()
        .zip(schema.iter())
        .all(|(column, key)| {
            column.name().as_str() == key.name
                && key
                    .spec
                    .dtype
                    .is_some_and(|dtype| is_compatible(column.dtype(), dtype))
        })
}

/// Cast and backfill a matched input column, renaming it to the schema key.
fn conform_column(
    schema: &Schema,
    key: &SchemaKey,
    dtype: DType,
    column: &Column,
    verbose: bool,
) -> Result<(Column, KeyOutcome)> {
    let source = column.name().to_string();
    step!(verbose, key = %key.name, source = %source, "using column");

    let mut series = column.as_materialized_series().clone();

    let mut converted_from = None;
    if !is_compatible(series.dtype(), dtype) {
        let original = series.dtype().to_string();
        step!(
            verbose,
            key = %key.name,
            from = %original,
            to = %dtype,
            "converting dtype"
        );
        let nulls_before = series.null_count();
        series = series.cast(&polars_dtype(dtype))?;
        let lost = series.null_count().saturating_sub(nulls_before);
        if lost > 0 {
            warn!(
                key = %key.name,
                source = %source,
                count = lost,
                "values could not be converted and are treated as missing"
            );
        }
        converted_from = Some(original);
    }

    let filled = series.null_count();
    if filled > 0 {
        let default = get_default_value(schema, &key.name, Some(filled))?;
        step!(
            verbose,
            key = %key.name,
            count = filled,
            default = %default,
            "filling missing values"
        );
        series = fill_masked(&series, &default)?;
    }

    series.rename(key.name.as_str().into());
    let outcome = KeyOutcome::Column {
        source,
        converted_from,
        filled,
    };
    Ok((series.into(), outcome))
}

/// Replace the null cells of `series` with `default`.
///
/// A scalar default goes to every null cell; a sequence is assigned to the
/// null cells in row order. The result keeps the dtype of `series` and holds
/// no nulls unless the default itself is null.
fn fill_masked(series: &Series, default: &DefaultValue) -> Result<Series> {
    let mask: BooleanChunked = series.is_null();
    let filler = match default {
        DefaultValue::Scalar(value) => {
            Series::from_any_values(series.name().clone(), &[any_value(value)], false)?
                .new_from_index(0, series.len())
        }
        DefaultValue::Sequence(values) => {
            let mut generated = values.iter();
            let cells: Vec<AnyValue<'_>> = (&mask)
                .into_iter()
                .map(|masked| match masked {
                    Some(true) => generated.next().map_or(AnyValue::Null, any_value),
                    _ => AnyValue::Null,
                })
                .collect();
            Series::from_any_values(series.name().clone(), &cells, false)?
        }
    };
    let filler = filler.cast(series.dtype())?;
    Ok(filler.zip_with(&mask, series)?)
}

/// Build a full column for a key that has no input column.
fn default_column(name: &str, default: &DefaultValue, height: usize, dtype: DType) -> Result<Column> {
    let series = match default {
        DefaultValue::Scalar(value) => {
            Series::from_any_values(name.into(), &[any_value(value)], false)?
                .new_from_index(0, height)
        }
        DefaultValue::Sequence(values) => {
            let cells: Vec<AnyValue<'_>> = values.iter().map(any_value).collect();
            Series::from_any_values(name.into(), &cells, false)?
        }
    };
    Ok(series.cast(&polars_dtype(dtype))?.into())
}

fn any_value(value: &Value) -> AnyValue<'_> {
    match value {
        Value::Float(v) => AnyValue::Float64(*v),
        Value::Int(v) => AnyValue::Int64(*v),
        Value::Bool(v) => AnyValue::Boolean(*v),
        Value::Str(v) => AnyValue::String(v),
        Value::Bytes(v) => AnyValue::Binary(v),
    }
}
