//! Tests for table formatting.

use std::borrow::Cow;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use lcdata_schema::{
    DType, DefaultValueError, FormatError, FormatOptions, KeyOutcome, KeySpec, Schema, Table,
    TableMeta, Value, format_table, format_table_with_report,
};
use polars::prelude::{DataFrame, DataType, NamedFrom, Series};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();
}

fn verbose() -> FormatOptions {
    init_tracing();
    FormatOptions::new().with_verbose(true)
}

fn sample_schema() -> Schema {
    let count = Arc::new(AtomicI64::new(0));
    Schema::new()
        .with_key("a", KeySpec::required(DType::Float64, ["a", "aa"]))
        .with_key("b", KeySpec::with_default(DType::Bytes, ["b", "bb"], "test"))
        .with_key(
            "c",
            KeySpec::generated(DType::Int32, ["c", "cc"], move || {
                Value::Int(count.fetch_add(1, Ordering::SeqCst) + 1)
            }),
        )
}

fn bytes_series(name: &str, values: &[&str]) -> Series {
    Series::new(name.into(), values)
        .cast(&DataType::Binary)
        .unwrap()
}

fn sample_table() -> Table {
    let data = DataFrame::new(vec![
        Series::new("a".into(), &[0.0f64, 1.0, 2.0]).into(),
        bytes_series("b", &["x", "y", "z"]).into(),
        Series::new("c".into(), &[10i32, 20, 30]).into(),
    ])
    .unwrap();
    Table::new(data)
}

fn column_names(table: &Table) -> Vec<String> {
    table.column_names()
}

fn assert_same_table(expected: &Table, actual: &Table) {
    assert_eq!(column_names(expected), column_names(actual));
    for (left, right) in expected
        .data
        .get_columns()
        .iter()
        .zip(actual.data.get_columns())
    {
        assert_eq!(left.dtype(), right.dtype(), "dtype of {}", left.name());
        assert!(
            left.as_materialized_series()
                .equals_missing(right.as_materialized_series()),
            "values of {}",
            left.name()
        );
    }
}

fn i32_values(table: &Table, name: &str) -> Vec<Option<i32>> {
    table
        .data
        .column(name)
        .unwrap()
        .i32()
        .unwrap()
        .into_iter()
        .collect()
}

fn bytes_value(table: &Table, name: &str, idx: usize) -> Option<Vec<u8>> {
    table
        .data
        .column(name)
        .unwrap()
        .as_materialized_series()
        .binary()
        .unwrap()
        .get(idx)
        .map(<[u8]>::to_vec)
}

#[test]
fn compliant_table_is_returned_as_is() {
    let table = sample_table();
    let formatted = format_table(&table, &sample_schema(), &verbose()).unwrap();
    assert!(matches!(formatted, Cow::Borrowed(_)));
    assert!(std::ptr::eq(&*formatted, &table));
}

#[test]
fn alias_is_renamed_to_key() {
    let table = sample_table();
    let mut input = table.clone();
    input.data.rename("b", "bb".into()).unwrap();

    let formatted = format_table(&input, &sample_schema(), &verbose()).unwrap();
    assert!(matches!(formatted, Cow::Owned(_)));
    assert_same_table(&table, &formatted);
}

#[test]
fn columns_are_reordered() {
    let table = sample_table();
    let input = Table::new(table.data.select(["b", "a", "c"]).unwrap());

    let formatted = format_table(&input, &sample_schema(), &verbose()).unwrap();
    assert_same_table(&table, &formatted);
}

#[test]
fn missing_column_uses_fixed_default() {
    let table = sample_table();
    let input = Table::new(table.data.drop("b").unwrap());

    let formatted = format_table(&input, &sample_schema(), &verbose()).unwrap();
    assert_eq!(column_names(&formatted), vec!["a", "b", "c"]);
    assert_eq!(formatted.data.column("b").unwrap().dtype(), &DataType::Binary);
    for idx in 0..3 {
        assert_eq!(bytes_value(&formatted, "b", idx), Some(b"test".to_vec()));
    }
}

#[test]
fn missing_column_uses_generated_default_per_row() {
    let table = sample_table();
    let input = Table::new(table.data.drop("c").unwrap());

    let formatted = format_table(&input, &sample_schema(), &verbose()).unwrap();
    assert_eq!(
        i32_values(&formatted, "c"),
        vec![Some(1), Some(2), Some(3)]
    );
}

#[test]
fn mismatched_dtype_is_cast() {
    let mut table = sample_table();
    let ints = Series::new("a".into(), &[0i64, 1, 2]);
    table.data.with_column(ints).unwrap();

    let (formatted, report) =
        format_table_with_report(&table, &sample_schema(), &verbose()).unwrap();
    let a = formatted.data.column("a").unwrap();
    assert_eq!(a.dtype(), &DataType::Float64);
    let values: Vec<Option<f64>> = a.f64().unwrap().into_iter().collect();
    assert_eq!(values, vec![Some(0.0), Some(1.0), Some(2.0)]);
    assert!(matches!(
        report.outcome("a"),
        Some(KeyOutcome::Column { converted_from: Some(_), filled: 0, .. })
    ));
}

#[test]
fn masked_values_get_fixed_default() {
    let mut table = sample_table();
    let masked = Series::new("b".into(), &[None, Some("hi"), Some("hi")]);
    table.data.with_column(masked).unwrap();

    let formatted = format_table(&table, &sample_schema(), &verbose()).unwrap();
    let b = formatted.data.column("b").unwrap();
    assert_eq!(b.dtype(), &DataType::Binary);
    assert_eq!(b.null_count(), 0);
    assert_eq!(bytes_value(&formatted, "b", 0), Some(b"test".to_vec()));
    assert_eq!(bytes_value(&formatted, "b", 1), Some(b"hi".to_vec()));
    assert_eq!(bytes_value(&formatted, "b", 2), Some(b"hi".to_vec()));
}

#[test]
fn masked_values_get_generated_defaults_in_row_order() {
    let table = sample_table();
    let mut data = table.data.drop("c").unwrap();
    data.with_column(Series::new("cc".into(), &[None, None, Some(0i32)]))
        .unwrap();
    let input = Table::new(data);

    let (formatted, report) =
        format_table_with_report(&input, &sample_schema(), &verbose()).unwrap();
    assert_eq!(
        i32_values(&formatted, "c"),
        vec![Some(1), Some(2), Some(0)]
    );
    assert_eq!(formatted.data.column("c").unwrap().null_count(), 0);
    assert_eq!(
        report.outcome("c"),
        Some(&KeyOutcome::Column {
            source: "cc".to_string(),
            converted_from: None,
            filled: 2,
        })
    );
}

#[test]
fn compliant_check_ignores_masks() {
    let mut table = sample_table();
    table
        .data
        .with_column(Series::new("c".into(), &[None, Some(20i32), Some(30)]))
        .unwrap();

    let formatted = format_table(&table, &sample_schema(), &verbose()).unwrap();
    assert!(matches!(formatted, Cow::Borrowed(_)));
    assert_eq!(formatted.data.column("c").unwrap().null_count(), 1);
}

#[test]
fn leftover_columns_follow_schema_columns() {
    let table = sample_table();
    let mut data = table.data.clone();
    data.insert_column(0, Series::new("extra2".into(), &["p", "q", "r"]))
        .unwrap();
    data.with_column(Series::new("Extra 1".into(), &[7i64, 8, 9]))
        .unwrap();
    let input = Table::new(data);

    let (formatted, report) =
        format_table_with_report(&input, &sample_schema(), &verbose()).unwrap();
    assert_eq!(
        column_names(&formatted),
        vec!["a", "b", "c", "extra2", "Extra 1"]
    );
    assert_eq!(report.leftover_columns, vec!["extra2", "Extra 1"]);
}

#[test]
fn missing_required_column_lists_aliases() {
    let table = sample_table();
    let input = Table::new(table.data.drop("a").unwrap());

    let err = format_table(&input, &sample_schema(), &verbose()).unwrap_err();
    match &err {
        FormatError::UnresolvableRequiredColumn { key, aliases } => {
            assert_eq!(key, "a");
            assert_eq!(aliases, &["a", "aa"]);
        }
        other => panic!("unexpected error {other:?}"),
    }
    insta::assert_snapshot!(
        err.to_string(),
        @r#"couldn't find required key 'a'; possible aliases ["a", "aa"]"#
    );
}

#[test]
fn masked_required_column_fails() {
    let table = sample_table();
    let mut data = table.data.drop("a").unwrap();
    data.with_column(Series::new("AA".into(), &[Some(1.0f64), None, Some(3.0)]))
        .unwrap();
    let input = Table::new(data);

    let err = format_table(&input, &sample_schema(), &FormatOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        FormatError::DefaultValue(DefaultValueError::MissingRequiredKey { ref key }) if key == "a"
    ));
}

#[test]
fn matched_columns_are_consumed_once() {
    let schema = Schema::new()
        .with_key("x", KeySpec::with_default(DType::Float64, ["x", "y"], -1.0))
        .with_key("y", KeySpec::with_default(DType::Float64, ["y"], -2.0));
    let input = Table::new(
        DataFrame::new(vec![Series::new("y".into(), &[5.0f64, 6.0]).into()]).unwrap(),
    );

    let (formatted, report) = format_table_with_report(&input, &schema, &verbose()).unwrap();
    let x: Vec<Option<f64>> = formatted.data.column("x").unwrap().f64().unwrap().into_iter().collect();
    let y: Vec<Option<f64>> = formatted.data.column("y").unwrap().f64().unwrap().into_iter().collect();
    assert_eq!(x, vec![Some(5.0), Some(6.0)]);
    assert_eq!(y, vec![Some(-2.0), Some(-2.0)]);
    assert!(matches!(report.outcome("y"), Some(KeyOutcome::Default { .. })));
}

#[test]
fn metadata_is_shared() {
    let mut meta = TableMeta::new();
    meta.insert("name".to_string(), serde_json::json!("plasticc"));
    let table = sample_table();
    let input = Table::new(table.data.select(["c", "b", "a"]).unwrap()).with_meta(meta);

    let formatted = format_table(&input, &sample_schema(), &verbose()).unwrap();
    assert!(Arc::ptr_eq(&formatted.meta, &input.meta));
    assert_eq!(formatted.meta["name"], "plasticc");
}

#[test]
fn formatting_is_idempotent() {
    let input = Table::new(
        DataFrame::new(vec![
            Series::new("c".into(), &[1i32, 2]).into(),
            Series::new("B".into(), &[Some("u"), None]).into(),
        ])
        .unwrap(),
    );
    let schema = Schema::new()
        .with_key("b", KeySpec::with_default(DType::Str, ["b"], "none"))
        .with_key("z", KeySpec::with_default(DType::Float32, ["z"], f64::NAN));

    let once = format_table(&input, &schema, &verbose()).unwrap().into_owned();
    let twice = format_table(&once, &schema, &verbose()).unwrap();
    assert!(matches!(twice, Cow::Borrowed(_)));
    assert_eq!(column_names(&twice), vec!["b", "z", "c"]);
    assert_eq!(twice.data.column("b").unwrap().dtype(), &DataType::String);
}

#[test]
fn empty_table_gets_default_columns() {
    let schema = Schema::new()
        .with_key("ra", KeySpec::with_default(DType::Float64, ["ra"], f64::NAN))
        .with_key("type", KeySpec::with_default(DType::Str, ["type"], "Unknown"));
    let input = Table::default();

    let formatted = format_table(&input, &schema, &FormatOptions::default()).unwrap();
    assert_eq!(column_names(&formatted), vec!["ra", "type"]);
    assert_eq!(formatted.height(), 0);
}
