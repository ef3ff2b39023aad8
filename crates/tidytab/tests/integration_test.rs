//! Integration tests for Tidytab.

use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

use tidytab::{
    Cleaner, CleanerConfig, Column, ColumnKind, Parser, ParserConfig, Table, TidyError, Value,
    Writer,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn text_table(columns: &[(&str, &[Option<&str>])]) -> Table {
    Table::new(
        columns
            .iter()
            .map(|(name, values)| Column::from_strs(*name, values))
            .collect(),
    )
    .expect("equal-length columns")
}

// =============================================================================
// Pipeline Scenarios
// =============================================================================

#[test]
fn test_duplicate_row_removed() {
    let table = text_table(&[
        ("a", &[Some("1"), Some("1"), Some("3")]),
        ("b", &[Some("2"), Some("2"), Some("4")]),
    ]);
    let (cleaned, report) = Cleaner::new().clean(table).unwrap();

    assert_eq!(report.duplicates_removed, 1);
    assert_eq!(cleaned.row_count(), 2);
    assert_eq!(report.numeric_converted, vec!["a", "b"]);
}

#[test]
fn test_column_name_standardized() {
    let table = text_table(&[(" User ID! ", &[Some("u1"), Some("u2")])]);
    let (cleaned, report) = Cleaner::new().clean(table).unwrap();

    assert!(report.column_names_standardized);
    assert_eq!(report.original_columns, vec![" User ID! "]);
    assert_eq!(report.new_columns, vec!["user_id_"]);
    assert_eq!(cleaned.column_names(), vec!["user_id_"]);
}

#[test]
fn test_boolean_column_mixed_case() {
    let table = text_table(&[("flag", &[Some("true"), Some("No"), Some("YES"), Some("0")])]);
    let (cleaned, report) = Cleaner::new().clean(table).unwrap();

    assert_eq!(report.boolean_converted, vec!["flag"]);
    assert!(report.numeric_converted.is_empty());
    let values: Vec<Value> = cleaned.column("flag").unwrap().values().collect();
    assert_eq!(
        values,
        vec![
            Value::Boolean(true),
            Value::Boolean(false),
            Value::Boolean(true),
            Value::Boolean(false),
        ]
    );
}

#[test]
fn test_half_numeric_column_stays_text() {
    let table = text_table(&[("mixed", &[Some("1"), Some("2"), Some("x"), Some("y")])]);
    let (cleaned, report) = Cleaner::new().clean(table).unwrap();

    assert_eq!(report.conversions(), 0);
    assert_eq!(cleaned.column("mixed").unwrap().kind(), ColumnKind::Text);
}

#[test]
fn test_fully_empty_column_removed_before_inference() {
    let table = text_table(&[
        ("id", &[Some("1"), Some("2")]),
        ("notes", &[None, None]),
    ]);
    let (cleaned, report) = Cleaner::new().clean(table).unwrap();

    assert_eq!(report.empty_columns_removed, 1);
    assert_eq!(report.new_columns, vec!["id"]);
    assert!(cleaned.column("notes").is_none());
}

#[test]
fn test_threshold_boundaries() {
    let cleaner = Cleaner::new();

    // 4 of 5 parse: promoted
    let table = text_table(&[("v", &[Some("1"), Some("2"), Some("3"), Some("4"), Some("x")])]);
    let (_, report) = cleaner.clean(table).unwrap();
    assert_eq!(report.numeric_converted, vec!["v"]);

    // 3 of 4 parse: not promoted
    let table = text_table(&[("v", &[Some("1"), Some("2"), Some("3"), Some("x")])]);
    let (_, report) = cleaner.clean(table).unwrap();
    assert!(report.numeric_converted.is_empty());

    // 3 of 5 parse: not promoted
    let table = text_table(&[("v", &[Some("1"), Some("2"), Some("3"), Some("x"), Some("y")])]);
    let (_, report) = cleaner.clean(table).unwrap();
    assert!(report.numeric_converted.is_empty());
}

#[test]
fn test_failed_parses_become_missing() {
    let table = text_table(&[(
        "when",
        &[
            Some("2024-01-05"),
            Some("2024-02-10"),
            Some("2024-03-15"),
            Some("2024-04-20"),
            Some("soon"),
        ],
    )]);
    let (cleaned, report) = Cleaner::new().clean(table).unwrap();

    assert_eq!(report.datetime_converted, vec!["when"]);
    assert_eq!(cleaned.get(4, 0), Value::Missing);
    assert_eq!(cleaned.column("when").unwrap().null_count(), 1);
}

#[test]
fn test_whitespace_trim_enables_conversion() {
    let table = text_table(&[("n", &[Some(" 1 "), Some("2\t"), Some(" 3")])]);
    let (cleaned, report) = Cleaner::new().clean(table).unwrap();

    assert!(report.whitespace_trimmed);
    assert_eq!(report.numeric_converted, vec!["n"]);
    assert_eq!(cleaned.get(0, 0), Value::Number(1.0));
}

#[test]
fn test_zero_column_table() {
    let (cleaned, report) = Cleaner::new().clean(Table::default()).unwrap();
    assert!(cleaned.is_empty());
    assert!(report.new_columns.is_empty());
    assert!(!report.whitespace_trimmed);
}

#[test]
fn test_report_json_has_every_key() {
    let table = text_table(&[("a", &[Some("1")])]);
    let (_, report) = Cleaner::new().clean(table).unwrap();
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 10);
    assert_eq!(json["numeric_converted"], serde_json::json!(["a"]));
    assert_eq!(json["datetime_converted"], serde_json::json!([]));
}

// =============================================================================
// File Round Trips
// =============================================================================

#[test]
fn test_clean_file_end_to_end() {
    let content = "Name ,Joined,Score,Member\n\
                   Alice,2023-01-05,10,yes\n\
                   Bob,2023-02-11,12.5,no\n\
                   Alice,2023-01-05,10,yes\n\
                   ,,,\n\
                   Carol ,2023-03-20,n/a,YES\n";
    let file = create_test_file(content);

    let result = Cleaner::new().clean_file(file.path()).expect("Cleaning failed");

    assert_eq!(result.source.format, "csv");
    assert_eq!(result.summary.rows_before, 5);
    assert_eq!(result.summary.rows_after, 3);
    assert_eq!(result.report.duplicates_removed, 1);
    assert_eq!(result.report.empty_rows_removed, 1);
    assert_eq!(result.report.new_columns, vec!["name", "joined", "score", "member"]);
    assert_eq!(result.report.datetime_converted, vec!["joined"]);
    // 2 of 3 scores parse, so the column stays text
    assert!(result.report.numeric_converted.is_empty());
    assert_eq!(result.report.boolean_converted, vec!["member"]);

    let dir = tempdir().unwrap();
    let out = dir.path().join("cleaned.csv");
    Writer::new().to_path(&result.table, &out).unwrap();

    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(
        written,
        "name,joined,score,member\n\
         Alice,2023-01-05,10,True\n\
         Bob,2023-02-11,12.5,False\n\
         Carol,2023-03-20,,True\n"
    );
}

#[test]
fn test_tsv_auto_detect() {
    let content = "sample id\tcount\n\
                   S001\t5\n\
                   S002\t7\n";
    let file = create_test_file(content);

    let result = Cleaner::new().clean_file(file.path()).unwrap();
    assert_eq!(result.source.format, "tsv");
    assert_eq!(result.report.new_columns, vec!["sample_id", "count"]);
    assert_eq!(result.report.numeric_converted, vec!["count"]);
}

#[test]
fn test_explicit_delimiter() {
    let config = CleanerConfig {
        parser: ParserConfig {
            delimiter: Some(b';'),
            ..ParserConfig::default()
        },
    };
    let result = Cleaner::with_config(config)
        .clean_bytes("data.txt", b"a;b\n1;x\n2;y\n")
        .unwrap();

    assert_eq!(result.table.column_count(), 2);
    assert_eq!(result.report.numeric_converted, vec!["a"]);
}

#[test]
fn test_header_only_file() {
    let file = create_test_file("a,b,c\n");
    let result = Cleaner::new().clean_file(file.path()).unwrap();

    assert_eq!(result.summary.rows_before, 0);
    assert_eq!(result.report.empty_columns_removed, 3);
    assert_eq!(result.table.column_count(), 0);

    let bytes = Writer::new().to_bytes(&result.table).unwrap();
    assert!(bytes.is_empty());
}

#[test]
fn test_empty_file_is_error() {
    let file = create_test_file("");
    let err = Cleaner::new().clean_file(file.path()).unwrap_err();
    assert!(matches!(err, TidyError::EmptyData(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = Cleaner::new()
        .clean_file("/nonexistent/definitely/missing.csv")
        .unwrap_err();
    assert!(matches!(err, TidyError::Io { .. }));
}

#[test]
fn test_na_tokens_decode_as_missing() {
    let table = Parser::new()
        .parse_bytes(b"a,b\nNA,1\nnull,2\n,3\n")
        .unwrap();

    assert_eq!(table.column("a").unwrap().null_count(), 3);
    let (_, report) = Cleaner::new().clean(table).unwrap();
    assert_eq!(report.empty_columns_removed, 1);
}
