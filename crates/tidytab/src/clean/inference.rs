//! Type promotion of text columns: numeric, then datetime, then boolean.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::table::{ColumnData, Table};

use super::report::CleaningReport;

/// Plain base-10 decimals: optional sign, optional fraction, optional exponent.
static DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$").expect("valid regex")
});

/// Date-time layouts carrying a UTC offset; normalized to UTC.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

/// Naive date-time layouts. `%.f` also matches an absent fraction.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %I:%M:%S %p",
];

/// Date-only layouts, month-first before day-first.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Two-digit-year layouts, tried only after every four-digit layout fails.
const SHORT_YEAR_DATE_FORMATS: &[&str] = &["%m/%d/%y", "%d/%m/%y"];

/// Accepted boolean spellings, matched after lower-casing.
const BOOLEAN_VOCABULARY: &[(&str, bool)] = &[
    ("true", true),
    ("false", false),
    ("yes", true),
    ("no", false),
    ("1", true),
    ("0", false),
];

/// Parse a plain decimal number.
pub fn parse_decimal(value: &str) -> Option<f64> {
    if !DECIMAL.is_match(value) {
        return None;
    }
    value.parse::<f64>().ok()
}

/// Parse a calendar date or date-time. Date-only values land on midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if value.is_empty() || !value.starts_with(|c: char| c.is_ascii_alphanumeric()) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, fmt) {
            if has_full_year(value, dt.year()) {
                return Some(dt.naive_utc());
            }
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            if has_full_year(value, dt.year()) {
                return Some(dt);
            }
        }
    }

    DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .find(|d| has_full_year(value, d.year()))
        .or_else(|| {
            SHORT_YEAR_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        })
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// `%Y` also accepts one- to three-digit years; only a written four-digit year counts.
fn has_full_year(value: &str, year: i32) -> bool {
    (1000..=9999).contains(&year) && value.contains(&year.to_string())
}

/// Map an already lower-cased value through the boolean vocabulary.
pub fn parse_boolean(lowered: &str) -> Option<bool> {
    BOOLEAN_VOCABULARY
        .iter()
        .find(|(word, _)| *word == lowered)
        .map(|(_, flag)| *flag)
}

/// Whether `parsed` values out of `rows` reach the 80% coverage threshold.
///
/// Integer arithmetic keeps the boundary exact: 4 of 5 passes, 3 of 4 does not.
pub fn meets_coverage(parsed: usize, rows: usize) -> bool {
    rows > 0 && parsed * 5 >= rows * 4
}

/// Promotes text columns to numeric, datetime or boolean columns.
pub struct TypeInferenceEngine;

impl TypeInferenceEngine {
    pub fn new() -> Self {
        Self
    }

    /// Try to promote every column that is text when this phase starts.
    ///
    /// Conversions are recorded in column order.
    pub fn infer(&self, table: &mut Table, report: &mut CleaningReport) {
        let rows = table.row_count();
        let candidates: Vec<usize> = table
            .columns()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.kind().is_text())
            .map(|(i, _)| i)
            .collect();

        let columns = table.columns_mut();
        for index in candidates {
            let column = &mut columns[index];
            let ColumnData::Text(values) = &column.data else {
                continue;
            };

            match self.promote(values, rows) {
                Some(promoted) => {
                    let kind = promoted.kind();
                    debug!(column = %column.name, %kind, "promoted column");
                    report.record_conversion(&column.name, kind);
                    column.data = promoted;
                }
                None => debug!(column = %column.name, "column stays text"),
            }
        }
    }

    /// Run the attempts in order and return the first promoted column.
    ///
    /// `rows` is the table's row count; missing cells count against coverage.
    pub fn promote(&self, values: &[Option<String>], rows: usize) -> Option<ColumnData> {
        self.try_numeric(values, rows)
            .or_else(|| self.try_datetime(values, rows))
            .or_else(|| self.try_boolean(values))
    }

    fn try_numeric(&self, values: &[Option<String>], rows: usize) -> Option<ColumnData> {
        let parsed: Vec<Option<f64>> = values
            .iter()
            .map(|v| v.as_deref().and_then(parse_decimal))
            .collect();
        let hits = parsed.iter().flatten().count();

        meets_coverage(hits, rows).then_some(ColumnData::Numeric(parsed))
    }

    fn try_datetime(&self, values: &[Option<String>], rows: usize) -> Option<ColumnData> {
        let parsed: Vec<Option<NaiveDateTime>> = values
            .iter()
            .map(|v| v.as_deref().and_then(parse_timestamp))
            .collect();
        let hits = parsed.iter().flatten().count();

        meets_coverage(hits, rows).then_some(ColumnData::Timestamp(parsed))
    }

    fn try_boolean(&self, values: &[Option<String>]) -> Option<ColumnData> {
        let lowered: Vec<Option<String>> = values
            .iter()
            .map(|v| v.as_deref().map(str::to_lowercase))
            .collect();

        let distinct: IndexSet<&str> = lowered.iter().flatten().map(String::as_str).collect();
        if distinct.is_empty() {
            return None;
        }
        if let Some(stray) = distinct.iter().find(|v| parse_boolean(v).is_none()) {
            debug!(value = %stray, "value outside boolean vocabulary");
            return None;
        }

        Some(ColumnData::Boolean(
            lowered
                .iter()
                .map(|v| v.as_deref().and_then(parse_boolean))
                .collect(),
        ))
    }
}

impl Default for TypeInferenceEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, ColumnKind};

    fn cells(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_decimal_forms() {
        assert_eq!(parse_decimal("42"), Some(42.0));
        assert_eq!(parse_decimal("-3.5"), Some(-3.5));
        assert_eq!(parse_decimal("+.5"), Some(0.5));
        assert_eq!(parse_decimal("5."), Some(5.0));
        assert_eq!(parse_decimal("1e3"), Some(1000.0));
        assert_eq!(parse_decimal("2.5E-1"), Some(0.25));
        assert_eq!(parse_decimal("inf"), None);
        assert_eq!(parse_decimal("NaN"), None);
        assert_eq!(parse_decimal("1,000"), None);
        assert_eq!(parse_decimal("0x10"), None);
        assert_eq!(parse_decimal("."), None);
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("١٢"), None);
    }

    #[test]
    fn test_parse_timestamp_forms() {
        assert_eq!(parse_timestamp("2024-01-15"), Some(date(2024, 1, 15)));
        assert_eq!(parse_timestamp("01/02/2024"), Some(date(2024, 1, 2)));
        assert_eq!(parse_timestamp("13/02/2024"), Some(date(2024, 2, 13)));
        assert_eq!(parse_timestamp("15.01.2024"), Some(date(2024, 1, 15)));
        assert_eq!(parse_timestamp("Jan 5, 2024"), Some(date(2024, 1, 5)));
        assert_eq!(parse_timestamp("5 March 2024"), Some(date(2024, 3, 5)));

        let with_time = parse_timestamp("2024-01-15 10:30:00").unwrap();
        assert_eq!(with_time, date(2024, 1, 15).with_hour_minute(10, 30));

        let utc = parse_timestamp("2024-01-15T10:30:00+02:00").unwrap();
        assert_eq!(utc, date(2024, 1, 15).with_hour_minute(8, 30));
        assert_eq!(
            parse_timestamp("2024-01-15T10:30:00Z"),
            Some(date(2024, 1, 15).with_hour_minute(10, 30))
        );
    }

    #[test]
    fn test_parse_timestamp_rejects_malformed() {
        assert_eq!(parse_timestamp("2024-13-01"), None);
        assert_eq!(parse_timestamp("2024-02-30"), None);
        assert_eq!(parse_timestamp("hello"), None);
        assert_eq!(parse_timestamp("12"), None);
        assert_eq!(parse_timestamp("20240115"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("24-01-15"), None);
        assert_eq!(parse_timestamp("1/2/24 10:30"), None);
    }

    #[test]
    fn test_parse_timestamp_two_digit_years() {
        assert_eq!(parse_timestamp("1/2/24"), Some(date(2024, 1, 2)));
        assert_eq!(parse_timestamp("12/31/24"), Some(date(2024, 12, 31)));
        assert_eq!(parse_timestamp("31/12/99"), Some(date(1999, 12, 31)));
        assert_eq!(parse_timestamp("0024-12-31"), None);
    }

    #[test]
    fn test_short_year_column_keeps_century() {
        let engine = TypeInferenceEngine::new();
        let values = cells(&[Some("1/2/24"), Some("3/4/24"), Some("12/31/24"), Some("6/15/23")]);

        assert_eq!(
            engine.promote(&values, 4),
            Some(ColumnData::Timestamp(vec![
                Some(date(2024, 1, 2)),
                Some(date(2024, 3, 4)),
                Some(date(2024, 12, 31)),
                Some(date(2023, 6, 15)),
            ]))
        );
    }

    trait WithHourMinute {
        fn with_hour_minute(self, h: u32, m: u32) -> NaiveDateTime;
    }

    impl WithHourMinute for NaiveDateTime {
        fn with_hour_minute(self, h: u32, m: u32) -> NaiveDateTime {
            self.date().and_hms_opt(h, m, 0).unwrap()
        }
    }

    #[test]
    fn test_coverage_boundary() {
        assert!(meets_coverage(4, 5));
        assert!(meets_coverage(8, 10));
        assert!(!meets_coverage(3, 4));
        assert!(!meets_coverage(3, 5));
        assert!(!meets_coverage(7, 9));
        assert!(!meets_coverage(0, 0));
    }

    #[test]
    fn test_numeric_promotion_with_failures_as_missing() {
        let engine = TypeInferenceEngine::new();
        let values = cells(&[Some("1"), Some("2"), Some("3"), Some("4"), Some("x")]);

        let promoted = engine.promote(&values, 5).unwrap();
        assert_eq!(
            promoted,
            ColumnData::Numeric(vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0), None])
        );
    }

    #[test]
    fn test_missing_counts_against_threshold() {
        let engine = TypeInferenceEngine::new();
        let values = cells(&[Some("1"), Some("2"), Some("3"), None]);
        assert_eq!(engine.try_numeric(&values, 4), None);
    }

    #[test]
    fn test_mostly_numeric_falls_through_to_text() {
        let engine = TypeInferenceEngine::new();
        let values = cells(&[Some("1"), Some("2"), Some("x"), Some("y")]);
        assert_eq!(engine.promote(&values, 4), None);
    }

    #[test]
    fn test_boolean_vocabulary_case_insensitive() {
        let engine = TypeInferenceEngine::new();
        let values = cells(&[Some("true"), Some("No"), Some("YES"), Some("0")]);

        assert_eq!(
            engine.promote(&values, 4),
            Some(ColumnData::Boolean(vec![
                Some(true),
                Some(false),
                Some(true),
                Some(false)
            ]))
        );
    }

    #[test]
    fn test_boolean_keeps_missing_and_ignores_coverage() {
        let engine = TypeInferenceEngine::new();
        let values = cells(&[Some("yes"), None, None, None, None]);

        assert_eq!(
            engine.promote(&values, 5),
            Some(ColumnData::Boolean(vec![Some(true), None, None, None, None]))
        );
    }

    #[test]
    fn test_boolean_rejects_stray_value() {
        let engine = TypeInferenceEngine::new();
        let values = cells(&[Some("yes"), Some("no"), Some("maybe")]);
        assert_eq!(engine.promote(&values, 3), None);
    }

    #[test]
    fn test_zero_one_column_is_numeric_first() {
        let engine = TypeInferenceEngine::new();
        let values = cells(&[Some("1"), Some("0"), Some("1"), Some("0")]);
        assert_eq!(engine.promote(&values, 4).map(|d| d.kind()), Some(ColumnKind::Numeric));
    }

    #[test]
    fn test_sparse_zero_one_column_falls_to_boolean() {
        let engine = TypeInferenceEngine::new();
        let values = cells(&[Some("1"), None, Some("0"), None, None]);
        assert_eq!(
            engine.promote(&values, 5),
            Some(ColumnData::Boolean(vec![Some(true), None, Some(false), None, None]))
        );
    }

    #[test]
    fn test_datetime_promotion() {
        let engine = TypeInferenceEngine::new();
        let values = cells(&[
            Some("2024-01-01"),
            Some("2024-02-01"),
            Some("03/01/2024"),
            Some("2024-04-01"),
            Some("soon"),
        ]);
        let promoted = engine.promote(&values, 5).unwrap();
        match promoted {
            ColumnData::Timestamp(ts) => {
                assert_eq!(ts[2], Some(date(2024, 3, 1)));
                assert_eq!(ts[4], None);
            }
            other => panic!("expected timestamps, got {:?}", other),
        }
    }

    #[test]
    fn test_infer_skips_non_text_and_records_in_order() {
        let mut table = Table::new(vec![
            Column::from_strs("flag", &[Some("yes"), Some("no")]),
            Column::new("n", ColumnData::Numeric(vec![Some(1.0), Some(2.0)])),
            Column::from_strs("count", &[Some("1"), Some("2")]),
            Column::from_strs("name", &[Some("a"), Some("b")]),
        ])
        .unwrap();
        let mut report = CleaningReport::new();
        TypeInferenceEngine::new().infer(&mut table, &mut report);

        assert_eq!(report.boolean_converted, vec!["flag"]);
        assert_eq!(report.numeric_converted, vec!["count"]);
        assert!(report.datetime_converted.is_empty());
        assert_eq!(table.column("name").unwrap().kind(), ColumnKind::Text);
        assert_eq!(table.column("n").unwrap().kind(), ColumnKind::Numeric);
    }
}
