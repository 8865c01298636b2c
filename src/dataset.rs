use std::collections::HashMap;
use std::io::Read;

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::model::record::{AttendanceRecord, AttendanceRow, MeterReading};

/// Columns every dataset must carry, in reporting order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "employee_code",
    "employee_name",
    "attendance_date",
    "start_day_time",
    "start_diff_meters",
    "reason_start",
    "reason_end",
];

/// Fatal dataset-level failures. Per-record oddities (bad timestamps,
/// unparsable meters) are NOT errors; they normalize to fail-closed
/// values instead.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("row {row}: unparsable attendance_date {value:?}")]
    InvalidDate { row: usize, value: String },
    #[error("failed to read csv: {0}")]
    Csv(#[from] csv::Error),
}

/// Build normalized records from already-parsed tabular rows.
///
/// A required column counts as missing when no row in the batch carries a
/// value for it. An empty batch is valid and yields no records.
pub fn from_rows(rows: Vec<AttendanceRow>) -> Result<Vec<AttendanceRecord>, DatasetError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .into_iter()
        .filter(|&col| !rows.iter().any(|row| row_has_value(row, col)))
        .map(String::from)
        .collect();
    if !missing.is_empty() {
        return Err(DatasetError::MissingColumns(missing));
    }

    debug!(rows = rows.len(), "Normalizing tabular rows");

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| normalize(i + 1, row))
        .collect()
}

/// Build normalized records from a CSV payload with a header row.
///
/// The header is validated upfront against [`REQUIRED_COLUMNS`]; extra
/// columns are carried through untouched.
pub fn from_csv<R: Read>(reader: R) -> Result<Vec<AttendanceRecord>, DatasetError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let positions: HashMap<&str, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h, i))
        .collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .into_iter()
        .filter(|&col| !positions.contains_key(col))
        .map(String::from)
        .collect();
    if !missing.is_empty() {
        return Err(DatasetError::MissingColumns(missing));
    }

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let line = result?;
        let cell = |col: &str| {
            positions
                .get(col)
                .and_then(|&idx| line.get(idx))
                .filter(|v| !v.is_empty())
                .map(|v| v.to_string())
        };

        let mut row = AttendanceRow {
            employee_code: cell("employee_code"),
            employee_name: cell("employee_name"),
            attendance_date: cell("attendance_date"),
            start_day_time: cell("start_day_time"),
            start_diff_meters: cell("start_diff_meters").map(Value::String),
            reason_start: cell("reason_start"),
            reason_end: cell("reason_end"),
            ..AttendanceRow::default()
        };
        for (header, value) in headers.iter().zip(line.iter()) {
            if !REQUIRED_COLUMNS.contains(&header) {
                row.extra
                    .insert(header.to_string(), Value::String(value.to_string()));
            }
        }

        records.push(normalize(i + 1, row)?);
    }

    debug!(records = records.len(), "Decoded csv dataset");
    Ok(records)
}

/// Normalize one raw row. `row_number` is 1-based over data rows and only
/// used for error reporting.
fn normalize(row_number: usize, row: AttendanceRow) -> Result<AttendanceRecord, DatasetError> {
    let raw_date = row.attendance_date.unwrap_or_default();
    let attendance_date = parse_date(&raw_date).ok_or_else(|| DatasetError::InvalidDate {
        row: row_number,
        value: raw_date.clone(),
    })?;

    Ok(AttendanceRecord {
        employee_code: row.employee_code.unwrap_or_default(),
        employee_name: row.employee_name.unwrap_or_default(),
        attendance_date,
        start_day_time: row.start_day_time.as_deref().and_then(parse_timestamp),
        start_diff_meters: MeterReading::from_value(row.start_diff_meters.as_ref()),
        reason_start: row.reason_start,
        reason_end: row.reason_end,
        extra: row.extra,
    })
}

fn row_has_value(row: &AttendanceRow, col: &str) -> bool {
    match col {
        "employee_code" => row.employee_code.is_some(),
        "employee_name" => row.employee_name.is_some(),
        "attendance_date" => row.attendance_date.is_some(),
        "start_day_time" => row.start_day_time.is_some(),
        "start_diff_meters" => row
            .start_diff_meters
            .as_ref()
            .is_some_and(|v| !v.is_null()),
        "reason_start" => row.reason_start.is_some(),
        "reason_end" => row.reason_end.is_some(),
        _ => false,
    }
}

/// Timestamp parsing tries the formats seen in real exports before giving
/// up; a `None` downstream means fail-closed classification.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed);
        }
    }
    None
}

/// Dates accept plain `%Y-%m-%d` or any accepted timestamp format.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(parsed);
    }
    parse_timestamp(raw).map(|ts| ts.date())
}
