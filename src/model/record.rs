use chrono::{NaiveDate, NaiveDateTime};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::model::status::AttendanceStatus;

/// Raw tabular row as supplied by the loader (JSON intake) or decoded from
/// a CSV line. All required columns are optional here so the dataset
/// boundary can report what is missing instead of failing row by row.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AttendanceRow {
    #[schema(example = "EMP-001", value_type = Option<String>)]
    pub employee_code: Option<String>,
    #[schema(example = "John Doe", value_type = Option<String>)]
    pub employee_name: Option<String>,
    #[schema(example = "2025-07-01", value_type = Option<String>)]
    pub attendance_date: Option<String>,
    #[schema(example = "2025-07-01 09:02:11", value_type = Option<String>)]
    pub start_day_time: Option<String>,
    /// Numeric distance in meters, or the sentinel string "Other Location".
    #[schema(example = 42.0, value_type = Object)]
    pub start_diff_meters: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub reason_start: Option<String>,
    #[schema(value_type = Option<String>)]
    pub reason_end: Option<String>,
    /// Any additional columns, passed through untouched.
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Map<String, Value>,
}

/// Distance between the clock-in location and the primary site, resolved
/// once at normalization time. `OtherLocation` and `Invalid` behave as a
/// distance that exceeds any finite threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeterReading {
    Numeric(f64),
    OtherLocation,
    Invalid,
}

/// Sentinel the upstream tracker emits when the clock-in happened away
/// from any known site.
pub const OTHER_LOCATION: &str = "Other Location";

impl MeterReading {
    /// Resolve a raw cell (JSON number, numeric string or sentinel).
    pub fn from_value(raw: Option<&Value>) -> Self {
        match raw {
            Some(Value::Number(n)) => match n.as_f64() {
                Some(v) => MeterReading::Numeric(v),
                None => MeterReading::Invalid,
            },
            Some(Value::String(s)) => MeterReading::from_text(s),
            _ => MeterReading::Invalid,
        }
    }

    /// Resolve a raw CSV cell.
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed == OTHER_LOCATION {
            return MeterReading::OtherLocation;
        }
        match trimmed.parse::<f64>() {
            Ok(v) => MeterReading::Numeric(v),
            Err(_) => MeterReading::Invalid,
        }
    }

    /// Effective distance for threshold comparisons. Unknown readings
    /// resolve to infinity so they can never satisfy a `< threshold` check.
    pub fn distance(self) -> f64 {
        match self {
            MeterReading::Numeric(v) => v,
            MeterReading::OtherLocation | MeterReading::Invalid => f64::INFINITY,
        }
    }
}

impl Serialize for MeterReading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MeterReading::Numeric(v) => serializer.serialize_f64(*v),
            MeterReading::OtherLocation => serializer.serialize_str(OTHER_LOCATION),
            MeterReading::Invalid => serializer.serialize_none(),
        }
    }
}

/// Normalized, immutable attendance event. Parsing failures are kept as
/// `None`/`Invalid` so classification stays total and fail-closed.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AttendanceRecord {
    #[schema(example = "EMP-001")]
    pub employee_code: String,
    #[schema(example = "John Doe")]
    pub employee_name: String,
    #[schema(example = "2025-07-01", format = "date", value_type = String)]
    pub attendance_date: NaiveDate,
    #[schema(example = "2025-07-01T09:02:11", value_type = Option<String>)]
    pub start_day_time: Option<NaiveDateTime>,
    #[schema(value_type = Object)]
    pub start_diff_meters: MeterReading,
    #[schema(value_type = Option<String>)]
    pub reason_start: Option<String>,
    #[schema(value_type = Option<String>)]
    pub reason_end: Option<String>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: Map<String, Value>,
}

/// An attendance record plus its derived status. Created once by the
/// classifier and never mutated afterwards.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClassifiedRecord {
    #[serde(flatten)]
    pub record: AttendanceRecord,
    pub status: AttendanceStatus,
}

impl ClassifiedRecord {
    pub fn employee_code(&self) -> &str {
        &self.record.employee_code
    }

    pub fn employee_name(&self) -> &str {
        &self.record.employee_name
    }

    pub fn attendance_date(&self) -> NaiveDate {
        self.record.attendance_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn meter_reading_resolves_numbers_and_sentinels() {
        assert_eq!(
            MeterReading::from_value(Some(&json!(150.5))),
            MeterReading::Numeric(150.5)
        );
        assert_eq!(
            MeterReading::from_value(Some(&json!("120"))),
            MeterReading::Numeric(120.0)
        );
        assert_eq!(
            MeterReading::from_value(Some(&json!("Other Location"))),
            MeterReading::OtherLocation
        );
        assert_eq!(
            MeterReading::from_value(Some(&json!("garbage"))),
            MeterReading::Invalid
        );
        assert_eq!(MeterReading::from_value(None), MeterReading::Invalid);
    }

    #[test]
    fn unknown_distances_never_pass_a_threshold() {
        assert!(MeterReading::OtherLocation.distance() >= 200.0);
        assert!(MeterReading::Invalid.distance() >= 200.0);
        assert!(!(MeterReading::OtherLocation.distance() < f64::MAX));
    }

    #[test]
    fn extra_columns_survive_a_round_trip() {
        let row: AttendanceRow = serde_json::from_value(json!({
            "employee_code": "EMP-001",
            "employee_name": "John Doe",
            "attendance_date": "2025-07-01",
            "start_day_time": "2025-07-01 09:00:00",
            "start_diff_meters": 50,
            "reason_start": null,
            "reason_end": null,
            "shift": "morning"
        }))
        .unwrap();

        assert_eq!(row.employee_code.as_deref(), Some("EMP-001"));
        assert_eq!(row.extra.get("shift"), Some(&json!("morning")));
    }
}
