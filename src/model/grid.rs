use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::model::status::AttendanceStatus;

/// One employee row of the calendar grid. `cells` is aligned with the
/// grid's date axis, one status per observed date.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CalendarRow {
    #[schema(example = "EMP-001")]
    pub employee_code: String,
    #[schema(example = "John Doe")]
    pub employee_name: String,
    pub cells: Vec<AttendanceStatus>,
}

/// Employee × date matrix over the set of dates observed anywhere in the
/// batch. Every employee has a cell for every date; days without a record
/// are `absent`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CalendarGrid {
    /// Logical column keys, sorted ascending.
    #[schema(value_type = Vec<String>, example = json!(["2025-07-01", "2025-07-02"]))]
    pub dates: Vec<NaiveDate>,
    /// Display labels for the columns, e.g. "01 Tue".
    #[schema(example = json!(["01 Tue", "02 Wed"]))]
    pub columns: Vec<String>,
    pub rows: Vec<CalendarRow>,
}

impl CalendarGrid {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
