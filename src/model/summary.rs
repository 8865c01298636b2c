use serde::Serialize;
use utoipa::ToSchema;

use crate::model::status::PerformanceCategory;

/// Aggregate attendance figures for one employee over the whole batch.
///
/// Status counts are per record, so duplicate same-day events each count;
/// `absent` is the number of observed dates with no record for the
/// employee. `attendance_percent` and `performance_category` are undefined
/// when the employee has no days at all.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EmployeeSummary {
    #[schema(example = "EMP-001")]
    pub employee_code: String,
    #[schema(example = "John Doe")]
    pub employee_name: String,
    pub present: u32,
    pub outstation_present: u32,
    /// present + outstation_present
    pub total_present: u32,
    pub late: u32,
    pub outstation_late: u32,
    pub absent: u32,
    /// Sum of all five status counts.
    pub total_days: u32,
    /// total_present / total_days × 100, one decimal. `null` when the
    /// employee has zero days.
    #[schema(example = 87.5)]
    pub attendance_percent: Option<f64>,
    pub performance_category: Option<PerformanceCategory>,
}
