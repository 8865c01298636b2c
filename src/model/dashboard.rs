use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::status::{AttendanceStatus, PerformanceCategory};

/// Record counts per status, used for per-date breakdowns.
#[derive(Debug, Clone, Copy, Default, Serialize, ToSchema)]
pub struct StatusCounts {
    pub present: u32,
    pub outstation_present: u32,
    pub late: u32,
    pub outstation_late: u32,
    pub absent: u32,
}

impl StatusCounts {
    pub fn record(&mut self, status: AttendanceStatus) {
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::OutstationPresent => self.outstation_present += 1,
            AttendanceStatus::Late => self.late += 1,
            AttendanceStatus::OutstationLate => self.outstation_late += 1,
            AttendanceStatus::Absent => self.absent += 1,
        }
    }

    pub fn get(&self, status: AttendanceStatus) -> u32 {
        match status {
            AttendanceStatus::Present => self.present,
            AttendanceStatus::OutstationPresent => self.outstation_present,
            AttendanceStatus::Late => self.late,
            AttendanceStatus::OutstationLate => self.outstation_late,
            AttendanceStatus::Absent => self.absent,
        }
    }

    pub fn total(&self) -> u32 {
        self.present + self.outstation_present + self.late + self.outstation_late + self.absent
    }
}

/// Number of employees whose attendance percentage fell into a band.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryCount {
    pub category: PerformanceCategory,
    #[schema(example = "Good (75-90%)")]
    pub label: &'static str,
    pub employees: u32,
}

/// Dashboard-wide scalar aggregates over all employee summaries.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardMetrics {
    pub total_employees: u32,
    pub total_present_days: u32,
    /// late + outstation_late over all employees.
    pub total_late_days: u32,
    pub total_absent_days: u32,
    /// Present days over all observed employee-days, one decimal. `null`
    /// when the batch is empty.
    #[schema(example = 91.3)]
    pub overall_attendance_rate: Option<f64>,
    /// Zero-filled over all four bands; employees without a defined
    /// percentage are not counted in any band.
    pub performance_histogram: Vec<CategoryCount>,
}

/// Record counts per status for a single observed date. Only actual
/// records are counted here; there is no absent fill on the daily axis.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DailyBreakdown {
    #[schema(example = "2025-07-01", format = "date", value_type = String)]
    pub date: NaiveDate,
    #[serde(flatten)]
    pub counts: StatusCounts,
}
