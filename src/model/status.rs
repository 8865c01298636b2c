use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// Derived per-day attendance outcome.
///
/// The classifier only ever yields the first four variants; `Absent` is
/// synthesized by the grid and summary builders for employee/date pairs
/// with no record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AttendanceStatus {
    Present,
    OutstationPresent,
    Late,
    OutstationLate,
    Absent,
}

impl AttendanceStatus {
    /// Present in either the on-site or outstation flavor.
    pub fn counts_as_present(self) -> bool {
        matches!(
            self,
            AttendanceStatus::Present | AttendanceStatus::OutstationPresent
        )
    }

    pub fn counts_as_late(self) -> bool {
        matches!(
            self,
            AttendanceStatus::Late | AttendanceStatus::OutstationLate
        )
    }
}

/// Attendance-percentage band assigned to an employee summary row.
///
/// Bands are open on the low end and closed on the high end, except `Poor`
/// which also includes exactly 0% so every defined percentage lands in a
/// band.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PerformanceCategory {
    Poor,
    Average,
    Good,
    Excellent,
}

impl PerformanceCategory {
    /// Bucket a defined attendance percentage into its band.
    pub fn from_percent(percent: f64) -> Self {
        if percent <= 50.0 {
            PerformanceCategory::Poor
        } else if percent <= 75.0 {
            PerformanceCategory::Average
        } else if percent <= 90.0 {
            PerformanceCategory::Good
        } else {
            PerformanceCategory::Excellent
        }
    }

    /// Human-readable band label used by report consumers.
    pub fn label(self) -> &'static str {
        match self {
            PerformanceCategory::Poor => "Poor (<50%)",
            PerformanceCategory::Average => "Average (50-75%)",
            PerformanceCategory::Good => "Good (75-90%)",
            PerformanceCategory::Excellent => "Excellent (>90%)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&AttendanceStatus::OutstationPresent).unwrap();
        assert_eq!(json, "\"outstation_present\"");
    }

    #[test]
    fn zero_percent_lands_in_poor() {
        assert_eq!(
            PerformanceCategory::from_percent(0.0),
            PerformanceCategory::Poor
        );
    }

    #[test]
    fn band_edges_are_closed_on_the_high_end() {
        assert_eq!(
            PerformanceCategory::from_percent(50.0),
            PerformanceCategory::Poor
        );
        assert_eq!(
            PerformanceCategory::from_percent(75.0),
            PerformanceCategory::Average
        );
        assert_eq!(
            PerformanceCategory::from_percent(90.0),
            PerformanceCategory::Good
        );
        assert_eq!(
            PerformanceCategory::from_percent(90.1),
            PerformanceCategory::Excellent
        );
        assert_eq!(
            PerformanceCategory::from_percent(100.0),
            PerformanceCategory::Excellent
        );
    }
}
