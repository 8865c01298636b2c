use std::collections::BTreeMap;

use chrono::NaiveDate;
use strum::IntoEnumIterator;

use crate::engine::round1;
use crate::model::dashboard::{CategoryCount, DailyBreakdown, DashboardMetrics, StatusCounts};
use crate::model::record::ClassifiedRecord;
use crate::model::status::PerformanceCategory;
use crate::model::summary::EmployeeSummary;

/// Roll all employee summaries up into dashboard-wide scalars.
///
/// The overall rate divides total present days by the actual number of
/// observed employee-days (the sum of per-employee `total_days`), which is
/// exact even when employees cover differing day counts.
pub fn aggregate(summaries: &[EmployeeSummary]) -> DashboardMetrics {
    let total_present_days: u32 = summaries.iter().map(|s| s.total_present).sum();
    let total_late_days: u32 = summaries.iter().map(|s| s.late + s.outstation_late).sum();
    let total_absent_days: u32 = summaries.iter().map(|s| s.absent).sum();
    let observed_days: u32 = summaries.iter().map(|s| s.total_days).sum();

    let overall_attendance_rate = (observed_days > 0)
        .then(|| round1(f64::from(total_present_days) / f64::from(observed_days) * 100.0));

    let performance_histogram = PerformanceCategory::iter()
        .map(|category| CategoryCount {
            category,
            label: category.label(),
            employees: summaries
                .iter()
                .filter(|s| s.performance_category == Some(category))
                .count() as u32,
        })
        .collect();

    DashboardMetrics {
        total_employees: summaries.len() as u32,
        total_present_days,
        total_late_days,
        total_absent_days,
        overall_attendance_rate,
        performance_histogram,
    }
}

/// Per-date record counts per status, sorted by date. Counts actual
/// records only; the absent fill belongs to the grid and summaries.
pub fn daily_breakdown(records: &[ClassifiedRecord]) -> Vec<DailyBreakdown> {
    let per_date = records.iter().fold(
        BTreeMap::<NaiveDate, StatusCounts>::new(),
        |mut acc, record| {
            acc.entry(record.attendance_date())
                .or_default()
                .record(record.status);
            acc
        },
    );

    per_date
        .into_iter()
        .map(|(date, counts)| DailyBreakdown { date, counts })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::{AttendanceRecord, MeterReading};
    use crate::model::status::AttendanceStatus;
    use serde_json::Map;

    fn summary(code: &str, present: u32, late: u32, absent: u32) -> EmployeeSummary {
        let total_days = present + late + absent;
        let percent = (total_days > 0)
            .then(|| round1(f64::from(present) / f64::from(total_days) * 100.0));
        EmployeeSummary {
            employee_code: code.to_string(),
            employee_name: format!("{code} name"),
            present,
            outstation_present: 0,
            total_present: present,
            late,
            outstation_late: 0,
            absent,
            total_days,
            attendance_percent: percent,
            performance_category: percent.map(PerformanceCategory::from_percent),
        }
    }

    #[test]
    fn totals_sum_over_all_rows() {
        let metrics = aggregate(&[summary("EMP-001", 8, 1, 1), summary("EMP-002", 5, 3, 2)]);

        assert_eq!(metrics.total_employees, 2);
        assert_eq!(metrics.total_present_days, 13);
        assert_eq!(metrics.total_late_days, 4);
        assert_eq!(metrics.total_absent_days, 3);
        // 13 present days over 20 observed employee-days.
        assert_eq!(metrics.overall_attendance_rate, Some(65.0));
    }

    #[test]
    fn histogram_is_zero_filled_over_all_bands() {
        let metrics = aggregate(&[summary("EMP-001", 10, 0, 0)]);

        assert_eq!(metrics.performance_histogram.len(), 4);
        let excellent = metrics
            .performance_histogram
            .iter()
            .find(|c| c.category == PerformanceCategory::Excellent)
            .unwrap();
        assert_eq!(excellent.employees, 1);
        let poor = metrics
            .performance_histogram
            .iter()
            .find(|c| c.category == PerformanceCategory::Poor)
            .unwrap();
        assert_eq!(poor.employees, 0);
    }

    #[test]
    fn zero_day_roster_rows_do_not_divide_or_bucket() {
        // A row with no observed days keeps its percentage undefined and
        // lands in no histogram band.
        let metrics = aggregate(&[summary("EMP-001", 0, 0, 0)]);
        assert_eq!(metrics.total_employees, 1);
        assert_eq!(metrics.overall_attendance_rate, None);
        assert!(metrics.performance_histogram.iter().all(|c| c.employees == 0));
    }

    #[test]
    fn empty_input_yields_zeroes_and_no_rate() {
        let metrics = aggregate(&[]);
        assert_eq!(metrics.total_employees, 0);
        assert_eq!(metrics.total_present_days, 0);
        assert_eq!(metrics.overall_attendance_rate, None);
    }

    fn classified(code: &str, day: u32, status: AttendanceStatus) -> ClassifiedRecord {
        ClassifiedRecord {
            record: AttendanceRecord {
                employee_code: code.to_string(),
                employee_name: format!("{code} name"),
                attendance_date: NaiveDate::from_ymd_opt(2025, 7, day).unwrap(),
                start_day_time: None,
                start_diff_meters: MeterReading::Invalid,
                reason_start: None,
                reason_end: None,
                extra: Map::new(),
            },
            status,
        }
    }

    #[test]
    fn daily_breakdown_counts_records_per_date() {
        let records = vec![
            classified("EMP-001", 1, AttendanceStatus::Present),
            classified("EMP-002", 1, AttendanceStatus::Late),
            classified("EMP-001", 2, AttendanceStatus::OutstationPresent),
        ];

        let daily = daily_breakdown(&records);
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].counts.present, 1);
        assert_eq!(daily[0].counts.late, 1);
        assert_eq!(daily[0].counts.total(), 2);
        assert_eq!(daily[1].counts.outstation_present, 1);
    }
}
