use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::engine::round1;
use crate::model::dashboard::StatusCounts;
use crate::model::record::ClassifiedRecord;
use crate::model::status::PerformanceCategory;
use crate::model::summary::EmployeeSummary;

#[derive(Default)]
struct EmployeeAcc {
    counts: StatusCounts,
    dates: BTreeSet<NaiveDate>,
}

/// Build one summary row per employee, ordered by employee code.
///
/// Status counts are per record. The `absent` count mirrors the grid's
/// fill policy: dates in the global observed set with no record for the
/// employee.
pub fn build_summaries(records: &[ClassifiedRecord]) -> Vec<EmployeeSummary> {
    let all_dates: BTreeSet<NaiveDate> = records.iter().map(|r| r.attendance_date()).collect();

    let grouped = records.iter().fold(
        BTreeMap::<(String, String), EmployeeAcc>::new(),
        |mut acc, record| {
            let entry = acc
                .entry((
                    record.employee_code().to_string(),
                    record.employee_name().to_string(),
                ))
                .or_default();
            entry.counts.record(record.status);
            entry.dates.insert(record.attendance_date());
            acc
        },
    );

    grouped
        .into_iter()
        .map(|((employee_code, employee_name), acc)| {
            let missing_days = (all_dates.len() - acc.dates.len()) as u32;
            let absent = acc.counts.absent + missing_days;
            let total_present = acc.counts.present + acc.counts.outstation_present;
            let total_days = acc.counts.present
                + acc.counts.outstation_present
                + acc.counts.late
                + acc.counts.outstation_late
                + absent;

            let attendance_percent = (total_days > 0)
                .then(|| round1(f64::from(total_present) / f64::from(total_days) * 100.0));

            EmployeeSummary {
                employee_code,
                employee_name,
                present: acc.counts.present,
                outstation_present: acc.counts.outstation_present,
                total_present,
                late: acc.counts.late,
                outstation_late: acc.counts.outstation_late,
                absent,
                total_days,
                attendance_percent,
                performance_category: attendance_percent.map(PerformanceCategory::from_percent),
            }
        })
        .collect()
}
