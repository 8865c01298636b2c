use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::model::grid::{CalendarGrid, CalendarRow};
use crate::model::record::ClassifiedRecord;
use crate::model::status::AttendanceStatus;

/// What to do when an employee has several records on the same date. The
/// tie-break is a policy, not a merge: the losing records are ignored for
/// grid purposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the first record in original input order.
    #[default]
    FirstWins,
    /// Keep the last record in original input order.
    LastWins,
}

/// Build the employee × date matrix over every date observed in the batch.
///
/// Every employee appearing at least once gets a row with one cell per
/// observed date; cells with no surviving record are `absent`.
pub fn build_grid(records: &[ClassifiedRecord], policy: DuplicatePolicy) -> CalendarGrid {
    let dates: BTreeSet<NaiveDate> = records.iter().map(|r| r.attendance_date()).collect();

    let mut per_employee: BTreeMap<(String, String), BTreeMap<NaiveDate, AttendanceStatus>> =
        BTreeMap::new();
    for record in records {
        let days = per_employee
            .entry((
                record.employee_code().to_string(),
                record.employee_name().to_string(),
            ))
            .or_default();
        match policy {
            DuplicatePolicy::FirstWins => {
                days.entry(record.attendance_date()).or_insert(record.status);
            }
            DuplicatePolicy::LastWins => {
                days.insert(record.attendance_date(), record.status);
            }
        }
    }

    let dates: Vec<NaiveDate> = dates.into_iter().collect();
    let columns = dates.iter().map(|d| date_label(*d)).collect();
    let rows = per_employee
        .into_iter()
        .map(|((employee_code, employee_name), days)| CalendarRow {
            employee_code,
            employee_name,
            cells: dates
                .iter()
                .map(|date| days.get(date).copied().unwrap_or(AttendanceStatus::Absent))
                .collect(),
        })
        .collect();

    CalendarGrid {
        dates,
        columns,
        rows,
    }
}

/// Display label for a grid column, day-of-month plus weekday abbreviation.
pub fn date_label(date: NaiveDate) -> String {
    date.format("%d %a").to_string()
}
