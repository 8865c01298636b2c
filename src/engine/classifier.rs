use chrono::NaiveTime;
use once_cell::sync::Lazy;

use crate::model::record::{AttendanceRecord, ClassifiedRecord};
use crate::model::status::AttendanceStatus;

/// On-time boundary, evaluated against the record's own calendar date.
static CUTOFF_TIME: Lazy<NaiveTime> =
    Lazy::new(|| NaiveTime::from_hms_opt(9, 15, 0).expect("valid cutoff time"));

/// Distance below which a clock-in counts as at the primary site.
const NEARBY_METERS: f64 = 200.0;

const OUTSTATION_TOKEN: &str = "outstation";

/// Derive the attendance status for one record.
///
/// Total function: a record whose start timestamp was absent or
/// unparsable is `late` outright (the fail-closed default), without the
/// outstation modifier. Otherwise "on time and nearby" is the sole
/// definition of presence, and the outstation token only relabels the
/// outcome.
pub fn classify(record: &AttendanceRecord) -> AttendanceStatus {
    let Some(start) = record.start_day_time else {
        return AttendanceStatus::Late;
    };

    let cutoff = start.date().and_time(*CUTOFF_TIME);
    let on_time_and_nearby =
        start <= cutoff && record.start_diff_meters.distance() < NEARBY_METERS;

    match (on_time_and_nearby, is_outstation(record)) {
        (true, false) => AttendanceStatus::Present,
        (true, true) => AttendanceStatus::OutstationPresent,
        (false, false) => AttendanceStatus::Late,
        (false, true) => AttendanceStatus::OutstationLate,
    }
}

/// Classify a whole batch, preserving input order.
pub fn classify_batch(records: Vec<AttendanceRecord>) -> Vec<ClassifiedRecord> {
    records
        .into_iter()
        .map(|record| {
            let status = classify(&record);
            ClassifiedRecord { record, status }
        })
        .collect()
}

fn is_outstation(record: &AttendanceRecord) -> bool {
    has_token(record.reason_start.as_deref()) || has_token(record.reason_end.as_deref())
}

fn has_token(reason: Option<&str>) -> bool {
    reason.is_some_and(|r| r.to_lowercase().contains(OUTSTATION_TOKEN))
}
