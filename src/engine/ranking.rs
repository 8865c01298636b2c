use std::collections::HashMap;

use crate::model::record::ClassifiedRecord;
use crate::model::ranking::RankingEntry;

/// Leaderboard of total present days (on-site + outstation), sorted
/// descending. Ties keep the order in which the employees first appeared
/// in the batch.
pub fn build_ranking(records: &[ClassifiedRecord]) -> Vec<RankingEntry> {
    let mut entries: Vec<RankingEntry> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for record in records {
        let key = (
            record.employee_code().to_string(),
            record.employee_name().to_string(),
        );
        let slot = *index.entry(key).or_insert_with(|| {
            entries.push(RankingEntry {
                employee_code: record.employee_code().to_string(),
                employee_name: record.employee_name().to_string(),
                total_present: 0,
            });
            entries.len() - 1
        });
        if record.status.counts_as_present() {
            entries[slot].total_present += 1;
        }
    }

    // Vec::sort_by is stable, so first-appearance order survives ties.
    entries.sort_by(|a, b| b.total_present.cmp(&a.total_present));
    entries
}
