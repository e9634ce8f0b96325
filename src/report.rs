use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::models::{Shift, Workplace, WorkplaceResult};

/// Maximum number of workplaces in the report.
pub const TOP_WORKPLACES: usize = 3;

/// A shift counts as completed once it has a worker, was not cancelled and has ended before `now`.
pub fn is_completed(shift: &Shift, now: DateTime<Utc>) -> bool {
    shift.worker_id.is_some() && shift.cancelled_at.is_none() && shift.end_at < now
}

/// Ranks active workplaces by completed shifts and keeps the busiest ones.
///
/// Workplaces with no completed shifts are left out. Ties keep the order the workplaces
/// were listed in, since the sort is stable.
pub fn top_workplaces(workplaces: &[Workplace], shifts: &[Shift], now: DateTime<Utc>) -> Vec<WorkplaceResult> {
    let mut completed_by_workplace: HashMap<i64, usize> = HashMap::new();
    for shift in shifts.iter().filter(|s| is_completed(s, now)) {
        tracing::trace!(shift_id = shift.id, workplace_id = shift.workplace_id, "Completed shift");
        *completed_by_workplace.entry(shift.workplace_id).or_default() += 1;
    }

    let mut results: Vec<WorkplaceResult> = workplaces
        .iter()
        .filter(|w| w.is_active())
        .map(|w| WorkplaceResult {
            name: w.name.clone(),
            shifts: completed_by_workplace.get(&w.id).copied().unwrap_or(0),
        })
        .filter(|r| r.shifts > 0)
        .collect();

    results.sort_by(|a, b| b.shifts.cmp(&a.shifts));
    results.truncate(TOP_WORKPLACES);

    tracing::debug!(
        workplaces = workplaces.len(),
        shifts = shifts.len(),
        completed = completed_by_workplace.values().sum::<usize>(),
        reported = results.len(),
        "Aggregated completed shifts"
    );

    results
}
