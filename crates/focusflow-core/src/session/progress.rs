//! Display values derived on demand from `(segment, now)`.

use chrono::NaiveDateTime;

use super::segment::{Schedule, Segment};

/// Whole seconds left in `segment`, zero once it has ended.
pub fn remaining_secs(segment: &Segment, now: NaiveDateTime) -> u64 {
    u64::try_from((segment.end_time - now).num_seconds()).unwrap_or(0)
}

pub fn is_expired(segment: &Segment, now: NaiveDateTime) -> bool {
    remaining_secs(segment, now) == 0
}

/// 0.0 .. 1.0 progress within `segment`.
pub fn segment_progress(segment: &Segment, now: NaiveDateTime) -> f64 {
    let total = segment.duration_secs();
    if total == 0 {
        return 1.0;
    }
    let remaining = remaining_secs(segment, now).min(total);
    1.0 - (remaining as f64 / total as f64)
}

/// 0.0 .. 100.0 progress across the whole schedule, by elapsed time.
pub fn schedule_progress_pct(
    schedule: &Schedule,
    active_index: Option<usize>,
    now: NaiveDateTime,
) -> f64 {
    let (Some(index), Some(start), Some(end)) =
        (active_index, schedule.starts_at(), schedule.ends_at())
    else {
        return 0.0;
    };
    let total = (end - start).num_seconds();
    if total <= 0 || index >= schedule.len() {
        return 0.0;
    }
    let elapsed = (now - start).num_seconds().clamp(0, total);
    (elapsed as f64 / total as f64 * 100.0).min(100.0)
}

/// Breaks already behind the active segment.
pub fn breaks_completed(schedule: &Schedule, active_index: Option<usize>) -> usize {
    active_index.map_or(0, |index| {
        schedule
            .iter()
            .take(index)
            .filter(|s| s.is_break())
            .count()
    })
}

/// Breaks not yet finished, counting the active one.
pub fn breaks_remaining(schedule: &Schedule, active_index: Option<usize>) -> usize {
    schedule.break_count() - breaks_completed(schedule, active_index)
}

/// `MM:SS`; minutes are not wrapped into hours.
pub fn format_countdown(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
