//! Schedule planner.
//!
//! Turns a [`SessionConfig`] and the current wall-clock time into a
//! [`Schedule`] that tiles the window between now and the target end time.
//! Two strategies exist:
//!
//! - **Even split** (default): the requested breaks are placed between
//!   equally sized work blocks; the first block absorbs the rounding slack.
//! - **Pomodoro**: fixed 25/5 cadence, truncating the final blocks to fit.
//!
//! Planning is pure: no clock reads, no I/O.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::segment::{Schedule, Segment, SegmentKind};
use crate::error::{PlanError, ValidationError};

pub const POMODORO_WORK_MIN: u32 = 25;
pub const POMODORO_BREAK_MIN: u32 = 5;
/// Upper bound on Pomodoro work/break cycles for a single plan.
///
/// A window never exceeds 24 hours (48 cycles), so this only guards the
/// loop; `plan_pomodoro_capped` exercises the ceiling directly.
pub const MAX_POMODORO_CYCLES: usize = 100;

/// Target end clock time, written as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EndTime(NaiveTime);

impl EndTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    pub fn time(self) -> NaiveTime {
        self.0
    }
}

impl FromStr for EndTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidEndTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
        if h.is_empty() || m.len() != 2 {
            return Err(invalid());
        }
        let hour: u32 = h.parse().map_err(|_| invalid())?;
        let minute: u32 = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).ok_or_else(invalid)
    }
}

impl TryFrom<String> for EndTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EndTime> for String {
    fn from(value: EndTime) -> Self {
        value.to_string()
    }
}

impl fmt::Display for EndTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

/// Inputs for one planning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub target_end_time: EndTime,
    /// Ignored in Pomodoro mode.
    pub break_count: u32,
    /// Minutes per break. Ignored in Pomodoro mode.
    pub break_duration: u32,
    #[serde(default)]
    pub pomodoro: bool,
}

impl SessionConfig {
    pub fn even_split(target_end_time: EndTime, break_count: u32, break_duration: u32) -> Self {
        Self {
            target_end_time,
            break_count,
            break_duration,
            pomodoro: false,
        }
    }

    pub fn pomodoro(target_end_time: EndTime) -> Self {
        Self {
            target_end_time,
            break_count: 0,
            break_duration: POMODORO_BREAK_MIN,
            pomodoro: true,
        }
    }

    /// Build a config from unchecked user input.
    ///
    /// Negative counts become zero and durations are raised to at least one
    /// minute.
    pub fn clamped(
        target_end_time: EndTime,
        break_count: i64,
        break_duration: i64,
        pomodoro: bool,
    ) -> Self {
        let clamp = |v: i64, min: u32| {
            if v <= 0 {
                min
            } else {
                u32::try_from(v).unwrap_or(u32::MAX).max(min)
            }
        };
        Self {
            target_end_time,
            break_count: clamp(break_count, 0),
            break_duration: clamp(break_duration, 1),
            pomodoro,
        }
    }

    /// Same config with the break duration floored at one minute.
    pub fn normalized(&self) -> Self {
        Self {
            break_duration: self.break_duration.max(1),
            ..*self
        }
    }

    /// Break length the session re-asserts when segments are re-anchored.
    pub fn effective_break_duration(&self) -> u32 {
        if self.pomodoro {
            POMODORO_BREAK_MIN
        } else {
            self.break_duration.max(1)
        }
    }
}

/// Resolve `HH:MM` against `now`: today, or tomorrow if that is not
/// strictly later than `now`.
pub fn resolve_end_time(target: EndTime, now: NaiveDateTime) -> NaiveDateTime {
    let today = now.date().and_time(target.time());
    if today > now {
        today
    } else {
        today + Duration::days(1)
    }
}

/// Plan a schedule from `now` to the configured end time.
///
/// # Errors
///
/// Returns [`PlanError::InsufficientTime`] in even-split mode when the
/// breaks leave no whole minute of work for every work block. Pomodoro
/// mode never fails; it may return an empty schedule for sub-minute windows.
pub fn plan(config: &SessionConfig, now: NaiveDateTime) -> Result<Schedule, PlanError> {
    let end = resolve_end_time(config.target_end_time, now);
    let schedule = if config.pomodoro {
        plan_pomodoro_capped(now, end, MAX_POMODORO_CYCLES)
    } else {
        plan_even_split(&config.normalized(), now, end)?
    };
    debug!(
        segments = schedule.len(),
        total_min = schedule.total_duration_min(),
        pomodoro = config.pomodoro,
        end = %end,
        "planned schedule"
    );
    Ok(schedule)
}

fn whole_minutes_between(from: NaiveDateTime, to: NaiveDateTime) -> u64 {
    u64::try_from((to - from).num_minutes()).unwrap_or(0)
}

fn plan_even_split(
    config: &SessionConfig,
    now: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Schedule, PlanError> {
    let available_min = whole_minutes_between(now, end);
    let break_min = u64::from(config.break_count) * u64::from(config.break_duration);
    let insufficient = || PlanError::InsufficientTime {
        available_min,
        break_min,
    };

    if available_min <= break_min {
        return Err(insufficient());
    }
    let total_work = available_min - break_min;
    let work_blocks = u64::from(config.break_count) + 1;
    let base = total_work / work_blocks;
    let remainder = total_work % work_blocks;
    // A zero base would leave empty work blocks after the first.
    if base == 0 {
        return Err(insufficient());
    }

    // Fits: every work block is at most the whole window, itself under two days.
    let minutes = |m: u64| u32::try_from(m).unwrap_or(u32::MAX);

    let capacity = usize::try_from(work_blocks * 2 - 1).unwrap_or(0);
    let mut segments = Vec::with_capacity(capacity);
    let mut cursor = now;
    for i in 0..work_blocks {
        let work_min = if i == 0 { base + remainder } else { base };
        let seq = usize::try_from(i).unwrap_or(usize::MAX);
        let work = Segment::new(SegmentKind::Work, seq, cursor, minutes(work_min));
        cursor = work.end_time;
        segments.push(work);

        if i < u64::from(config.break_count) {
            let rest = Segment::new(SegmentKind::Break, seq, cursor, config.break_duration);
            cursor = rest.end_time;
            segments.push(rest);
        }
    }
    Ok(Schedule::new(segments))
}

fn plan_pomodoro_capped(now: NaiveDateTime, end: NaiveDateTime, max_cycles: usize) -> Schedule {
    let mut segments = Vec::new();
    let mut cursor = now;
    let mut cycles = 0;
    let mut seq = 0;

    while cursor < end {
        if cycles >= max_cycles {
            warn!(
                cycles,
                remaining_min = whole_minutes_between(cursor, end),
                "pomodoro plan hit cycle ceiling, truncating"
            );
            break;
        }
        cycles += 1;

        let remaining = whole_minutes_between(cursor, end);
        if remaining < 1 {
            break;
        }
        let work_min =
            u32::try_from(remaining.min(u64::from(POMODORO_WORK_MIN))).unwrap_or(POMODORO_WORK_MIN);
        if work_min == 0 {
            break;
        }
        let work = Segment::new(SegmentKind::Work, seq, cursor, work_min);
        cursor = work.end_time;
        segments.push(work);

        let remaining = whole_minutes_between(cursor, end);
        if remaining < 1 {
            break;
        }
        let break_min =
            u32::try_from(remaining.min(u64::from(POMODORO_BREAK_MIN))).unwrap_or(POMODORO_BREAK_MIN);
        if break_min > 0 {
            segments.push(Segment::new(SegmentKind::Break, seq, cursor, break_min));
        }
        cursor += Duration::minutes(i64::from(break_min));
        seq += 1;
    }
    Schedule::new(segments)
}
