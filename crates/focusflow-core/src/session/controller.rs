//! Session progression controller.
//!
//! Owns the live schedule together with the index of the active segment and
//! moves through it. The controller holds no timer: the host polls
//! [`progress::remaining_secs`](super::progress::remaining_secs) on its own
//! cadence and calls `on_segment_expire()` once the countdown reaches zero.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Completed -> Idle (stop)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut controller = SessionController::new();
//! controller.start(&config, now)?;
//! // In a loop:
//! if is_expired(controller.active_segment()?, now) {
//!     controller.on_segment_expire();
//! }
//! ```

use chrono::{Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::planner::{plan, SessionConfig};
use super::progress;
use super::segment::{Schedule, Segment};
use crate::error::PlanError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// No schedule.
    Idle,
    /// A segment before the last one is active.
    Running,
    /// The last segment is active; further expiry does not advance.
    Completed,
}

/// The schedule and its active index, always read and written together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    schedule: Schedule,
    active_index: Option<usize>,
}

impl Session {
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn active_segment(&self) -> Option<&Segment> {
        self.schedule.get(self.active_index?)
    }

    pub fn is_last_segment(&self) -> bool {
        matches!(
            (self.active_index, self.schedule.last_index()),
            (Some(active), Some(last)) if active == last
        )
    }
}

/// Drives one session at a time through its schedule.
#[derive(Debug, Clone, Default)]
pub struct SessionController {
    session: Session,
    /// Break length re-asserted on skip, from the config the session started with.
    break_duration_min: u32,
    /// Final segment has expired.
    finished: bool,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn schedule(&self) -> &Schedule {
        &self.session.schedule
    }

    pub fn active_index(&self) -> Option<usize> {
        self.session.active_index
    }

    pub fn active_segment(&self) -> Option<&Segment> {
        self.session.active_segment()
    }

    pub fn is_last_segment(&self) -> bool {
        self.session.is_last_segment()
    }

    /// The final segment has run out.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn break_duration_min(&self) -> u32 {
        self.break_duration_min
    }

    pub fn state(&self) -> SessionState {
        match self.session.active_index {
            None => SessionState::Idle,
            Some(_) if self.session.is_last_segment() => SessionState::Completed,
            Some(_) => SessionState::Running,
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self, now: NaiveDateTime) -> Event {
        let schedule = &self.session.schedule;
        let active_index = self.session.active_index;
        let segment = self.active_segment();
        Event::StateSnapshot {
            state: self.state(),
            active_index,
            segment_count: schedule.len(),
            kind: segment.map(|s| s.kind),
            remaining_secs: segment.map_or(0, |s| progress::remaining_secs(s, now)),
            segment_progress: segment.map_or(0.0, |s| progress::segment_progress(s, now)),
            schedule_progress_pct: progress::schedule_progress_pct(schedule, active_index, now),
            breaks_completed: progress::breaks_completed(schedule, active_index),
            breaks_total: schedule.break_count(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Plan a new session and make its first segment active.
    ///
    /// An empty plan (Pomodoro window under a minute) leaves the controller
    /// untouched and returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Propagates [`PlanError::InsufficientTime`]; state is left untouched.
    pub fn start(
        &mut self,
        config: &SessionConfig,
        now: NaiveDateTime,
    ) -> Result<Option<Event>, PlanError> {
        let schedule = plan(config, now)?;
        let Some(ends_at) = schedule.ends_at() else {
            debug!("nothing to schedule before end time");
            return Ok(None);
        };

        let event = Event::SessionStarted {
            segment_count: schedule.len(),
            work_minutes: schedule.work_minutes(),
            ends_at,
            at: Utc::now(),
        };
        self.session = Session {
            schedule,
            active_index: Some(0),
        };
        self.break_duration_min = config.effective_break_duration();
        self.finished = false;
        Ok(Some(event))
    }

    /// Called by the host when the active segment's countdown hits zero.
    ///
    /// Advances to the next segment, or at the last one reports completion
    /// once and then does nothing.
    pub fn on_segment_expire(&mut self) -> Option<Event> {
        let index = self.session.active_index?;
        let last = self.session.schedule.last_index()?;

        if index < last {
            let to = index + 1;
            self.session.active_index = Some(to);
            let next = self.session.schedule.get(to)?;
            debug!(from = index, to, kind = %next.kind, "segment expired");
            return Some(Event::SegmentAdvanced {
                from_index: index,
                to_index: to,
                kind: next.kind,
                ends_at: next.end_time,
                at: Utc::now(),
            });
        }

        if self.finished {
            return None;
        }
        self.finished = true;
        debug!("session completed");
        Some(Event::SessionCompleted {
            work_minutes: self.session.schedule.work_minutes(),
            at: Utc::now(),
        })
    }

    /// End the active segment at `now` and re-anchor everything after it.
    ///
    /// Breaks keep their configured length; work segments keep their planned
    /// end and only have their start moved, so work absorbs the drift.
    pub fn skip(&mut self, now: NaiveDateTime) -> Option<Event> {
        let index = self.session.active_index?;
        let last = self.session.schedule.last_index()?;
        if index >= last {
            return None;
        }

        let break_len = Duration::minutes(i64::from(self.break_duration_min));
        let segments = self.session.schedule.segments_mut();

        let current_start = segments[index].start_time;
        segments[index].retime(current_start, now);

        let mut start = now;
        for seg in &mut segments[index + 1..] {
            // Work keeps its planned end even if the new start has passed it.
            let end = if seg.is_break() {
                start + break_len
            } else {
                seg.end_time
            };
            seg.retime(start, end);
            start = end;
        }

        let to = index + 1;
        self.session.active_index = Some(to);
        let next = &self.session.schedule.segments()[to];
        debug!(from = index, to, kind = %next.kind, "segment skipped");
        Some(Event::SegmentSkipped {
            from_index: index,
            to_index: to,
            kind: next.kind,
            ends_at: next.end_time,
            at: Utc::now(),
        })
    }

    /// Drop the session. Reports `SessionStopped` only if one was live.
    pub fn stop(&mut self) -> Option<Event> {
        let was_live = self.session.active_index.is_some();
        self.session = Session::default();
        self.finished = false;
        was_live.then(|| Event::SessionStopped { at: Utc::now() })
    }
}
