use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{SegmentKind, SessionState};

/// Every state change of a session produces an Event.
/// The presentation layer keys sounds and colours off these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        segment_count: usize,
        work_minutes: u64,
        ends_at: NaiveDateTime,
        at: DateTime<Utc>,
    },
    /// Active segment ran out and the next one took over.
    SegmentAdvanced {
        from_index: usize,
        to_index: usize,
        kind: SegmentKind,
        ends_at: NaiveDateTime,
        at: DateTime<Utc>,
    },
    /// User ended the active segment early.
    SegmentSkipped {
        from_index: usize,
        to_index: usize,
        kind: SegmentKind,
        ends_at: NaiveDateTime,
        at: DateTime<Utc>,
    },
    /// Final segment expired. Emitted once per session.
    SessionCompleted {
        work_minutes: u64,
        at: DateTime<Utc>,
    },
    SessionStopped {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: SessionState,
        active_index: Option<usize>,
        segment_count: usize,
        kind: Option<SegmentKind>,
        remaining_secs: u64,
        segment_progress: f64,
        schedule_progress_pct: f64,
        breaks_completed: usize,
        breaks_total: usize,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Whether the presentation layer should treat this as a segment change
    /// (chime, colour swap).
    pub fn is_transition(&self) -> bool {
        matches!(
            self,
            Event::SegmentAdvanced { .. } | Event::SegmentSkipped { .. }
        )
    }
}
