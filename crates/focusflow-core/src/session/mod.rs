mod controller;
mod planner;
pub mod progress;
mod segment;

pub use controller::{Session, SessionController, SessionState};
pub use planner::{
    plan, resolve_end_time, EndTime, SessionConfig, MAX_POMODORO_CYCLES, POMODORO_BREAK_MIN,
    POMODORO_WORK_MIN,
};
pub use segment::{Schedule, Segment, SegmentKind};
