//! # FocusFlow Core Library
//!
//! Splits the time between now and a target end time into alternating work
//! and break segments, then walks a live session through them.
//!
//! ## Architecture
//!
//! - **Planner**: pure function from a [`SessionConfig`] and the current
//!   wall-clock time to a contiguous [`Schedule`] (even split or Pomodoro)
//! - **Controller**: [`SessionController`] owns the schedule and the active
//!   segment index; the host calls `on_segment_expire()` from its own timer
//!   and `skip()` on user request
//! - **Progress**: pure accessors for countdowns and progress bars
//! - **Storage**: TOML-based configuration of session defaults
//!
//! Every controller command returns an [`Event`] describing the transition,
//! so frontends can attach sounds or colours without the core knowing.

pub mod error;
pub mod events;
pub mod session;
pub mod storage;

pub use error::{ConfigError, CoreError, PlanError, ValidationError};
pub use events::Event;
pub use session::{
    plan, progress, EndTime, Schedule, Segment, SegmentKind, Session, SessionConfig,
    SessionController, SessionState,
};
pub use storage::Config;
