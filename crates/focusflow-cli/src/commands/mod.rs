pub mod config;
pub mod plan;
pub mod run;

use chrono::NaiveDateTime;
use clap::Args;
use focusflow_core::error::Result;
use focusflow_core::storage::SessionDefaults;
use focusflow_core::{CoreError, EndTime, Schedule, SessionConfig};

/// Session parameters shared by `plan` and `run`. Unset flags fall back to
/// the `[session]` section of the config file.
#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// Target end time (HH:MM); tomorrow if already past today
    #[arg(long, short = 'e')]
    pub end: Option<String>,
    /// Number of breaks (negative values count as 0)
    #[arg(long, short = 'b', allow_hyphen_values = true)]
    pub breaks: Option<i64>,
    /// Minutes per break (at least 1)
    #[arg(long, allow_hyphen_values = true)]
    pub break_minutes: Option<i64>,
    /// Fixed 25/5 Pomodoro cadence instead of an even split
    #[arg(long, conflicts_with = "even_split")]
    pub pomodoro: bool,
    /// Force an even split even if the config defaults to Pomodoro
    #[arg(long)]
    pub even_split: bool,
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl SessionArgs {
    /// Merge the flags over the configured defaults.
    pub fn resolve(&self, defaults: &SessionDefaults) -> Result<SessionConfig> {
        let end: EndTime = match &self.end {
            Some(raw) => raw.parse()?,
            None => defaults.target_end_time,
        };
        let pomodoro = if self.pomodoro {
            true
        } else if self.even_split {
            false
        } else {
            defaults.pomodoro
        };
        Ok(SessionConfig::clamped(
            end,
            self.breaks.unwrap_or_else(|| i64::from(defaults.break_count)),
            self.break_minutes
                .unwrap_or_else(|| i64::from(defaults.break_duration)),
            pomodoro,
        ))
    }
}

pub fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Message shown for a failed command. Running out of time gets a hint
/// instead of the raw planner error.
pub fn error_message(err: &CoreError) -> String {
    match err {
        CoreError::Plan(e) if e.is_insufficient_time() => {
            "Not enough time! Reduce the breaks or move the end time later.".to_string()
        }
        _ => err.to_string(),
    }
}

pub fn print_schedule(schedule: &Schedule) {
    println!("  #  {:<9} {:<6} {:>5}  {:>5}  {:>4}", "id", "kind", "start", "end", "min");
    for (i, seg) in schedule.iter().enumerate() {
        println!(
            "{:>3}  {:<9} {:<6} {:>5}  {:>5}  {:>4}",
            i,
            seg.id,
            seg.kind,
            seg.start_time.format("%H:%M"),
            seg.end_time.format("%H:%M"),
            seg.duration_minutes
        );
    }
    println!(
        "Total: {} min ({} min focus, {} breaks)",
        schedule.total_duration_min(),
        schedule.work_minutes(),
        schedule.break_count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> SessionArgs {
        SessionArgs {
            end: None,
            breaks: None,
            break_minutes: None,
            pomodoro: false,
            even_split: false,
            json: false,
        }
    }

    #[test]
    fn unset_flags_use_defaults() {
        let cfg = args().resolve(&SessionDefaults::default()).unwrap();
        assert_eq!(cfg.target_end_time.to_string(), "21:00");
        assert_eq!(cfg.break_count, 2);
        assert_eq!(cfg.break_duration, 30);
        assert!(!cfg.pomodoro);
    }

    #[test]
    fn flags_override_and_clamp() {
        let mut a = args();
        a.end = Some("18:15".into());
        a.breaks = Some(-2);
        a.break_minutes = Some(0);
        let cfg = a.resolve(&SessionDefaults::default()).unwrap();
        assert_eq!(cfg.target_end_time.to_string(), "18:15");
        assert_eq!(cfg.break_count, 0);
        assert_eq!(cfg.break_duration, 1);
    }

    #[test]
    fn even_split_overrides_pomodoro_default() {
        let defaults = SessionDefaults {
            pomodoro: true,
            ..SessionDefaults::default()
        };
        assert!(args().resolve(&defaults).unwrap().pomodoro);
        let mut a = args();
        a.even_split = true;
        assert!(!a.resolve(&defaults).unwrap().pomodoro);
    }

    #[test]
    fn bad_end_time_is_an_error() {
        let mut a = args();
        a.end = Some("7pm".into());
        assert!(matches!(
            a.resolve(&SessionDefaults::default()),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn insufficient_time_gets_friendly_message() {
        let err: CoreError = focusflow_core::PlanError::InsufficientTime {
            available_min: 10,
            break_min: 20,
        }
        .into();
        assert!(error_message(&err).starts_with("Not enough time"));

        let err: CoreError = focusflow_core::ConfigError::UnknownKey("x".into()).into();
        assert!(error_message(&err).contains("unknown config key: x"));
    }
}
