//! Live session in the terminal.
//!
//! Owns the one-second ticker that the controller relies on: each tick checks
//! the active segment against the wall clock and reports expiry exactly once.
//! Commands typed on stdin (`skip`, `stop`, `status`) are handled on the same
//! loop, so they never interleave with an expiry.

use std::io::Write;
use std::time::Duration;

use focusflow_core::error::Result;
use focusflow_core::progress::{self, format_countdown};
use focusflow_core::{Config, Event, SessionController};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

use super::{local_now, print_schedule, SessionArgs};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Skip,
    Stop,
    Status,
    Unknown,
}

impl Input {
    fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "" => None,
            "s" | "skip" | "n" | "next" => Some(Input::Skip),
            "q" | "quit" | "stop" => Some(Input::Stop),
            "?" | "status" => Some(Input::Status),
            _ => Some(Input::Unknown),
        }
    }
}

/// How the session is rendered.
struct Output {
    json: bool,
    bell: bool,
}

impl Output {
    fn event(&self, event: &Event) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(event)?);
            return Ok(());
        }
        let ring = if self.bell { "\x07" } else { "" };
        match event {
            Event::SessionStarted {
                segment_count,
                work_minutes,
                ends_at,
                ..
            } => println!(
                "Session started: {segment_count} segments, {work_minutes} min focus, ends {}",
                ends_at.format("%H:%M")
            ),
            Event::SegmentAdvanced { kind, ends_at, .. } => {
                println!("\r{ring}Time for {kind} until {}", ends_at.format("%H:%M"));
            }
            Event::SegmentSkipped { kind, ends_at, .. } => {
                println!("\rSkipped ahead: {kind} until {}", ends_at.format("%H:%M"));
            }
            Event::SessionCompleted { work_minutes, .. } => println!(
                "\r{ring}Session complete: {}h {}m of focus",
                work_minutes / 60,
                work_minutes % 60
            ),
            Event::SessionStopped { .. } => println!("\rSession stopped"),
            Event::StateSnapshot { .. } => println!("{}", serde_json::to_string_pretty(event)?),
        }
        Ok(())
    }

    fn countdown(&self, controller: &SessionController) -> std::io::Result<()> {
        if self.json {
            return Ok(());
        }
        let Some(segment) = controller.active_segment() else {
            return Ok(());
        };
        let remaining = progress::remaining_secs(segment, local_now());
        let position = controller.active_index().map_or(0, |i| i + 1);
        let last = if controller.is_last_segment() { " (last)" } else { "" };
        let mut stdout = std::io::stdout().lock();
        write!(
            stdout,
            "\r{:<5} {}  [{}/{}]{last}   ",
            segment.kind,
            format_countdown(remaining),
            position,
            controller.schedule().len()
        )?;
        stdout.flush()
    }
}

pub fn run(args: SessionArgs) -> Result<()> {
    let config = Config::load_or_default();
    let session = args.resolve(&config.session)?;

    let mut controller = SessionController::new();
    let output = Output {
        json: args.json,
        bell: config.notifications.bell,
    };
    let Some(started) = controller.start(&session, local_now())? else {
        println!("Nothing to schedule before {}.", session.target_end_time);
        return Ok(());
    };

    output.event(&started)?;
    if !args.json {
        print_schedule(controller.schedule());
        println!("Commands: skip | status | stop");
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(drive(&mut controller, &output))
}

async fn drive(controller: &mut SessionController, output: &Output) -> Result<()> {
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let Some(segment) = controller.active_segment() else {
                    break;
                };
                if progress::is_expired(segment, local_now()) {
                    if let Some(event) = controller.on_segment_expire() {
                        output.event(&event)?;
                    }
                    if controller.is_finished() {
                        break;
                    }
                } else {
                    output.countdown(controller)?;
                }
            }
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed, continuing without commands");
                    stdin_open = false;
                    continue;
                };
                match Input::parse(&line) {
                    None => {}
                    Some(Input::Skip) => match controller.skip(local_now()) {
                        Some(event) => output.event(&event)?,
                        None => println!("\rAlready on the last segment"),
                    },
                    Some(Input::Stop) => {
                        if let Some(event) = controller.stop() {
                            output.event(&event)?;
                        }
                        break;
                    }
                    Some(Input::Status) => output.event(&controller.snapshot(local_now()))?,
                    Some(Input::Unknown) => println!("\rCommands: skip | status | stop"),
                }
            }
            _ = &mut ctrl_c => {
                if let Some(event) = controller.stop() {
                    output.event(&event)?;
                }
                break;
            }
        }
    }
    Ok(())
}
