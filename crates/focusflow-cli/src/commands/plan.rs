use focusflow_core::error::Result;
use focusflow_core::{plan, Config};

use super::{local_now, print_schedule, SessionArgs};

pub fn run(args: SessionArgs) -> Result<()> {
    let config = Config::load_or_default();
    let session = args.resolve(&config.session)?;
    let schedule = plan(&session, local_now())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&schedule)?);
        return Ok(());
    }

    if schedule.is_empty() {
        println!("Nothing to schedule before {}.", session.target_end_time);
        return Ok(());
    }
    let mode = if session.pomodoro { "pomodoro" } else { "even split" };
    println!("Session until {} ({mode})", session.target_end_time);
    print_schedule(&schedule);
    Ok(())
}
