//! Terminal summary of tracked goals.
//!
//! # Responsibility
//! - Verify `goaltrack_core` linkage with a ping/version check.
//! - Print one status line per goal from the configured data directory.
//!
//! Usage: `goaltrack [DATA_DIR]`; without an argument the directory comes
//! from `GOALTRACK_DATA_DIR` (default `./data`).

use goaltrack_core::{open_data_dir, CoreConfig, Goal, GoalProgress, GoalService, SystemClock};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("goaltrack_core ping={}", goaltrack_core::ping());
    println!("goaltrack_core version={}", goaltrack_core::core_version());

    let config = match std::env::args().nth(1) {
        Some(dir) => CoreConfig::with_data_dir(dir),
        None => CoreConfig::from_env(),
    };
    let store = match open_data_dir(&config.data_dir) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("goaltrack: {err}");
            return ExitCode::FAILURE;
        }
    };

    let overview = match GoalService::from_store(&store, SystemClock).overview() {
        Ok(overview) => overview,
        Err(err) => {
            eprintln!("goaltrack: {err}");
            return ExitCode::FAILURE;
        }
    };
    if overview.is_empty() {
        println!("no goals in {}", config.data_dir.display());
    }
    for (goal, progress) in &overview {
        println!("{}", summary_line(goal, progress));
    }
    ExitCode::SUCCESS
}

fn summary_line(goal: &Goal, progress: &GoalProgress) -> String {
    let mut line = format!("{} [{}] {}", goal.name, goal.kind.label(), progress.status_line);
    if let Some(stats) = progress.adherence {
        line.push_str(&format!(
            " | streak {} | {}% this month",
            stats.streak, stats.completion_rate
        ));
    }
    line
}
