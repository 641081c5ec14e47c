//! Counter command - inspect or reset the monthly document counter.

use clap::{Args, Subcommand};
use console::style;

use jcr_core::sequence::{
    current_month, monthly_id, CounterState, CounterStore, JsonFileStore, SystemClock,
};

use super::load_config;

/// Arguments for the counter command.
#[derive(Args)]
pub struct CounterArgs {
    #[command(subcommand)]
    command: CounterCommand,
}

#[derive(Subcommand)]
enum CounterCommand {
    /// Show the stored counter and the next document ID
    Show,

    /// Restart numbering at 1 for the current month, discarding all other months
    Reset,
}

pub async fn run(args: CounterArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = JsonFileStore::new(&config.counter.path);
    let month = current_month(&SystemClock);

    match args.command {
        CounterCommand::Show => show_counter(&store, month),
        CounterCommand::Reset => reset_counter(&store, month),
    }
}

fn show_counter(store: &JsonFileStore, month: u32) -> anyhow::Result<()> {
    let stored = store.load()?;

    match &stored {
        Some(state) => println!("{}", serde_json::to_string_pretty(state)?),
        None => println!(
            "{} No counter file at {}, numbering starts at 1.",
            style("ℹ").blue(),
            store.path().display()
        ),
    }

    let state = CounterState::load_or_default(stored, month);
    println!(
        "Next document ID for month {}: {}",
        month,
        style(monthly_id(month, state.next(month))).green()
    );

    Ok(())
}

fn reset_counter(store: &JsonFileStore, month: u32) -> anyhow::Result<()> {
    if let Some(previous) = store.load().ok().flatten() {
        let discarded: Vec<String> = previous
            .entries()
            .filter(|(key, _)| *key != month.to_string())
            .map(|(key, next)| format!("{}={}", key, next))
            .collect();
        if !discarded.is_empty() {
            println!(
                "{} Discarding other months: {}",
                style("!").yellow(),
                discarded.join(", ")
            );
        }
    }

    store.save(&CounterState::reset(month))?;

    println!(
        "{} Counter reset to 1 for month {}",
        style("✓").green(),
        month
    );

    Ok(())
}
