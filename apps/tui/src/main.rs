mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use app::{App, AppActions};
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let (actions, mut events_rx) = AppActions::new()?;

    // Check if we're running in a terminal
    if args.headless || !is_terminal() {
        return event::run_headless(&actions, args.json).await;
    }

    // Initialize application state
    let mut app = App::new();

    // Setup terminal
    let mut terminal = terminal::setup()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app, &actions, &mut events_rx).await;

    // Restore terminal
    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
