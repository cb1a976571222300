use anyhow::Result;
use clap::Parser;
use treeyank::{cli, clipboard, logging, workflow};

fn main() -> Result<()> {
    // Handle daemon mode first. This should stay in main.rs as it's an early exit.
    if clipboard::check_and_run_daemon_if_requested()? {
        return Ok(());
    }

    let cli_args = cli::Cli::parse();
    let _log_guard = logging::init_logging(cli_args.log_file.as_deref())?;

    workflow::run_treeyank(cli_args)
}
