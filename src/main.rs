use std::io::Write;

use anyhow::Result;
use clap::Parser;
use termlayer::cli::{self, Cli};

fn main() -> Result<()> {
    // Parse CLI arguments first (before logging init for cleaner output)
    let cli = Cli::parse();

    // --log-level takes precedence over TERMLAYER_LOG, then warn
    termlayer::logging::init_log_bridge(cli.log_level);

    log::info!("Starting termlayer {}", termlayer::VERSION);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = cli::run(&cli, &mut out);
    let _ = out.flush();

    match result {
        Ok(0) => Ok(()),
        // Non-zero exit without an error (e.g. `warnings` found some)
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("termlayer: error: {e:#}");
            std::process::exit(1);
        }
    }
}
