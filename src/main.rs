mod config;
mod db;
mod error;
mod export;
mod finance;
mod ledger;
mod logging;
mod models;
mod run;
mod store;
mod ui;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::load()?;
    logging::setup_logging(&config.log_path);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %config.data_dir.display(),
        "starting coiner"
    );

    let db = db::Database::open(&config.db_path)
        .with_context(|| format!("Failed to open database: {}", config.db_path.display()))?;
    let mut ledger = ledger::Ledger::new(db, models::MonthCursor::today(), config.default_rates);

    match args.len() {
        1 => run::as_tui(&mut ledger),
        2.. => run::as_cli(&args, &mut ledger),
        _ => {
            eprintln!("Usage: coiner [command]");
            Ok(())
        }
    }
}
