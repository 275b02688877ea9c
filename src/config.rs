use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::finance::AllocationRates;

pub(crate) const DB_ENV: &str = "COINER_DB";
pub(crate) const RATES_ENV: &str = "COINER_RATES";
pub(crate) const LOG_ENV: &str = "COINER_LOG";

const DB_FILE: &str = "coiner.db";
const LOG_FILE: &str = "coiner.log";

/// Paths and defaults resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) db_path: PathBuf,
    pub(crate) log_path: PathBuf,
    pub(crate) default_rates: AllocationRates,
}

impl Config {
    /// Resolve from the platform data directory and the `COINER_*`
    /// environment variables. Creates the data directory.
    pub(crate) fn load() -> Result<Self> {
        let proj_dirs = directories::ProjectDirs::from("com", "coiner", "Coiner")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        Self::resolve(
            data_dir,
            std::env::var(DB_ENV).ok().as_deref(),
            std::env::var(RATES_ENV).ok().as_deref(),
        )
    }

    pub(crate) fn resolve(
        data_dir: &Path,
        db_override: Option<&str>,
        rates_override: Option<&str>,
    ) -> Result<Self> {
        let db_path = match db_override.map(str::trim).filter(|s| !s.is_empty()) {
            Some(path) => PathBuf::from(crate::run::shellexpand(path)),
            None => data_dir.join(DB_FILE),
        };

        let default_rates = match rates_override.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => AllocationRates::parse_percentages(raw)
                .with_context(|| format!("{RATES_ENV} must look like 10,5,10 (got '{raw}')"))?,
            None => AllocationRates::default(),
        };

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            db_path,
            log_path: data_dir.join(LOG_FILE),
            default_rates,
        })
    }
}
