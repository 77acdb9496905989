use anyhow::{Context, Result};
use std::path::PathBuf;

pub const DB_ENV: &str = "SPENDSENSE_DB";
pub const CURRENCY_ENV: &str = "SPENDSENSE_CURRENCY";
pub const DEFAULT_CURRENCY: &str = "₹";

/// Runtime settings, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub currency_symbol: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = match lookup(DB_ENV).filter(|p| !p.trim().is_empty()) {
            Some(p) => PathBuf::from(expand_home(p.trim())),
            None => default_db_path()?,
        };
        let currency_symbol = lookup(CURRENCY_ENV)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        Ok(Self {
            db_path,
            currency_symbol,
        })
    }
}

fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "spendsense", "SpendSense")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("spendsense.db"))
}

pub(crate) fn expand_home(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}
