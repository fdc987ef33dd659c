use anyhow::{Context, Result};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use zenbudget_core::WeekRule;
use zenbudget_ingest::DatasetColumns;

use crate::state::{ensure_zenbudget_home, zenbudget_home};

pub const DEFAULT_DATASET: &str = "Savings-Optimized_Dataset.csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub dataset: DatasetSection,
    pub calendar: CalendarSection,
    /// Reference weekly budgets per category (AED). Shown by `summary`;
    /// the reallocation heuristic does not read them.
    pub budgets: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DatasetSection {
    /// CSV used when `--csv` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub columns: DatasetColumns,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSection {
    /// IANA timezone used to decide what "today" is
    pub timezone: String,
    pub week_start: Weekday,
}

impl Default for CalendarSection {
    fn default() -> Self {
        Self {
            timezone: "Asia/Dubai".to_string(),
            week_start: Weekday::Mon,
        }
    }
}

impl CalendarSection {
    pub fn week_rule(&self) -> WeekRule {
        WeekRule::starting_on(self.week_start)
    }
}

/// Budgets the dataset was originally planned against
pub fn default_budgets() -> BTreeMap<String, f64> {
    [
        ("groceries", 200.0),
        ("transport", 150.0),
        ("subscriptions", 50.0),
        ("coffee", 30.0),
        ("entertainment", 100.0),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

impl Config {
    /// Defaults written by `config init`
    pub fn initial() -> Self {
        Self {
            budgets: default_budgets(),
            ..Default::default()
        }
    }

    /// `--csv`, then `dataset.path`, then the default file in the working dir
    pub fn dataset_path(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.dataset.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET))
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(zenbudget_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::initial());
    }
    load_config_from(&p)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config) -> Result<PathBuf> {
    let p = ensure_zenbudget_home()?.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(p)
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let p = save_config(&Config::initial())?;
    println!("Wrote {}", p.display());
    Ok(())
}
