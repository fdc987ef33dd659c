use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$ZENBUDGET_HOME`, else `~/.zenbudget`
pub fn zenbudget_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("ZENBUDGET_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".zenbudget"))
}

pub fn ensure_zenbudget_home() -> Result<PathBuf> {
    let dir = zenbudget_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
