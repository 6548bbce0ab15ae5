use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `~/.gastos`, or `None` when `HOME` is not set.
pub fn gastos_home_opt() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".gastos"))
}

pub fn gastos_home() -> Result<PathBuf> {
    gastos_home_opt().context("HOME is not set")
}

pub fn ensure_gastos_home() -> Result<PathBuf> {
    let dir = gastos_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
