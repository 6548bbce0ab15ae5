use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_gastos_home, gastos_home, gastos_home_opt};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub files: FilesSection,
    pub display: DisplaySection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesSection {
    /// Bank export to scan when `--csv` is not given
    pub transactions: PathBuf,
    /// Ledger store to update when `--store` is not given
    pub store: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    pub currency: String,
}

impl Default for FilesSection {
    fn default() -> Self {
        Self {
            transactions: PathBuf::from("Transacoes.csv"),
            store: PathBuf::from("despesas_mensais.json"),
        }
    }
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            currency: "R$".to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(gastos_home()?.join("config.toml"))
}

/// Load `~/.gastos/config.toml`, or the defaults if it (or `HOME`) does not exist.
pub fn load_config() -> Result<Config> {
    load_config_in(gastos_home_opt().as_deref())
}

pub fn load_config_in(home: Option<&Path>) -> Result<Config> {
    match home {
        Some(dir) => load_config_from(&dir.join("config.toml")),
        None => Ok(Config::default()),
    }
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = ensure_gastos_home()?.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}
