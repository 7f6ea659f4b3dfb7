use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

use tally_core::ParserConfig;

/// Load parser settings; no path means built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<ParserConfig> {
    let Some(p) = path else {
        return Ok(ParserConfig::default());
    };
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    ParserConfig::from_toml_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &ParserConfig, path: &Path) -> Result<()> {
    let s = cfg.to_toml_string().context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Write the default configuration, refusing to clobber an existing file.
pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("config already exists: {}", path.display());
    }
    save_config(&ParserConfig::default(), path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
