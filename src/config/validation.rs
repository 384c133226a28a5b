use super::{AppConfig, MAX_BUTTON_COLS, MAX_BUTTON_ROWS, MAX_DIALS, MAX_DIAL_SCALE};
use crate::capability::MAX_TOUCH_ZONES;
use anyhow::{bail, Context, Result};
use clap::Parser;

impl AppConfig {
    /// Parse CLI arguments and validate them right away.
    pub fn parse_args() -> Result<Self> {
        let mut config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    /// Check CLI values and normalize paths.
    pub fn validate(&mut self) -> Result<()> {
        if self.brightness > 100 {
            bail!(
                "--brightness must be between 0 and 100, got {}",
                self.brightness
            );
        }
        if !(1..=MAX_DIAL_SCALE).contains(&self.dial_scale) {
            bail!(
                "--dial-scale must be between 1 and {MAX_DIAL_SCALE}, got {}",
                self.dial_scale
            );
        }
        if let Some(rows) = self.rows {
            if !(1..=MAX_BUTTON_ROWS).contains(&rows) {
                bail!("--rows must be between 1 and {MAX_BUTTON_ROWS}, got {rows}");
            }
        }
        if let Some(cols) = self.cols {
            if !(1..=MAX_BUTTON_COLS).contains(&cols) {
                bail!("--cols must be between 1 and {MAX_BUTTON_COLS}, got {cols}");
            }
        }
        if let Some(dials) = self.dials {
            if dials > MAX_DIALS {
                bail!("--dials must be at most {MAX_DIALS}, got {dials}");
            }
        }
        if let Some(zones) = self.zones {
            if zones > MAX_TOUCH_ZONES {
                bail!("--zones must be at most {MAX_TOUCH_ZONES}, got {zones}");
            }
        }
        if self.back_icon.trim().is_empty() {
            bail!("--back-icon must not be empty");
        }
        if let Some(dir) = self.asset_dir.take() {
            let canonical = dir
                .canonicalize()
                .with_context(|| format!("--asset-dir {} is not accessible", dir.display()))?;
            if !canonical.is_dir() {
                bail!("--asset-dir {} is not a directory", canonical.display());
            }
            self.asset_dir = Some(canonical);
        }
        Ok(())
    }
}
