//! Command-line parsing and validation helpers.

#[cfg(test)]
mod tests;
mod validation;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::capability::{DeviceCapability, MAX_TOUCH_ZONES};
use crate::item::DEFAULT_DIAL_SCALE;
use crate::manager::DEFAULT_BRIGHTNESS;
use crate::page::DEFAULT_BACK_ICON;

pub const MAX_BUTTON_ROWS: usize = 8;
pub const MAX_BUTTON_COLS: usize = 8;
pub const MAX_DIALS: usize = 8;
pub const MAX_DIAL_SCALE: u32 = 100;

/// CLI options for the PageDeck simulator. Validated values keep the page grid sane.
#[derive(Debug, Parser, Clone)]
#[command(about = "PageDeck terminal control surface", author, version)]
pub struct AppConfig {
    /// Device layout to simulate
    #[arg(long, value_enum, default_value_t = DeviceProfile::Plus)]
    pub profile: DeviceProfile,

    /// Override the number of button rows
    #[arg(long)]
    pub rows: Option<usize>,

    /// Override the number of button columns
    #[arg(long)]
    pub cols: Option<usize>,

    /// Override the number of dials
    #[arg(long)]
    pub dials: Option<usize>,

    /// Override the number of touch strip zones (0 disables the strip)
    #[arg(long)]
    pub zones: Option<usize>,

    /// Initial brightness (percent)
    #[arg(long, default_value_t = DEFAULT_BRIGHTNESS)]
    pub brightness: u8,

    /// Multiplier applied to dial detents before they reach an action
    #[arg(long = "dial-scale", default_value_t = DEFAULT_DIAL_SCALE)]
    pub dial_scale: u32,

    /// Directory icons are resolved against; icons outside it count as missing
    #[arg(long = "asset-dir", env = "PAGEDECK_ASSET_DIR")]
    pub asset_dir: Option<PathBuf>,

    /// Icon used on generated back buttons
    #[arg(long = "back-icon", default_value = DEFAULT_BACK_ICON)]
    pub back_icon: String,

    /// Enable file logging
    #[arg(long = "logs", env = "PAGEDECK_LOGS", default_value_t = false)]
    pub logs: bool,

    /// Disable all file logging (overrides --logs and log env vars)
    #[arg(long = "no-logs", env = "PAGEDECK_NO_LOGS", default_value_t = false)]
    pub no_logs: bool,

    /// Log at debug level instead of info
    #[arg(long = "debug-logs", default_value_t = false)]
    pub debug_logs: bool,
}

/// Known hardware layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DeviceProfile {
    Plus,
    Mk2,
    Mini,
    Xl,
}

impl DeviceProfile {
    pub fn label(self) -> &'static str {
        match self {
            DeviceProfile::Plus => "plus",
            DeviceProfile::Mk2 => "mk2",
            DeviceProfile::Mini => "mini",
            DeviceProfile::Xl => "xl",
        }
    }

    pub fn capability(self) -> DeviceCapability {
        match self {
            DeviceProfile::Plus => DeviceCapability::stream_deck_plus(),
            DeviceProfile::Mk2 => DeviceCapability::stream_deck_mk2(),
            DeviceProfile::Mini => DeviceCapability::stream_deck_mini(),
            DeviceProfile::Xl => DeviceCapability::stream_deck_xl(),
        }
    }
}

impl AppConfig {
    /// Profile descriptor with CLI overrides applied.
    pub fn capability(&self) -> DeviceCapability {
        let mut cap = self.profile.capability();
        if let Some(rows) = self.rows {
            cap.button_rows = rows;
        }
        if let Some(cols) = self.cols {
            cap.button_cols = cols;
        }
        if let Some(dials) = self.dials {
            cap.dial_count = dials;
        }
        if let Some(zones) = self.zones {
            cap.touch_zone_count = zones.min(MAX_TOUCH_ZONES);
            if zones > 0 && cap.strip_pixel_size.is_empty() {
                cap.strip_pixel_size = DeviceCapability::stream_deck_plus().strip_pixel_size;
            }
        }
        cap
    }

    /// File logging requested and not vetoed.
    pub fn logging_enabled(&self) -> bool {
        self.logs && !self.no_logs
    }
}
