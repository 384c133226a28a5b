use super::{AppConfig, DeviceProfile};
use crate::capability::DeviceCapability;
use clap::Parser;
use std::env;
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

#[test]
fn defaults_validate() {
    let mut cfg = AppConfig::parse_from(["test-app"]);
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.profile, DeviceProfile::Plus);
    assert_eq!(cfg.brightness, 50);
    assert_eq!(cfg.dial_scale, 5);
    assert_eq!(cfg.capability(), DeviceCapability::stream_deck_plus());
}

#[test]
fn rejects_brightness_out_of_bounds() {
    let mut cfg = AppConfig::parse_from(["test-app", "--brightness", "101"]);
    assert!(cfg.validate().is_err());
}

#[test]
fn accepts_brightness_bounds() {
    let mut cfg = AppConfig::parse_from(["test-app", "--brightness", "0"]);
    assert!(cfg.validate().is_ok());
    let mut cfg = AppConfig::parse_from(["test-app", "--brightness", "100"]);
    assert!(cfg.validate().is_ok());
}

#[test]
fn rejects_dial_scale_out_of_bounds() {
    let mut cfg = AppConfig::parse_from(["test-app", "--dial-scale", "0"]);
    assert!(cfg.validate().is_err());
    let mut cfg = AppConfig::parse_from(["test-app", "--dial-scale", "101"]);
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_grid_overrides_out_of_bounds() {
    let mut cfg = AppConfig::parse_from(["test-app", "--rows", "0"]);
    assert!(cfg.validate().is_err());
    let mut cfg = AppConfig::parse_from(["test-app", "--cols", "9"]);
    assert!(cfg.validate().is_err());
    let mut cfg = AppConfig::parse_from(["test-app", "--zones", "5"]);
    assert!(cfg.validate().is_err());
}

#[test]
fn profile_selects_descriptor() {
    let cfg = AppConfig::parse_from(["test-app", "--profile", "mk2"]);
    let cap = cfg.capability();
    assert_eq!((cap.button_rows, cap.button_cols), (3, 5));
    assert!(!cap.has_strip());
    assert_eq!(DeviceProfile::Xl.label(), "xl");
}

#[test]
fn overrides_apply_on_top_of_profile() {
    let cfg = AppConfig::parse_from([
        "test-app", "--profile", "mini", "--cols", "4", "--dials", "2", "--zones", "3",
    ]);
    let cap = cfg.capability();
    assert_eq!((cap.button_rows, cap.button_cols), (2, 4));
    assert_eq!(cap.dial_count, 2);
    assert_eq!(cap.touch_zone_count, 3);
    assert!(cap.has_strip());
}

#[test]
fn rejects_missing_asset_dir() {
    let mut cfg = AppConfig::parse_from([
        "test-app",
        "--asset-dir",
        "/definitely/not/a/pagedeck/asset/dir",
    ]);
    assert!(cfg.validate().is_err());
}

#[test]
fn rejects_asset_dir_that_is_a_file() {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = env::temp_dir().join(format!("pagedeck_asset_file_{stamp}"));
    fs::write(&path, b"not a dir").unwrap();
    let mut cfg = AppConfig::parse_from(["test-app", "--asset-dir", path.to_str().unwrap()]);
    assert!(cfg.validate().is_err());
    let _ = fs::remove_file(&path);
}

#[test]
fn canonicalizes_asset_dir() {
    let dir = env::temp_dir();
    let mut cfg = AppConfig::parse_from(["test-app", "--asset-dir", dir.to_str().unwrap()]);
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.asset_dir, Some(dir.canonicalize().unwrap()));
}

#[test]
fn no_logs_overrides_logs() {
    let cfg = AppConfig::parse_from(["test-app", "--logs", "--no-logs"]);
    assert!(!cfg.logging_enabled());
    let cfg = AppConfig::parse_from(["test-app", "--logs"]);
    assert!(cfg.logging_enabled());
}

#[test]
fn rejects_blank_back_icon() {
    let mut cfg = AppConfig::parse_from(["test-app", "--back-icon", "  "]);
    assert!(cfg.validate().is_err());
}
