//! PageDeck simulator: drives the page engine against a terminal-drawn control surface.
//!
//! # Architecture
//!
//! - Input thread: reads crossterm key and mouse events, maps them to raw device events
//! - Event loop: routes each raw event and lets the page manager dispatch it to completion
//! - Terminal surface: paints keys, dial faces, and the touch strip as coloured cells

mod actions;
mod event_loop;
mod input;
mod layout;
mod swatch;
mod terminal_surface;

use anyhow::Result;
use crossbeam_channel::bounded;
use pagedeck::{
    config::AppConfig, telemetry::init_tracing, terminal_restore::TerminalRestoreGuard,
    EventRouter, PageManager,
};
use std::io;

use crate::event_loop::run_event_loop;
use crate::input::spawn_input_thread;
use crate::swatch::SwatchRasterizer;
use crate::terminal_surface::TerminalSurface;

const INPUT_CHANNEL_CAPACITY: usize = 64;

fn main() -> Result<()> {
    let config = AppConfig::parse_args()?;
    init_tracing(&config);

    let capability = config.capability();
    tracing::info!(
        profile = config.profile.label(),
        rows = capability.button_rows,
        cols = capability.button_cols,
        dials = capability.dial_count,
        zones = capability.touch_zone_count,
        "starting simulator"
    );
    let tree = layout::build_demo_tree(&config, capability);
    let rasterizer = SwatchRasterizer::new(config.asset_dir.clone());

    let guard = TerminalRestoreGuard::new();
    let mut stdout = io::stdout();
    guard.enter(&mut stdout)?;

    let surface = TerminalSurface::new(capability, stdout);
    let strip = surface.strip_geometry();
    let mut manager =
        PageManager::new(tree, surface, rasterizer).with_brightness(config.brightness);

    let (input_tx, input_rx) = bounded(INPUT_CHANNEL_CAPACITY);
    let _input_thread = spawn_input_thread(input_tx, strip);
    let router = EventRouter::new(&capability);

    let outcome = match manager.start() {
        Ok(()) => run_event_loop(&mut manager, &router, &input_rx),
        Err(err) => Err(err.into()),
    };
    if let Err(err) = &outcome {
        tracing::error!(error = %format!("{err:#}"), "simulator stopped on error");
    }
    let released = manager.shutdown();
    drop(manager);
    guard.restore();

    outcome?;
    released?;
    Ok(())
}
