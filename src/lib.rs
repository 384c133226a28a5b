//! Paged control-surface engine: a tree of pages bound to a grid of keys,
//! a row of dials, and a segmented touch strip.

pub mod action;
pub mod bitmap;
pub mod capability;
pub mod config;
pub mod error;
pub mod event;
pub mod item;
pub mod manager;
pub mod page;
pub mod router;
pub mod surface;
pub mod telemetry;
pub mod terminal_restore;

#[cfg(test)]
mod test_support;

pub use action::{invocation_fields, Action, Invocation, ManagerRequest};
pub use bitmap::{Bitmap, Size};
pub use capability::DeviceCapability;
pub use error::{ConfigError, DeviceError};
pub use event::{Direction, LogicalEvent};
pub use item::{
    Button, CompositeDial, Dial, GridPos, IconRef, Interactable, ItemState, StateSet, Strip,
    TouchZone,
};
pub use manager::PageManager;
pub use page::{Page, PageId, PageTree};
pub use router::{EventRouter, RawEvent, TouchEvent};
pub use surface::{Rasterizer, Surface};
