//! Engine error types so tree-building failures and device failures stay distinct.

use std::fmt;

use crate::page::PageId;

/// Failures while building the page tree. Non-fatal: the build step is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Grid coordinates exceed the device's button grid.
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// Dial index exceeds the device's dial count.
    DialOutOfRange { index: usize, count: usize },
    /// Touch zone index exceeds the strip's zone slots.
    ZoneOutOfRange { index: usize, count: usize },
    /// The target slot already holds an item.
    SlotOccupied(&'static str),
    /// The page has no touch strip (or the device has none).
    NoStrip,
    /// A composite dial is already bound to this page's strip.
    StripAlreadyBound,
    /// The page id was not issued by this tree.
    UnknownPage(PageId),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                row,
                col,
                rows,
                cols,
            } => write!(
                f,
                "coordinates ({row}, {col}) outside {rows}x{cols} button grid"
            ),
            Self::DialOutOfRange { index, count } => {
                write!(f, "dial index {index} outside {count} dials")
            }
            Self::ZoneOutOfRange { index, count } => {
                write!(f, "touch zone index {index} outside {count} zones")
            }
            Self::SlotOccupied(kind) => write!(f, "{kind} slot already occupied"),
            Self::NoStrip => write!(f, "page has no touch strip"),
            Self::StripAlreadyBound => write!(f, "touch strip already bound to a dial"),
            Self::UnknownPage(id) => write!(f, "unknown page {id}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// A write to the physical surface failed. Fatal for the current run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceError {
    pub op: &'static str,
    pub message: String,
}

impl DeviceError {
    pub fn new(op: &'static str, message: impl Into<String>) -> Self {
        Self {
            op,
            message: message.into(),
        }
    }
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "device {} failed: {}", self.op, self.message)
    }
}

impl std::error::Error for DeviceError {}

impl From<std::io::Error> for DeviceError {
    fn from(err: std::io::Error) -> Self {
        Self::new("io", err.to_string())
    }
}
