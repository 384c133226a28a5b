//! Logical event vocabulary shared by the router, pages, and the manager.

use serde::Serialize;

/// Rotation or swipe direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Index offset used when stepping through states or screens.
    pub fn delta(self) -> isize {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device-agnostic events produced by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalEvent {
    ButtonPress { row: usize, col: usize },
    DialPress(usize),
    DialRotate {
        index: usize,
        direction: Direction,
        magnitude: u32,
    },
    LedSwipe(Direction),
    LedTap { x: u32, y: u32 },
}
