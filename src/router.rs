//! Translate raw driver callbacks into logical events.
//!
//! Keys are mapped from linear indices to grid coordinates with the device's
//! column count. Releases and zero-step turns produce nothing.

use crate::capability::DeviceCapability;
use crate::event::{Direction, LogicalEvent};

/// Touch gestures as the driver reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchEvent {
    Short { x: u32, y: u32 },
    Long { x: u32, y: u32 },
    Drag { x: u32, y: u32, x_out: u32, y_out: u32 },
}

/// Driver-level input before routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawEvent {
    Key { index: usize, pressed: bool },
    DialPush { index: usize, pressed: bool },
    DialTurn { index: usize, steps: i32 },
    Touch(TouchEvent),
}

#[derive(Debug, Clone, Copy)]
pub struct EventRouter {
    capability: DeviceCapability,
}

impl EventRouter {
    pub fn new(capability: &DeviceCapability) -> Self {
        Self {
            capability: *capability,
        }
    }

    pub fn route(&self, raw: RawEvent) -> Option<LogicalEvent> {
        match raw {
            RawEvent::Key { pressed: false, .. }
            | RawEvent::DialPush { pressed: false, .. } => None,
            RawEvent::Key { index, .. } => {
                if index >= self.capability.key_count() {
                    tracing::warn!(key = index, "key index outside grid; ignored");
                    return None;
                }
                let (row, col) = self.capability.grid_position(index);
                Some(LogicalEvent::ButtonPress { row, col })
            }
            RawEvent::DialPush { index, .. } => Some(LogicalEvent::DialPress(index)),
            RawEvent::DialTurn { steps: 0, .. } => None,
            RawEvent::DialTurn { index, steps } => Some(LogicalEvent::DialRotate {
                index,
                direction: if steps < 0 {
                    Direction::Left
                } else {
                    Direction::Right
                },
                magnitude: steps.unsigned_abs(),
            }),
            RawEvent::Touch(TouchEvent::Short { x, y }) => Some(LogicalEvent::LedTap { x, y }),
            RawEvent::Touch(TouchEvent::Long { x, y }) => {
                tracing::info!(x, y, "long press on touch strip; no handler");
                None
            }
            RawEvent::Touch(TouchEvent::Drag { x, y, x_out, y_out }) => {
                let dx = x.abs_diff(x_out);
                let dy = y.abs_diff(y_out);
                if dx > dy {
                    Some(LogicalEvent::LedSwipe(if x > x_out {
                        Direction::Left
                    } else {
                        Direction::Right
                    }))
                } else {
                    tracing::debug!(x, y, x_out, y_out, "vertical drag ignored");
                    None
                }
            }
        }
    }
}
