use super::{Dial, ItemContext, StateSet, Strip};
use crate::error::DeviceError;
use crate::event::Direction;

/// A dial that pages through the screens of its page's touch strip.
///
/// Rotation never reaches a user action: it always moves `current_screen`,
/// clamped to the strip's zone slots. Custom behaviour belongs on the zones.
#[derive(Debug)]
pub struct CompositeDial {
    dial: Dial,
    current_screen: usize,
}

impl CompositeDial {
    pub fn new(index: usize, states: StateSet) -> Self {
        Self {
            // Detents map one-to-one onto screens.
            dial: Dial::new(index, states).with_scale(1),
            current_screen: 0,
        }
    }

    pub fn dial(&self) -> &Dial {
        &self.dial
    }

    pub fn dial_mut(&mut self) -> &mut Dial {
        &mut self.dial
    }

    pub fn current_screen(&self) -> usize {
        self.current_screen
    }

    /// Preview on the dial, then page the strip by the scaled step.
    pub fn rotate(
        &mut self,
        direction: Direction,
        magnitude: u32,
        strip: &mut Strip,
        ctx: &mut ItemContext<'_>,
    ) -> Result<(), DeviceError> {
        self.dial.preview(direction, ctx)?;
        let step = magnitude.saturating_mul(self.dial.scale());
        self.handle_rotation(direction, step as usize, strip, ctx)
    }

    /// Move `current_screen` by `step`, clamped to `[0, zone_count)`, and re-render the strip.
    pub fn handle_rotation(
        &mut self,
        direction: Direction,
        step: usize,
        strip: &mut Strip,
        ctx: &mut ItemContext<'_>,
    ) -> Result<(), DeviceError> {
        let last = strip.zone_count().saturating_sub(1);
        self.current_screen = match direction {
            Direction::Left => self.current_screen.saturating_sub(step),
            Direction::Right => self.current_screen.saturating_add(step).min(last),
        };
        tracing::info!(
            dial = self.dial.index(),
            screen = self.current_screen,
            "composite dial changed screen"
        );
        strip.render(ctx)
    }

    pub fn handle_tap(
        &mut self,
        x: u32,
        y: u32,
        strip: &mut Strip,
        ctx: &mut ItemContext<'_>,
    ) -> Result<(), DeviceError> {
        tracing::debug!(dial = self.dial.index(), x, y, "composite dial tap");
        strip.dispatch_tap(x, y, ctx)
    }

    pub fn handle_swipe(
        &mut self,
        direction: Direction,
        strip: &mut Strip,
        ctx: &mut ItemContext<'_>,
    ) {
        tracing::debug!(dial = self.dial.index(), %direction, "composite dial swipe");
        strip.swipe(direction, ctx);
    }

    pub fn render(&self, strip: &mut Strip, ctx: &mut ItemContext<'_>) -> Result<(), DeviceError> {
        strip.render(ctx)
    }
}
