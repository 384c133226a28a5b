use super::{Interactable, ItemContext, ItemCore, StateSet};
use crate::action::{Action, Invocation};
use crate::bitmap::{Bitmap, Size};
use crate::capability::MAX_TOUCH_ZONES;
use crate::error::{ConfigError, DeviceError};
use crate::event::Direction;

/// Pixel rectangle inside the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub size: Size,
}

/// One fixed-width slice of the touch strip.
#[derive(Debug)]
pub struct TouchZone {
    index: usize,
    region: Region,
    core: ItemCore,
    tap_action: Option<Action>,
}

impl TouchZone {
    pub fn new(index: usize, region: Region, states: StateSet) -> Self {
        Self {
            index,
            region,
            core: ItemCore::new(states),
            tap_action: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Action that receives the raw tap coordinates, separate from the trigger action.
    pub fn set_tap_action(&mut self, action: Action) {
        self.tap_action = Some(action);
    }

    /// Strip coordinates translated into this zone's space.
    pub fn to_local(&self, x: u32, y: u32) -> (u32, u32) {
        (
            x.saturating_sub(self.region.x),
            y.saturating_sub(self.region.y),
        )
    }

    /// Trigger (cycle, paint, trigger action), then run the tap action with `(x, y)`.
    ///
    /// Painting lands in the canvas attached to `ctx`; the strip flushes it.
    pub fn tap(&mut self, x: u32, y: u32, ctx: &mut ItemContext<'_>) -> Result<(), DeviceError> {
        let (local_x, local_y) = self.to_local(x, y);
        tracing::debug!(zone = self.index, local_x, local_y, "touch zone tapped");
        self.trigger(ctx)?;
        if let Some(action) = &self.tap_action {
            action.invoke(&Invocation::Tap { x, y }, ctx);
        }
        Ok(())
    }
}

impl Interactable for TouchZone {
    fn core(&self) -> &ItemCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ItemCore {
        &mut self.core
    }

    fn render_state(&self, index: usize, ctx: &mut ItemContext<'_>) -> Result<(), DeviceError> {
        let bitmap = self
            .core
            .icon_at(index)
            .and_then(|icon| ctx.resolve(icon, self.region.size));
        let Some(canvas) = ctx.canvas_mut() else {
            tracing::debug!(zone = self.index, "no strip canvas attached; paint skipped");
            return Ok(());
        };
        match bitmap {
            Some(bitmap) => canvas.paste(&bitmap, self.region.x, self.region.y),
            None => canvas.clear_region(self.region.x, self.region.y, self.region.size),
        }
        Ok(())
    }
}

/// Touch strip split evenly into at most four zone slots.
#[derive(Debug)]
pub struct Strip {
    size: Size,
    zones: Vec<Option<TouchZone>>,
    canvas: Bitmap,
    swipe_action: Option<Action>,
}

impl Strip {
    pub fn new(size: Size, zone_count: usize) -> Self {
        let zone_count = zone_count.clamp(1, MAX_TOUCH_ZONES);
        Self {
            size,
            zones: (0..zone_count).map(|_| None).collect(),
            canvas: Bitmap::blank(size),
            swipe_action: None,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    /// Nominal zone width; the last zones absorb any remainder pixels.
    pub fn zone_width(&self) -> u32 {
        self.size.width / self.zones.len() as u32
    }

    /// Pixel span of slot `index`: `[index * W / n, (index + 1) * W / n)`.
    pub fn zone_region(&self, index: usize) -> Region {
        let count = self.zones.len() as u64;
        let width = u64::from(self.size.width);
        let start = (index as u64 * width / count) as u32;
        let end = ((index as u64 + 1) * width / count) as u32;
        Region {
            x: start,
            y: 0,
            size: Size::new(end.saturating_sub(start), self.size.height),
        }
    }

    pub fn zone(&self, index: usize) -> Option<&TouchZone> {
        self.zones.get(index).and_then(Option::as_ref)
    }

    pub fn zone_mut(&mut self, index: usize) -> Option<&mut TouchZone> {
        self.zones.get_mut(index).and_then(Option::as_mut)
    }

    /// Last composed image.
    pub fn canvas(&self) -> &Bitmap {
        &self.canvas
    }

    pub fn set_swipe_action(&mut self, action: Action) {
        self.swipe_action = Some(action);
    }

    pub fn add_zone(
        &mut self,
        index: usize,
        states: StateSet,
        tap_action: Option<Action>,
    ) -> Result<&mut TouchZone, ConfigError> {
        let count = self.zones.len();
        let region = self.zone_region(index);
        let Some(slot) = self.zones.get_mut(index) else {
            let err = ConfigError::ZoneOutOfRange { index, count };
            tracing::error!(error = %err, "touch zone not created");
            return Err(err);
        };
        if slot.is_some() {
            let err = ConfigError::SlotOccupied("touch zone");
            tracing::error!(error = %err, index, "touch zone not created");
            return Err(err);
        }
        let mut zone = TouchZone::new(index, region, states);
        if let Some(action) = tap_action {
            zone.set_tap_action(action);
        }
        Ok(slot.insert(zone))
    }

    /// Zone slot under strip x coordinate, if inside the strip.
    pub fn zone_index_at(&self, x: u32) -> Option<usize> {
        if x >= self.size.width {
            return None;
        }
        let index = u64::from(x) * self.zones.len() as u64 / u64::from(self.size.width);
        Some(index as usize)
    }

    /// Route a tap to the zone under `x`, then flush the canvas.
    pub fn dispatch_tap(
        &mut self,
        x: u32,
        y: u32,
        ctx: &mut ItemContext<'_>,
    ) -> Result<(), DeviceError> {
        let Some(index) = self.zone_index_at(x) else {
            tracing::warn!(x, y, "tap outside touch strip; dropped");
            return Ok(());
        };
        let canvas = std::mem::replace(&mut self.canvas, Bitmap::blank(Size::default()));
        let Some(zone) = self.zones.get_mut(index).and_then(Option::as_mut) else {
            self.canvas = canvas;
            tracing::warn!(zone = index, x, y, "tap on empty touch zone; dropped");
            return Ok(());
        };
        ctx.attach_canvas(canvas);
        let result = zone.tap(x, y, ctx);
        self.canvas = ctx
            .detach_canvas()
            .unwrap_or_else(|| Bitmap::blank(self.size));
        result?;
        self.flush(ctx)
    }

    pub fn swipe(&mut self, direction: Direction, ctx: &mut ItemContext<'_>) {
        match &self.swipe_action {
            Some(action) => action.invoke(&Invocation::Swipe { direction }, ctx),
            None => tracing::debug!(%direction, "swipe with no action"),
        }
    }

    /// Compose every occupied zone onto a fresh canvas and push it.
    pub fn render(&mut self, ctx: &mut ItemContext<'_>) -> Result<(), DeviceError> {
        ctx.attach_canvas(Bitmap::blank(self.size));
        let mut result = Ok(());
        for zone in self.zones.iter().flatten() {
            result = zone.render(ctx);
            if result.is_err() {
                break;
            }
        }
        self.canvas = ctx
            .detach_canvas()
            .unwrap_or_else(|| Bitmap::blank(self.size));
        result?;
        self.flush(ctx)
    }

    fn flush(&self, ctx: &mut ItemContext<'_>) -> Result<(), DeviceError> {
        ctx.surface.render_led_strip(&self.canvas)
    }
}
