use super::{Interactable, ItemContext, ItemCore, StateSet};
use crate::action::{Action, Invocation};
use crate::error::DeviceError;
use crate::event::Direction;

/// Raw detents are multiplied by this before reaching a rotation action.
pub const DEFAULT_DIAL_SCALE: u32 = 5;

/// Rotary encoder with a push switch.
#[derive(Debug)]
pub struct Dial {
    index: usize,
    core: ItemCore,
    rotation_action: Option<Action>,
    scale: u32,
}

impl Dial {
    pub fn new(index: usize, states: StateSet) -> Self {
        Self {
            index,
            core: ItemCore::new(states),
            rotation_action: None,
            scale: DEFAULT_DIAL_SCALE,
        }
    }

    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    pub fn set_scale(&mut self, scale: u32) {
        self.scale = scale;
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn set_rotation_action(&mut self, action: Action) {
        self.rotation_action = Some(action);
    }

    pub fn rotation_action(&self) -> Option<&Action> {
        self.rotation_action.as_ref()
    }

    pub fn press(&mut self, ctx: &mut ItemContext<'_>) -> Result<(), DeviceError> {
        tracing::debug!(dial = self.index, "dial pressed");
        self.trigger(ctx)
    }

    /// Render the state one step in `direction` without committing it.
    ///
    /// Returns the previewed index.
    pub fn preview(
        &self,
        direction: Direction,
        ctx: &mut ItemContext<'_>,
    ) -> Result<usize, DeviceError> {
        let preview = self.core.neighbour(direction.delta());
        self.render_state(preview, ctx)?;
        Ok(preview)
    }

    /// Preview the adjacent state, then hand the scaled rotation to the rotation action.
    ///
    /// The committed index never changes, whatever the sequence of rotations.
    pub fn rotate(
        &mut self,
        direction: Direction,
        magnitude: u32,
        ctx: &mut ItemContext<'_>,
    ) -> Result<(), DeviceError> {
        let preview = self.preview(direction, ctx)?;
        tracing::debug!(
            dial = self.index,
            %direction,
            magnitude,
            preview,
            committed = self.core.current_index(),
            "dial rotated"
        );
        if let Some(action) = &self.rotation_action {
            let invocation = Invocation::Rotate {
                direction,
                amount: magnitude.saturating_mul(self.scale),
            };
            action.invoke(&invocation, ctx);
        }
        Ok(())
    }
}

impl Interactable for Dial {
    fn core(&self) -> &ItemCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ItemCore {
        &mut self.core
    }

    fn render_state(&self, index: usize, ctx: &mut ItemContext<'_>) -> Result<(), DeviceError> {
        let Some(icon) = self.core.icon_at(index) else {
            return Ok(());
        };
        let Some(bitmap) = ctx.resolve(icon, ctx.capability.key_pixel_size) else {
            return Ok(());
        };
        ctx.surface.render_dial(self.index, &bitmap)
    }
}
