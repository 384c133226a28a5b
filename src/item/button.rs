use super::{Interactable, ItemContext, ItemCore, StateSet};
use crate::error::DeviceError;

/// Button grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for GridPos {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A key in the button grid.
#[derive(Debug)]
pub struct Button {
    position: GridPos,
    core: ItemCore,
}

impl Button {
    pub fn new(position: GridPos, states: StateSet) -> Self {
        Self {
            position,
            core: ItemCore::new(states),
        }
    }

    pub fn position(&self) -> GridPos {
        self.position
    }

    pub fn press(&mut self, ctx: &mut ItemContext<'_>) -> Result<(), DeviceError> {
        tracing::debug!(
            row = self.position.row,
            col = self.position.col,
            label = self.core.current_label().unwrap_or(""),
            "button pressed"
        );
        self.trigger(ctx)
    }

    /// Whether a page switch would paint this key.
    pub fn has_icon(&self) -> bool {
        self.core.current_icon().is_some()
    }
}

impl Interactable for Button {
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
        let key = ctx
            .capability
            .key_index(self.position.row, self.position.col);
        ctx.surface.render_key(key, &bitmap)
    }
}
