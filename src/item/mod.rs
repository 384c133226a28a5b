//! Interactive items: buttons, dials, touch zones, and composite dials.
//!
//! Every item owns a [`StateSet`], a committed state index, and an optional
//! attached [`Action`]. Items never point back at their page; side effects go
//! through the [`ItemContext`] handed down for one dispatch.

mod button;
mod composite;
mod dial;
mod state;
mod touch;


pub use button::{Button, GridPos};
pub use composite::CompositeDial;
pub use dial::{Dial, DEFAULT_DIAL_SCALE};
pub use state::{IconRef, ItemState, StateSet};
pub use touch::{Region, Strip, TouchZone};

use crate::action::{Action, Invocation, ManagerRequest};
use crate::bitmap::{Bitmap, Size};
use crate::capability::DeviceCapability;
use crate::error::DeviceError;
use crate::surface::{Rasterizer, Surface};

/// Collaborators reachable while one event is dispatched.
pub struct ItemContext<'a> {
    pub(crate) surface: &'a mut dyn Surface,
    pub(crate) rasterizer: &'a dyn Rasterizer,
    pub(crate) capability: &'a DeviceCapability,
    requests: Vec<ManagerRequest>,
    canvas: Option<Bitmap>,
}

impl<'a> ItemContext<'a> {
    pub fn new(
        surface: &'a mut dyn Surface,
        rasterizer: &'a dyn Rasterizer,
        capability: &'a DeviceCapability,
    ) -> Self {
        Self {
            surface,
            rasterizer,
            capability,
            requests: Vec::new(),
            canvas: None,
        }
    }

    pub fn capability(&self) -> &DeviceCapability {
        self.capability
    }

    /// Queue a request for the manager.
    pub fn request(&mut self, request: ManagerRequest) {
        self.requests.push(request);
    }

    pub fn take_requests(&mut self) -> Vec<ManagerRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Resolve an icon, logging unresolvable references.
    pub(crate) fn resolve(&self, icon: &IconRef, size: Size) -> Option<Bitmap> {
        let bitmap = self.rasterizer.rasterize(icon, size);
        if bitmap.is_none() {
            tracing::warn!(icon = %icon, "missing asset; render skipped");
        }
        bitmap
    }

    pub(crate) fn attach_canvas(&mut self, canvas: Bitmap) {
        self.canvas = Some(canvas);
    }

    pub(crate) fn detach_canvas(&mut self) -> Option<Bitmap> {
        self.canvas.take()
    }

    pub(crate) fn canvas_mut(&mut self) -> Option<&mut Bitmap> {
        self.canvas.as_mut()
    }
}

/// Fields shared by every item variant.
#[derive(Debug)]
pub struct ItemCore {
    states: StateSet,
    current: usize,
    action: Option<Action>,
}

impl ItemCore {
    /// Seeds a blank state when `states` is empty so the index is always valid.
    pub fn new(mut states: StateSet) -> Self {
        if states.is_empty() {
            states.push(ItemState::default());
        }
        Self {
            states,
            current: 0,
            action: None,
        }
    }

    pub fn states(&self) -> &StateSet {
        &self.states
    }

    pub fn add_state(&mut self, state: ItemState) {
        self.states.push(state);
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn current_state(&self) -> Option<&ItemState> {
        self.states.get(self.current)
    }

    pub fn current_icon(&self) -> Option<&IconRef> {
        self.current_state().and_then(|state| state.icon.as_ref())
    }

    pub fn current_label(&self) -> Option<&str> {
        self.current_state().and_then(|state| state.label.as_deref())
    }

    pub fn icon_at(&self, index: usize) -> Option<&IconRef> {
        self.states.get(index).and_then(|state| state.icon.as_ref())
    }

    pub fn set_current_icon(&mut self, icon: Option<IconRef>) {
        if let Some(state) = self.states.get_mut(self.current) {
            state.icon = icon;
        }
    }

    pub fn set_current_label(&mut self, label: Option<String>) {
        if let Some(state) = self.states.get_mut(self.current) {
            state.label = label;
        }
    }

    /// Index one step from the committed one, wrapping. Does not commit.
    pub fn neighbour(&self, delta: isize) -> usize {
        let len = self.states.len().max(1) as isize;
        (self.current as isize + delta).rem_euclid(len) as usize
    }

    /// Advance the committed index. Returns false for single-state items.
    pub fn cycle(&mut self) -> bool {
        if self.states.len() <= 1 {
            return false;
        }
        self.current = (self.current + 1) % self.states.len();
        true
    }

    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    pub fn attach_action(&mut self, action: Action) {
        self.action = Some(action);
    }

    pub(crate) fn invoke_action(&self, invocation: &Invocation, ctx: &mut ItemContext<'_>) {
        if let Some(action) = &self.action {
            action.invoke(invocation, ctx);
        }
    }
}

/// Capability set shared by every item variant.
pub trait Interactable {
    fn core(&self) -> &ItemCore;

    fn core_mut(&mut self) -> &mut ItemCore;

    /// Render the state at `index`, which need not be the committed one.
    fn render_state(&self, index: usize, ctx: &mut ItemContext<'_>) -> Result<(), DeviceError>;

    fn render(&self, ctx: &mut ItemContext<'_>) -> Result<(), DeviceError> {
        self.render_state(self.core().current_index(), ctx)
    }

    /// Cycle state, render, then run the attached action.
    ///
    /// The render is requested before the action runs. Missing assets do not
    /// stop the action; device failures do.
    fn trigger(&mut self, ctx: &mut ItemContext<'_>) -> Result<(), DeviceError> {
        if self.core_mut().cycle() {
            tracing::debug!(state = self.core().current_index(), "item cycled");
            self.render(ctx)?;
        }
        self.core().invoke_action(&Invocation::Trigger, ctx);
        Ok(())
    }

    fn attach_action(&mut self, action: Action) {
        self.core_mut().attach_action(action);
    }

    fn current_index(&self) -> usize {
        self.core().current_index()
    }

    fn current_icon(&self) -> Option<&IconRef> {
        self.core().current_icon()
    }

    fn current_label(&self) -> Option<&str> {
        self.core().current_label()
    }
}
