//! Pages: nodes of the navigation tree, each holding fixed slot tables sized to the device.

mod tree;

#[cfg(test)]
mod tests;

pub use tree::{PageId, PageTree, DEFAULT_BACK_ICON};

use crate::action::Action;
use crate::capability::DeviceCapability;
use crate::error::{ConfigError, DeviceError};
use crate::event::LogicalEvent;
use crate::item::{
    Button, CompositeDial, Dial, GridPos, Interactable, ItemContext, StateSet, Strip, TouchZone,
};

/// What occupies a dial slot.
#[derive(Debug)]
pub enum DialSlot {
    Plain(Dial),
    Composite(CompositeDial),
}

impl DialSlot {
    pub fn dial(&self) -> &Dial {
        match self {
            Self::Plain(dial) => dial,
            Self::Composite(composite) => composite.dial(),
        }
    }

    fn dial_mut(&mut self) -> &mut Dial {
        match self {
            Self::Plain(dial) => dial,
            Self::Composite(composite) => composite.dial_mut(),
        }
    }
}

/// One screen of bound controls.
#[derive(Debug)]
pub struct Page {
    id: PageId,
    name: String,
    parent: Option<PageId>,
    pub(crate) children: Vec<PageId>,
    buttons: Vec<Vec<Option<Button>>>,
    dials: Vec<Option<DialSlot>>,
    strip: Option<Strip>,
    capability: DeviceCapability,
}

impl Page {
    pub(crate) fn new(
        id: PageId,
        name: String,
        parent: Option<PageId>,
        capability: DeviceCapability,
    ) -> Self {
        Self {
            id,
            name,
            parent,
            children: Vec::new(),
            buttons: (0..capability.button_rows)
                .map(|_| (0..capability.button_cols).map(|_| None).collect())
                .collect(),
            dials: (0..capability.dial_count).map(|_| None).collect(),
            strip: None,
            capability,
        }
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<PageId> {
        self.parent
    }

    pub fn children(&self) -> &[PageId] {
        &self.children
    }

    pub fn button(&self, pos: GridPos) -> Option<&Button> {
        self.buttons
            .get(pos.row)
            .and_then(|row| row.get(pos.col))
            .and_then(Option::as_ref)
    }

    pub fn button_mut(&mut self, pos: GridPos) -> Option<&mut Button> {
        self.buttons
            .get_mut(pos.row)
            .and_then(|row| row.get_mut(pos.col))
            .and_then(Option::as_mut)
    }

    /// Occupied button slots in row-major order.
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.buttons.iter().flatten().flatten()
    }

    pub fn dial_slot(&self, index: usize) -> Option<&DialSlot> {
        self.dials.get(index).and_then(Option::as_ref)
    }

    pub fn dial(&self, index: usize) -> Option<&Dial> {
        self.dial_slot(index).map(DialSlot::dial)
    }

    pub fn dial_mut(&mut self, index: usize) -> Option<&mut Dial> {
        self.dials
            .get_mut(index)
            .and_then(Option::as_mut)
            .map(DialSlot::dial_mut)
    }

    pub fn composite(&self) -> Option<&CompositeDial> {
        self.dials.iter().flatten().find_map(|slot| match slot {
            DialSlot::Composite(composite) => Some(composite),
            DialSlot::Plain(_) => None,
        })
    }

    pub fn strip(&self) -> Option<&Strip> {
        self.strip.as_ref()
    }

    pub fn strip_mut(&mut self) -> Option<&mut Strip> {
        self.strip.as_mut()
    }

    pub(crate) fn check_grid(&self, pos: GridPos) -> Result<(), ConfigError> {
        let (rows, cols) = (self.capability.button_rows, self.capability.button_cols);
        if pos.row < rows && pos.col < cols {
            Ok(())
        } else {
            Err(ConfigError::OutOfBounds {
                row: pos.row,
                col: pos.col,
                rows,
                cols,
            })
        }
    }

    /// Caller has checked bounds and vacancy.
    pub(crate) fn place_button(&mut self, button: Button) {
        let pos = button.position();
        self.buttons[pos.row][pos.col] = Some(button);
    }

    fn reject<T>(&self, what: &str, err: ConfigError) -> Result<T, ConfigError> {
        tracing::error!(page = %self.name, error = %err, "{what} not created");
        Err(err)
    }

    pub fn create_button(
        &mut self,
        coordinates: impl Into<GridPos>,
        states: StateSet,
        action: Option<Action>,
    ) -> Result<&mut Button, ConfigError> {
        let pos = coordinates.into();
        if let Err(err) = self.check_grid(pos) {
            return self.reject("button", err);
        }
        if self.button(pos).is_some() {
            return self.reject("button", ConfigError::SlotOccupied("button"));
        }
        let mut button = Button::new(pos, states);
        if let Some(action) = action {
            button.attach_action(action);
        }
        let slot = &mut self.buttons[pos.row][pos.col];
        Ok(slot.insert(button))
    }

    /// `rotation_action` receives the scaled rotation; attach a press action on the returned dial.
    pub fn create_dial(
        &mut self,
        index: usize,
        states: StateSet,
        rotation_action: Option<Action>,
    ) -> Result<&mut Dial, ConfigError> {
        self.check_dial_slot(index)?;
        let mut dial = Dial::new(index, states);
        if let Some(action) = rotation_action {
            dial.set_rotation_action(action);
        }
        match self.dials[index].insert(DialSlot::Plain(dial)) {
            DialSlot::Plain(dial) => Ok(dial),
            DialSlot::Composite(composite) => Ok(composite.dial_mut()),
        }
    }

    /// Bind the dial at `index` to this page's touch strip, creating the strip if needed.
    pub fn create_composite_dial(
        &mut self,
        index: usize,
        states: StateSet,
    ) -> Result<&mut CompositeDial, ConfigError> {
        self.check_dial_slot(index)?;
        if self.composite().is_some() {
            return self.reject("composite dial", ConfigError::StripAlreadyBound);
        }
        self.touch_strip()?;
        match self.dials[index].insert(DialSlot::Composite(CompositeDial::new(index, states))) {
            DialSlot::Composite(composite) => Ok(composite),
            DialSlot::Plain(_) => unreachable!("slot was just filled with a composite dial"),
        }
    }

    fn check_dial_slot(&self, index: usize) -> Result<(), ConfigError> {
        match self.dials.get(index) {
            None => self.reject(
                "dial",
                ConfigError::DialOutOfRange {
                    index,
                    count: self.dials.len(),
                },
            ),
            Some(Some(_)) => self.reject("dial", ConfigError::SlotOccupied("dial")),
            Some(None) => Ok(()),
        }
    }

    /// This page's strip, created on first use.
    pub fn touch_strip(&mut self) -> Result<&mut Strip, ConfigError> {
        if self.strip.is_none() {
            if !self.capability.has_strip() {
                return self.reject("touch strip", ConfigError::NoStrip);
            }
            self.strip = Some(Strip::new(
                self.capability.strip_pixel_size,
                self.capability.touch_zone_count,
            ));
        }
        self.strip.as_mut().ok_or(ConfigError::NoStrip)
    }

    pub fn add_touch_zone(
        &mut self,
        index: usize,
        states: StateSet,
        tap_action: Option<Action>,
    ) -> Result<&mut TouchZone, ConfigError> {
        self.touch_strip()?.add_zone(index, states, tap_action)
    }

    /// Paint every occupied button whose current state has an icon.
    pub(crate) fn render_buttons(&self, ctx: &mut ItemContext<'_>) -> Result<(), DeviceError> {
        for button in self.buttons().filter(|button| button.has_icon()) {
            button.render(ctx)?;
        }
        Ok(())
    }

    pub(crate) fn render_strip(&mut self, ctx: &mut ItemContext<'_>) -> Result<(), DeviceError> {
        match self.strip.as_mut() {
            Some(strip) => strip.render(ctx),
            None => Ok(()),
        }
    }

    /// Forward a logical event to the item it targets.
    ///
    /// Events aimed at empty or out-of-range slots are dropped with a warning.
    pub fn handle_input(
        &mut self,
        event: LogicalEvent,
        ctx: &mut ItemContext<'_>,
    ) -> Result<(), DeviceError> {
        match event {
            LogicalEvent::ButtonPress { row, col } => {
                match self.button_mut(GridPos::new(row, col)) {
                    Some(button) => button.press(ctx),
                    None => {
                        tracing::warn!(
                            page = %self.name,
                            row,
                            col,
                            "no button at target; event dropped"
                        );
                        Ok(())
                    }
                }
            }
            LogicalEvent::DialPress(index) => match self.dial_mut(index) {
                Some(dial) => dial.press(ctx),
                None => {
                    tracing::warn!(
                        page = %self.name,
                        dial = index,
                        "no dial at target; event dropped"
                    );
                    Ok(())
                }
            },
            LogicalEvent::DialRotate {
                index,
                direction,
                magnitude,
            } => match self.dials.get_mut(index).and_then(Option::as_mut) {
                Some(DialSlot::Plain(dial)) => dial.rotate(direction, magnitude, ctx),
                Some(DialSlot::Composite(composite)) => match self.strip.as_mut() {
                    Some(strip) => composite.rotate(direction, magnitude, strip, ctx),
                    None => {
                        tracing::warn!(
                            page = %self.name,
                            dial = index,
                            "composite dial without strip; event dropped"
                        );
                        Ok(())
                    }
                },
                None => {
                    tracing::warn!(
                        page = %self.name,
                        dial = index,
                        "no dial at target; event dropped"
                    );
                    Ok(())
                }
            },
            LogicalEvent::LedTap { x, y } => {
                let Some(strip) = self.strip.as_mut() else {
                    tracing::warn!(page = %self.name, x, y, "no touch strip on page; tap dropped");
                    return Ok(());
                };
                match composite_mut(&mut self.dials) {
                    Some(composite) => composite.handle_tap(x, y, strip, ctx),
                    None => strip.dispatch_tap(x, y, ctx),
                }
            }
            LogicalEvent::LedSwipe(direction) => {
                let Some(strip) = self.strip.as_mut() else {
                    tracing::warn!(
                        page = %self.name,
                        %direction,
                        "no touch strip on page; swipe dropped"
                    );
                    return Ok(());
                };
                match composite_mut(&mut self.dials) {
                    Some(composite) => composite.handle_swipe(direction, strip, ctx),
                    None => strip.swipe(direction, ctx),
                }
                Ok(())
            }
        }
    }
}

fn composite_mut(dials: &mut [Option<DialSlot>]) -> Option<&mut CompositeDial> {
    dials.iter_mut().flatten().find_map(|slot| match slot {
        DialSlot::Composite(composite) => Some(composite),
        DialSlot::Plain(_) => None,
    })
}
