//! Page manager: owns the tree and the device, tracks the active page, and applies navigation.


use crate::action::ManagerRequest;
use crate::capability::DeviceCapability;
use crate::error::DeviceError;
use crate::event::LogicalEvent;
use crate::item::ItemContext;
use crate::page::{Page, PageId, PageTree};
use crate::surface::{Rasterizer, Surface};

/// Brightness applied on start unless changed.
pub const DEFAULT_BRIGHTNESS: u8 = 50;

/// Upper bound on navigation requests honoured for one event.
const MAX_REQUESTS_PER_EVENT: usize = 8;

/// Explicit context object threading the tree, the device, and the rasterizer.
pub struct PageManager<S: Surface, R: Rasterizer> {
    tree: PageTree,
    active: PageId,
    capability: DeviceCapability,
    surface: S,
    rasterizer: R,
    brightness: u8,
    closed: bool,
}

impl<S: Surface, R: Rasterizer> PageManager<S, R> {
    /// Take ownership of a built tree. Nothing is drawn until [`Self::start`].
    pub fn new(tree: PageTree, surface: S, rasterizer: R) -> Self {
        let capability = *tree.capability();
        let active = tree.root();
        Self {
            tree,
            active,
            capability,
            surface,
            rasterizer,
            brightness: DEFAULT_BRIGHTNESS,
            closed: false,
        }
    }

    pub fn with_brightness(mut self, percent: u8) -> Self {
        self.brightness = percent.min(100);
        self
    }

    /// Apply brightness and show the root page.
    pub fn start(&mut self) -> Result<(), DeviceError> {
        self.surface.set_brightness(self.brightness)?;
        self.set_current_page(self.tree.root())
    }

    pub fn tree(&self) -> &PageTree {
        &self.tree
    }

    /// Mutable tree access for late additions. Call [`Self::refresh`] afterwards
    /// if the active page changed.
    pub fn tree_mut(&mut self) -> &mut PageTree {
        &mut self.tree
    }

    pub fn capability(&self) -> &DeviceCapability {
        &self.capability
    }

    pub fn active(&self) -> PageId {
        self.active
    }

    pub fn active_page(&self) -> Option<&Page> {
        self.tree.page(self.active)
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn set_brightness(&mut self, percent: u8) -> Result<(), DeviceError> {
        let percent = percent.min(100);
        self.surface.set_brightness(percent)?;
        self.brightness = percent;
        tracing::info!(percent, "brightness set");
        Ok(())
    }

    /// Make `page` active and redraw the whole surface.
    ///
    /// Every key is cleared first, then only the page's occupied, iconed
    /// buttons are painted, so nothing from the previous page survives.
    pub fn set_current_page(&mut self, page: PageId) -> Result<(), DeviceError> {
        if !self.tree.contains(page) {
            tracing::warn!(%page, "page not in tree; navigation dropped");
            return Ok(());
        }
        self.active = page;
        tracing::info!(
            page = %self.tree.breadcrumb(page).join(" / "),
            "displaying page"
        );
        self.refresh()
    }

    pub fn go_to_page(&mut self, page: PageId) -> Result<(), DeviceError> {
        self.set_current_page(page)
    }

    /// Return to the active page's parent. No-op at the root.
    pub fn go_back(&mut self) -> Result<(), DeviceError> {
        match self.active_page().and_then(Page::parent) {
            Some(parent) => self.set_current_page(parent),
            None => {
                tracing::debug!("already at root; back ignored");
                Ok(())
            }
        }
    }

    /// Clear the surface and repaint the active page.
    pub fn refresh(&mut self) -> Result<(), DeviceError> {
        self.surface.clear_all()?;
        let Self {
            tree,
            active,
            capability,
            surface,
            rasterizer,
            ..
        } = self;
        let Some(page) = tree.page_mut(*active) else {
            return Ok(());
        };
        let mut ctx = ItemContext::new(surface, rasterizer, capability);
        page.render_buttons(&mut ctx)?;
        page.render_strip(&mut ctx)
    }

    /// Route one logical event to the active page, then apply what its actions requested.
    pub fn dispatch(&mut self, event: LogicalEvent) -> Result<(), DeviceError> {
        let requests = {
            let Self {
                tree,
                active,
                capability,
                surface,
                rasterizer,
                ..
            } = self;
            let Some(page) = tree.page_mut(*active) else {
                tracing::warn!(?event, "no active page; event dropped");
                return Ok(());
            };
            let mut ctx = ItemContext::new(surface, rasterizer, capability);
            page.handle_input(event, &mut ctx)?;
            ctx.take_requests()
        };
        if requests.len() > MAX_REQUESTS_PER_EVENT {
            tracing::warn!(
                count = requests.len(),
                "too many manager requests for one event; extra requests dropped"
            );
        }
        for request in requests.into_iter().take(MAX_REQUESTS_PER_EVENT) {
            self.apply(request)?;
        }
        Ok(())
    }

    fn apply(&mut self, request: ManagerRequest) -> Result<(), DeviceError> {
        match request {
            ManagerRequest::GoTo(page) => self.go_to_page(page),
            ManagerRequest::Back => self.go_back(),
            ManagerRequest::SetBrightness(percent) => self.set_brightness(percent),
        }
    }

    /// Reset and close the device. Runs once; later calls do nothing.
    pub fn shutdown(&mut self) -> Result<(), DeviceError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        let reset = self.surface.reset();
        let close = self.surface.close();
        tracing::info!("device released");
        reset.and(close)
    }
}

impl<S: Surface, R: Rasterizer> Drop for PageManager<S, R> {
    fn drop(&mut self) {
        if let Err(err) = self.shutdown() {
            tracing::warn!(error = %err, "device shutdown failed");
        }
    }
}
