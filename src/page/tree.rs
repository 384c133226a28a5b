use super::Page;
use crate::action::Action;
use crate::capability::DeviceCapability;
use crate::error::ConfigError;
use crate::item::{Button, GridPos, IconRef, Interactable, ItemState, StateSet};
use std::sync::atomic::{AtomicU32, Ordering};

/// Icon placed on every auto-wired back button unless overridden.
pub const DEFAULT_BACK_ICON: &str = "Icons/arrow-left.svg";

static NEXT_TREE: AtomicU32 = AtomicU32::new(1);

/// Stable identity of a page inside the tree that created it.
///
/// Ids carry their tree's tag, so an id from one tree never resolves in another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId {
    tree: u32,
    index: usize,
}

impl PageId {
    pub fn index(self) -> usize {
        self.index
    }

    /// Id outside any tree, for pages built on their own.
    #[cfg(test)]
    pub(crate) fn detached(index: usize) -> Self {
        Self { tree: 0, index }
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "page#{}", self.index)
    }
}

/// Arena owning every page. Pages are never removed, so ids stay valid.
#[derive(Debug)]
pub struct PageTree {
    tag: u32,
    pages: Vec<Page>,
    capability: DeviceCapability,
    back_icon: IconRef,
}

impl PageTree {
    pub fn new(root_name: impl Into<String>, capability: DeviceCapability) -> Self {
        let tag = NEXT_TREE.fetch_add(1, Ordering::Relaxed);
        let root = PageId { tree: tag, index: 0 };
        Self {
            tag,
            pages: vec![Page::new(root, root_name.into(), None, capability)],
            capability,
            back_icon: IconRef::new(DEFAULT_BACK_ICON),
        }
    }

    pub fn with_back_icon(mut self, icon: impl Into<IconRef>) -> Self {
        self.back_icon = icon.into();
        self
    }

    pub fn root(&self) -> PageId {
        self.id_at(0)
    }

    fn id_at(&self, index: usize) -> PageId {
        PageId {
            tree: self.tag,
            index,
        }
    }

    pub fn capability(&self) -> &DeviceCapability {
        &self.capability
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn contains(&self, id: PageId) -> bool {
        id.tree == self.tag && id.index < self.pages.len()
    }

    pub fn page(&self, id: PageId) -> Option<&Page> {
        if id.tree != self.tag {
            return None;
        }
        self.pages.get(id.index)
    }

    pub fn page_mut(&mut self, id: PageId) -> Option<&mut Page> {
        if id.tree != self.tag {
            return None;
        }
        self.pages.get_mut(id.index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }

    /// First page with `name`, searching in creation order.
    pub fn find(&self, name: &str) -> Option<PageId> {
        self.pages
            .iter()
            .find(|page| page.name() == name)
            .map(Page::id)
    }

    /// Page names from the root down to `id`.
    pub fn breadcrumb(&self, id: PageId) -> Vec<&str> {
        let mut names = Vec::new();
        let mut cursor = self.page(id);
        while let Some(page) = cursor {
            names.push(page.name());
            cursor = page.parent().and_then(|parent| self.page(parent));
        }
        names.reverse();
        names
    }

    /// Create a child of `parent` reachable from the key at `coordinates`.
    ///
    /// The child gets a back button at (0, 0) targeting `parent`; `parent`
    /// gets a forward button at `coordinates` targeting the child. On any
    /// failure the tree is left untouched.
    pub fn create_child(
        &mut self,
        parent: PageId,
        name: impl Into<String>,
        icon: impl Into<IconRef>,
        coordinates: impl Into<GridPos>,
    ) -> Result<PageId, ConfigError> {
        let name = name.into();
        let pos = coordinates.into();
        let Some(parent_page) = self.page(parent) else {
            let err = ConfigError::UnknownPage(parent);
            tracing::error!(child = %name, error = %err, "page not created");
            return Err(err);
        };
        if let Err(err) = parent_page.check_grid(pos) {
            tracing::error!(
                parent = parent_page.name(),
                child = %name,
                error = %err,
                "page not created"
            );
            return Err(err);
        }
        if parent_page.button(pos).is_some() {
            let err = ConfigError::SlotOccupied("button");
            tracing::error!(
                parent = parent_page.name(),
                child = %name,
                %pos,
                error = %err,
                "page not created"
            );
            return Err(err);
        }

        let child_id = self.id_at(self.pages.len());
        let mut child = Page::new(child_id, name.clone(), Some(parent), self.capability);
        let mut back = Button::new(
            GridPos::new(0, 0),
            StateSet::from(vec![ItemState::new(self.back_icon.clone(), "Back")]),
        );
        back.attach_action(Action::GoTo(parent));
        child.place_button(back);

        let mut forward = Button::new(
            pos,
            StateSet::from(vec![ItemState::new(icon, name.clone())]),
        );
        forward.attach_action(Action::GoTo(child_id));

        self.pages.push(child);
        let parent_page = &mut self.pages[parent.index];
        parent_page.place_button(forward);
        parent_page.children.push(child_id);
        tracing::info!(parent = parent_page.name(), child = %name, %pos, "page created");
        Ok(child_id)
    }
}
