//! Visual states an item cycles through.

/// Opaque asset handle resolved by the rasterizer (typically a path).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconRef(String);

impl IconRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IconRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for IconRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for IconRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One icon + label pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemState {
    pub icon: Option<IconRef>,
    pub label: Option<String>,
}

impl ItemState {
    pub fn new(icon: impl Into<IconRef>, label: impl Into<String>) -> Self {
        Self {
            icon: Some(icon.into()),
            label: Some(label.into()),
        }
    }

    pub fn icon(icon: impl Into<IconRef>) -> Self {
        Self {
            icon: Some(icon.into()),
            label: None,
        }
    }

    pub fn label(label: impl Into<String>) -> Self {
        Self {
            icon: None,
            label: Some(label.into()),
        }
    }
}

/// Ordered states of one item. Grows only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateSet {
    states: Vec<ItemState>,
}

impl StateSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_state(&mut self, icon: Option<IconRef>, label: Option<String>) {
        self.states.push(ItemState { icon, label });
    }

    pub fn push(&mut self, state: ItemState) {
        self.states.push(state);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// State at `index` taken modulo the length.
    pub fn get(&self, index: usize) -> Option<&ItemState> {
        if self.states.is_empty() {
            return None;
        }
        self.states.get(index % self.states.len())
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut ItemState> {
        if self.states.is_empty() {
            return None;
        }
        let len = self.states.len();
        self.states.get_mut(index % len)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemState> {
        self.states.iter()
    }
}

impl From<Vec<ItemState>> for StateSet {
    fn from(states: Vec<ItemState>) -> Self {
        Self { states }
    }
}

impl FromIterator<ItemState> for StateSet {
    fn from_iter<T: IntoIterator<Item = ItemState>>(iter: T) -> Self {
        Self {
            states: iter.into_iter().collect(),
        }
    }
}
