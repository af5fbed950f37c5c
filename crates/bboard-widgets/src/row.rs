#![forbid(unsafe_code)]

//! Row view models and the section that lays them out.
//!
//! A [`BlackboardRow`] is what the host draws for one property: an editable
//! name, the kind's type text and an expansion toggle. The [`Section`] is the
//! visual container; it only knows the order of attached [`RowHandle`]s.

use bboard_core::property::{Property, PropertyId, PropertyKind};

/// Opaque handle identifying a row in the host's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowHandle(u64);

impl RowHandle {
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// View model of one property row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlackboardRow {
    handle: RowHandle,
    property: PropertyId,
    kind: PropertyKind,
    /// Editable name text.
    text: String,
    expanded: bool,
}

impl BlackboardRow {
    /// Build a collapsed row for `property`.
    #[must_use]
    pub fn new(handle: RowHandle, property: &Property) -> Self {
        Self {
            handle,
            property: property.id(),
            kind: property.kind(),
            text: property.display_name().to_owned(),
            expanded: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn handle(&self) -> RowHandle {
        self.handle
    }

    /// Id of the property the row shows.
    #[inline]
    #[must_use]
    pub fn property(&self) -> PropertyId {
        self.property
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> PropertyKind {
        self.kind
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Type label shown beside the name.
    #[must_use]
    pub fn type_text(&self) -> &'static str {
        self.kind.label()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    #[inline]
    #[must_use]
    pub fn expanded(&self) -> bool {
        self.expanded
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    /// Flip the expansion state, returning the new state.
    pub fn toggle_expanded(&mut self) -> bool {
        self.expanded = !self.expanded;
        self.expanded
    }
}

/// Visual container holding the attached rows in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    children: Vec<RowHandle>,
    scrollable: bool,
}

impl Section {
    /// Create an empty section.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the section scrolls (builder).
    #[must_use]
    pub fn with_scrollable(mut self, scrollable: bool) -> Self {
        self.scrollable = scrollable;
        self
    }

    #[inline]
    #[must_use]
    pub fn scrollable(&self) -> bool {
        self.scrollable
    }

    /// Attached rows in display order.
    #[must_use]
    pub fn children(&self) -> &[RowHandle] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    #[must_use]
    pub fn contains(&self, handle: RowHandle) -> bool {
        self.children.contains(&handle)
    }

    /// Attach `handle` at `index`, clamped to `[0, len]`.
    pub fn insert(&mut self, index: usize, handle: RowHandle) {
        let at = index.min(self.children.len());
        self.children.insert(at, handle);
    }

    /// Attach `handle` at the end.
    pub fn push(&mut self, handle: RowHandle) {
        self.children.push(handle);
    }

    /// Detach `handle`. Returns `false` if it was not attached.
    pub fn detach(&mut self, handle: RowHandle) -> bool {
        match self.children.iter().position(|&h| h == handle) {
            Some(pos) => {
                self.children.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Detach every row.
    pub fn detach_all(&mut self) {
        self.children.clear();
    }
}
