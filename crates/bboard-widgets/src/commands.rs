#![forbid(unsafe_code)]

//! Presentation-facing command surface.
//!
//! The host's view layer talks to the panel through [`BlackboardCommands`]
//! instead of holding callbacks into it: a drag-and-drop drop calls
//! `request_move`, an add-item menu choice calls `request_add`, and a
//! context action on a row calls `request_edit`.

use bboard_core::property::{PropertyId, PropertyKind};

/// An editable text surface of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditSurface {
    /// The category path label under the title.
    Path,
    /// The name label of a property row.
    Property(PropertyId),
}

/// Commands a presentation layer may issue.
pub trait BlackboardCommands {
    /// Open the inline editor on `surface`.
    ///
    /// Returns `false` if the surface does not exist.
    fn request_edit(&mut self, surface: EditSurface) -> bool;

    /// Create a property of `kind` with its default name.
    fn request_add(&mut self, kind: PropertyKind) -> PropertyId;

    /// Move a property to `index` in the canonical order.
    ///
    /// Returns `false` if nothing moved.
    fn request_move(&mut self, id: PropertyId, index: usize) -> bool;
}
