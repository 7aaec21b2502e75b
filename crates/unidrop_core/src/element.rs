//! Capabilities the engine needs from host UI elements.
//!
//! The host implements these for whatever its elements are (DOM nodes, widget
//! ids, terminal regions). The engine only ever talks to elements through them.

use crate::event::ElementId;

/// The element that triggers and anchors a dropdown.
pub trait ToggleElement {
    /// Whether `target` is this element or lies inside it.
    fn contains(&self, target: ElementId) -> bool;

    /// Move input focus to this element.
    fn focus(&self);
}

/// Rendering collaborator receiving the dropdown's open class.
pub trait ClassTarget {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
}

/// Accessibility collaborator for a toggle element.
pub trait ToggleAttributes {
    /// Mirror the dropdown's open state (`aria-expanded`).
    fn set_expanded(&self, expanded: bool);

    /// Announce that the element controls a popup (`aria-haspopup`).
    fn set_has_popup(&self, has_popup: bool);
}
