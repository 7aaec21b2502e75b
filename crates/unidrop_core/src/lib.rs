//! unidrop_core - single-open dropdown coordination
//!
//! Keeps at most one dropdown open across a whole interface. An open dropdown
//! closes when the user clicks outside its toggle element, presses Escape,
//! navigates away, toggles it, or opens another dropdown.
//!
//! The engine is host-agnostic: elements, document-wide event channels and
//! rendering are reached through the traits in [`element`] and
//! [`coordinator`]. Everything runs synchronously on the UI thread.

mod binding;
mod callback;
pub mod constants;
pub mod coordinator;
pub mod dismissal;
mod dropdown;
pub mod element;
mod event;
mod macros;
mod state;

#[cfg(test)]
mod testing;

pub use binding::ToggleBinding;
pub use callback::{Callback, Observers, SubscriptionId};
pub use coordinator::{Coordinator, DismissalChannels, DropdownHandle, DropdownId};
pub use dismissal::{is_outside_click, AutoClose};
pub use dropdown::{Dropdown, DropdownBuilder};
pub use element::{ClassTarget, ToggleAttributes, ToggleElement};
pub use event::{Channel, ClickEvent, ElementId, KeyEvent, ToggleEvent};
pub use state::OpenState;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::binding::ToggleBinding;
    pub use crate::coordinator::{Coordinator, DismissalChannels, DropdownHandle, DropdownId};
    pub use crate::dismissal::AutoClose;
    pub use crate::dropdown::Dropdown;
    pub use crate::element::{ClassTarget, ToggleAttributes, ToggleElement};
    pub use crate::event::{Channel, ClickEvent, ElementId, KeyEvent, ToggleEvent};
    pub use crate::state::OpenState;
}
