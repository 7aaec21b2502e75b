//! Outside-click detection.

use serde::{Deserialize, Serialize};

use crate::element::ToggleElement;
use crate::event::ClickEvent;

/// Whether a click counts as "outside" a dropdown's toggle element.
///
/// Returns `false` only when the event exists, the toggle element exists, and
/// the toggle element contains the event's target. A missing event or a missing
/// toggle element is treated as outside.
pub fn is_outside_click(event: Option<&ClickEvent>, toggle: Option<&dyn ToggleElement>) -> bool {
    match (event, toggle) {
        (Some(event), Some(toggle)) => !toggle.contains(event.target),
        _ => true,
    }
}

/// Which document clicks may dismiss an open dropdown.
///
/// Only the click channel consults this. Escape, explicit toggles, navigation
/// and being superseded by another dropdown close regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoClose {
    /// Any click outside the toggle element closes.
    #[default]
    Always,
    /// Clicks inside the menu element are also kept open.
    OutsideClick,
    /// Clicks never close.
    Disabled,
}

impl AutoClose {
    /// Apply the policy to a click, given the toggle and (optional) menu element.
    pub fn should_dismiss(
        self,
        event: &ClickEvent,
        toggle: Option<&dyn ToggleElement>,
        menu: Option<&dyn ToggleElement>,
    ) -> bool {
        match self {
            AutoClose::Disabled => false,
            AutoClose::Always => is_outside_click(Some(event), toggle),
            AutoClose::OutsideClick => {
                is_outside_click(Some(event), toggle) && is_outside_click(Some(event), menu)
            }
        }
    }
}
