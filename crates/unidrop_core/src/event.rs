//! Events delivered by the global dismissal channels.

use serde::{Deserialize, Serialize};

use crate::constants::ESCAPE_KEY_CODE;

/// Opaque identity of a host UI element.
///
/// The engine never inspects it; it is only handed back to
/// [`ToggleElement::contains`](crate::ToggleElement::contains).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u64);

/// The document-wide streams the coordinator subscribes to while a dropdown is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Pointer clicks anywhere in the document.
    Click,
    /// Key presses anywhere in the document.
    KeyDown,
}

impl Channel {
    /// Both channels, in subscription order.
    pub const ALL: [Channel; 2] = [Channel::Click, Channel::KeyDown];
}

/// A pointer click that reached the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    /// The element the click was dispatched to.
    pub target: ElementId,
}

impl ClickEvent {
    pub fn new(target: ElementId) -> Self {
        Self { target }
    }
}

/// A key press that reached the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key_code: u32,
}

impl KeyEvent {
    pub fn new(key_code: u32) -> Self {
        Self { key_code }
    }

    pub fn escape() -> Self {
        Self::new(ESCAPE_KEY_CODE)
    }

    pub fn is_escape(&self) -> bool {
        self.key_code == ESCAPE_KEY_CODE
    }
}

/// Payload of the `on_toggle` callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleEvent {
    pub open: bool,
}
