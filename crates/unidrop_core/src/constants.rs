//! Centralized constants for unidrop_core
//!
//! Key codes and default class names shared by the coordinator, the dropdown
//! state machine and the toggle binding.

// =============================================================================
// Keyboard
// =============================================================================

/// Key code reported by the keydown channel for the Escape key
pub const ESCAPE_KEY_CODE: u32 = 27;

// =============================================================================
// Rendering collaborators
// =============================================================================

/// Class applied to a dropdown's class target while it is open
pub const DEFAULT_OPEN_CLASS: &str = "open";

// =============================================================================
// Accessibility attributes
// =============================================================================

/// Attribute mirroring the open state on the toggle element
pub const ARIA_EXPANDED: &str = "aria-expanded";

/// Attribute announcing that the toggle element controls a popup
pub const ARIA_HAS_POPUP: &str = "aria-haspopup";
