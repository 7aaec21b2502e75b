//! Dropdown open state

use serde::{Deserialize, Serialize};

/// Open/closed state of a single dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenState {
    #[default]
    Closed,
    Open,
}

impl OpenState {
    pub fn is_open(self) -> bool {
        self == OpenState::Open
    }

    /// The state a toggle request leads to.
    ///
    /// An explicit value wins; otherwise the current state is negated.
    pub fn toggled(self, explicit: Option<bool>) -> Self {
        match explicit {
            Some(open) => Self::from(open),
            None if self.is_open() => OpenState::Closed,
            None => OpenState::Open,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OpenState::Closed => "closed",
            OpenState::Open => "open",
        }
    }
}

impl From<bool> for OpenState {
    fn from(open: bool) -> Self {
        if open {
            OpenState::Open
        } else {
            OpenState::Closed
        }
    }
}
