//! Scenario steps.
//!
//! Each step is one piece of user or host input replayed against the page.

use serde::{Deserialize, Serialize};

/// One input to replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Primary click at a page coordinate
    ClickAt { x: f32, y: f32 },
    /// Primary click on a named element
    Click { target: String },
    /// Key press with a raw key code
    Key { code: u32 },
    /// Escape key press
    Escape,
    /// Programmatic toggle, optionally forcing a value
    Toggle {
        dropdown: String,
        #[serde(default)]
        open: Option<bool>,
    },
    /// Write to a dropdown's bound open state
    SetOpen { dropdown: String, open: bool },
    /// Route change
    Navigate,
    /// Unmount a dropdown
    Destroy { dropdown: String },
    /// Disable a dropdown's toggle
    Disable { dropdown: String },
    /// Re-enable a dropdown's toggle
    Enable { dropdown: String },
}

impl Step {
    /// Short label for logs.
    pub fn label(&self) -> String {
        match self {
            Step::ClickAt { x, y } => format!("click at ({x}, {y})"),
            Step::Click { target } => format!("click {target}"),
            Step::Key { code } => format!("key {code}"),
            Step::Escape => "escape".to_string(),
            Step::Toggle { dropdown, open } => match open {
                Some(open) => format!("toggle {dropdown} -> {open}"),
                None => format!("toggle {dropdown}"),
            },
            Step::SetOpen { dropdown, open } => format!("set {dropdown} open={open}"),
            Step::Navigate => "navigate".to_string(),
            Step::Destroy { dropdown } => format!("destroy {dropdown}"),
            Step::Disable { dropdown } => format!("disable {dropdown}"),
            Step::Enable { dropdown } => format!("enable {dropdown}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_parse_from_tagged_json() {
        let json = r#"[
            { "action": "click_at", "x": 12, "y": 30 },
            { "action": "click", "target": "file.toggle" },
            { "action": "key", "code": 13 },
            { "action": "escape" },
            { "action": "toggle", "dropdown": "file" },
            { "action": "toggle", "dropdown": "file", "open": false },
            { "action": "set_open", "dropdown": "view", "open": true },
            { "action": "destroy", "dropdown": "view" }
        ]"#;
        let steps: Vec<Step> = serde_json::from_str(json).unwrap();
        assert_eq!(
            steps,
            vec![
                Step::ClickAt { x: 12.0, y: 30.0 },
                Step::Click {
                    target: "file.toggle".to_string()
                },
                Step::Key { code: 13 },
                Step::Escape,
                Step::Toggle {
                    dropdown: "file".to_string(),
                    open: None
                },
                Step::Toggle {
                    dropdown: "file".to_string(),
                    open: Some(false)
                },
                Step::SetOpen {
                    dropdown: "view".to_string(),
                    open: true
                },
                Step::Destroy {
                    dropdown: "view".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_unknown_action_rejected() {
        let result: Result<Step, _> = serde_json::from_str(r#"{ "action": "hover" }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_label() {
        assert_eq!(Step::Escape.label(), "escape");
        assert_eq!(
            Step::Toggle {
                dropdown: "file".to_string(),
                open: Some(true)
            }
            .label(),
            "toggle file -> true"
        );
    }
}
