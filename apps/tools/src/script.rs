//! Interaction scripts for `replay`, written as TOML:
//!
//! ```toml
//! today = "2026-10-18"
//!
//! [[steps]]
//! action = "scroll"
//! y = 1200.0
//! ```

use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub today: Option<NaiveDate>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Load,
    Scroll { y: f64 },
    Advance { ms: u64 },
    /// Runs every pending timer.
    Settle,
    Click { selector: String },
    /// Calls the page's `scrollToSection` directly, as an inline handler would.
    Navigate { href: String },
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
    },
    Fill { field: String, value: String },
    Submit,
    Intersect,
    Error { detail: String },
    Paint { name: String, start_ms: f64 },
}

impl Script {
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        toml::from_str(raw).context("failed to parse interaction script")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_steps() {
        let script = Script::from_toml_str(
            r##"
            today = "2026-10-18"

            [[steps]]
            action = "load"

            [[steps]]
            action = "key"
            key = "k"
            ctrl = true

            [[steps]]
            action = "navigate"
            href = "#about"
            "##,
        )
        .expect("script");

        assert_eq!(script.today, NaiveDate::from_ymd_opt(2026, 10, 18));
        assert_eq!(
            script.steps,
            vec![
                Step::Load,
                Step::Key {
                    key: "k".into(),
                    ctrl: true
                },
                Step::Navigate {
                    href: "#about".into()
                },
            ]
        );
    }

    #[test]
    fn unknown_action_is_rejected() {
        let err = Script::from_toml_str("[[steps]]\naction = \"teleport\"\n").expect_err("unknown");
        assert!(format!("{err:#}").contains("teleport"));
    }
}
