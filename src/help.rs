//! Single-line help listing the active key bindings.
//!
//! ```text
//! / search • ←/→ select • enter open • tab optimizer • q quit
//! ```

use crate::key;
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Styles for the help line.
#[derive(Debug, Clone)]
pub struct Styles {
    pub key: Style,
    pub desc: Style,
    pub separator: Style,
}

impl Default for Styles {
    fn default() -> Self {
        use lipgloss::AdaptiveColor;

        Self {
            key: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            desc: Style::new().foreground(AdaptiveColor {
                Light: "#B2B2B2",
                Dark: "#4A4A4A",
            }),
            separator: Style::new().foreground(AdaptiveColor {
                Light: "#DDDADA",
                Dark: "#3C3C3C",
            }),
        }
    }
}

/// Renders bindings as `key desc` pairs joined by a separator.
#[derive(Debug, Clone)]
pub struct Model {
    /// Maximum visible width; 0 disables truncation.
    pub width: usize,
    pub separator: String,
    pub ellipsis: String,
    pub styles: Styles,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            width: 0,
            separator: " • ".to_string(),
            ellipsis: "…".to_string(),
            styles: Styles::default(),
        }
    }
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders enabled bindings in order, stopping with an ellipsis once the
    /// next item would overflow `width`.
    pub fn short_help_view(&self, bindings: Vec<&key::Binding>) -> String {
        let separator = self
            .styles
            .separator
            .clone()
            .inline(true)
            .render(&self.separator);

        let mut out = String::new();
        let mut total_width = 0;

        for binding in bindings.into_iter().filter(|b| b.enabled()) {
            let sep = if total_width > 0 { separator.as_str() } else { "" };
            let help = binding.help();
            let item = format!(
                "{}{} {}",
                sep,
                self.styles.key.clone().inline(true).render(&help.key),
                self.styles.desc.clone().inline(true).render(&help.desc)
            );
            let item_width = lipgloss::width_visible(&item);

            if self.width > 0 && total_width + item_width > self.width {
                let tail = format!(" {}", self.ellipsis);
                if total_width + lipgloss::width_visible(&tail) <= self.width {
                    out.push_str(&self.styles.separator.clone().inline(true).render(&tail));
                }
                break;
            }

            total_width += item_width;
            out.push_str(&item);
        }

        out
    }
}
