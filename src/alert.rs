//! Modal alert box.
//!
//! While open, an alert captures every key press; `enter` or `esc` closes it.

use bubbletea_rs::{KeyMsg, Msg};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

use crate::key::{self, Binding};

#[derive(Debug, Clone)]
pub struct Model {
    message: Option<String>,
    pub dismiss: Binding,
    pub style: Style,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            message: None,
            dismiss: key::new_binding(vec![
                key::with_keys_str(&["enter", "esc"]),
                key::with_help("enter", "dismiss"),
            ]),
            style: Style::new()
                .border_style(lipgloss::normal_border())
                .border_top(true)
                .border_right(true)
                .border_bottom(true)
                .border_left(true)
                .border_foreground(lipgloss::Color::from("#FF5F87"))
                .padding(1, 2, 1, 2),
        }
    }
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn dismiss(&mut self) {
        self.message = None;
    }

    pub fn is_open(&self) -> bool {
        self.message.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns true when the message was consumed by an open alert.
    pub fn update(&mut self, msg: &Msg) -> bool {
        if !self.is_open() {
            return false;
        }
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.dismiss.matches(key_msg) {
                self.dismiss();
            }
            return true;
        }
        false
    }

    pub fn view(&self) -> String {
        match &self.message {
            Some(message) => self.style.render(message),
            None => String::new(),
        }
    }
}

impl key::KeyMap for Model {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.dismiss]
    }
}
