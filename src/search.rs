//! Keyword input for the data browser.
//!
//! A single-line text field. Editing works on grapheme clusters so that
//! backspace removes what the user sees as one character, including the
//! combined forms common in Japanese food names.

use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use unicode_segmentation::UnicodeSegmentation;

use crate::Component;

#[derive(Debug, Clone)]
pub struct Model {
    pub prompt: String,
    pub placeholder: String,
    value: String,
    /// Cursor position in graphemes.
    position: usize,
    focus: bool,
    pub prompt_style: Style,
    pub placeholder_style: Style,
    pub cursor_style: Style,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            prompt: "Search: ".to_string(),
            placeholder: "keyword".to_string(),
            value: String::new(),
            position: 0,
            focus: false,
            prompt_style: Style::new().foreground(lipgloss::Color::from("#7571F9")),
            placeholder_style: Style::new().foreground(lipgloss::Color::from("#626262")),
            cursor_style: Style::new().reverse(true),
        }
    }
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.position = self.grapheme_len();
    }

    fn grapheme_len(&self) -> usize {
        self.value.graphemes(true).count()
    }

    /// Byte offset of the grapheme at `index`, or the end of the value.
    fn byte_offset(&self, index: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.value.len())
    }

    pub fn insert(&mut self, c: char) {
        let offset = self.byte_offset(self.position);
        self.value.insert(offset, c);
        // a combining mark merges into the previous grapheme
        let len = self.grapheme_len();
        let before = self.value[..offset + c.len_utf8()].graphemes(true).count();
        self.position = before.min(len);
    }

    pub fn backspace(&mut self) {
        if self.position == 0 {
            return;
        }
        let start = self.byte_offset(self.position - 1);
        let end = self.byte_offset(self.position);
        self.value.replace_range(start..end, "");
        self.position -= 1;
    }

    pub fn delete(&mut self) {
        if self.position >= self.grapheme_len() {
            return;
        }
        let start = self.byte_offset(self.position);
        let end = self.byte_offset(self.position + 1);
        self.value.replace_range(start..end, "");
    }

    pub fn cursor_left(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.position = (self.position + 1).min(self.grapheme_len());
    }

    pub fn cursor_start(&mut self) {
        self.position = 0;
    }

    pub fn cursor_end(&mut self) {
        self.position = self.grapheme_len();
    }

    /// Applies an editing key. Enter and Esc are left to the owner.
    pub fn update(&mut self, msg: &Msg) {
        if !self.focus {
            return;
        }
        let Some(key_msg) = msg.downcast_ref::<KeyMsg>() else {
            return;
        };
        self.handle_key(key_msg);
    }

    pub fn handle_key(&mut self, key_msg: &KeyMsg) {
        let ctrl = key_msg.modifiers.contains(KeyModifiers::CONTROL);
        match key_msg.key {
            KeyCode::Char('u') if ctrl => {
                let end = self.byte_offset(self.position);
                self.value.replace_range(..end, "");
                self.position = 0;
            }
            KeyCode::Char('a') if ctrl => self.cursor_start(),
            KeyCode::Char('e') if ctrl => self.cursor_end(),
            KeyCode::Char(c) if !ctrl => self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.cursor_left(),
            KeyCode::Right => self.cursor_right(),
            KeyCode::Home => self.cursor_start(),
            KeyCode::End => self.cursor_end(),
            _ => {}
        }
    }

    pub fn view(&self) -> String {
        let prompt = self.prompt_style.clone().inline(true).render(&self.prompt);

        if self.value.is_empty() && !self.focus {
            let placeholder = self
                .placeholder_style
                .clone()
                .inline(true)
                .render(&self.placeholder);
            return format!("{prompt}{placeholder}");
        }
        if !self.focus {
            return format!("{prompt}{}", self.value);
        }

        let graphemes: Vec<&str> = self.value.graphemes(true).collect();
        let before: String = graphemes[..self.position].concat();
        let (under, after) = match graphemes.get(self.position) {
            Some(g) => (g.to_string(), graphemes[self.position + 1..].concat()),
            None => (" ".to_string(), String::new()),
        };
        let cursor = self.cursor_style.clone().inline(true).render(&under);
        format!("{prompt}{before}{cursor}{after}")
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
