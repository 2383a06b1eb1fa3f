//! Key bindings and the `KeyMap` trait used by the help line.
//!
//! A [`Binding`] groups the key presses that trigger one action together with
//! the text shown for it in help views.
//!
//! ```rust
//! use nutrition_tui::key;
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let next = key::new_binding(vec![
//!     key::with_keys_str(&["right", "l"]),
//!     key::with_help("→/l", "next"),
//! ]);
//!
//! let msg = KeyMsg { key: KeyCode::Char('l'), modifiers: KeyModifiers::NONE };
//! assert!(next.matches(&msg));
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key press: a key code plus modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

impl From<&str> for KeyPress {
    /// Parses names such as `"enter"`, `"ctrl+c"`, `"pgdown"` or `"G"`.
    fn from(s: &str) -> Self {
        let (modifiers, name) = match s.strip_prefix("ctrl+") {
            Some(rest) => (KeyModifiers::CONTROL, rest),
            None => match s.strip_prefix("alt+") {
                Some(rest) => (KeyModifiers::ALT, rest),
                None => (KeyModifiers::NONE, s),
            },
        };

        let code = match name {
            "enter" => KeyCode::Enter,
            "esc" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "shift+tab" => KeyCode::BackTab,
            "backspace" => KeyCode::Backspace,
            "delete" => KeyCode::Delete,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pgup" => KeyCode::PageUp,
            "pgdown" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => KeyCode::Null,
                }
            }
        };

        Self { code, modifiers }
    }
}

/// Help text for a binding: the key label and what it does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    pub key: String,
    pub desc: String,
}

/// An action's key presses plus its help text.
///
/// Build one with [`new_binding`] and the `with_*` options.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

/// An option applied by [`new_binding`].
pub type BindingOpt = Box<dyn FnOnce(&mut Binding)>;

/// Creates a binding from a list of options, applied in order.
///
/// # Examples
///
/// ```rust
/// use nutrition_tui::key;
///
/// let quit = key::new_binding(vec![
///     key::with_keys_str(&["q", "ctrl+c"]),
///     key::with_help("q", "quit"),
/// ]);
/// assert_eq!(quit.keys().len(), 2);
/// assert_eq!(quit.help().desc, "quit");
/// ```
pub fn new_binding(opts: Vec<BindingOpt>) -> Binding {
    let mut binding = Binding::default();
    for opt in opts {
        opt(&mut binding);
    }
    binding
}

/// Sets the binding's keys from names such as `"enter"` or `"ctrl+c"`.
pub fn with_keys_str(keys: &[&str]) -> BindingOpt {
    let keys: Vec<KeyPress> = keys.iter().map(|&k| KeyPress::from(k)).collect();
    Box::new(move |b: &mut Binding| b.keys = keys)
}

/// Sets the binding's keys from key codes or `(code, modifiers)` pairs.
pub fn with_keys<K: Into<KeyPress>>(keys: Vec<K>) -> BindingOpt {
    let keys: Vec<KeyPress> = keys.into_iter().map(Into::into).collect();
    Box::new(move |b: &mut Binding| b.keys = keys)
}

/// Sets the help text shown for the binding.
pub fn with_help(key: impl Into<String>, desc: impl Into<String>) -> BindingOpt {
    let help = Help {
        key: key.into(),
        desc: desc.into(),
    };
    Box::new(move |b: &mut Binding| b.help = help)
}

/// Starts the binding disabled.
pub fn with_disabled() -> BindingOpt {
    Box::new(|b: &mut Binding| b.disabled = true)
}

impl Binding {
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Reports whether `msg` is one of this binding's key presses.
    ///
    /// Shift is ignored for character keys since terminals report `G` both with
    /// and without it.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        if !self.enabled() {
            return false;
        }
        self.keys.iter().any(|press| {
            if press.code != msg.key {
                return false;
            }
            match msg.key {
                KeyCode::Char(_) => {
                    press.modifiers == msg.modifiers.difference(KeyModifiers::SHIFT)
                }
                _ => press.modifiers == msg.modifiers,
            }
        })
    }
}

/// Types that expose their bindings to the help line.
pub trait KeyMap {
    fn short_help(&self) -> Vec<&Binding>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers,
        }
    }

    #[test]
    fn parses_named_keys() {
        assert_eq!(KeyPress::from("enter").code, KeyCode::Enter);
        assert_eq!(KeyPress::from("pgdown").code, KeyCode::PageDown);
        assert_eq!(KeyPress::from("G").code, KeyCode::Char('G'));

        let ctrl_c = KeyPress::from("ctrl+c");
        assert_eq!(ctrl_c.code, KeyCode::Char('c'));
        assert_eq!(ctrl_c.modifiers, KeyModifiers::CONTROL);

        assert_eq!(KeyPress::from("nonsense").code, KeyCode::Null);
    }

    #[test]
    fn matches_respects_modifiers() {
        let quit = new_binding(vec![with_keys_str(&["ctrl+c"])]);
        assert!(quit.matches(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!quit.matches(&key(KeyCode::Char('c'), KeyModifiers::NONE)));

        let last = new_binding(vec![with_keys_str(&["G"])]);
        assert!(last.matches(&key(KeyCode::Char('G'), KeyModifiers::SHIFT)));
        assert!(last.matches(&key(KeyCode::Char('G'), KeyModifiers::NONE)));
    }

    #[test]
    fn disabled_binding_never_matches() {
        let mut next = new_binding(vec![with_keys(vec![KeyCode::Right]), with_help("→", "next")]);
        assert!(next.matches(&key(KeyCode::Right, KeyModifiers::NONE)));

        next.set_enabled(false);
        assert!(!next.matches(&key(KeyCode::Right, KeyModifiers::NONE)));
        assert_eq!(next.help().desc, "next");
    }

    #[test]
    fn options_apply_in_order() {
        let binding = new_binding(vec![
            with_keys_str(&["a"]),
            with_keys(vec![(KeyCode::Char('s'), KeyModifiers::CONTROL)]),
            with_disabled(),
        ]);

        assert_eq!(binding.keys().len(), 1);
        assert_eq!(binding.keys()[0].modifiers, KeyModifiers::CONTROL);
        assert!(!binding.enabled());
        assert!(!binding.matches(&key(KeyCode::Char('s'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn binding_without_keys_is_disabled() {
        let empty = new_binding(vec![with_help("?", "nothing")]);
        assert!(!empty.enabled());
    }
}
