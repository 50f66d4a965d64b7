//! Key-press events at the input boundary
//!
//! A [`KeyEvent`] carries what a host reports for one physical keydown: the
//! logical key identity (`"s"`, `"%"`, `"Escape"`), the physical key code
//! (`"KeyS"`, `"Digit5"`, `"ArrowUp"`) and the four modifier flags.

use super::types::{KeyCombination, Modifiers};

/// Key identities that are modifiers on their own
const MODIFIER_KEYS: [&str; 5] = ["meta", "alt", "shift", "ctrl", "control"];

/// One physical keydown as reported by the host
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyEvent {
    /// Logical key identity, e.g. `"a"`, `"%"`, `"Escape"`
    pub key: String,
    /// Physical key code, e.g. `"KeyA"`, `"Digit5"`
    pub code: String,
    pub alt: bool,
    pub meta: bool,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyEvent {
    /// Create an event with no modifiers held
    pub fn new(key: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            code: code.into(),
            ..Self::default()
        }
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Whether the pressed key is itself a modifier (Shift, Control, Alt, Meta)
    pub fn is_modifier_only(&self) -> bool {
        let key = self.key.to_lowercase();
        MODIFIER_KEYS.contains(&key.as_str())
    }

    /// Modifier set held during this event
    ///
    /// The meta flag maps to `cmd` on every platform.
    pub fn modifiers(&self) -> Modifiers {
        Modifiers::new(self.alt, self.meta, self.ctrl, self.shift)
    }

    /// Lowercase key tokens to try, in order
    ///
    /// The key identity comes first. Digit, letter and arrow codes add their
    /// trailing part as a fallback, so `"Digit5"` still yields `"5"` when a
    /// shifted or non-Latin layout reports a different key identity.
    pub fn candidate_key_tokens(&self) -> Vec<String> {
        let mut tokens = Vec::with_capacity(2);

        if !self.key.is_empty() {
            tokens.push(self.key.to_lowercase());
        }

        if let Some(fallback) = code_fallback(&self.code) {
            if !tokens.contains(&fallback) {
                tokens.push(fallback);
            }
        }

        tokens
    }

    /// Lookup combinations for this event, in the order they are tried
    pub fn candidate_combinations(&self) -> Vec<KeyCombination> {
        let mods = self.modifiers();
        self.candidate_key_tokens()
            .into_iter()
            .map(|key| KeyCombination { mods, key })
            .collect()
    }
}

/// Trailing discriminator of a `Digit<d>`, `Key<L>` or `Arrow<Dir>` code
fn code_fallback(code: &str) -> Option<String> {
    if let Some(digit) = code.strip_prefix("Digit") {
        return single_char(digit, |c| c.is_ascii_digit());
    }
    if let Some(letter) = code.strip_prefix("Key") {
        return single_char(letter, |c| c.is_ascii_alphabetic());
    }
    if let Some(direction) = code.strip_prefix("Arrow") {
        return match direction {
            "Up" | "Down" | "Left" | "Right" => Some(direction.to_lowercase()),
            _ => None,
        };
    }
    None
}

fn single_char(rest: &str, accept: impl Fn(char) -> bool) -> Option<String> {
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if accept(c) => Some(c.to_ascii_lowercase().to_string()),
        _ => None,
    }
}
