//! Core types for the keymap system: Modifiers, KeyCombination

use std::fmt;

use super::platform::Platform;

/// Modifier keys as a bitfield for efficient storage and comparison
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const ALT: Modifiers = Modifiers(0b0_0001);
    pub const CMD: Modifiers = Modifiers(0b0_0010); // the meta flag on every platform
    pub const CTRL: Modifiers = Modifiers(0b0_0100);
    pub const SHIFT: Modifiers = Modifiers(0b0_1000);
    /// Set when a binding names a modifier we don't know; no event carries it
    pub const UNKNOWN: Modifiers = Modifiers(0b1_0000);

    /// Create modifiers from individual flags
    pub const fn new(alt: bool, cmd: bool, ctrl: bool, shift: bool) -> Self {
        let mut bits = 0u8;
        if alt {
            bits |= Self::ALT.0;
        }
        if cmd {
            bits |= Self::CMD.0;
        }
        if ctrl {
            bits |= Self::CTRL.0;
        }
        if shift {
            bits |= Self::SHIFT.0;
        }
        Modifiers(bits)
    }

    /// Map an already case-folded modifier token
    ///
    /// `defmod` is not handled here; it is resolved against a platform first.
    pub fn from_token(token: &str) -> Option<Modifiers> {
        match token {
            "alt" | "option" => Some(Modifiers::ALT),
            "cmd" | "meta" => Some(Modifiers::CMD),
            "ctrl" | "control" => Some(Modifiers::CTRL),
            "shift" => Some(Modifiers::SHIFT),
            _ => None,
        }
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & Self::ALT.0 != 0
    }

    #[inline]
    pub const fn cmd(self) -> bool {
        self.0 & Self::CMD.0 != 0
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & Self::CTRL.0 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & Self::SHIFT.0 != 0
    }

    /// Whether a binding named a modifier outside the known set
    #[inline]
    pub const fn has_unknown(self) -> bool {
        self.0 & Self::UNKNOWN.0 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Check if this contains all modifiers in other
    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Canonical token names, in fixed order
    pub fn tokens(self) -> Vec<&'static str> {
        let mut tokens = Vec::with_capacity(4);
        if self.alt() {
            tokens.push("alt");
        }
        if self.cmd() {
            tokens.push("cmd");
        }
        if self.ctrl() {
            tokens.push("ctrl");
        }
        if self.shift() {
            tokens.push("shift");
        }
        if self.has_unknown() {
            tokens.push("unknown");
        }
        tokens
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens().join("-"))
    }
}

/// Canonical, comparable form of a shortcut such as `ctrl-shift-s`
///
/// Equality is by modifier set and key token, both case-folded.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCombination {
    pub mods: Modifiers,
    pub key: String,
}

impl KeyCombination {
    /// Create a combination; the key token is lowercased
    pub fn new(mods: Modifiers, key: &str) -> Self {
        Self {
            mods,
            key: key.to_lowercase(),
        }
    }

    /// Create a combination with no modifiers
    pub fn key(key: &str) -> Self {
        Self::new(Modifiers::NONE, key)
    }

    /// Display the combination using platform-specific symbols
    pub fn display_string(&self, platform: Platform) -> String {
        let mut parts = Vec::new();

        if platform.is_macos() {
            // macOS uses symbols: ⌃ ⌥ ⇧ ⌘
            if self.mods.ctrl() {
                parts.push("⌃");
            }
            if self.mods.alt() {
                parts.push("⌥");
            }
            if self.mods.shift() {
                parts.push("⇧");
            }
            if self.mods.cmd() {
                parts.push("⌘");
            }
        } else {
            if self.mods.ctrl() {
                parts.push("Ctrl+");
            }
            if self.mods.alt() {
                parts.push("Alt+");
            }
            if self.mods.shift() {
                parts.push("Shift+");
            }
            if self.mods.cmd() {
                parts.push("Win+");
            }
        }

        format!("{}{}", parts.join(""), display_key(&self.key))
    }
}

fn display_key(key: &str) -> String {
    match key {
        "arrowup" | "up" => "↑".to_string(),
        "arrowdown" | "down" => "↓".to_string(),
        "arrowleft" | "left" => "←".to_string(),
        "arrowright" | "right" => "→".to_string(),
        _ => {
            let mut chars = key.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}-{}", self.mods, self.key)
        }
    }
}
