//! Host platform classification and `defmod` aliasing
//!
//! Bindings can be authored once with the `defmod` placeholder, which
//! becomes `cmd` on macOS and `ctrl` everywhere else.

use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::parser::split_combo;

/// Token that marks a macOS host in a platform identification string
const MAC_OS_X_TOKEN: &str = "Mac OS X";

/// Placeholder modifier resolved per platform
pub const DEFMOD: &str = "defmod";

/// Two-way platform classification used for modifier aliasing
///
/// Anything that is not identified as macOS is treated as Windows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    MacOS,
    Windows,
}

impl Platform {
    /// Classify a platform identification string
    pub fn classify(ident: &str) -> Self {
        if ident.contains(MAC_OS_X_TOKEN) {
            Platform::MacOS
        } else {
            Platform::Windows
        }
    }

    /// Classification of the host, computed once per process
    pub fn current() -> Self {
        static CURRENT: OnceLock<Platform> = OnceLock::new();
        *CURRENT.get_or_init(|| {
            let ident = host_identifier();
            let platform = Platform::classify(&ident);
            tracing::debug!("Classified host platform {:?} as {}", ident, platform);
            platform
        })
    }

    #[inline]
    pub const fn is_macos(self) -> bool {
        matches!(self, Platform::MacOS)
    }

    #[inline]
    pub const fn is_windows(self) -> bool {
        matches!(self, Platform::Windows)
    }

    /// The modifier token `defmod` stands for on this platform
    pub const fn default_modifier(self) -> &'static str {
        match self {
            Platform::MacOS => "cmd",
            Platform::Windows => "ctrl",
        }
    }

    /// Rewrite every `defmod` segment of a combo string for this platform
    ///
    /// Other segments are left untouched, including their case.
    pub fn resolve_combo(self, spec: &str) -> String {
        split_combo(spec)
            .into_iter()
            .map(|segment| {
                if segment == DEFMOD {
                    self.default_modifier()
                } else {
                    segment
                }
            })
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Pick the macOS or Windows variant verbatim
    pub fn resolve_variant<T>(self, macos: T, windows: T) -> T {
        match self {
            Platform::MacOS => macos,
            Platform::Windows => windows,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::MacOS => write!(f, "macos"),
            Platform::Windows => write!(f, "windows"),
        }
    }
}

/// Identification string for the platform this binary runs on
fn host_identifier() -> String {
    if cfg!(target_os = "macos") {
        format!("Macintosh; Intel {}", MAC_OS_X_TOKEN)
    } else {
        format!("{}; {}", std::env::consts::OS, std::env::consts::ARCH)
    }
}

/// Whether the host is classified as macOS
pub fn is_macos() -> bool {
    Platform::current().is_macos()
}

/// Whether the host is classified as Windows (i.e. anything but macOS)
pub fn is_windows() -> bool {
    Platform::current().is_windows()
}

/// Resolve `defmod` in a combo string for the host platform
pub fn resolve_combo(spec: &str) -> String {
    Platform::current().resolve_combo(spec)
}

/// Pick the host platform's variant of a binding
pub fn resolve_variant<T>(macos: T, windows: T) -> T {
    Platform::current().resolve_variant(macos, windows)
}
