//! Command-line argument parsing for the dry-run tool
//!
//! Supports:
//! - Dumping a processed keymap tree
//! - Resolving one key press against a context
//! - Listing every binding reachable from a context

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use bubblekeys::keymap::{parse_combination, KeyEvent, Platform};

/// Inspect context-tree keymaps without a window
#[derive(Parser, Debug)]
#[command(
    name = "bubblekeys",
    version,
    about = "Inspect context-tree keymaps without a window"
)]
pub struct CliArgs {
    /// Keymap file (defaults to ~/.config/bubblekeys/keymap.yaml)
    #[arg(short = 'k', long, value_name = "FILE", global = true)]
    pub keymap: Option<PathBuf>,

    /// Resolve `defmod` for this platform instead of the host
    #[arg(long, value_enum, global = true)]
    pub platform: Option<PlatformArg>,

    /// Reject duplicate or empty context ids
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the processed context tree
    Tree {
        /// Print JSON instead of an indented outline
        #[arg(long)]
        json: bool,
    },
    /// Resolve a key press as if it happened in CONTEXT
    Resolve {
        context: String,
        /// Key press written like a binding, e.g. `ctrl-shift-p`
        combo: String,
        /// Physical key code for the fallback lookup, e.g. `Digit5`
        #[arg(long, value_name = "CODE")]
        code: Option<String>,
    },
    /// List every binding reachable from CONTEXT
    Bindings { context: String },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlatformArg {
    Macos,
    Windows,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Macos => Platform::MacOS,
            PlatformArg::Windows => Platform::Windows,
        }
    }
}

impl CliArgs {
    /// The platform bindings are resolved for
    pub fn platform(&self) -> Platform {
        self.platform.map_or_else(Platform::current, Platform::from)
    }
}

/// Build the key press a host would report for `combo`
///
/// `cmd` (and `defmod` on macOS) sets the meta flag.
pub fn synthesize_event(combo: &str, code: Option<&str>, platform: Platform) -> KeyEvent {
    let combination = parse_combination(combo, platform);
    let mods = combination.mods;

    KeyEvent {
        key: combination.key,
        code: code.unwrap_or_default().to_string(),
        alt: mods.alt(),
        meta: mods.cmd(),
        ctrl: mods.ctrl(),
        shift: mods.shift(),
    }
}
