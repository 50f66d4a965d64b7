//! bubblekeys - context-tree keyboard shortcuts
//!
//! Bindings are declared on a tree of named contexts. A key press resolves
//! from the active context toward the root, so inner contexts shadow outer
//! ones and unhandled keys bubble up.

pub mod config_paths;
pub mod keymap;
pub mod tracing;

// Re-export commonly used types
pub use keymap::{
    Handler, InitOptions, KeyBus, KeyCombination, KeyEvent, Platform, RawNode, ShortcutManager,
    ShortcutTree,
};
