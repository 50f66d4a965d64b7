//! Context-tree keyboard shortcut resolution
//!
//! This module provides a hierarchical keybinding system that:
//! - Organizes bindings in a tree of contexts ("app" → "editor" → "find")
//! - Resolves a key press from the active context upward ("bubbling")
//! - Resolves the `defmod` placeholder to Cmd on macOS, Ctrl elsewhere
//! - Falls back to the physical key code for digits, letters and arrows
//!
//! # Architecture
//!
//! ```text
//! RawNode --preprocess()--> ShortcutTree
//! winit::KeyEvent → KeyEvent → resolve(tree, active context) → Handler
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let bus = KeyBus::new();
//! let mut shortcuts = ShortcutManager::new(bus.clone());
//! shortcuts.initialize(
//!     &RawNode::new("app")
//!         .dispatch("escape", Command::CloseModal)
//!         .child(RawNode::new("editor").dispatch("defmod-s", Command::Save)),
//!     InitOptions::with_dispatch(|command, _event| run(command)),
//! );
//! shortcuts.set_context("editor");
//!
//! // In the event loop, for every keydown:
//! bus.emit(&key_event_from_winit(&logical_key, physical_key, modifiers));
//! ```

mod config;
mod event;
mod handler;
mod matcher;
mod parser;
mod platform;
mod runtime;
mod tree;
mod types;
mod winit_adapter;

pub use config::{
    load_keymap_file, load_keymap_file_with, parse_keymap_yaml, parse_keymap_yaml_with,
    BindingConfig, KeymapError, LoadOptions, NodeConfig,
};
pub use event::KeyEvent;
pub use handler::{Callback, DispatchCallback, Handler};
pub use matcher::{
    effective_bindings, find_node_by_id, resolve, resolve_match, EffectiveBinding, Resolution,
};
pub use parser::parse_combination;
pub use platform::{is_macos, is_windows, resolve_combo, resolve_variant, Platform, DEFMOD};
pub use runtime::{
    ContextHandle, InitOptions, InputSource, KeyBus, Listener, ListenerId, ShortcutManager,
};
pub use tree::{preprocess, Ancestors, NodeId, RawNode, ShortcutNode, ShortcutTree};
pub use types::{KeyCombination, Modifiers};
pub use winit_adapter::{key_event_from_winit, keydown_from_winit};
