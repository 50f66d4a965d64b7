//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use bubblekeys::keymap::{InitOptions, KeyBus, KeyEvent, Platform, RawNode, ShortcutManager};

/// Editor-shaped tree used across tests
///
/// ```text
/// app        escape, defmod-s, defmod-shift-p
/// ├─ editor  defmod-s, ctrl-space, shift-5
/// │  └─ find escape, enter
/// └─ sidebar arrowup, arrowdown
/// ```
pub fn editor_tree() -> RawNode<String> {
    RawNode::new("app")
        .dispatch("escape", "CloseModal".to_string())
        .dispatch("defmod-s", "SaveAll".to_string())
        .dispatch("defmod-shift-p", "CommandPalette".to_string())
        .child(
            RawNode::new("editor")
                .dispatch("defmod-s", "SaveFile".to_string())
                .dispatch("ctrl-space", "Complete".to_string())
                .dispatch("shift-5", "MatchBracket".to_string())
                .child(
                    RawNode::new("find")
                        .dispatch("escape", "CloseFind".to_string())
                        .dispatch("enter", "FindNext".to_string()),
                ),
        )
        .child(
            RawNode::new("sidebar")
                .dispatch("arrowup", "SelectPrevious".to_string())
                .dispatch("arrowdown", "SelectNext".to_string()),
        )
}

/// Payloads delivered to the dispatch callback, in order
#[derive(Clone, Default)]
pub struct Dispatched(Rc<RefCell<Vec<String>>>);

impl Dispatched {
    pub fn options(&self) -> InitOptions<String> {
        let sink = Rc::clone(&self.0);
        InitOptions::with_dispatch(move |command: &String, _: &KeyEvent| {
            sink.borrow_mut().push(command.clone())
        })
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

/// A manager initialized with [`editor_tree`], recording dispatched payloads
pub fn editor_manager(platform: Platform) -> (KeyBus, ShortcutManager<String>, Dispatched) {
    let bus = KeyBus::new();
    let dispatched = Dispatched::default();
    let mut manager = ShortcutManager::with_platform(bus.clone(), platform);
    manager.initialize(&editor_tree(), dispatched.options());
    (bus, manager, dispatched)
}

pub fn key(key: &str, code: &str) -> KeyEvent {
    KeyEvent::new(key, code)
}
