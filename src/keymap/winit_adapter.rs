//! Adapter to convert winit key events to our KeyEvent type
//!
//! Key identities follow the names browsers report (`"Escape"`,
//! `"ArrowUp"`, `"Meta"`), and physical codes reuse winit's `KeyCode`
//! names, which already match (`"KeyS"`, `"Digit5"`).

use winit::event::{ElementState, KeyEvent as WinitKeyEvent};
use winit::keyboard::{Key, ModifiersState, NamedKey, PhysicalKey};

use super::event::KeyEvent;

/// Convert winit key data to a [`KeyEvent`]
pub fn key_event_from_winit(
    logical_key: &Key,
    physical_key: PhysicalKey,
    modifiers: ModifiersState,
) -> KeyEvent {
    KeyEvent {
        key: key_identity(logical_key),
        code: physical_code(physical_key),
        alt: modifiers.alt_key(),
        meta: modifiers.super_key(), // logo = meta = cmd on macOS
        ctrl: modifiers.control_key(),
        shift: modifiers.shift_key(),
    }
}

/// Convert a full winit keyboard event, keeping only presses
///
/// Key-up events yield `None`. Auto-repeated presses are passed through.
pub fn keydown_from_winit(event: &WinitKeyEvent, modifiers: ModifiersState) -> Option<KeyEvent> {
    if event.state != ElementState::Pressed {
        return None;
    }
    Some(key_event_from_winit(
        &event.logical_key,
        event.physical_key,
        modifiers,
    ))
}

fn key_identity(logical_key: &Key) -> String {
    match logical_key {
        Key::Character(s) => s.to_string(),
        Key::Named(NamedKey::Space) => "space".to_string(),
        Key::Named(NamedKey::Super | NamedKey::Meta) => "Meta".to_string(),
        Key::Named(named) => format!("{:?}", named),
        Key::Dead(_) => "Dead".to_string(),
        Key::Unidentified(_) => "Unidentified".to_string(),
    }
}

fn physical_code(physical_key: PhysicalKey) -> String {
    match physical_key {
        PhysicalKey::Code(code) => format!("{:?}", code),
        PhysicalKey::Unidentified(_) => String::new(),
    }
}
