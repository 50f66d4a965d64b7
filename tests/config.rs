//! Configuration tests: config paths and keymap files on disk

mod common;

use std::fs;

use bubblekeys::config_paths;
use bubblekeys::keymap::{
    load_keymap_file_with, preprocess, resolve, Handler, KeyEvent, KeymapError, LoadOptions,
    Platform,
};

const KEYMAP: &str = r#"
context: app
bindings:
  escape: CloseModal
  defmod-q: Quit
children:
  - context: editor
    bindings:
      defmod-s: SaveFile
      cmd-arrowleft: { command: LineStart, platform: macos }
      home: { command: LineStart, platform: windows }
"#;

fn options(platform: Platform) -> LoadOptions {
    LoadOptions {
        platform,
        strict: true,
    }
}

fn command(handler: Option<&Handler<String>>) -> Option<&str> {
    handler.and_then(Handler::payload).map(String::as_str)
}

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    if let Some(dir) = config_paths::config_dir() {
        assert!(dir.ends_with("bubblekeys"), "got {}", dir.display());
    }
}

#[test]
fn test_keymap_file_ends_with_yaml() {
    if let Some(path) = config_paths::keymap_file() {
        assert_eq!(path.file_name().unwrap(), "keymap.yaml");
    }
}

#[test]
fn test_logs_dir_is_under_config_dir() {
    if let (Some(config), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) {
        assert_eq!(logs, config.join("logs"));
    }
}

// ========================================================================
// Keymap File Tests
// ========================================================================

#[test]
fn test_load_keymap_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keymap.yaml");
    fs::write(&path, KEYMAP).unwrap();

    let raw = load_keymap_file_with(&path, &options(Platform::MacOS)).unwrap();
    let tree = preprocess(&raw, Platform::MacOS);
    assert_eq!(tree.len(), 2);

    let save = KeyEvent::new("s", "KeyS").with_meta();
    assert_eq!(command(resolve(&tree, Some("editor"), &save)), Some("SaveFile"));

    let quit = KeyEvent::new("q", "KeyQ").with_meta();
    assert_eq!(command(resolve(&tree, Some("editor"), &quit)), Some("Quit"));

    let line_start = KeyEvent::new("ArrowLeft", "ArrowLeft").with_meta();
    assert_eq!(
        command(resolve(&tree, Some("editor"), &line_start)),
        Some("LineStart")
    );
    let home = KeyEvent::new("Home", "Home");
    assert_eq!(command(resolve(&tree, Some("editor"), &home)), None);
}

#[test]
fn test_platform_entries_filtered_on_windows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keymap.yaml");
    fs::write(&path, KEYMAP).unwrap();

    let raw = load_keymap_file_with(&path, &options(Platform::Windows)).unwrap();
    let tree = preprocess(&raw, Platform::Windows);

    let home = KeyEvent::new("Home", "Home");
    assert_eq!(command(resolve(&tree, Some("editor"), &home)), Some("LineStart"));

    let save = KeyEvent::new("s", "KeyS").with_ctrl();
    assert_eq!(command(resolve(&tree, Some("editor"), &save)), Some("SaveFile"));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.yaml");

    let err = load_keymap_file_with(&path, &options(Platform::Windows)).unwrap_err();
    assert!(matches!(err, KeymapError::Io { .. }));
    assert!(err.to_string().contains("nope.yaml"));
}

#[test]
fn test_duplicate_context_rejected_in_strict_mode() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keymap.yaml");
    fs::write(
        &path,
        "context: app\nchildren:\n  - context: app\n",
    )
    .unwrap();

    let err = load_keymap_file_with(&path, &options(Platform::Windows)).unwrap_err();
    assert!(matches!(err, KeymapError::DuplicateContext(ref c) if c == "app"));

    let lenient = LoadOptions {
        platform: Platform::Windows,
        strict: false,
    };
    let raw = load_keymap_file_with(&path, &lenient).unwrap();
    let tree = preprocess(&raw, Platform::Windows);
    assert_eq!(tree.duplicate_contexts(), vec!["app"]);
}

#[test]
fn test_loaded_tree_drives_manager() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keymap.yaml");
    fs::write(&path, KEYMAP).unwrap();

    let raw = load_keymap_file_with(&path, &options(Platform::Windows)).unwrap();
    let bus = bubblekeys::KeyBus::new();
    let dispatched = common::Dispatched::default();
    let mut manager = bubblekeys::ShortcutManager::with_platform(bus.clone(), Platform::Windows);
    manager.initialize(&raw, dispatched.options());
    manager.set_context("editor");

    bus.emit(&KeyEvent::new("q", "KeyQ").with_ctrl());
    bus.emit(&KeyEvent::new("Escape", "Escape"));
    assert_eq!(dispatched.take(), vec!["Quit", "CloseModal"]);
}
