//! YAML configuration parsing for keymap trees
//!
//! A keymap file describes one root context. Bindings map shortcut strings
//! to command names, which become dispatchable payloads:
//!
//! ```yaml
//! context: app
//! bindings:
//!   escape: CloseModal
//!   defmod-s: SaveAll
//! children:
//!   - context: editor
//!     bindings:
//!       defmod-s: SaveFile
//!       cmd-left: { command: LineStart, platform: macos }
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::handler::Handler;
use super::platform::Platform;
use super::tree::RawNode;

/// One context entry in a keymap file
#[derive(Debug, Deserialize)]
pub struct NodeConfig {
    pub context: String,
    #[serde(default)]
    pub bindings: Option<BTreeMap<String, BindingConfig>>,
    #[serde(default)]
    pub children: Vec<NodeConfig>,
}

/// A binding value: a bare command name or a platform-restricted entry
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum BindingConfig {
    Command(String),
    Detailed {
        command: String,
        #[serde(default)]
        platform: Option<Platform>,
    },
}

impl BindingConfig {
    fn command(&self) -> &str {
        match self {
            BindingConfig::Command(command) => command,
            BindingConfig::Detailed { command, .. } => command,
        }
    }

    fn applies_to(&self, platform: Platform) -> bool {
        match self {
            BindingConfig::Command(_) => true,
            BindingConfig::Detailed { platform: only, .. } => only.map_or(true, |p| p == platform),
        }
    }
}

/// How a keymap file is turned into a raw tree
#[derive(Clone, Copy, Debug)]
pub struct LoadOptions {
    /// Platform used to filter `platform:` entries
    pub platform: Platform,
    /// Reject duplicate or empty context ids instead of letting them shadow
    pub strict: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            platform: Platform::current(),
            strict: false,
        }
    }
}

/// Load a keymap tree from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<RawNode<String>, KeymapError> {
    load_keymap_file_with(path, &LoadOptions::default())
}

pub fn load_keymap_file_with(
    path: &Path,
    options: &LoadOptions,
) -> Result<RawNode<String>, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|source| KeymapError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let tree = parse_keymap_yaml_with(&content, options)?;
    tracing::info!("Loaded keymap tree from {}", path.display());
    Ok(tree)
}

/// Parse a keymap tree from a YAML string
pub fn parse_keymap_yaml(yaml: &str) -> Result<RawNode<String>, KeymapError> {
    parse_keymap_yaml_with(yaml, &LoadOptions::default())
}

pub fn parse_keymap_yaml_with(
    yaml: &str,
    options: &LoadOptions,
) -> Result<RawNode<String>, KeymapError> {
    let config: NodeConfig = serde_yaml::from_str(yaml)?;

    if options.strict {
        validate(&config)?;
    }

    Ok(build_node(config, options.platform))
}

fn validate(root: &NodeConfig) -> Result<(), KeymapError> {
    let mut seen = HashSet::new();
    let mut stack = vec![root];

    // Children are pushed in reverse so contexts are visited in pre-order
    while let Some(node) = stack.pop() {
        if node.context.trim().is_empty() {
            return Err(KeymapError::EmptyContext);
        }
        if !seen.insert(node.context.as_str()) {
            return Err(KeymapError::DuplicateContext(node.context.clone()));
        }
        stack.extend(node.children.iter().rev());
    }

    Ok(())
}

fn build_node(config: NodeConfig, platform: Platform) -> RawNode<String> {
    let mut node = RawNode::new(config.context);

    // A declared map stays declared even when every entry is filtered out
    node.bindings = config.bindings.map(|bindings| {
        bindings
            .into_iter()
            .filter(|(_, binding)| binding.applies_to(platform))
            .map(|(spec, binding)| {
                let command = binding.command().to_string();
                (spec, Handler::dispatchable(command))
            })
            .collect()
    });

    for child in config.children {
        node = node.child(build_node(child, platform));
    }

    node
}

/// Errors that can occur when loading keymap trees
#[derive(Debug, thiserror::Error)]
pub enum KeymapError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Duplicate context: {0}")]
    DuplicateContext(String),
    #[error("Context ids must not be empty")]
    EmptyContext,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
context: app
bindings:
  escape: CloseModal
  defmod-s: SaveAll
children:
  - context: editor
    bindings:
      defmod-s: SaveFile
      cmd-left: { command: LineStart, platform: macos }
      home: { command: LineStart, platform: windows }
  - context: sidebar
"#;

    fn options(platform: Platform) -> LoadOptions {
        LoadOptions {
            platform,
            strict: false,
        }
    }

    fn commands(node: &RawNode<String>) -> Vec<(&str, &str)> {
        node.bindings
            .iter()
            .flatten()
            .map(|(spec, handler)| (spec.as_str(), handler.payload().unwrap().as_str()))
            .collect()
    }

    #[test]
    fn test_parse_yaml() {
        let root = parse_keymap_yaml_with(SAMPLE, &options(Platform::Windows)).unwrap();
        assert_eq!(root.context, "app");
        assert_eq!(
            commands(&root),
            vec![("defmod-s", "SaveAll"), ("escape", "CloseModal")]
        );
        assert_eq!(root.children.len(), 2);
        assert!(root.children[1].bindings.is_none());
    }

    #[test]
    fn test_parse_yaml_with_platform() {
        let mac = parse_keymap_yaml_with(SAMPLE, &options(Platform::MacOS)).unwrap();
        assert_eq!(
            commands(&mac.children[0]),
            vec![("cmd-left", "LineStart"), ("defmod-s", "SaveFile")]
        );

        let win = parse_keymap_yaml_with(SAMPLE, &options(Platform::Windows)).unwrap();
        assert_eq!(
            commands(&win.children[0]),
            vec![("defmod-s", "SaveFile"), ("home", "LineStart")]
        );
    }

    #[test]
    fn test_filtered_bindings_stay_declared() {
        let yaml = r#"
context: app
bindings:
  cmd-q: { command: Quit, platform: macos }
"#;
        let root = parse_keymap_yaml_with(yaml, &options(Platform::Windows)).unwrap();
        assert_eq!(root.bindings.as_ref().map(Vec::len), Some(0));
    }

    #[test]
    fn test_bindings_are_dispatchable() {
        let root = parse_keymap_yaml_with(SAMPLE, &options(Platform::Windows)).unwrap();
        let (_, handler) = &root.bindings.as_ref().unwrap()[0];
        assert!(matches!(handler, Handler::Dispatchable(_)));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = parse_keymap_yaml("context: [unterminated").unwrap_err();
        assert!(matches!(err, KeymapError::Parse(_)));
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_duplicates_allowed_unless_strict() {
        let yaml = r#"
context: app
children:
  - context: panel
  - context: panel
"#;
        assert!(parse_keymap_yaml_with(yaml, &options(Platform::Windows)).is_ok());

        let strict = LoadOptions {
            platform: Platform::Windows,
            strict: true,
        };
        let err = parse_keymap_yaml_with(yaml, &strict).unwrap_err();
        assert!(matches!(err, KeymapError::DuplicateContext(ref c) if c == "panel"));
    }

    #[test]
    fn test_strict_rejects_empty_context() {
        let strict = LoadOptions {
            platform: Platform::Windows,
            strict: true,
        };
        let err = parse_keymap_yaml_with("context: \"\"\n", &strict).unwrap_err();
        assert!(matches!(err, KeymapError::EmptyContext));
    }
}
