//! Serializable snapshot of a processed keymap tree
//!
//! Printed by `bubblekeys tree --json`.

use serde::Serialize;
use std::collections::BTreeMap;

use bubblekeys::keymap::{Handler, NodeId, ShortcutTree};

#[derive(Serialize)]
pub struct TreeDump {
    pub platform: String,
    pub node_count: usize,
    pub duplicate_contexts: Vec<String>,
    pub root: NodeDump,
}

#[derive(Serialize)]
pub struct NodeDump {
    pub context: String,
    /// `None` when the node declares no binding map at all
    pub bindings: Option<BTreeMap<String, String>>,
    pub children: Vec<NodeDump>,
}

impl TreeDump {
    pub fn from_tree(tree: &ShortcutTree<String>) -> Self {
        Self {
            platform: tree.platform().to_string(),
            node_count: tree.len(),
            duplicate_contexts: tree
                .duplicate_contexts()
                .into_iter()
                .map(str::to_string)
                .collect(),
            root: NodeDump::from_node(tree, tree.root()),
        }
    }
}

impl NodeDump {
    fn from_node(tree: &ShortcutTree<String>, id: NodeId) -> Self {
        let node = tree.node(id);
        Self {
            context: node.context().to_string(),
            bindings: node.bindings().map(|bindings| {
                bindings
                    .iter()
                    .map(|(combo, handler)| (combo.to_string(), describe(handler)))
                    .collect()
            }),
            children: node
                .children()
                .iter()
                .map(|&child| NodeDump::from_node(tree, child))
                .collect(),
        }
    }
}

/// Command name for payloads, a placeholder for closures
pub fn describe(handler: &Handler<String>) -> String {
    match handler {
        Handler::Dispatchable(command) => command.clone(),
        Handler::Invocable(_) => "<callback>".to_string(),
    }
}

/// Indented plain-text outline, one context per line
pub fn outline(tree: &ShortcutTree<String>) -> String {
    let mut out = String::new();
    write_outline(tree, tree.root(), 0, &mut out);
    out
}

fn write_outline(tree: &ShortcutTree<String>, id: NodeId, depth: usize, out: &mut String) {
    let node = tree.node(id);
    let indent = "  ".repeat(depth);
    out.push_str(&format!("{indent}{}\n", node.context()));

    if let Some(bindings) = node.bindings() {
        let mut sorted: Vec<_> = bindings.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        for (combo, handler) in sorted {
            out.push_str(&format!("{indent}  {combo} => {}\n", describe(handler)));
        }
    }

    for &child in node.children() {
        write_outline(tree, child, depth + 1, out);
    }
}
