//! Context trees: the raw form callers build, and the processed arena the
//! matcher walks
//!
//! ```text
//! RawNode (string keys, nested children)
//!     → preprocess()
//! ShortcutTree (KeyCombination keys, flat arena with parent links)
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::event::KeyEvent;
use super::handler::Handler;
use super::parser::parse_combination;
use super::platform::Platform;
use super::types::KeyCombination;

/// One context as supplied by the caller
///
/// `bindings` is `None` when the node declares none at all, which is kept
/// distinct from an empty list.
pub struct RawNode<P> {
    pub context: String,
    pub bindings: Option<Vec<(String, Handler<P>)>>,
    pub children: Vec<RawNode<P>>,
}

impl<P> RawNode<P> {
    /// Create a context with no bindings and no children
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            bindings: None,
            children: Vec::new(),
        }
    }

    /// Add a binding (builder pattern)
    pub fn bind(mut self, spec: impl Into<String>, handler: Handler<P>) -> Self {
        self.bindings
            .get_or_insert_with(Vec::new)
            .push((spec.into(), handler));
        self
    }

    /// Bind a callback invoked with the event
    pub fn on(self, spec: impl Into<String>, f: impl Fn(&KeyEvent) + 'static) -> Self {
        self.bind(spec, Handler::invocable(f))
    }

    /// Bind a payload for the dispatch callback
    pub fn dispatch(self, spec: impl Into<String>, payload: P) -> Self {
        self.bind(spec, Handler::dispatchable(payload))
    }

    /// Add a child context (builder pattern)
    pub fn child(mut self, child: RawNode<P>) -> Self {
        self.children.push(child);
        self
    }
}

impl<P: Clone> Clone for RawNode<P> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
            bindings: self.bindings.clone(),
            children: self.children.clone(),
        }
    }
}

impl<P: fmt::Debug> fmt::Debug for RawNode<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawNode")
            .field("context", &self.context)
            .field("bindings", &self.bindings)
            .field("children", &self.children)
            .finish()
    }
}

/// Position of a node in a [`ShortcutTree`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A processed context: canonical bindings plus links into the arena
pub struct ShortcutNode<P> {
    context: String,
    bindings: Option<HashMap<KeyCombination, Handler<P>>>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl<P> ShortcutNode<P> {
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Canonical bindings, `None` if the raw node declared none
    pub fn bindings(&self) -> Option<&HashMap<KeyCombination, Handler<P>>> {
        self.bindings.as_ref()
    }

    /// Handler bound to `combo` on this node only
    pub fn binding(&self, combo: &KeyCombination) -> Option<&Handler<P>> {
        self.bindings.as_ref()?.get(combo)
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Enclosing context, `None` for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Processed context tree, rebuilt wholesale from a [`RawNode`]
///
/// Nodes are stored in depth-first pre-order with the root at index 0.
pub struct ShortcutTree<P> {
    nodes: Vec<ShortcutNode<P>>,
    platform: Platform,
}

impl<P> ShortcutTree<P> {
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Look up a node; ids from another tree may be out of range
    pub fn get(&self, id: NodeId) -> Option<&ShortcutNode<P>> {
        self.nodes.get(id.0)
    }

    /// Look up a node produced by this tree
    ///
    /// # Panics
    /// If `id` did not come from this tree.
    pub fn node(&self, id: NodeId) -> &ShortcutNode<P> {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a processed tree has at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Platform `defmod` was resolved against
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// All nodes in pre-order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &ShortcutNode<P>)> {
        self.nodes.iter().enumerate().map(|(idx, node)| (NodeId(idx), node))
    }

    /// `id` followed by each of its ancestors up to the root
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, P> {
        Ancestors {
            tree: self,
            next: self.get(id).map(|_| id),
        }
    }

    /// Context ids that occur more than once; later occurrences are shadowed
    pub fn duplicate_contexts(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for node in &self.nodes {
            let context = node.context.as_str();
            if !seen.insert(context) && !duplicates.contains(&context) {
                duplicates.push(context);
            }
        }
        duplicates
    }
}

impl<P> fmt::Debug for ShortcutTree<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShortcutTree")
            .field("nodes", &self.nodes.len())
            .field("platform", &self.platform)
            .finish()
    }
}

/// Iterator over a node and its ancestors, nearest first
pub struct Ancestors<'t, P> {
    tree: &'t ShortcutTree<P>,
    next: Option<NodeId>,
}

impl<'t, P> Iterator for Ancestors<'t, P> {
    type Item = (NodeId, &'t ShortcutNode<P>);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.tree.node(id);
        self.next = node.parent;
        Some((id, node))
    }
}

/// Build the runtime tree: link parents and canonicalize every binding
///
/// The raw tree is only read; handlers are cloned into the new tree. `defmod`
/// is resolved against `platform` once, here.
pub fn preprocess<P: Clone>(root: &RawNode<P>, platform: Platform) -> ShortcutTree<P> {
    let mut nodes = Vec::new();
    link(root, None, platform, &mut nodes);

    let tree = ShortcutTree { nodes, platform };
    for context in tree.duplicate_contexts() {
        tracing::warn!(
            "Context {:?} appears more than once; only its first occurrence is reachable",
            context
        );
    }
    tracing::debug!("Preprocessed shortcut tree ({} contexts)", tree.len());
    tree
}

fn link<P: Clone>(
    raw: &RawNode<P>,
    parent: Option<NodeId>,
    platform: Platform,
    nodes: &mut Vec<ShortcutNode<P>>,
) -> NodeId {
    let id = NodeId(nodes.len());
    nodes.push(ShortcutNode {
        context: raw.context.clone(),
        bindings: raw
            .bindings
            .as_ref()
            .map(|bindings| canonicalize(&raw.context, bindings, platform)),
        children: Vec::with_capacity(raw.children.len()),
        parent,
    });

    for child in &raw.children {
        let child_id = link(child, Some(id), platform, nodes);
        nodes[id.0].children.push(child_id);
    }

    id
}

fn canonicalize<P: Clone>(
    context: &str,
    bindings: &[(String, Handler<P>)],
    platform: Platform,
) -> HashMap<KeyCombination, Handler<P>> {
    let mut map = HashMap::with_capacity(bindings.len());
    for (spec, handler) in bindings {
        let combo = parse_combination(spec, platform);
        if map.insert(combo, handler.clone()).is_some() {
            tracing::debug!(
                "Shortcut {:?} in context {:?} replaces an earlier equivalent binding",
                spec,
                context
            );
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::types::Modifiers;

    fn sample() -> RawNode<&'static str> {
        RawNode::new("app")
            .dispatch("escape", "close")
            .child(
                RawNode::new("editor")
                    .dispatch("defmod-s", "save")
                    .child(RawNode::new("find").dispatch("enter", "next-match")),
            )
            .child(RawNode::new("sidebar"))
    }

    #[test]
    fn test_preorder_layout() {
        let tree = preprocess(&sample(), Platform::Windows);
        let contexts: Vec<_> = tree.iter().map(|(_, n)| n.context()).collect();
        assert_eq!(contexts, vec!["app", "editor", "find", "sidebar"]);
        assert_eq!(tree.root(), NodeId(0));
    }

    #[test]
    fn test_parent_links() {
        let tree = preprocess(&sample(), Platform::Windows);
        assert_eq!(tree.node(NodeId(0)).parent(), None);
        assert_eq!(tree.node(NodeId(1)).parent(), Some(NodeId(0)));
        assert_eq!(tree.node(NodeId(2)).parent(), Some(NodeId(1)));
        assert_eq!(tree.node(NodeId(3)).parent(), Some(NodeId(0)));
        assert_eq!(tree.node(NodeId(0)).children(), &[NodeId(1), NodeId(3)]);
    }

    #[test]
    fn test_ancestor_chain_ends_at_root() {
        let tree = preprocess(&sample(), Platform::Windows);
        let chain: Vec<_> = tree.ancestors(NodeId(2)).map(|(_, n)| n.context()).collect();
        assert_eq!(chain, vec!["find", "editor", "app"]);
        assert_eq!(tree.ancestors(NodeId(99)).count(), 0);
    }

    #[test]
    fn test_bindings_are_canonical() {
        let tree = preprocess(&sample(), Platform::MacOS);
        let editor = tree.node(NodeId(1));
        let save = KeyCombination::new(Modifiers::CMD, "s");
        assert_eq!(editor.binding(&save).and_then(Handler::payload), Some(&"save"));
        assert_eq!(tree.platform(), Platform::MacOS);
    }

    #[test]
    fn test_missing_bindings_stay_missing() {
        let tree = preprocess(&sample(), Platform::Windows);
        assert!(tree.node(NodeId(3)).bindings().is_none());

        let raw = RawNode::<()> {
            context: "empty".into(),
            bindings: Some(Vec::new()),
            children: Vec::new(),
        };
        let tree = preprocess(&raw, Platform::Windows);
        assert_eq!(tree.node(NodeId(0)).bindings().map(HashMap::len), Some(0));
    }

    #[test]
    fn test_equivalent_specs_last_wins() {
        let raw = RawNode::new("app")
            .dispatch("Ctrl-S", "first")
            .dispatch("ctrl-s", "second");
        let tree = preprocess(&raw, Platform::Windows);
        let combo = KeyCombination::new(Modifiers::CTRL, "s");
        assert_eq!(
            tree.node(tree.root()).binding(&combo).and_then(Handler::payload),
            Some(&"second")
        );
    }

    #[test]
    fn test_raw_tree_is_reusable() {
        let raw = sample();
        let mac = preprocess(&raw, Platform::MacOS);
        let win = preprocess(&raw, Platform::Windows);
        assert_eq!(mac.len(), win.len());
        assert_eq!(raw.children[0].bindings.as_ref().map(Vec::len), Some(1));
        assert_eq!(raw.children[0].bindings.as_ref().unwrap()[0].0, "defmod-s");
    }

    #[test]
    fn test_duplicate_contexts_reported() {
        let raw = RawNode::<()>::new("app")
            .child(RawNode::new("panel"))
            .child(RawNode::new("list").child(RawNode::new("panel")));
        let tree = preprocess(&raw, Platform::Windows);
        assert_eq!(tree.duplicate_contexts(), vec!["panel"]);
    }
}
