//! Event matching: find the active context, then bubble toward the root
//!
//! For each node on the way up, every candidate key token of the event is
//! tried with the event's modifier set. The first node that binds one of
//! them wins, so a context shadows its ancestors.

use std::collections::BTreeMap;

use super::event::KeyEvent;
use super::handler::Handler;
use super::tree::{NodeId, ShortcutTree};
use super::types::KeyCombination;

/// A successful resolution
#[derive(Debug)]
pub struct Resolution<'t, P> {
    pub handler: &'t Handler<P>,
    /// Node that owns the binding (the active node or one of its ancestors)
    pub node: NodeId,
    pub combination: KeyCombination,
}

/// First node, in depth-first pre-order, whose context equals `id`
///
/// Later nodes sharing the same id are never returned.
pub fn find_node_by_id<P>(tree: &ShortcutTree<P>, id: &str) -> Option<NodeId> {
    // The arena is laid out in pre-order, so a forward scan is a pre-order walk
    tree.iter()
        .find(|(_, node)| node.context() == id)
        .map(|(node_id, _)| node_id)
}

/// Resolve `event` against the active context, with where it matched
pub fn resolve_match<'t, P>(
    tree: &'t ShortcutTree<P>,
    active_context: Option<&str>,
    event: &KeyEvent,
) -> Option<Resolution<'t, P>> {
    if event.is_modifier_only() {
        return None;
    }

    let Some(active_context) = active_context else {
        tracing::trace!("No active context; {:?} left unhandled", event.key);
        return None;
    };

    let Some(start) = find_node_by_id(tree, active_context) else {
        tracing::trace!("Active context {:?} is not in the tree", active_context);
        return None;
    };

    let candidates = event.candidate_combinations();
    for (node_id, node) in tree.ancestors(start) {
        for combination in &candidates {
            if let Some(handler) = node.binding(combination) {
                tracing::trace!(
                    "Resolved {} in context {:?} (active {:?})",
                    combination,
                    node.context(),
                    active_context
                );
                return Some(Resolution {
                    handler,
                    node: node_id,
                    combination: combination.clone(),
                });
            }
        }
    }

    tracing::trace!("No binding for {:?} from context {:?}", event.key, active_context);
    None
}

/// Resolve `event` to at most one handler
pub fn resolve<'t, P>(
    tree: &'t ShortcutTree<P>,
    active_context: Option<&str>,
    event: &KeyEvent,
) -> Option<&'t Handler<P>> {
    resolve_match(tree, active_context, event).map(|resolution| resolution.handler)
}

/// A binding reachable from some context
#[derive(Debug)]
pub struct EffectiveBinding<'t, P> {
    pub combination: &'t KeyCombination,
    pub handler: &'t Handler<P>,
    /// Node that owns the binding
    pub node: NodeId,
}

/// Every combination that resolves from `context`, nearest owner first
///
/// Uses the same precedence as [`resolve`]; bindings shadowed by a nearer
/// context are left out. Sorted by combination for stable output.
pub fn effective_bindings<'t, P>(
    tree: &'t ShortcutTree<P>,
    context: &str,
) -> Vec<EffectiveBinding<'t, P>> {
    let Some(start) = find_node_by_id(tree, context) else {
        return Vec::new();
    };

    let mut reachable: BTreeMap<&KeyCombination, EffectiveBinding<'t, P>> = BTreeMap::new();
    for (node_id, node) in tree.ancestors(start) {
        let Some(bindings) = node.bindings() else {
            continue;
        };
        for (combination, handler) in bindings {
            reachable
                .entry(combination)
                .or_insert_with(|| EffectiveBinding {
                    combination,
                    handler,
                    node: node_id,
                });
        }
    }

    reachable.into_values().collect()
}
