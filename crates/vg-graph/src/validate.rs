//! Genealogy consistency checks and reachability walks.

use std::collections::{BTreeMap, HashSet};
use std::fmt::Debug;

use vg_core::{SlotId, VgResult, Virus};

use crate::arena::Arena;
use crate::error::GraphError;
use crate::node::Node;

fn show(id: &impl Debug) -> String {
    format!("{:?}", id)
}

/// Validate that the table and the arena describe the same set of nodes.
pub(crate) fn validate_table<V: Virus>(
    nodes: &Arena<Node<V>>,
    table: &BTreeMap<V::Id, SlotId>,
) -> VgResult<()> {
    for (id, &slot) in table {
        let node = nodes.get(slot).ok_or_else(|| GraphError::DeadTableEntry {
            id: show(id),
            slot,
        })?;
        let actual = node.id();
        if actual != id {
            return Err(GraphError::KeyMismatch {
                id: show(id),
                actual: show(actual),
            }
            .into());
        }
    }

    // Every table entry resolved to a distinct live node, so equal counts
    // mean the two sets coincide.
    if table.len() != nodes.len() {
        for (slot, node) in nodes.iter() {
            let id = node.id();
            if table.get(id) != Some(&slot) {
                return Err(GraphError::Untracked {
                    id: show(id),
                    slot,
                }
                .into());
            }
        }
    }

    Ok(())
}

/// Validate that every edge is mirrored and that parent counts fit the node's role.
pub(crate) fn validate_edges<V: Virus>(nodes: &Arena<Node<V>>, stem: SlotId) -> VgResult<()> {
    for (slot, node) in nodes.iter() {
        let id = node.id();

        for (child_id, &child) in &node.children {
            let child_node = nodes.get(child).ok_or_else(|| GraphError::DanglingEdge {
                from: show(id),
                to: show(child_id),
            })?;
            if child_node.parents.get(id) != Some(&slot) {
                return Err(GraphError::MissingBackRef {
                    parent: show(id),
                    child: show(child_id),
                }
                .into());
            }
        }

        for (parent_id, &parent) in &node.parents {
            let parent_node = nodes.get(parent).ok_or_else(|| GraphError::DanglingEdge {
                from: show(id),
                to: show(parent_id),
            })?;
            if parent_node.children.get(id) != Some(&slot) {
                return Err(GraphError::MissingForwardRef {
                    parent: show(parent_id),
                    child: show(id),
                }
                .into());
            }
        }

        if slot == stem && !node.parents.is_empty() {
            return Err(GraphError::StemHasParents { id: show(id) }.into());
        }
        if slot != stem && node.parents.is_empty() {
            return Err(GraphError::Orphan { id: show(id) }.into());
        }
    }

    Ok(())
}

/// Validate that every live node descends from the stem.
pub(crate) fn validate_reachability<V: Virus>(
    nodes: &Arena<Node<V>>,
    stem: SlotId,
) -> VgResult<()> {
    let reached = reachable(nodes, stem);
    for (slot, node) in nodes.iter() {
        if !reached.contains(&slot) {
            return Err(GraphError::Unreachable {
                id: show(node.id()),
            }
            .into());
        }
    }
    Ok(())
}

/// Slots reachable from `from` through child edges, `from` included.
pub(crate) fn reachable<V: Virus>(nodes: &Arena<Node<V>>, from: SlotId) -> HashSet<SlotId> {
    let mut seen = HashSet::new();
    let mut stack = vec![from];
    while let Some(slot) = stack.pop() {
        if !seen.insert(slot) {
            continue;
        }
        if let Some(node) = nodes.get(slot) {
            stack.extend(node.children.values().copied());
        }
    }
    seen
}

/// Validate that `recorded` matches the number of back edges in the graph.
pub(crate) fn validate_back_edges<V: Virus>(
    nodes: &Arena<Node<V>>,
    recorded: usize,
) -> VgResult<()> {
    let mut actual = 0;
    for (_, node) in nodes.iter() {
        for &child in node.children.values() {
            if nodes.get(child).is_some_and(|c| node.rank >= c.rank) {
                actual += 1;
            }
        }
    }
    if actual != recorded {
        return Err(GraphError::BackEdgeCount { recorded, actual }.into());
    }
    Ok(())
}
