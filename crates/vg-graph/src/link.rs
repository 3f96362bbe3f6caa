//! Edge transactions.
//!
//! An edge is two entries that must come and go together: the owning entry in
//! the parent's `children` and the back-reference in the child's `parents`.

use tracing::trace;
use vg_core::{SlotId, VgError, VgResult, Virus};

use crate::arena::Arena;
use crate::node::Node;

/// Add the edge `parent -> child`.
///
/// The forward half goes in first. If the child cannot take the back-reference
/// the forward half is removed again before the error is returned, so no
/// half-edge survives. Returns `Ok(false)` when the edge already existed.
pub(crate) fn link<V: Virus>(
    nodes: &mut Arena<Node<V>>,
    parent: SlotId,
    child: SlotId,
    child_id: &V::Id,
) -> VgResult<bool> {
    let parent_node = nodes
        .get_mut(parent)
        .ok_or_else(|| VgError::invariant(format!("parent slot {} is not live", parent)))?;
    if parent_node.children.contains_key(child_id) {
        return Ok(false);
    }
    let parent_id = parent_node.id().clone();
    parent_node.children.insert(child_id.clone(), child);

    match nodes.get_mut(child) {
        Some(child_node) => {
            child_node.parents.insert(parent_id.clone(), parent);
            trace!(parent = ?parent_id, child = ?child_id, "linked");
            Ok(true)
        }
        None => {
            if let Some(parent_node) = nodes.get_mut(parent) {
                parent_node.children.remove(child_id);
            }
            trace!(parent = ?parent_id, child = ?child_id, "link rolled back");
            Err(VgError::invariant(format!(
                "child slot {} for {:?} is not live",
                child, child_id
            )))
        }
    }
}

/// Drop the edge `parent -> child` from both sides.
///
/// Either half may already be gone; whatever is left is removed. Returns
/// whether a forward entry was removed.
pub(crate) fn unlink<V: Virus>(
    nodes: &mut Arena<Node<V>>,
    parent: SlotId,
    parent_id: &V::Id,
    child: SlotId,
    child_id: &V::Id,
) -> bool {
    let removed = nodes
        .get_mut(parent)
        .and_then(|p| p.children.remove(child_id))
        .is_some();
    if let Some(child_node) = nodes.get_mut(child) {
        child_node.parents.remove(parent_id);
    }
    trace!(parent = ?parent_id, child = ?child_id, removed, "unlinked");
    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Tag(u8);

    impl Virus for Tag {
        type Id = u8;

        fn new(id: &u8) -> Self {
            Tag(*id)
        }

        fn id(&self) -> u8 {
            self.0
        }
    }

    fn pair() -> (Arena<Node<Tag>>, SlotId, SlotId) {
        let mut nodes = Arena::new();
        let p = nodes.insert(Node::new(&1, 0));
        let c = nodes.insert(Node::new(&2, 1));
        (nodes, p, c)
    }

    #[test]
    fn link_writes_both_halves() {
        let (mut nodes, p, c) = pair();
        assert!(link(&mut nodes, p, c, &2).unwrap());

        assert_eq!(nodes.get(p).unwrap().children.get(&2), Some(&c));
        assert_eq!(nodes.get(c).unwrap().parents.get(&1), Some(&p));
    }

    #[test]
    fn link_twice_is_noop() {
        let (mut nodes, p, c) = pair();
        link(&mut nodes, p, c, &2).unwrap();
        assert!(!link(&mut nodes, p, c, &2).unwrap());
        assert_eq!(nodes.get(c).unwrap().strong_count(), 1);
    }

    #[test]
    fn failed_back_reference_rolls_back_forward_entry() {
        let (mut nodes, p, c) = pair();
        nodes.remove(c);

        let err = link(&mut nodes, p, c, &2).unwrap_err();
        assert!(matches!(err, VgError::Invariant { .. }));
        assert!(nodes.get(p).unwrap().children.is_empty());
    }

    #[test]
    fn link_from_dead_parent_fails_without_mutation() {
        let (mut nodes, p, c) = pair();
        nodes.remove(p);

        assert!(link(&mut nodes, p, c, &2).is_err());
        assert!(nodes.get(c).unwrap().parents.is_empty());
    }

    #[test]
    fn unlink_removes_both_halves() {
        let (mut nodes, p, c) = pair();
        link(&mut nodes, p, c, &2).unwrap();

        assert!(unlink(&mut nodes, p, &1, c, &2));
        assert!(nodes.get(p).unwrap().children.is_empty());
        assert!(nodes.get(c).unwrap().parents.is_empty());
        assert!(!unlink(&mut nodes, p, &1, c, &2));
    }
}
