//! Genealogy vertex.

use std::collections::BTreeMap;

use vg_core::{SlotId, Virus};

/// One virus together with its edges.
///
/// `children` holds the owning edges: a non-stem node stays allocated exactly as
/// long as some parent lists it there. `parents` mirrors them backwards; each
/// entry's slot locates the parent directly so the forward edge can be dropped
/// without going through the genealogy's table.
///
/// `id` is the key the node was created under. The entity may be edited in
/// place, so the tables are always keyed by this copy, never by `entity.id()`.
///
/// `rank` is 0 for the stem and one more than the highest parent rank at
/// creation. It never changes; an edge whose parent rank is not below its
/// child rank is a back edge, and only back edges can close a cycle.
#[derive(Debug)]
pub struct Node<V: Virus> {
    pub(crate) id: V::Id,
    pub(crate) rank: u64,
    pub(crate) entity: V,
    pub(crate) children: BTreeMap<V::Id, SlotId>,
    pub(crate) parents: BTreeMap<V::Id, SlotId>,
}

impl<V: Virus> Node<V> {
    pub(crate) fn new(id: &V::Id, rank: u64) -> Self {
        Self {
            id: id.clone(),
            rank,
            entity: V::new(id),
            children: BTreeMap::new(),
            parents: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &V::Id {
        &self.id
    }

    pub fn entity(&self) -> &V {
        &self.entity
    }

    pub fn children(&self) -> impl Iterator<Item = &V::Id> {
        self.children.keys()
    }

    pub fn rank(&self) -> u64 {
        self.rank
    }

    /// Number of owning edges pointing at this node.
    pub fn strong_count(&self) -> usize {
        self.parents.len()
    }
}
