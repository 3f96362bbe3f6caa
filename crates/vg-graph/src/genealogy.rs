//! The genealogy container.

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, trace, warn};
use vg_core::{SlotId, VgError, VgResult, Virus};

use crate::arena::Arena;
use crate::link::{link, unlink};
use crate::node::Node;
use crate::validate;

/// A rooted genealogy of viruses.
///
/// Every virus except the stem was created with at least one parent and stays
/// alive while at least one parent still lists it as a child. Clients only ever
/// see virus ids; slots stay internal.
///
/// Not `Clone`: one value owns one genealogy.
#[derive(Debug)]
pub struct VirusGenealogy<V: Virus> {
    nodes: Arena<Node<V>>,
    /// Every live id, mapped to the slot of its node.
    table: BTreeMap<V::Id, SlotId>,
    stem: SlotId,
    /// Live edges whose parent rank is not below the child rank. While this is
    /// zero the graph is acyclic and freeing parentless nodes is enough.
    back_edges: usize,
}

impl<V: Virus> VirusGenealogy<V> {
    /// Create a genealogy holding only the stem virus.
    pub fn new(stem_id: &V::Id) -> Self {
        let mut nodes = Arena::new();
        let stem = nodes.insert(Node::new(stem_id, 0));
        let table = BTreeMap::from([(stem_id.clone(), stem)]);
        debug!(stem = ?stem_id, "genealogy created");
        Self {
            nodes,
            table,
            stem,
            back_edges: 0,
        }
    }

    pub fn stem_id(&self) -> V::Id {
        self.nodes
            .get(self.stem)
            .map(|node| node.id().clone())
            .unwrap_or_else(|| unreachable!("stem slot is never freed"))
    }

    pub fn exists(&self, id: &V::Id) -> bool {
        self.table.contains_key(id)
    }

    /// Look up the virus with the given id.
    pub fn get(&self, id: &V::Id) -> VgResult<&V> {
        self.node(id).map(Node::entity)
    }

    /// Mutable access to a stored virus.
    ///
    /// The genealogy keeps filing the virus under the id it was created with,
    /// whatever the entity reports afterwards.
    pub fn get_mut(&mut self, id: &V::Id) -> VgResult<&mut V> {
        let slot = self.slot(id)?;
        self.nodes
            .get_mut(slot)
            .map(|node| &mut node.entity)
            .ok_or_else(|| dead_slot(id, slot))
    }

    /// Ids of the direct children of `id`, in id order.
    pub fn children_of(&self, id: &V::Id) -> VgResult<Vec<V::Id>> {
        Ok(self.node(id)?.children().cloned().collect())
    }

    /// Ids of the direct parents of `id`, in id order.
    ///
    /// Back-references are validated against the arena before they are
    /// reported, so a parent whose slot has been freed is never returned.
    pub fn parents_of(&self, id: &V::Id) -> VgResult<Vec<V::Id>> {
        let node = self.node(id)?;
        Ok(node
            .parents
            .iter()
            .filter(|&(_, &slot)| self.nodes.contains(slot))
            .map(|(parent_id, _)| parent_id.clone())
            .collect())
    }

    /// Number of live viruses, the stem included.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// A genealogy always holds its stem.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Every live id, in id order.
    pub fn ids(&self) -> impl Iterator<Item = &V::Id> {
        self.table.keys()
    }

    /// Create `id` as a child of `parent_id`.
    pub fn create(&mut self, id: &V::Id, parent_id: &V::Id) -> VgResult<()> {
        self.create_multi(id, std::slice::from_ref(parent_id))
    }

    /// Create `id` as a child of every virus in `parent_ids`.
    ///
    /// All ids are checked before anything is allocated. Repeated parent ids
    /// link once.
    pub fn create_multi(&mut self, id: &V::Id, parent_ids: &[V::Id]) -> VgResult<()> {
        if self.exists(id) {
            return Err(VgError::already_exists(id));
        }
        if parent_ids.is_empty() {
            return Err(VgError::no_parents(id));
        }
        let parents = parent_ids
            .iter()
            .map(|parent_id| self.slot(parent_id))
            .collect::<VgResult<Vec<_>>>()?;

        self.insert_linked(id, &parents)?;
        debug!(id = ?id, parents = parent_ids.len(), "virus created");
        Ok(())
    }

    /// Make `parent_id` a parent of `child_id`.
    ///
    /// Existing parents of the child are kept. Connecting an existing edge does
    /// nothing. The stem cannot be given a parent.
    pub fn connect(&mut self, child_id: &V::Id, parent_id: &V::Id) -> VgResult<()> {
        let child = self.slot(child_id)?;
        let parent = self.slot(parent_id)?;
        if child == self.stem {
            return Err(VgError::stem_parent(child_id));
        }

        let parent_node = self.nodes.get(parent).ok_or_else(|| dead_slot(parent_id, parent))?;
        if parent_node.children.contains_key(child_id) {
            return Ok(());
        }
        let parent_rank = parent_node.rank;
        let child_rank = self.node(child_id)?.rank;

        if link(&mut self.nodes, parent, child, child_id)? {
            if parent_rank >= child_rank {
                self.back_edges += 1;
                debug!(child = ?child_id, parent = ?parent_id, "back edge added");
            }
            debug!(child = ?child_id, parent = ?parent_id, "connected");
        }
        Ok(())
    }

    /// Remove `id` from the genealogy.
    ///
    /// Every parent drops its edge to the node, which frees it. Its children
    /// lose it as a parent and are freed in turn only if that was their last
    /// one. The stem cannot be removed.
    pub fn remove(&mut self, id: &V::Id) -> VgResult<()> {
        let slot = self.slot(id)?;
        if slot == self.stem {
            return Err(VgError::cannot_remove_stem(id));
        }

        let node = self.node(id)?;
        let rank = node.rank;
        let parents: Vec<(V::Id, SlotId)> = node
            .parents
            .iter()
            .map(|(parent_id, &parent)| (parent_id.clone(), parent))
            .collect();
        for (parent_id, parent) in &parents {
            let parent_rank = self.nodes.get(*parent).map(|p| p.rank);
            if unlink(&mut self.nodes, *parent, parent_id, slot, id)
                && parent_rank.is_some_and(|parent_rank| parent_rank >= rank)
            {
                self.back_edges = self.back_edges.saturating_sub(1);
            }
        }

        let (freed, survivors) = self.release(slot);
        let swept = if self.back_edges > 0 {
            self.sweep_detached(&survivors)
        } else {
            0
        };
        debug!(id = ?id, freed, swept, "virus removed");
        Ok(())
    }

    /// Check every structural invariant, reporting the first violation.
    pub fn validate(&self) -> VgResult<()> {
        validate::validate_table(&self.nodes, &self.table)?;
        validate::validate_edges(&self.nodes, self.stem)?;
        validate::validate_reachability(&self.nodes, self.stem)?;
        validate::validate_back_edges(&self.nodes, self.back_edges)
    }

    fn slot(&self, id: &V::Id) -> VgResult<SlotId> {
        self.table
            .get(id)
            .copied()
            .ok_or_else(|| VgError::not_found(id))
    }

    fn node(&self, id: &V::Id) -> VgResult<&Node<V>> {
        let slot = self.slot(id)?;
        self.nodes.get(slot).ok_or_else(|| dead_slot(id, slot))
    }

    /// Allocate `id` and link it under each of `parents`.
    ///
    /// A link that fails is rolled back and the remaining parents are still
    /// tried. If no link succeeds the node is discarded again and the last
    /// link error is returned.
    fn insert_linked(&mut self, id: &V::Id, parents: &[SlotId]) -> VgResult<()> {
        let rank = parents
            .iter()
            .filter_map(|&parent| self.nodes.get(parent))
            .map(|parent| parent.rank + 1)
            .max()
            .unwrap_or(1);
        let slot = self.nodes.insert(Node::new(id, rank));
        self.table.insert(id.clone(), slot);

        let mut linked = 0;
        let mut last_err = None;
        for &parent in parents {
            match link(&mut self.nodes, parent, slot, id) {
                Ok(_) => linked += 1,
                Err(err) => {
                    warn!(id = ?id, error = %err, "parent link failed");
                    last_err = Some(err);
                }
            }
        }

        if linked == 0 {
            self.table.remove(id);
            self.nodes.remove(slot);
            return Err(last_err.unwrap_or_else(|| VgError::no_parents(id)));
        }
        Ok(())
    }

    /// Number of back edges leaving the node in `slot`. Read before any of
    /// its children are freed.
    fn back_edges_from(&self, slot: SlotId) -> usize {
        let Some(node) = self.nodes.get(slot) else {
            return 0;
        };
        node.children
            .values()
            .filter_map(|&child| self.nodes.get(child))
            .filter(|child| node.rank >= child.rank)
            .count()
    }

    /// Drop the node in `slot`: take it out of the table and detach it from
    /// its children. Returns the slots of the children still alive.
    fn free(&mut self, slot: SlotId) -> Vec<SlotId> {
        let Some(node) = self.nodes.remove(slot) else {
            return Vec::new();
        };
        self.table.remove(&node.id);

        let mut children = Vec::with_capacity(node.children.len());
        for (child_id, child) in node.children {
            if let Some(child_node) = self.nodes.get_mut(child) {
                child_node.parents.remove(&node.id);
                children.push(child);
            } else {
                trace!(child = ?child_id, "child already freed");
            }
        }
        trace!(id = ?node.id, "virus freed");
        children
    }

    /// Free `start` if nothing owns it any more, then follow through to
    /// children that lost their last owner with it.
    ///
    /// Returns the number of nodes freed and the children that lost a parent
    /// but kept at least one.
    fn release(&mut self, start: SlotId) -> (usize, Vec<SlotId>) {
        let mut freed = 0;
        let mut touched = Vec::new();
        let mut pending = vec![start];
        while let Some(slot) = pending.pop() {
            let orphaned = self
                .nodes
                .get(slot)
                .is_some_and(|node| node.strong_count() == 0);
            if slot == self.stem || !orphaned {
                continue;
            }
            let dropped = self.back_edges_from(slot);
            self.back_edges = self.back_edges.saturating_sub(dropped);
            let children = self.free(slot);
            freed += 1;
            touched.extend_from_slice(&children);
            pending.extend(children);
        }

        let survivors = touched
            .into_iter()
            .filter(|&slot| self.nodes.contains(slot))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        (freed, survivors)
    }

    /// Free nodes below `survivors` that the stem can no longer reach.
    ///
    /// Anything cut off by a removal descends from a child that lost a parent
    /// and kept another, so only that region is examined. Nodes in it with a
    /// parent outside it are still attached, as is everything they reach.
    /// Returns the number freed.
    fn sweep_detached(&mut self, survivors: &[SlotId]) -> usize {
        let mut region = HashSet::new();
        let mut stack = survivors.to_vec();
        while let Some(slot) = stack.pop() {
            if slot == self.stem || !region.insert(slot) {
                continue;
            }
            if let Some(node) = self.nodes.get(slot) {
                stack.extend(node.children.values().copied());
            }
        }

        let mut attached = HashSet::new();
        let mut stack: Vec<SlotId> = region
            .iter()
            .copied()
            .filter(|&slot| {
                self.nodes
                    .get(slot)
                    .is_some_and(|node| node.parents.values().any(|p| !region.contains(p)))
            })
            .collect();
        while let Some(slot) = stack.pop() {
            if !attached.insert(slot) {
                continue;
            }
            if let Some(node) = self.nodes.get(slot) {
                stack.extend(node.children.values().filter(|c| region.contains(*c)).copied());
            }
        }

        let detached: Vec<SlotId> = region.difference(&attached).copied().collect();
        let dropped: usize = detached.iter().map(|&slot| self.back_edges_from(slot)).sum();
        self.back_edges = self.back_edges.saturating_sub(dropped);
        for &slot in &detached {
            self.free(slot);
        }
        if !detached.is_empty() {
            trace!(count = detached.len(), "detached viruses swept");
        }
        detached.len()
    }
}

fn dead_slot(id: &impl std::fmt::Debug, slot: SlotId) -> VgError {
    VgError::invariant(format!("{:?} maps to dead slot {}", id, slot))
}
