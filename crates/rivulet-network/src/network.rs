//! Validated river network.
//!
//! Rivers live in an arena of slots addressed by dense internal indices.
//! Each slot records the river, the slot it drains into (`child`) and the
//! slots draining into it (`parents`). An [`IndexMap`] maps user-facing
//! [`RiverId`]s to slots and preserves insertion order for iteration.

use crate::error::NetworkError;
use crate::river::River;
use indexmap::IndexMap;
use rivulet_core::{RiverId, UhgError, UhgParameter};
use smallvec::SmallVec;
use std::collections::VecDeque;
use std::ops::Deref;
use tracing::{debug, warn};

#[derive(Clone, Debug)]
struct Node {
    river: River,
    /// Slots whose river drains into this one.
    parents: SmallVec<[usize; 4]>,
    /// Slot this river drains into.
    child: Option<usize>,
}

/// DFS marker for cycle detection.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Colour {
    White,
    Grey,
    Black,
}

/// A directed acyclic network of rivers.
///
/// Invariants, held after every public call:
/// - ids are unique and strictly positive;
/// - a river's `downstream.id` is either [`RiverId::NONE`] or a registered id
///   other than its own;
/// - following downstream links never revisits a river.
///
/// Mutations that would break an invariant fail with a [`NetworkError`]
/// and leave the network unchanged.
///
/// # Examples
///
/// ```
/// use rivulet_core::RiverId;
/// use rivulet_network::{NetworkError, River, RiverNetwork};
///
/// let mut net = RiverNetwork::new();
/// net.add(River::new(RiverId(1)))?
///     .add(River::new(RiverId(2)).with_downstream(RiverId(1), 0.0))?
///     .add(River::new(RiverId(3)).with_downstream(RiverId(2), 0.0))?;
///
/// assert_eq!(net.upstreams(RiverId(1))?, vec![RiverId(2)]);
/// assert_eq!(
///     net.set_downstream(RiverId(1), RiverId(3)),
///     Err(NetworkError::WouldCycle { id: RiverId(1), downstream: RiverId(3) })
/// );
/// assert_eq!(net.downstream(RiverId(1))?, RiverId::NONE);
/// # Ok::<(), NetworkError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct RiverNetwork {
    nodes: Vec<Option<Node>>,
    free_list: Vec<usize>,
    index: IndexMap<RiverId, usize>,
}

impl RiverNetwork {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a network by adding `rivers` in order.
    ///
    /// Downstream rivers must come before the rivers draining into them.
    pub fn from_rivers<I>(rivers: I) -> Result<Self, NetworkError>
    where
        I: IntoIterator<Item = River>,
    {
        let mut net = Self::new();
        for river in rivers {
            net.add(river)?;
        }
        Ok(net)
    }

    /// Number of registered rivers.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether no rivers are registered.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: RiverId) -> bool {
        self.index.contains_key(&id)
    }

    /// Registered ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = RiverId> + '_ {
        self.index.keys().copied()
    }

    /// Registered rivers in insertion order.
    pub fn rivers(&self) -> impl Iterator<Item = &River> + '_ {
        self.index.values().map(move |&slot| &self.node(slot).river)
    }

    /// Check that `id` is a valid, registered river id.
    pub fn check_id(&self, id: RiverId) -> Result<(), NetworkError> {
        self.slot_of(id).map(|_| ())
    }

    /// Add a river, linking it to its downstream river if it has one.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::InvalidId`] if `river.id <= 0` or the downstream
    ///   id is negative.
    /// - [`NetworkError::DuplicateId`] if the id is already registered.
    /// - [`NetworkError::SelfLoop`] if the river drains into itself.
    /// - [`NetworkError::UnknownDownstream`] if the downstream river is
    ///   not registered yet.
    /// - [`NetworkError::InvalidUhgParam`] if the unit-hydrograph
    ///   parameters or distance are out of range.
    /// - [`NetworkError::WouldCycle`] if linking would close a cycle.
    pub fn add(&mut self, river: River) -> Result<&mut Self, NetworkError> {
        let id = river.id;
        let downstream = river.downstream.id;
        if !id.is_valid() {
            return Err(NetworkError::InvalidId { id });
        }
        if self.index.contains_key(&id) {
            return Err(NetworkError::DuplicateId { id });
        }
        if id == downstream {
            return Err(NetworkError::SelfLoop { id });
        }
        let child = if downstream.is_none() {
            None
        } else if !downstream.is_valid() {
            return Err(NetworkError::InvalidId { id: downstream });
        } else {
            match self.index.get(&downstream) {
                Some(&slot) => Some(slot),
                None => return Err(NetworkError::UnknownDownstream { id, downstream }),
            }
        };
        river
            .validate_hydrograph()
            .map_err(|source| NetworkError::InvalidUhgParam { id, source })?;

        let node = Node {
            river,
            parents: SmallVec::new(),
            child: None,
        };
        let slot = match self.free_list.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                slot
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };
        self.link(slot, child);

        if self.has_cycle() {
            self.unlink(slot);
            self.nodes[slot] = None;
            self.free_list.push(slot);
            warn!(river = %id, downstream = %downstream, "add rolled back: cycle");
            return Err(NetworkError::WouldCycle { id, downstream });
        }
        self.index.insert(id, slot);
        debug!(river = %id, downstream = %downstream, "river added");
        Ok(self)
    }

    /// Remove a river.
    ///
    /// Rivers that drained into it become terminal (their downstream id is
    /// reset to [`RiverId::NONE`]); their distance is left as it was.
    pub fn remove(&mut self, id: RiverId) -> Result<River, NetworkError> {
        let slot = self.slot_of(id)?;
        self.unlink(slot);
        let node = self.nodes[slot]
            .take()
            .ok_or(NetworkError::UnknownId { id })?;
        for &parent in &node.parents {
            if let Some(p) = self.nodes[parent].as_mut() {
                p.child = None;
                p.river.downstream.id = RiverId::NONE;
            }
        }
        self.index.shift_remove(&id);
        self.free_list.push(slot);
        debug!(river = %id, orphaned = node.parents.len(), "river removed");
        Ok(node.river)
    }

    /// The river registered as `id`.
    pub fn river(&self, id: RiverId) -> Result<&River, NetworkError> {
        let slot = self.slot_of(id)?;
        Ok(&self.node(slot).river)
    }

    /// A mutable view of the river registered as `id`.
    ///
    /// The view allows editing the unit-hydrograph parameters and the
    /// downstream distance. The id and the downstream link are topology and
    /// only change through [`add`](Self::add), [`remove`](Self::remove) and
    /// [`set_downstream`](Self::set_downstream).
    pub fn river_mut(&mut self, id: RiverId) -> Result<RiverMut<'_>, NetworkError> {
        let slot = self.slot_of(id)?;
        let node = self.nodes[slot]
            .as_mut()
            .ok_or(NetworkError::UnknownId { id })?;
        Ok(RiverMut {
            river: &mut node.river,
        })
    }

    /// Ids of the rivers draining directly into `id`, ascending.
    pub fn upstreams(&self, id: RiverId) -> Result<Vec<RiverId>, NetworkError> {
        let slot = self.slot_of(id)?;
        Ok(self.sorted_parent_ids(slot))
    }

    /// Id of the river `id` drains into, or [`RiverId::NONE`].
    pub fn downstream(&self, id: RiverId) -> Result<RiverId, NetworkError> {
        Ok(self.river(id)?.downstream.id)
    }

    /// Re-link `id` to drain into `downstream` (or nowhere, for
    /// [`RiverId::NONE`]).
    ///
    /// The change is atomic: on [`NetworkError::WouldCycle`] the previous
    /// link is restored before returning.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::InvalidId`] if `id <= 0` or `downstream < 0`.
    /// - [`NetworkError::UnknownId`] if `id` or `downstream` is not
    ///   registered.
    /// - [`NetworkError::SelfLoop`] if `downstream == id`.
    /// - [`NetworkError::WouldCycle`] if `downstream` already drains,
    ///   directly or transitively, into `id`.
    pub fn set_downstream(&mut self, id: RiverId, downstream: RiverId) -> Result<(), NetworkError> {
        let slot = self.slot_of(id)?;
        if downstream == id {
            return Err(NetworkError::SelfLoop { id });
        }
        let new_child = if downstream.is_none() {
            None
        } else {
            Some(self.slot_of(downstream)?)
        };
        let old_child = self.node(slot).child;
        if old_child != new_child {
            self.unlink(slot);
            self.link(slot, new_child);
            if self.has_cycle() {
                self.unlink(slot);
                self.link(slot, old_child);
                warn!(river = %id, downstream = %downstream, "set_downstream rolled back: cycle");
                return Err(NetworkError::WouldCycle { id, downstream });
            }
        }
        if let Some(node) = self.nodes[slot].as_mut() {
            node.river.downstream.id = downstream;
        }
        debug!(river = %id, downstream = %downstream, "downstream set");
        Ok(())
    }

    /// Rivers that drain nowhere, in insertion order.
    pub fn terminals(&self) -> Vec<RiverId> {
        self.index
            .iter()
            .filter(|(_, &slot)| self.node(slot).child.is_none())
            .map(|(&id, _)| id)
            .collect()
    }

    /// Every river, ordered so that each appears after all rivers draining
    /// into it.
    ///
    /// Headwaters are seeded in ascending id order, which makes the order
    /// deterministic for a given topology.
    pub fn topological_order(&self) -> Vec<RiverId> {
        let mut pending: Vec<usize> = self
            .nodes
            .iter()
            .map(|n| n.as_ref().map_or(0, |n| n.parents.len()))
            .collect();
        let mut headwaters: Vec<(RiverId, usize)> = self
            .index
            .iter()
            .filter(|(_, &slot)| pending[slot] == 0)
            .map(|(&id, &slot)| (id, slot))
            .collect();
        headwaters.sort_unstable();

        let mut queue: VecDeque<usize> = headwaters.into_iter().map(|(_, slot)| slot).collect();
        let mut order = Vec::with_capacity(self.len());
        while let Some(slot) = queue.pop_front() {
            let node = self.node(slot);
            order.push(node.river.id);
            if let Some(child) = node.child {
                pending[child] -= 1;
                if pending[child] == 0 {
                    queue.push_back(child);
                }
            }
        }
        order
    }

    /// `id` and every river draining into it, directly or transitively,
    /// in post-order: each river appears after all of its upstreams.
    ///
    /// Siblings are visited in ascending id order.
    pub fn upstream_closure(&self, id: RiverId) -> Result<Vec<RiverId>, NetworkError> {
        let root = self.slot_of(id)?;
        let mut order = Vec::new();
        // (slot, parents already expanded)
        let mut stack: Vec<(usize, bool)> = vec![(root, false)];
        while let Some((slot, expanded)) = stack.pop() {
            if expanded {
                order.push(self.node(slot).river.id);
                continue;
            }
            stack.push((slot, true));
            let mut parents: Vec<(RiverId, usize)> = self
                .node(slot)
                .parents
                .iter()
                .map(|&p| (self.node(p).river.id, p))
                .collect();
            parents.sort_unstable();
            // Reverse so the smallest id is popped first.
            for &(_, p) in parents.iter().rev() {
                stack.push((p, false));
            }
        }
        Ok(order)
    }

    /// Whether the link graph contains a directed cycle.
    ///
    /// Always `false` for a network observed through the public API.
    pub fn has_cycle(&self) -> bool {
        let mut colour = vec![Colour::White; self.nodes.len()];
        let mut path = Vec::new();
        for start in 0..self.nodes.len() {
            if self.nodes[start].is_none() || colour[start] != Colour::White {
                continue;
            }
            // Out-degree is at most one, so the DFS from `start` is the
            // walk along downstream links.
            let mut cursor = Some(start);
            while let Some(slot) = cursor {
                match colour[slot] {
                    Colour::Grey => return true,
                    Colour::Black => break,
                    Colour::White => {
                        colour[slot] = Colour::Grey;
                        path.push(slot);
                        cursor = self.node(slot).child;
                    }
                }
            }
            for slot in path.drain(..) {
                colour[slot] = Colour::Black;
            }
        }
        false
    }

    // ── internals ──────────────────────────────────────────────────

    fn slot_of(&self, id: RiverId) -> Result<usize, NetworkError> {
        if !id.is_valid() {
            return Err(NetworkError::InvalidId { id });
        }
        self.index
            .get(&id)
            .copied()
            .ok_or(NetworkError::UnknownId { id })
    }

    /// Occupied slot. Slots reachable from `index` or from links are
    /// always occupied.
    fn node(&self, slot: usize) -> &Node {
        match &self.nodes[slot] {
            Some(node) => node,
            None => unreachable!("slot {slot} is linked but vacant"),
        }
    }

    fn sorted_parent_ids(&self, slot: usize) -> Vec<RiverId> {
        let mut ids: Vec<RiverId> = self
            .node(slot)
            .parents
            .iter()
            .map(|&p| self.node(p).river.id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Point `slot` at `child`, registering it as a parent there.
    fn link(&mut self, slot: usize, child: Option<usize>) {
        if let Some(c) = child {
            if let Some(node) = self.nodes[c].as_mut() {
                node.parents.push(slot);
            }
        }
        if let Some(node) = self.nodes[slot].as_mut() {
            node.child = child;
        }
    }

    /// Drop the link out of `slot`, if any.
    fn unlink(&mut self, slot: usize) {
        let child = self.nodes[slot].as_mut().and_then(|n| n.child.take());
        if let Some(c) = child {
            if let Some(node) = self.nodes[c].as_mut() {
                node.parents.retain(|p| *p != slot);
            }
        }
    }
}

/// Mutable view of a registered river.
///
/// Dereferences to [`River`] for reading. Only the unit-hydrograph
/// parameters and the downstream distance may be changed through it.
pub struct RiverMut<'a> {
    river: &'a mut River,
}

impl RiverMut<'_> {
    /// Replace the unit-hydrograph parameters.
    pub fn set_parameter(&mut self, parameter: UhgParameter) -> Result<(), NetworkError> {
        parameter
            .validate()
            .map_err(|source| NetworkError::InvalidUhgParam {
                id: self.river.id,
                source,
            })?;
        self.river.parameter = parameter;
        Ok(())
    }

    /// Replace the hydrological distance to the downstream river, in metres.
    pub fn set_distance(&mut self, distance: f64) -> Result<(), NetworkError> {
        if !distance.is_finite() || distance < 0.0 {
            return Err(NetworkError::InvalidUhgParam {
                id: self.river.id,
                source: UhgError::InvalidParameter {
                    name: "distance",
                    value: distance,
                },
            });
        }
        self.river.downstream.distance = distance;
        Ok(())
    }
}

impl Deref for RiverMut<'_> {
    type Target = River;

    fn deref(&self) -> &River {
        self.river
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> RiverNetwork {
        RiverNetwork::from_rivers([
            River::new(RiverId(1)),
            River::new(RiverId(2)).with_downstream(RiverId(1), 0.0),
            River::new(RiverId(3)).with_downstream(RiverId(2), 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn add_validates_ids() {
        let mut net = RiverNetwork::new();
        assert_eq!(
            net.add(River::new(RiverId(0))).unwrap_err(),
            NetworkError::InvalidId { id: RiverId(0) }
        );
        assert_eq!(
            net.add(River::new(RiverId(-4))).unwrap_err(),
            NetworkError::InvalidId { id: RiverId(-4) }
        );
        net.add(River::new(RiverId(1))).unwrap();
        assert_eq!(
            net.add(River::new(RiverId(1))).unwrap_err(),
            NetworkError::DuplicateId { id: RiverId(1) }
        );
        assert_eq!(
            net.add(River::new(RiverId(5)).with_downstream(RiverId(5), 0.0))
                .unwrap_err(),
            NetworkError::SelfLoop { id: RiverId(5) }
        );
        assert_eq!(
            net.add(River::new(RiverId(2)).with_downstream(RiverId(9), 0.0))
                .unwrap_err(),
            NetworkError::UnknownDownstream {
                id: RiverId(2),
                downstream: RiverId(9)
            }
        );
        assert_eq!(net.len(), 1);
    }

    #[test]
    fn add_validates_hydrograph() {
        let mut net = RiverNetwork::new();
        let mut bad = River::new(RiverId(1));
        bad.parameter.velocity = 0.0;
        assert!(matches!(
            net.add(bad).unwrap_err(),
            NetworkError::InvalidUhgParam { id: RiverId(1), .. }
        ));
        let negative = River::new(RiverId(1)).with_downstream(RiverId::NONE, -1.0);
        assert!(net.add(negative).is_err());
        assert!(net.is_empty());
    }

    #[test]
    fn lookups_of_unknown_ids_fail() {
        let net = chain();
        assert_eq!(
            net.river(RiverId(7)).unwrap_err(),
            NetworkError::UnknownId { id: RiverId(7) }
        );
        assert!(net.upstreams(RiverId(7)).is_err());
        assert!(net.downstream(RiverId(7)).is_err());
        assert_eq!(
            net.downstream(RiverId(0)).unwrap_err(),
            NetworkError::InvalidId { id: RiverId(0) }
        );
    }

    #[test]
    fn upstreams_are_sorted_and_stable() {
        let net = RiverNetwork::from_rivers([
            River::new(RiverId(1)),
            River::new(RiverId(9)).with_downstream(RiverId(1), 0.0),
            River::new(RiverId(4)).with_downstream(RiverId(1), 0.0),
            River::new(RiverId(6)).with_downstream(RiverId(1), 0.0),
        ])
        .unwrap();
        let ups = net.upstreams(RiverId(1)).unwrap();
        assert_eq!(ups, vec![RiverId(4), RiverId(6), RiverId(9)]);
        assert_eq!(net.upstreams(RiverId(1)).unwrap(), ups);
        assert!(net.upstreams(RiverId(9)).unwrap().is_empty());
    }

    #[test]
    fn cycle_is_rejected_and_rolled_back() {
        let mut net = chain();
        assert_eq!(
            net.set_downstream(RiverId(1), RiverId(3)),
            Err(NetworkError::WouldCycle {
                id: RiverId(1),
                downstream: RiverId(3)
            })
        );
        assert_eq!(net.downstream(RiverId(1)).unwrap(), RiverId::NONE);
        assert!(net.upstreams(RiverId(3)).unwrap().is_empty());
        assert!(!net.has_cycle());
    }

    #[test]
    fn rewire_rollback_restores_previous_link() {
        let mut net = chain();
        net.add(River::new(RiverId(4)).with_downstream(RiverId(1), 0.0))
            .unwrap();
        // 2 -> 1 currently; 2 -> 3 would close 3 -> 2 -> 3.
        assert!(net.set_downstream(RiverId(2), RiverId(3)).is_err());
        assert_eq!(net.downstream(RiverId(2)).unwrap(), RiverId(1));
        assert_eq!(
            net.upstreams(RiverId(1)).unwrap(),
            vec![RiverId(2), RiverId(4)]
        );
    }

    #[test]
    fn set_downstream_rewires_and_detaches() {
        let mut net = chain();
        net.set_downstream(RiverId(3), RiverId(1)).unwrap();
        assert_eq!(net.downstream(RiverId(3)).unwrap(), RiverId(1));
        assert_eq!(
            net.upstreams(RiverId(1)).unwrap(),
            vec![RiverId(2), RiverId(3)]
        );
        assert!(net.upstreams(RiverId(2)).unwrap().is_empty());

        net.set_downstream(RiverId(3), RiverId::NONE).unwrap();
        assert_eq!(net.downstream(RiverId(3)).unwrap(), RiverId::NONE);
        assert_eq!(net.terminals(), vec![RiverId(1), RiverId(3)]);

        assert_eq!(
            net.set_downstream(RiverId(3), RiverId(3)),
            Err(NetworkError::SelfLoop { id: RiverId(3) })
        );
        assert_eq!(
            net.set_downstream(RiverId(3), RiverId(8)),
            Err(NetworkError::UnknownId { id: RiverId(8) })
        );
    }

    #[test]
    fn remove_clears_children() {
        let mut net = RiverNetwork::from_rivers([
            River::new(RiverId(1)),
            River::new(RiverId(2)).with_downstream(RiverId(1), 500.0),
        ])
        .unwrap();
        let removed = net.remove(RiverId(1)).unwrap();
        assert_eq!(removed.id, RiverId(1));
        assert_eq!(net.downstream(RiverId(2)).unwrap(), RiverId::NONE);
        assert_eq!(net.river(RiverId(2)).unwrap().downstream.distance, 500.0);
        assert!(!net.contains(RiverId(1)));
        assert_eq!(
            net.remove(RiverId(1)).unwrap_err(),
            NetworkError::UnknownId { id: RiverId(1) }
        );
    }

    #[test]
    fn remove_detaches_from_downstream() {
        let mut net = chain();
        net.remove(RiverId(2)).unwrap();
        assert!(net.upstreams(RiverId(1)).unwrap().is_empty());
        assert_eq!(net.downstream(RiverId(3)).unwrap(), RiverId::NONE);
        // The freed slot is reused without disturbing the rest.
        net.add(River::new(RiverId(7)).with_downstream(RiverId(1), 0.0))
            .unwrap();
        assert_eq!(net.upstreams(RiverId(1)).unwrap(), vec![RiverId(7)]);
        assert_eq!(
            net.ids().collect::<Vec<_>>(),
            vec![RiverId(1), RiverId(3), RiverId(7)]
        );
    }

    #[test]
    fn river_mut_edits_hydrograph_only() {
        let mut net = chain();
        {
            let mut view = net.river_mut(RiverId(2)).unwrap();
            view.set_distance(3600.0).unwrap();
            assert!(view.set_distance(f64::NAN).is_err());
            assert!(view
                .set_parameter(UhgParameter {
                    velocity: -1.0,
                    ..UhgParameter::default()
                })
                .is_err());
            view.set_parameter(UhgParameter::new(2.0, 2.0, 1.0).unwrap())
                .unwrap();
            assert_eq!(view.downstream.id, RiverId(1));
        }
        let r = net.river(RiverId(2)).unwrap();
        assert_eq!(r.downstream.distance, 3600.0);
        assert_eq!(r.parameter.velocity, 2.0);
    }

    #[test]
    fn topological_order_puts_upstreams_first() {
        let net = RiverNetwork::from_rivers([
            River::new(RiverId(1)),
            River::new(RiverId(2)).with_downstream(RiverId(1), 0.0),
            River::new(RiverId(3)).with_downstream(RiverId(1), 0.0),
            River::new(RiverId(4)).with_downstream(RiverId(3), 0.0),
            River::new(RiverId(10)),
        ])
        .unwrap();
        let order = net.topological_order();
        assert_eq!(order.len(), 5);
        let pos = |id: i64| order.iter().position(|&r| r == RiverId(id)).unwrap();
        assert!(pos(4) < pos(3));
        assert!(pos(3) < pos(1));
        assert!(pos(2) < pos(1));
        assert_eq!(order, net.topological_order());
    }

    #[test]
    fn upstream_closure_is_post_order() {
        let net = RiverNetwork::from_rivers([
            River::new(RiverId(1)),
            River::new(RiverId(3)).with_downstream(RiverId(1), 0.0),
            River::new(RiverId(2)).with_downstream(RiverId(1), 0.0),
            River::new(RiverId(4)).with_downstream(RiverId(3), 0.0),
            River::new(RiverId(5)),
        ])
        .unwrap();
        assert_eq!(
            net.upstream_closure(RiverId(1)).unwrap(),
            vec![RiverId(2), RiverId(4), RiverId(3), RiverId(1)]
        );
        assert_eq!(
            net.upstream_closure(RiverId(5)).unwrap(),
            vec![RiverId(5)]
        );
    }
}
