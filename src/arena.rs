use std::ops::{Index, IndexMut};

use tracing::{debug, trace};

use crate::{container::Holder, ContainerId, Position, PositionError, Result};

/// Nodes whose links are arena indices that must be rewritten when the node
/// moves into another arena.
pub trait Relink {
    fn relink(&mut self, map: &[Option<usize>]);
}

struct Slot<N> {
    generation: u64,
    node: Option<N>,
}

/// Generational storage shared by every container.
///
/// Removing a node bumps its slot's generation, so a [`Position`] minted
/// before the removal no longer matches and fails validation even after the
/// slot has been reused.
pub(crate) struct Arena<N> {
    id: ContainerId,
    slots: Vec<Slot<N>>,
    free: Vec<usize>,
}

impl<N> Arena<N> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: ContainerId::new(),
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub fn id(&self) -> ContainerId {
        self.id
    }

    pub fn insert(&mut self, node: N) -> usize {
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index].node = Some(node);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                self.slots.len() - 1
            }
        };
        trace!(container = %self.id, index, "node inserted");
        index
    }

    /// The position for the live node at `index`.
    pub fn position_of(&self, index: usize) -> Position {
        Position {
            owner: self.id,
            index,
            generation: self.slots[index].generation,
        }
    }

    /// Resolves `position` to a slot index, rejecting foreign and stale positions.
    pub fn validate(&self, position: Position) -> Result<usize> {
        if position.owner != self.id {
            debug!(container = %self.id, owner = %position.owner, "foreign position rejected");
            return Err(PositionError::InvalidPosition(format!(
                "position belongs to container {}, not {}",
                position.owner, self.id
            )));
        }

        match self.slots.get(position.index) {
            Some(slot) if slot.generation == position.generation && slot.node.is_some() => {
                Ok(position.index)
            }
            _ => {
                debug!(container = %self.id, index = position.index, "deprecated position rejected");
                Err(PositionError::InvalidPosition(format!(
                    "element at {} has been removed",
                    position
                )))
            }
        }
    }

    /// Number of slots currently holding a node.
    #[cfg(test)]
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.node.is_some()).count()
    }

    pub fn contains(&self, position: Position) -> bool {
        position.owner == self.id
            && self
                .slots
                .get(position.index)
                .is_some_and(|slot| slot.generation == position.generation && slot.node.is_some())
    }

    /// Takes the node out of its slot and invalidates every position minted for it.
    pub fn deprecate(&mut self, index: usize) -> N {
        let slot = &mut self.slots[index];
        let node = slot
            .node
            .take()
            .unwrap_or_else(|| panic!("arena slot {} is vacant", index));
        slot.generation += 1;
        self.free.push(index);
        trace!(container = %self.id, index, "node deprecated");
        node
    }

    /// Deprecates every live node, returning how many there were.
    pub fn clear(&mut self) -> usize {
        let mut count = 0;
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation += 1;
                count += 1;
            }
            self.free.push(index);
        }
        count
    }

    /// Moves every node of `donor` into this arena.
    ///
    /// Returns the index each donor slot landed in; links inside the moved
    /// nodes are already rewritten to the new indices.
    pub fn absorb(&mut self, donor: Arena<N>) -> Vec<Option<usize>>
    where
        N: Relink,
    {
        let mut map = vec![None; donor.slots.len()];
        let mut moved = Vec::new();
        for (old, slot) in donor.slots.into_iter().enumerate() {
            if let Some(node) = slot.node {
                let new = self.insert(node);
                map[old] = Some(new);
                moved.push(new);
            }
        }
        for index in moved {
            self[index].relink(&map);
        }
        debug!(container = %self.id, from = %donor.id, "arena absorbed");
        map
    }
}

impl<N: Holder> Arena<N> {
    pub fn element(&self, position: Position) -> Result<&N::Element> {
        let index = self.validate(position)?;
        Ok(self[index].element())
    }

    pub fn element_mut(&mut self, position: Position) -> Result<&mut N::Element> {
        let index = self.validate(position)?;
        Ok(self[index].element_mut())
    }

    pub fn replace(&mut self, position: Position, element: N::Element) -> Result<N::Element> {
        let slot = self.element_mut(position)?;
        Ok(std::mem::replace(slot, element))
    }
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Index<usize> for Arena<N> {
    type Output = N;

    fn index(&self, index: usize) -> &N {
        self.slots[index]
            .node
            .as_ref()
            .unwrap_or_else(|| panic!("arena slot {} is vacant", index))
    }
}

impl<N> IndexMut<usize> for Arena<N> {
    fn index_mut(&mut self, index: usize) -> &mut N {
        self.slots[index]
            .node
            .as_mut()
            .unwrap_or_else(|| panic!("arena slot {} is vacant", index))
    }
}
