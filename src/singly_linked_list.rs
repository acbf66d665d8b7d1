use std::fmt;

use tracing::{debug, trace};

use crate::{
    arena::Arena, node::SinglyNode, Position, PositionError, PositionalList, Result, Structure,
};

/// A positional list with forward links only.
///
/// Elements can be added at either end or after a known position, but only
/// the head can be removed: finding a node's predecessor would need a scan.
pub struct SinglyLinkedList<T> {
    arena: Arena<SinglyNode<T>>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
    epoch: u64,
}

impl<T> SinglyLinkedList<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            head: None,
            tail: None,
            len: 0,
            epoch: 0,
        }
    }

    /// Resolves a position that is still linked into this list.
    fn linked(&self, position: Position) -> Result<usize> {
        let index = self.arena.validate(position)?;
        if self.arena[index].epoch != self.epoch {
            return Err(PositionError::InvalidPosition(format!(
                "element at {} was discarded by an instant clear",
                position
            )));
        }
        Ok(index)
    }

    fn link(&mut self, element: T, next: Option<usize>) -> usize {
        self.len += 1;
        self.arena.insert(SinglyNode {
            element,
            next,
            epoch: self.epoch,
        })
    }

    /// Iterates over the elements from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            arena: &self.arena,
            next: self.head,
            remaining: self.len,
        }
    }

    /// Iterates over the positions from head to tail.
    pub fn positions(&self) -> Positions<'_, T> {
        Positions {
            arena: &self.arena,
            next: self.head,
        }
    }
}

impl<T> Structure for SinglyLinkedList<T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<T> PositionalList for SinglyLinkedList<T> {
    type Element = T;

    fn first(&self) -> Option<Position> {
        self.head.map(|index| self.arena.position_of(index))
    }

    fn last(&self) -> Option<Position> {
        self.tail.map(|index| self.arena.position_of(index))
    }

    fn after(&self, position: Position) -> Result<Option<Position>> {
        let index = self.arena.validate(position)?;
        Ok(self.arena[index]
            .next
            .map(|next| self.arena.position_of(next)))
    }

    fn get(&self, position: Position) -> Result<&T> {
        self.arena.element(position)
    }

    fn get_mut(&mut self, position: Position) -> Result<&mut T> {
        self.arena.element_mut(position)
    }

    fn add_first(&mut self, element: T) -> Position {
        let index = self.link(element, self.head);
        self.head = Some(index);
        if self.tail.is_none() {
            self.tail = Some(index);
        }
        self.arena.position_of(index)
    }

    fn add_last(&mut self, element: T) -> Position {
        let index = self.link(element, None);
        match self.tail {
            Some(tail) => self.arena[tail].next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.arena.position_of(index)
    }

    fn add_after(&mut self, position: Position, element: T) -> Result<Position> {
        let at = self.linked(position)?;
        let index = self.link(element, self.arena[at].next);
        self.arena[at].next = Some(index);
        if self.tail == Some(at) {
            self.tail = Some(index);
        }
        trace!(container = %self.arena.id(), after = at, index, "spliced node");
        Ok(self.arena.position_of(index))
    }

    fn remove_first(&mut self) -> Result<T> {
        let head = self.head.ok_or_else(|| {
            PositionError::EmptyContainer("cannot remove the first element of an empty list".into())
        })?;
        let node = self.arena.deprecate(head);
        self.head = node.next;
        if self.head.is_none() {
            self.tail = None;
        }
        self.len -= 1;
        Ok(node.element)
    }

    fn replace(&mut self, position: Position, element: T) -> Result<T> {
        self.arena.replace(position, element)
    }

    fn clear(&mut self, instant: bool) {
        let mut deprecated = 0;
        if instant {
            self.epoch += 1;
        } else {
            // Sweeps nodes orphaned by earlier instant clears as well.
            deprecated = self.arena.clear();
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
        debug!(container = %self.arena.id(), instant, deprecated, "list cleared");
    }

    fn contains_position(&self, position: Position) -> bool {
        self.arena.contains(position)
    }
}

impl<T> Default for SinglyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SinglyLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for SinglyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for SinglyLinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add_last(element);
        }
    }
}

/// An iterator over the elements of a [`SinglyLinkedList`].
///
/// The iterator borrows the list, so the list cannot change underneath it.
pub struct Iter<'a, T> {
    arena: &'a Arena<SinglyNode<T>>,
    next: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.arena[self.next?];
        self.next = node.next;
        self.remaining -= 1;
        Some(&node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// An iterator over the positions of a [`SinglyLinkedList`].
pub struct Positions<'a, T> {
    arena: &'a Arena<SinglyNode<T>>,
    next: Option<usize>,
}

impl<T> Iterator for Positions<'_, T> {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        self.next = self.arena[index].next;
        Some(self.arena.position_of(index))
    }
}

/// An owning iterator that drains a [`SinglyLinkedList`] from the head.
pub struct IntoIter<T>(SinglyLinkedList<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.remove_first().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<T> IntoIterator for SinglyLinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a SinglyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
