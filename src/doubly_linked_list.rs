use std::fmt;

use tracing::{debug, trace};

use crate::{
    arena::Arena, node::DoublyNode, Position, PositionError, PositionalList, Result, Structure,
};

/// A positional list with links in both directions.
///
/// On top of the [`PositionalList`] operations it can move backwards, insert
/// before a position, and remove the tail or any position in constant time.
pub struct DoublyLinkedList<T> {
    arena: Arena<DoublyNode<T>>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
    epoch: u64,
}

impl<T> DoublyLinkedList<T> {
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

    /// Creates a node between `prev` and `next` and fixes up both neighbours.
    fn splice(&mut self, element: T, prev: Option<usize>, next: Option<usize>) -> Position {
        let index = self.arena.insert(DoublyNode {
            element,
            prev,
            next,
            epoch: self.epoch,
        });
        match prev {
            Some(prev) => self.arena[prev].next = Some(index),
            None => self.head = Some(index),
        }
        match next {
            Some(next) => self.arena[next].prev = Some(index),
            None => self.tail = Some(index),
        }
        self.len += 1;
        trace!(container = %self.arena.id(), index, ?prev, ?next, "spliced node");
        self.arena.position_of(index)
    }

    /// Unlinks the node at `index` and invalidates its positions.
    fn unlink(&mut self, index: usize) -> T {
        let node = self.arena.deprecate(index);
        match node.prev {
            Some(prev) => self.arena[prev].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.arena[next].prev = node.prev,
            None => self.tail = node.prev,
        }
        self.len -= 1;
        node.element
    }

    /// The position preceding `position`, or `None` at the head.
    pub fn before(&self, position: Position) -> Result<Option<Position>> {
        let index = self.arena.validate(position)?;
        Ok(self.arena[index]
            .prev
            .map(|prev| self.arena.position_of(prev)))
    }

    pub fn add_before(&mut self, position: Position, element: T) -> Result<Position> {
        let at = self.linked(position)?;
        let prev = self.arena[at].prev;
        Ok(self.splice(element, prev, Some(at)))
    }

    /// Removes the tail element, failing with `EmptyContainer` on an empty list.
    pub fn remove_last(&mut self) -> Result<T> {
        let tail = self.tail.ok_or_else(|| {
            PositionError::EmptyContainer("cannot remove the last element of an empty list".into())
        })?;
        Ok(self.unlink(tail))
    }

    /// Removes the element at `position`.
    pub fn remove(&mut self, position: Position) -> Result<T> {
        let index = self.linked(position)?;
        Ok(self.unlink(index))
    }

    /// Iterates over the elements from head to tail. Use `rev()` to walk backwards.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            arena: &self.arena,
            front: self.head,
            back: self.tail,
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

impl<T> Structure for DoublyLinkedList<T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<T> PositionalList for DoublyLinkedList<T> {
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
        self.splice(element, None, self.head)
    }

    fn add_last(&mut self, element: T) -> Position {
        self.splice(element, self.tail, None)
    }

    fn add_after(&mut self, position: Position, element: T) -> Result<Position> {
        let at = self.linked(position)?;
        let next = self.arena[at].next;
        Ok(self.splice(element, Some(at), next))
    }

    fn remove_first(&mut self) -> Result<T> {
        let head = self.head.ok_or_else(|| {
            PositionError::EmptyContainer("cannot remove the first element of an empty list".into())
        })?;
        Ok(self.unlink(head))
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

impl<T> Default for DoublyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for DoublyLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for DoublyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for DoublyLinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add_last(element);
        }
    }
}

/// A double-ended iterator over the elements of a [`DoublyLinkedList`].
pub struct Iter<'a, T> {
    arena: &'a Arena<DoublyNode<T>>,
    front: Option<usize>,
    back: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.arena[self.front?];
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.arena[self.back?];
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.element)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// An iterator over the positions of a [`DoublyLinkedList`].
pub struct Positions<'a, T> {
    arena: &'a Arena<DoublyNode<T>>,
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

/// An owning iterator that drains a [`DoublyLinkedList`] from either end.
pub struct IntoIter<T>(DoublyLinkedList<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.remove_first().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.0.remove_last().ok()
    }
}

impl<T> IntoIterator for DoublyLinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a DoublyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
