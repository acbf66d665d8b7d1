use crate::{Position, Result};

/// Anything that stores elements and can report how many.
pub trait Structure {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A stored node holding exactly one element.
pub trait Holder {
    type Element;

    fn element(&self) -> &Self::Element;
    fn element_mut(&mut self) -> &mut Self::Element;
}

/// The operations shared by every positional list.
///
/// Positions handed out by a list stay valid until their element is removed.
/// All operations run in constant time except [`clear`](Self::clear) with
/// `instant == false`, which visits every node once.
pub trait PositionalList: Structure {
    type Element;

    /// The position of the head element, or `None` when the list is empty.
    fn first(&self) -> Option<Position>;

    /// The position of the tail element, or `None` when the list is empty.
    fn last(&self) -> Option<Position>;

    /// The position following `position`, or `None` at the tail.
    fn after(&self, position: Position) -> Result<Option<Position>>;

    fn get(&self, position: Position) -> Result<&Self::Element>;
    fn get_mut(&mut self, position: Position) -> Result<&mut Self::Element>;

    fn add_first(&mut self, element: Self::Element) -> Position;
    fn add_last(&mut self, element: Self::Element) -> Position;
    fn add_after(&mut self, position: Position, element: Self::Element) -> Result<Position>;

    /// Removes the head element, failing with `EmptyContainer` on an empty list.
    fn remove_first(&mut self) -> Result<Self::Element>;

    /// Swaps the element at `position`, returning the previous one.
    fn replace(&mut self, position: Position, element: Self::Element) -> Result<Self::Element>;

    /// Empties the list.
    ///
    /// With `instant == false` every node is deprecated, so positions held by
    /// callers become invalid. With `instant == true` only the bookkeeping is
    /// reset: outstanding positions keep resolving to their (now unreachable)
    /// elements for reads and [`replace`](Self::replace), but are rejected by
    /// every operation that would relink them.
    fn clear(&mut self, instant: bool);

    /// Whether `position` currently refers to a live element of this list.
    fn contains_position(&self, position: Position) -> bool;
}
