#![doc = include_str!("../README.md")]

mod arena;
mod binary_tree;
mod container;
mod doubly_linked_list;
mod error;
mod iter;
mod linked_binary_tree;
mod linked_tree;
mod node;
mod position;
mod singly_linked_list;
mod traversal;
mod tree;

pub use binary_tree::BinaryTree;
pub use container::{PositionalList, Structure};
pub use doubly_linked_list::DoublyLinkedList;
pub use error::{ErrorKind, PositionError};
pub use iter::{TraversalOrder, TreeIter};
pub use linked_binary_tree::LinkedBinaryTree;
pub use linked_tree::LinkedTree;
pub use position::{ContainerId, Position};
pub use singly_linked_list::SinglyLinkedList;
pub use traversal::{
    BinaryTraversal, GeneralTraversal, InOrder, LevelOrder, PostOrder, PreOrder, Traversable,
    Visit,
};
pub use tree::Tree;

/// Iterators returned by the list types.
pub mod list_iter {
    pub use crate::doubly_linked_list::{
        IntoIter as DoublyIntoIter, Iter as DoublyIter, Positions as DoublyPositions,
    };
    pub use crate::singly_linked_list::{
        IntoIter as SinglyIntoIter, Iter as SinglyIter, Positions as SinglyPositions,
    };
}

/// A convenience type alias for the result of list and tree operations.
pub type Result<T, E = PositionError> = std::result::Result<T, E>;
