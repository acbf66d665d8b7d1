use std::fmt;

use tracing::{debug, trace};

use crate::{
    arena::Arena, node::BinaryNode, tree::write_outline, BinaryTree, Position, PositionError,
    Result, Structure, TraversalOrder, Tree, TreeIter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// A binary tree whose nodes link to their parent and both children.
///
/// Structural operations run in constant time, except grafting a subtree,
/// which moves every node of the donor tree.
pub struct LinkedBinaryTree<T> {
    arena: Arena<BinaryNode<T>>,
    root: Option<usize>,
    len: usize,
}

impl<T> LinkedBinaryTree<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    fn slot(&mut self, index: usize, side: Side) -> &mut Option<usize> {
        let node = &mut self.arena[index];
        match side {
            Side::Left => &mut node.left,
            Side::Right => &mut node.right,
        }
    }

    /// Resolves `position` and checks that its `side` child slot is free.
    fn vacant(&mut self, position: Position, side: Side) -> Result<usize> {
        let index = self.arena.validate(position)?;
        if self.slot(index, side).is_some() {
            return Err(PositionError::SlotOccupied(format!(
                "{} already has a {} child",
                position, side
            )));
        }
        Ok(index)
    }

    /// Places a new element at the root of an empty tree.
    pub fn add_root(&mut self, element: T) -> Result<Position> {
        if self.root.is_some() {
            return Err(PositionError::NotEmpty(
                "cannot add a root to a tree that already has one".into(),
            ));
        }
        let index = self.arena.insert(BinaryNode::new(element, None));
        self.root = Some(index);
        self.len = 1;
        Ok(self.arena.position_of(index))
    }

    fn add_child(&mut self, position: Position, side: Side, element: T) -> Result<Position> {
        let parent = self.vacant(position, side)?;
        let index = self.arena.insert(BinaryNode::new(element, Some(parent)));
        *self.slot(parent, side) = Some(index);
        self.len += 1;
        trace!(container = %self.arena.id(), parent, index, %side, "child added");
        Ok(self.arena.position_of(index))
    }

    pub fn add_left(&mut self, position: Position, element: T) -> Result<Position> {
        self.add_child(position, Side::Left, element)
    }

    pub fn add_right(&mut self, position: Position, element: T) -> Result<Position> {
        self.add_child(position, Side::Right, element)
    }

    fn attach(
        &mut self,
        position: Position,
        side: Side,
        subtree: LinkedBinaryTree<T>,
    ) -> Result<Option<Position>> {
        let parent = self.vacant(position, side)?;
        let LinkedBinaryTree { arena, root, len } = subtree;
        let Some(root) = root else {
            return Ok(None);
        };

        let map = self.arena.absorb(arena);
        let root = map[root].ok_or_else(|| {
            PositionError::InvalidPosition("subtree root was not carried over".into())
        })?;
        self.arena[root].parent = Some(parent);
        *self.slot(parent, side) = Some(root);
        self.len += len;
        debug!(container = %self.arena.id(), parent, nodes = len, %side, "subtree attached");
        Ok(Some(self.arena.position_of(root)))
    }

    /// Grafts `subtree` as the left child of `position`.
    ///
    /// The subtree is consumed; positions it handed out are not valid in this
    /// tree. Returns the new position of the subtree's root, or `None` if the
    /// subtree was empty.
    pub fn attach_left(
        &mut self,
        position: Position,
        subtree: LinkedBinaryTree<T>,
    ) -> Result<Option<Position>> {
        self.attach(position, Side::Left, subtree)
    }

    /// Grafts `subtree` as the right child of `position`. See [`attach_left`](Self::attach_left).
    pub fn attach_right(
        &mut self,
        position: Position,
        subtree: LinkedBinaryTree<T>,
    ) -> Result<Option<Position>> {
        self.attach(position, Side::Right, subtree)
    }

    /// Removes the element at `position`, moving its only child (if any) into
    /// its place. Fails with `TooManyChildren` if it has two children.
    pub fn remove(&mut self, position: Position) -> Result<T> {
        let index = self.arena.validate(position)?;
        let node = &self.arena[index];
        if node.left.is_some() && node.right.is_some() {
            return Err(PositionError::TooManyChildren(format!(
                "{} has both a left and a right child",
                position
            )));
        }

        let child = node.left.or(node.right);
        let parent = node.parent;
        if let Some(child) = child {
            self.arena[child].parent = parent;
        }
        match parent {
            None => self.root = child,
            Some(parent) => {
                let parent = &mut self.arena[parent];
                if parent.left == Some(index) {
                    parent.left = child;
                } else {
                    parent.right = child;
                }
            }
        }

        self.len -= 1;
        trace!(container = %self.arena.id(), index, ?child, "node removed");
        Ok(self.arena.deprecate(index).element)
    }

    /// Swaps the element at `position`, returning the previous one.
    pub fn replace(&mut self, position: Position, element: T) -> Result<T> {
        self.arena.replace(position, element)
    }

    pub fn get_mut(&mut self, position: Position) -> Result<&mut T> {
        self.arena.element_mut(position)
    }

    /// Removes every element, invalidating all positions.
    pub fn clear(&mut self) {
        let deprecated = self.arena.clear();
        self.root = None;
        self.len = 0;
        debug!(container = %self.arena.id(), deprecated, "tree cleared");
    }

    /// Iterates over positions and elements from the root in the given order.
    pub fn iter(&self, order: TraversalOrder) -> TreeIter<'_, BinaryNode<T>> {
        TreeIter::new(&self.arena, self.root, order)
    }
}

impl<T> Structure for LinkedBinaryTree<T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<T> Tree for LinkedBinaryTree<T> {
    type Element = T;

    fn root(&self) -> Option<Position> {
        self.root.map(|index| self.arena.position_of(index))
    }

    fn get(&self, position: Position) -> Result<&T> {
        self.arena.element(position)
    }

    fn parent(&self, position: Position) -> Result<Option<Position>> {
        let index = self.arena.validate(position)?;
        Ok(self.arena[index]
            .parent
            .map(|parent| self.arena.position_of(parent)))
    }

    fn children(&self, position: Position) -> Result<Vec<Position>> {
        let index = self.arena.validate(position)?;
        let node = &self.arena[index];
        Ok(node
            .left
            .into_iter()
            .chain(node.right)
            .map(|child| self.arena.position_of(child))
            .collect())
    }
}

impl<T> BinaryTree for LinkedBinaryTree<T> {
    fn left(&self, position: Position) -> Result<Option<Position>> {
        let index = self.arena.validate(position)?;
        Ok(self.arena[index]
            .left
            .map(|left| self.arena.position_of(left)))
    }

    fn right(&self, position: Position) -> Result<Option<Position>> {
        let index = self.arena.validate(position)?;
        Ok(self.arena[index]
            .right
            .map(|right| self.arena.position_of(right)))
    }
}

impl<T> Default for LinkedBinaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Display> fmt::Display for LinkedBinaryTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_outline(self, f)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{ErrorKind, InOrder, LevelOrder, PostOrder, PreOrder, Visit};

    /// 1 -> (2 -> (4, -), 3)
    fn sample() -> Result<(LinkedBinaryTree<i32>, Vec<Position>), Box<dyn Error>> {
        let mut tree = LinkedBinaryTree::new();
        let p1 = tree.add_root(1)?;
        let p2 = tree.add_left(p1, 2)?;
        let p3 = tree.add_right(p1, 3)?;
        let p4 = tree.add_left(p2, 4)?;
        Ok((tree, vec![p1, p2, p3, p4]))
    }

    #[test]
    fn preorder_visits_with_indices() -> Result<(), Box<dyn Error>> {
        let (tree, positions) = sample()?;
        let mut visited = Vec::new();
        let mut preorder = PreOrder::new(|element: &i32, visit: Visit<'_, _>| {
            visited.push((*element, visit.index, visit.position));
        });
        tree.traverse_binary(&mut preorder)?;

        assert_eq!(
            visited,
            vec![
                (1, 0, positions[0]),
                (2, 1, positions[1]),
                (4, 2, positions[3]),
                (3, 3, positions[2]),
            ]
        );
        Ok(())
    }

    #[test]
    fn each_strategy_has_its_order() -> Result<(), Box<dyn Error>> {
        let (tree, _) = sample()?;

        let mut inorder = Vec::new();
        tree.traverse_binary(&mut InOrder::new(|e: &i32, _: Visit<'_, _>| inorder.push(*e)))?;
        assert_eq!(inorder, vec![4, 2, 1, 3]);

        let mut postorder = Vec::new();
        tree.traverse_binary(&mut PostOrder::new(|e: &i32, v: Visit<'_, _>| {
            postorder.push((*e, v.index))
        }))?;
        assert_eq!(postorder, vec![(4, 0), (2, 1), (3, 2), (1, 3)]);

        let mut levels = Vec::new();
        tree.traverse_binary(&mut LevelOrder::new(|e: &i32, v: Visit<'_, _>| {
            levels.push((*e, v.index, v.depth))
        }))?;
        assert_eq!(levels, vec![(1, 0, 0), (2, 1, 1), (3, 2, 1), (4, 3, 2)]);

        // The general view of a binary tree walks [left, right] as its children.
        let mut general = Vec::new();
        tree.traverse_general(&mut PostOrder::new(|e: &i32, _: Visit<'_, _>| {
            general.push(*e)
        }))?;
        assert_eq!(general, vec![4, 2, 3, 1]);
        Ok(())
    }

    #[test]
    fn empty_tree_visits_nothing() -> Result<(), Box<dyn Error>> {
        let tree = LinkedBinaryTree::<i32>::new();
        let mut calls = 0;
        tree.traverse_binary(&mut PreOrder::new(|_: &i32, _: Visit<'_, _>| calls += 1))?;
        tree.traverse_general(&mut LevelOrder::new(|_: &i32, _: Visit<'_, _>| calls += 1))?;
        assert_eq!(calls, 0);
        assert!(tree.traversable()?.is_none());
        Ok(())
    }

    #[test]
    fn relationship_queries() -> Result<(), Box<dyn Error>> {
        let (tree, p) = sample()?;

        assert_eq!(tree.root(), Some(p[0]));
        assert_eq!(tree.left(p[0])?, Some(p[1]));
        assert_eq!(tree.right(p[0])?, Some(p[2]));
        assert_eq!(tree.sibling(p[1])?, Some(p[2]));
        assert_eq!(tree.sibling(p[2])?, Some(p[1]));
        assert_eq!(tree.sibling(p[3])?, None);
        assert_eq!(tree.sibling(p[0])?, None);
        assert!(tree.has_sibling(p[1])?);
        assert!(tree.has_left(p[1])? && !tree.has_right(p[1])?);
        assert!(tree.is_left_child(p[0], p[1])?);
        assert!(tree.is_right_child(p[0], p[2])?);
        assert!(!tree.is_left_child(p[0], p[2])?);

        assert_eq!(tree.depth(p[3])?, 2);
        assert_eq!(tree.height(p[0])?, 2);
        assert_eq!(tree.num_children(p[0])?, 2);
        assert!(tree.is_root(p[0])?);
        assert!(tree.is_leaf(p[3])?);
        assert!(tree.is_internal(p[1])?);
        Ok(())
    }

    #[test]
    fn occupied_slots_are_rejected() -> Result<(), Box<dyn Error>> {
        let (mut tree, p) = sample()?;

        assert_eq!(tree.add_root(9).unwrap_err().kind(), ErrorKind::NotEmpty);
        assert_eq!(tree.add_left(p[0], 9).unwrap_err().kind(), ErrorKind::SlotOccupied);

        let mut donor = LinkedBinaryTree::new();
        donor.add_root(9)?;
        let err = tree.attach_right(p[0], donor).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SlotOccupied);
        assert_eq!(tree.len(), 4);
        Ok(())
    }

    #[test]
    fn stale_and_foreign_positions_change_nothing() -> Result<(), Box<dyn Error>> {
        let (mut tree, p) = sample()?;
        assert_eq!(tree.remove(p[3])?, 4);
        let before = tree.to_string();

        let mut other = LinkedBinaryTree::new();
        let foreign = other.add_root(0)?;

        for position in [p[3], foreign] {
            assert_eq!(tree.add_left(position, 9).unwrap_err().kind(), ErrorKind::InvalidPosition);
            assert_eq!(tree.add_right(position, 9).unwrap_err().kind(), ErrorKind::InvalidPosition);
            assert_eq!(tree.remove(position).unwrap_err().kind(), ErrorKind::InvalidPosition);

            let mut donor = LinkedBinaryTree::new();
            donor.add_root(9)?;
            let err = tree.attach_left(position, donor).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidPosition);
        }

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.to_string(), before);
        assert!(tree.is_leaf(p[1])?);
        Ok(())
    }

    #[test]
    fn remove_promotes_only_child() -> Result<(), Box<dyn Error>> {
        let mut tree = LinkedBinaryTree::new();
        let p1 = tree.add_root(1)?;
        let p2 = tree.add_left(p1, 2)?;
        let p3 = tree.add_left(p2, 3)?;

        assert_eq!(tree.remove(p2)?, 2);
        assert_eq!(tree.left(p1)?, Some(p3));
        assert_eq!(tree.parent(p3)?, Some(p1));
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(p2).unwrap_err().kind(), ErrorKind::InvalidPosition);

        assert_eq!(tree.remove(p1)?, 1);
        assert_eq!(tree.root(), Some(p3));
        assert!(tree.is_root(p3)?);
        Ok(())
    }

    #[test]
    fn remove_with_two_children_fails() -> Result<(), Box<dyn Error>> {
        let (mut tree, p) = sample()?;
        let err = tree.remove(p[0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TooManyChildren);
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.left(p[0])?, Some(p[1]));
        assert_eq!(tree.right(p[0])?, Some(p[2]));
        Ok(())
    }

    #[test]
    fn attach_moves_subtree() -> Result<(), Box<dyn Error>> {
        let (mut tree, p) = sample()?;

        let mut donor = LinkedBinaryTree::new();
        let d1 = donor.add_root(5)?;
        donor.add_left(d1, 6)?;
        donor.add_right(d1, 7)?;

        let grafted = tree.attach_right(p[1], donor)?.ok_or("subtree was empty")?;
        assert_eq!(tree.len(), 7);
        assert_eq!(*tree.get(grafted)?, 5);
        assert_eq!(tree.parent(grafted)?, Some(p[1]));
        assert_eq!(tree.get(d1).unwrap_err().kind(), ErrorKind::InvalidPosition);

        let preorder = tree
            .iter(TraversalOrder::DepthFirst)
            .map(|(_, e)| *e)
            .collect::<Vec<_>>();
        assert_eq!(preorder, vec![1, 2, 4, 5, 6, 7, 3]);

        assert_eq!(tree.attach_left(p[2], LinkedBinaryTree::new())?, None);
        assert_eq!(tree.len(), 7);
        Ok(())
    }

    #[test]
    fn iterates_breadth_first() -> Result<(), Box<dyn Error>> {
        let (tree, _) = sample()?;
        let levels = tree
            .iter(TraversalOrder::BreadthFirst)
            .map(|(_, e)| *e)
            .collect::<Vec<_>>();
        assert_eq!(levels, vec![1, 2, 3, 4]);
        Ok(())
    }

    #[test]
    fn replace_and_clear() -> Result<(), Box<dyn Error>> {
        let (mut tree, p) = sample()?;
        assert_eq!(tree.replace(p[3], 40)?, 4);
        *tree.get_mut(p[2])? += 27;
        assert_eq!(tree.to_string(), "1\n  2\n    40\n  30\n");

        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
        assert!(p.iter().all(|pos| tree.get(*pos).is_err()));
        assert_eq!(tree.to_string(), "");
        Ok(())
    }
}
