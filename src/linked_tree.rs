use std::fmt;

use tracing::{debug, trace};

use crate::{
    arena::Arena, node::TreeNode, tree::write_outline, Position, PositionError, Result,
    Structure, TraversalOrder, Tree, TreeIter,
};

/// A tree whose nodes may have any number of children, kept in insertion order.
pub struct LinkedTree<T> {
    arena: Arena<TreeNode<T>>,
    root: Option<usize>,
    len: usize,
}

impl<T> LinkedTree<T> {
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

    /// Places a new element at the root of an empty tree.
    pub fn add_root(&mut self, element: T) -> Result<Position> {
        if self.root.is_some() {
            return Err(PositionError::NotEmpty(
                "cannot add a root to a tree that already has one".into(),
            ));
        }
        let index = self.arena.insert(TreeNode::new(element, None));
        self.root = Some(index);
        self.len = 1;
        Ok(self.arena.position_of(index))
    }

    /// Appends a new element after the existing children of `position`.
    pub fn add_child(&mut self, position: Position, element: T) -> Result<Position> {
        let parent = self.arena.validate(position)?;
        let index = self.arena.insert(TreeNode::new(element, Some(parent)));
        self.arena[parent].children.push(index);
        self.len += 1;
        trace!(container = %self.arena.id(), parent, index, "child added");
        Ok(self.arena.position_of(index))
    }

    /// Grafts `subtree` as the last child of `position`.
    ///
    /// The subtree is consumed; positions it handed out are not valid in this
    /// tree. Returns the new position of the subtree's root, or `None` if the
    /// subtree was empty.
    pub fn attach_child(
        &mut self,
        position: Position,
        subtree: LinkedTree<T>,
    ) -> Result<Option<Position>> {
        let parent = self.arena.validate(position)?;
        let LinkedTree { arena, root, len } = subtree;
        let Some(root) = root else {
            return Ok(None);
        };

        let map = self.arena.absorb(arena);
        let root = map[root].ok_or_else(|| {
            PositionError::InvalidPosition("subtree root was not carried over".into())
        })?;
        self.arena[root].parent = Some(parent);
        self.arena[parent].children.push(root);
        self.len += len;
        debug!(container = %self.arena.id(), parent, nodes = len, "subtree attached");
        Ok(Some(self.arena.position_of(root)))
    }

    /// Removes the element at `position`, moving its only child (if any) into
    /// its place among its siblings. Fails with `TooManyChildren` if it has
    /// more than one child.
    pub fn remove(&mut self, position: Position) -> Result<T> {
        let index = self.arena.validate(position)?;
        let node = &self.arena[index];
        if node.children.len() > 1 {
            return Err(PositionError::TooManyChildren(format!(
                "{} has {} children",
                position,
                node.children.len()
            )));
        }

        let child = node.children.first().copied();
        let parent = node.parent;
        if let Some(child) = child {
            self.arena[child].parent = parent;
        }
        match parent {
            None => self.root = child,
            Some(parent) => {
                let siblings = &mut self.arena[parent].children;
                if let Some(slot) = siblings.iter().position(|&sibling| sibling == index) {
                    match child {
                        Some(child) => siblings[slot] = child,
                        None => {
                            siblings.remove(slot);
                        }
                    }
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
    pub fn iter(&self, order: TraversalOrder) -> TreeIter<'_, TreeNode<T>> {
        TreeIter::new(&self.arena, self.root, order)
    }
}

impl<T> Structure for LinkedTree<T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<T> Tree for LinkedTree<T> {
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
        Ok(self.arena[index]
            .children
            .iter()
            .map(|&child| self.arena.position_of(child))
            .collect())
    }

    fn num_children(&self, position: Position) -> Result<usize> {
        let index = self.arena.validate(position)?;
        Ok(self.arena[index].children.len())
    }
}

impl<T> Default for LinkedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Display> fmt::Display for LinkedTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_outline(self, f)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{ErrorKind, LevelOrder, PostOrder, PreOrder, Visit};

    fn setup_tree() -> Result<LinkedTree<&'static str>, Box<dyn Error>> {
        let mut tree = LinkedTree::new();
        let root = tree.add_root("root")?;

        let node1 = tree.add_child(root, "1")?;
        let node2 = tree.add_child(root, "2")?;
        let node3 = tree.add_child(root, "3")?;

        tree.add_child(node1, "4")?;
        tree.add_child(node1, "5")?;

        tree.add_child(node2, "6")?;
        tree.add_child(node2, "7")?;
        tree.add_child(node2, "8")?;

        tree.add_child(node3, "9")?;

        Ok(tree)
    }

    fn collect<S>(tree: &LinkedTree<&'static str>, order: TraversalOrder) -> Vec<S>
    where
        S: From<&'static str>,
    {
        tree.iter(order).map(|(_, e)| S::from(*e)).collect()
    }

    #[test]
    fn test_dfs() -> Result<(), Box<dyn Error>> {
        let tree = setup_tree()?;
        let result: Vec<String> = collect(&tree, TraversalOrder::DepthFirst);

        assert_eq!(
            result,
            vec!["root", "1", "4", "5", "2", "6", "7", "8", "3", "9"]
        );

        Ok(())
    }

    #[test]
    fn test_bfs() -> Result<(), Box<dyn Error>> {
        let tree = setup_tree()?;
        let result: Vec<String> = collect(&tree, TraversalOrder::BreadthFirst);

        assert_eq!(
            result,
            vec!["root", "1", "2", "3", "4", "5", "6", "7", "8", "9"]
        );

        Ok(())
    }

    #[test]
    fn strategies_match_iterators() -> Result<(), Box<dyn Error>> {
        let tree = setup_tree()?;

        let mut preorder = Vec::new();
        tree.traverse_general(&mut PreOrder::new(|e: &&'static str, v: Visit<'_, _>| {
            preorder.push((*e, v.index))
        }))?;
        let expected = tree
            .iter(TraversalOrder::DepthFirst)
            .enumerate()
            .map(|(i, (_, e))| (*e, i))
            .collect::<Vec<_>>();
        assert_eq!(preorder, expected);

        let mut levels = Vec::new();
        tree.traverse_general(&mut LevelOrder::new(|e: &&'static str, v: Visit<'_, _>| {
            levels.push((*e, v.index))
        }))?;
        let expected = tree
            .iter(TraversalOrder::BreadthFirst)
            .enumerate()
            .map(|(i, (_, e))| (*e, i))
            .collect::<Vec<_>>();
        assert_eq!(levels, expected);

        let mut postorder = Vec::new();
        tree.traverse_general(&mut PostOrder::new(|e: &&'static str, v: Visit<'_, _>| {
            postorder.push((*e, v.index))
        }))?;
        assert_eq!(
            postorder,
            vec![
                ("4", 0),
                ("5", 1),
                ("1", 2),
                ("6", 3),
                ("7", 4),
                ("8", 5),
                ("2", 6),
                ("9", 7),
                ("3", 8),
                ("root", 9),
            ]
        );
        Ok(())
    }

    #[test]
    fn traversable_navigation() -> Result<(), Box<dyn Error>> {
        let tree = setup_tree()?;
        let root = tree.traversable()?.ok_or("tree is empty")?;
        assert_eq!(*root.element(), "root");
        assert_eq!(root.depth(), 0);

        let children = root.children()?;
        assert_eq!(
            children.iter().map(|c| *c.element()).collect::<Vec<_>>(),
            vec!["1", "2", "3"]
        );
        let grandchildren = children[1].children()?;
        assert_eq!(grandchildren.len(), 3);
        assert_eq!(grandchildren[0].depth(), 2);
        assert_eq!(tree.parent(grandchildren[0].position())?, Some(children[1].position()));
        Ok(())
    }

    #[test]
    fn remove_keeps_sibling_order() -> Result<(), Box<dyn Error>> {
        let mut tree = setup_tree()?;
        let root = tree.root().ok_or("tree is empty")?;
        let node3 = tree.children(root)?[2];
        let node1 = tree.children(root)?[0];

        assert_eq!(tree.remove(node1).unwrap_err().kind(), ErrorKind::TooManyChildren);

        // "3" has a single child, "9", which takes its place.
        assert_eq!(tree.remove(node3)?, "3");
        let names = tree
            .children(root)?
            .into_iter()
            .map(|p| tree.get(p).map(|e| *e))
            .collect::<Result<Vec<_>>>()?;
        assert_eq!(names, vec!["1", "2", "9"]);
        assert_eq!(tree.len(), 9);
        assert_eq!(tree.get(node3).unwrap_err().kind(), ErrorKind::InvalidPosition);

        // Leaves just disappear.
        let node5 = tree.children(node1)?[1];
        tree.remove(node5)?;
        assert_eq!(tree.num_children(node1)?, 1);
        Ok(())
    }

    #[test]
    fn attach_child_grafts_donor() -> Result<(), Box<dyn Error>> {
        let mut tree = setup_tree()?;
        let root = tree.root().ok_or("tree is empty")?;

        let mut donor = LinkedTree::new();
        let d = donor.add_root("a")?;
        donor.add_child(d, "b")?;

        let grafted = tree.attach_child(root, donor)?.ok_or("donor was empty")?;
        assert_eq!(tree.len(), 12);
        assert_eq!(tree.children(root)?.last(), Some(&grafted));
        assert_eq!(tree.depth(grafted)?, 1);
        assert_eq!(tree.height(root)?, 2);
        assert!(tree.get(d).is_err());
        Ok(())
    }

    #[test]
    fn stale_and_foreign_positions_change_nothing() -> Result<(), Box<dyn Error>> {
        let mut tree = setup_tree()?;
        let root = tree.root().ok_or("tree is empty")?;
        let node3 = tree.children(root)?[2];
        let node9 = tree.children(node3)?[0];
        tree.remove(node9)?;
        let before = tree.to_string();

        let mut other = LinkedTree::new();
        let foreign = other.add_root("x")?;

        for position in [node9, foreign] {
            let err = tree.add_child(position, "new").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidPosition);
            assert_eq!(tree.remove(position).unwrap_err().kind(), ErrorKind::InvalidPosition);

            let mut donor = LinkedTree::new();
            donor.add_root("d")?;
            let err = tree.attach_child(position, donor).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidPosition);
        }

        assert_eq!(tree.len(), 9);
        assert_eq!(tree.to_string(), before);
        assert!(tree.is_leaf(node3)?);
        Ok(())
    }

    #[test]
    fn root_rules() -> Result<(), Box<dyn Error>> {
        let mut tree = LinkedTree::new();
        let root = tree.add_root(1)?;
        assert_eq!(tree.add_root(2).unwrap_err().kind(), ErrorKind::NotEmpty);

        assert_eq!(tree.remove(root)?, 1);
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
        assert_eq!(tree.to_string(), "");

        let root = tree.add_root(3)?;
        tree.add_child(root, 4)?;
        assert_eq!(tree.to_string(), "3\n  4\n");
        Ok(())
    }
}
