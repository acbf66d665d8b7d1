use crate::{BinaryTraversal, Position, Result, Tree};

/// A tree in which every node has at most a left and a right child.
pub trait BinaryTree: Tree {
    fn left(&self, position: Position) -> Result<Option<Position>>;
    fn right(&self, position: Position) -> Result<Option<Position>>;

    /// The other child of `position`'s parent, if there is one.
    fn sibling(&self, position: Position) -> Result<Option<Position>> {
        let Some(parent) = self.parent(position)? else {
            return Ok(None);
        };
        if self.left(parent)? == Some(position) {
            self.right(parent)
        } else {
            self.left(parent)
        }
    }

    fn has_left(&self, position: Position) -> Result<bool> {
        Ok(self.left(position)?.is_some())
    }

    fn has_right(&self, position: Position) -> Result<bool> {
        Ok(self.right(position)?.is_some())
    }

    fn has_sibling(&self, position: Position) -> Result<bool> {
        Ok(self.sibling(position)?.is_some())
    }

    /// Whether `child` is the left child of `parent`.
    fn is_left_child(&self, parent: Position, child: Position) -> Result<bool> {
        self.get(child)?;
        Ok(self.left(parent)? == Some(child))
    }

    /// Whether `child` is the right child of `parent`.
    fn is_right_child(&self, parent: Position, child: Position) -> Result<bool> {
        self.get(child)?;
        Ok(self.right(parent)? == Some(child))
    }

    /// Runs a binary traversal strategy from the root.
    fn traverse_binary<'t, S>(&'t self, strategy: &mut S) -> Result<()>
    where
        S: BinaryTraversal<'t, Self>,
    {
        strategy.traverse_binary(self.traversable()?)
    }
}
