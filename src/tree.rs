use std::fmt;

use crate::{GeneralTraversal, Position, Result, Structure, Traversable};

/// Read access shared by every tree, whatever its arity.
///
/// Every method taking a [`Position`] validates it first and fails with
/// `InvalidPosition` if it is foreign to this tree or has been removed.
pub trait Tree: Structure + Sized {
    type Element;

    /// The root position, or `None` when the tree is empty.
    fn root(&self) -> Option<Position>;

    fn get(&self, position: Position) -> Result<&Self::Element>;

    /// The parent of `position`, or `None` for the root.
    fn parent(&self, position: Position) -> Result<Option<Position>>;

    /// The children of `position` in the tree's child order.
    fn children(&self, position: Position) -> Result<Vec<Position>>;

    fn num_children(&self, position: Position) -> Result<usize> {
        Ok(self.children(position)?.len())
    }

    fn is_root(&self, position: Position) -> Result<bool> {
        Ok(self.parent(position)?.is_none())
    }

    fn is_leaf(&self, position: Position) -> Result<bool> {
        Ok(self.num_children(position)? == 0)
    }

    fn is_internal(&self, position: Position) -> Result<bool> {
        Ok(!self.is_leaf(position)?)
    }

    /// Number of ancestors of `position`; the root has depth 0.
    fn depth(&self, position: Position) -> Result<usize> {
        let mut depth = 0;
        let mut current = self.parent(position)?;
        while let Some(parent) = current {
            depth += 1;
            current = self.parent(parent)?;
        }
        Ok(depth)
    }

    /// Length of the longest downward path from `position` to a leaf.
    fn height(&self, position: Position) -> Result<usize> {
        let mut height = 0;
        for child in self.children(position)? {
            height = height.max(1 + self.height(child)?);
        }
        Ok(height)
    }

    /// A traversal cursor on the root, or `None` when the tree is empty.
    fn traversable(&self) -> Result<Option<Traversable<'_, Self>>> {
        self.root()
            .map(|root| Traversable::new(self, root))
            .transpose()
    }

    /// Runs a general traversal strategy from the root.
    fn traverse_general<'t, S>(&'t self, strategy: &mut S) -> Result<()>
    where
        S: GeneralTraversal<'t, Self>,
    {
        strategy.traverse_general(self.traversable()?)
    }
}

/// Writes an indented outline of `tree`, one element per line.
pub(crate) fn write_outline<Tr>(tree: &Tr, f: &mut fmt::Formatter<'_>) -> fmt::Result
where
    Tr: Tree,
    Tr::Element: fmt::Display,
{
    let Some(root) = tree.root() else {
        return Ok(());
    };

    let mut stack = vec![(root, 0)];
    while let Some((position, depth)) = stack.pop() {
        let element = tree.get(position).map_err(|_| fmt::Error)?;
        writeln!(f, "{}{}", "  ".repeat(depth), element)?;

        let children = tree.children(position).map_err(|_| fmt::Error)?;
        stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
    }

    Ok(())
}
