use std::collections::VecDeque;

use crate::{BinaryTree, Position, Result, Tree};

/// A cursor on one node of a tree, valid for the duration of a traversal.
///
/// The cursor borrows the tree, so the tree cannot be mutated while a
/// traversal is running.
pub struct Traversable<'t, Tr: Tree> {
    tree: &'t Tr,
    position: Position,
    element: &'t Tr::Element,
    depth: usize,
}

impl<'t, Tr: Tree> Clone for Traversable<'t, Tr> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'t, Tr: Tree> Copy for Traversable<'t, Tr> {}

impl<'t, Tr: Tree> Traversable<'t, Tr> {
    pub fn new(tree: &'t Tr, position: Position) -> Result<Self> {
        Ok(Self {
            tree,
            position,
            element: tree.get(position)?,
            depth: tree.depth(position)?,
        })
    }

    fn descend(&self, position: Position) -> Result<Self> {
        Ok(Self {
            tree: self.tree,
            position,
            element: self.tree.get(position)?,
            depth: self.depth + 1,
        })
    }

    pub fn element(&self) -> &'t Tr::Element {
        self.element
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn tree(&self) -> &'t Tr {
        self.tree
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Cursors on the children, in the tree's child order.
    pub fn children(&self) -> Result<Vec<Self>> {
        self.tree
            .children(self.position)?
            .into_iter()
            .map(|child| self.descend(child))
            .collect()
    }
}

impl<'t, Tr: BinaryTree> Traversable<'t, Tr> {
    pub fn left(&self) -> Result<Option<Self>> {
        self.tree
            .left(self.position)?
            .map(|left| self.descend(left))
            .transpose()
    }

    pub fn right(&self) -> Result<Option<Self>> {
        self.tree
            .right(self.position)?
            .map(|right| self.descend(right))
            .transpose()
    }
}

/// What a visitor learns about the node it is called for.
pub struct Visit<'t, Tr> {
    /// Visit order within the current traversal, starting at 0.
    pub index: usize,
    pub position: Position,
    pub depth: usize,
    pub tree: &'t Tr,
}

/// A traversal order that can walk binary trees.
pub trait BinaryTraversal<'t, Tr: BinaryTree + 't> {
    /// Walks the tree below `root`; `None` stands for an empty tree.
    fn traverse_binary(&mut self, root: Option<Traversable<'t, Tr>>) -> Result<()>;
}

/// A traversal order that can walk trees of any arity.
pub trait GeneralTraversal<'t, Tr: Tree + 't> {
    /// Walks the tree below `root`; `None` stands for an empty tree.
    fn traverse_general(&mut self, root: Option<Traversable<'t, Tr>>) -> Result<()>;
}

macro_rules! strategy {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        pub struct $name<F> {
            visitor: F,
        }

        impl<F> $name<F> {
            pub fn new(visitor: F) -> Self {
                Self { visitor }
            }

            /// Gives back the visitor, along with anything it captured.
            pub fn into_inner(self) -> F {
                self.visitor
            }
        }
    };
}

strategy!(
    /// Visits a node, then each of its subtrees from left to right.
    PreOrder
);
strategy!(
    /// Visits the left subtree, the node, then the right subtree. Binary trees only.
    InOrder
);
strategy!(
    /// Visits each subtree from left to right, then the node.
    PostOrder
);
strategy!(
    /// Visits nodes level by level, left to right within a level.
    LevelOrder
);

/// Per-call traversal state: the visitor and the next visit index.
struct Walk<'v, F> {
    visitor: &'v mut F,
    index: usize,
}

impl<'v, F> Walk<'v, F> {
    fn new(visitor: &'v mut F) -> Self {
        Self { visitor, index: 0 }
    }

    fn visit<'t, Tr>(&mut self, node: &Traversable<'t, Tr>)
    where
        Tr: Tree + 't,
        F: FnMut(&'t Tr::Element, Visit<'t, Tr>),
    {
        let visit = Visit {
            index: self.index,
            position: node.position(),
            depth: node.depth(),
            tree: node.tree(),
        };
        (self.visitor)(node.element(), visit);
        self.index += 1;
    }

    fn preorder_binary<'t, Tr>(&mut self, node: Traversable<'t, Tr>) -> Result<()>
    where
        Tr: BinaryTree + 't,
        F: FnMut(&'t Tr::Element, Visit<'t, Tr>),
    {
        self.visit(&node);
        if let Some(left) = node.left()? {
            self.preorder_binary(left)?;
        }
        if let Some(right) = node.right()? {
            self.preorder_binary(right)?;
        }
        Ok(())
    }

    fn preorder_general<'t, Tr>(&mut self, node: Traversable<'t, Tr>) -> Result<()>
    where
        Tr: Tree + 't,
        F: FnMut(&'t Tr::Element, Visit<'t, Tr>),
    {
        self.visit(&node);
        for child in node.children()? {
            self.preorder_general(child)?;
        }
        Ok(())
    }

    fn inorder_binary<'t, Tr>(&mut self, node: Traversable<'t, Tr>) -> Result<()>
    where
        Tr: BinaryTree + 't,
        F: FnMut(&'t Tr::Element, Visit<'t, Tr>),
    {
        if let Some(left) = node.left()? {
            self.inorder_binary(left)?;
        }
        self.visit(&node);
        if let Some(right) = node.right()? {
            self.inorder_binary(right)?;
        }
        Ok(())
    }

    fn postorder_binary<'t, Tr>(&mut self, node: Traversable<'t, Tr>) -> Result<()>
    where
        Tr: BinaryTree + 't,
        F: FnMut(&'t Tr::Element, Visit<'t, Tr>),
    {
        if let Some(left) = node.left()? {
            self.postorder_binary(left)?;
        }
        if let Some(right) = node.right()? {
            self.postorder_binary(right)?;
        }
        self.visit(&node);
        Ok(())
    }

    fn postorder_general<'t, Tr>(&mut self, node: Traversable<'t, Tr>) -> Result<()>
    where
        Tr: Tree + 't,
        F: FnMut(&'t Tr::Element, Visit<'t, Tr>),
    {
        for child in node.children()? {
            self.postorder_general(child)?;
        }
        self.visit(&node);
        Ok(())
    }

    fn level_order<'t, Tr>(
        &mut self,
        root: Traversable<'t, Tr>,
        children: impl Fn(&Traversable<'t, Tr>) -> Result<Vec<Traversable<'t, Tr>>>,
    ) -> Result<()>
    where
        Tr: Tree + 't,
        F: FnMut(&'t Tr::Element, Visit<'t, Tr>),
    {
        let mut queue = VecDeque::from([root]);
        while let Some(node) = queue.pop_front() {
            self.visit(&node);
            queue.extend(children(&node)?);
        }
        Ok(())
    }
}

impl<'t, Tr, F> BinaryTraversal<'t, Tr> for PreOrder<F>
where
    Tr: BinaryTree + 't,
    F: FnMut(&'t Tr::Element, Visit<'t, Tr>),
{
    fn traverse_binary(&mut self, root: Option<Traversable<'t, Tr>>) -> Result<()> {
        match root {
            Some(root) => Walk::new(&mut self.visitor).preorder_binary(root),
            None => Ok(()),
        }
    }
}

impl<'t, Tr, F> GeneralTraversal<'t, Tr> for PreOrder<F>
where
    Tr: Tree + 't,
    F: FnMut(&'t Tr::Element, Visit<'t, Tr>),
{
    fn traverse_general(&mut self, root: Option<Traversable<'t, Tr>>) -> Result<()> {
        match root {
            Some(root) => Walk::new(&mut self.visitor).preorder_general(root),
            None => Ok(()),
        }
    }
}

impl<'t, Tr, F> BinaryTraversal<'t, Tr> for InOrder<F>
where
    Tr: BinaryTree + 't,
    F: FnMut(&'t Tr::Element, Visit<'t, Tr>),
{
    fn traverse_binary(&mut self, root: Option<Traversable<'t, Tr>>) -> Result<()> {
        match root {
            Some(root) => Walk::new(&mut self.visitor).inorder_binary(root),
            None => Ok(()),
        }
    }
}

impl<'t, Tr, F> BinaryTraversal<'t, Tr> for PostOrder<F>
where
    Tr: BinaryTree + 't,
    F: FnMut(&'t Tr::Element, Visit<'t, Tr>),
{
    fn traverse_binary(&mut self, root: Option<Traversable<'t, Tr>>) -> Result<()> {
        match root {
            Some(root) => Walk::new(&mut self.visitor).postorder_binary(root),
            None => Ok(()),
        }
    }
}

impl<'t, Tr, F> GeneralTraversal<'t, Tr> for PostOrder<F>
where
    Tr: Tree + 't,
    F: FnMut(&'t Tr::Element, Visit<'t, Tr>),
{
    fn traverse_general(&mut self, root: Option<Traversable<'t, Tr>>) -> Result<()> {
        match root {
            Some(root) => Walk::new(&mut self.visitor).postorder_general(root),
            None => Ok(()),
        }
    }
}

impl<'t, Tr, F> BinaryTraversal<'t, Tr> for LevelOrder<F>
where
    Tr: BinaryTree + 't,
    F: FnMut(&'t Tr::Element, Visit<'t, Tr>),
{
    fn traverse_binary(&mut self, root: Option<Traversable<'t, Tr>>) -> Result<()> {
        let Some(root) = root else {
            return Ok(());
        };
        Walk::new(&mut self.visitor).level_order(root, |node| {
            Ok(node.left()?.into_iter().chain(node.right()?).collect())
        })
    }
}

impl<'t, Tr, F> GeneralTraversal<'t, Tr> for LevelOrder<F>
where
    Tr: Tree + 't,
    F: FnMut(&'t Tr::Element, Visit<'t, Tr>),
{
    fn traverse_general(&mut self, root: Option<Traversable<'t, Tr>>) -> Result<()> {
        let Some(root) = root else {
            return Ok(());
        };
        Walk::new(&mut self.visitor).level_order(root, |node| node.children())
    }
}
