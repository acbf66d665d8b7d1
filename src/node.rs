use crate::{arena::Relink, container::Holder};

/// Tree nodes that can enumerate their children by arena index.
pub trait Branching: Holder {
    fn child_indices(&self) -> Vec<usize>;
}

fn remap(link: Option<usize>, map: &[Option<usize>]) -> Option<usize> {
    link.and_then(|old| map.get(old).copied().flatten())
}

#[derive(Debug, Clone)]
pub struct SinglyNode<T> {
    pub element: T,
    pub next: Option<usize>,
    pub epoch: u64,
}

#[derive(Debug, Clone)]
pub struct DoublyNode<T> {
    pub element: T,
    pub prev: Option<usize>,
    pub next: Option<usize>,
    pub epoch: u64,
}

#[derive(Debug, Clone)]
pub struct BinaryNode<T> {
    pub element: T,
    pub parent: Option<usize>,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct TreeNode<T> {
    pub element: T,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

macro_rules! holder {
    ($($node:ident),*) => {
        $(
            impl<T> Holder for $node<T> {
                type Element = T;

                fn element(&self) -> &T {
                    &self.element
                }

                fn element_mut(&mut self) -> &mut T {
                    &mut self.element
                }
            }
        )*
    };
}

holder!(SinglyNode, DoublyNode, BinaryNode, TreeNode);

impl<T> BinaryNode<T> {
    pub fn new(element: T, parent: Option<usize>) -> Self {
        Self {
            element,
            parent,
            left: None,
            right: None,
        }
    }
}

impl<T> TreeNode<T> {
    pub fn new(element: T, parent: Option<usize>) -> Self {
        Self {
            element,
            parent,
            children: Vec::new(),
        }
    }
}

impl<T> Branching for BinaryNode<T> {
    fn child_indices(&self) -> Vec<usize> {
        self.left.into_iter().chain(self.right).collect()
    }
}

impl<T> Branching for TreeNode<T> {
    fn child_indices(&self) -> Vec<usize> {
        self.children.clone()
    }
}

impl<T> Relink for BinaryNode<T> {
    fn relink(&mut self, map: &[Option<usize>]) {
        self.parent = remap(self.parent, map);
        self.left = remap(self.left, map);
        self.right = remap(self.right, map);
    }
}

impl<T> Relink for TreeNode<T> {
    fn relink(&mut self, map: &[Option<usize>]) {
        self.parent = remap(self.parent, map);
        self.children = self
            .children
            .iter()
            .filter_map(|&old| remap(Some(old), map))
            .collect();
    }
}
