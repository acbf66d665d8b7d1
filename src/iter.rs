use std::collections::VecDeque;

use crate::{arena::Arena, node::Branching, Position};

/// The traversal order for iterating over the nodes in a tree.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Depth-first traversal, parents before children
    #[default]
    DepthFirst,
    /// Breadth-first traversal
    BreadthFirst,
}

/// An iterator over the positions and elements of a tree in either
/// depth-first or breadth-first order.
///
/// The iterator borrows the tree, so the tree cannot change while it is
/// being iterated.
pub struct TreeIter<'t, N> {
    arena: &'t Arena<N>,
    order: TraversalOrder,
    // Used as a stack for DFS, as a queue for BFS
    pending: VecDeque<usize>,
}

impl<'t, N: Branching> TreeIter<'t, N> {
    pub(crate) fn new(arena: &'t Arena<N>, start: Option<usize>, order: TraversalOrder) -> Self {
        Self {
            arena,
            order,
            pending: start.into_iter().collect(),
        }
    }
}

impl<'t, N: Branching> Iterator for TreeIter<'t, N> {
    type Item = (Position, &'t N::Element);

    fn next(&mut self) -> Option<Self::Item> {
        let index = match self.order {
            TraversalOrder::DepthFirst => self.pending.pop_back()?,
            TraversalOrder::BreadthFirst => self.pending.pop_front()?,
        };

        let arena = self.arena;
        let node = &arena[index];
        let children = node.child_indices();
        match self.order {
            TraversalOrder::DepthFirst => self.pending.extend(children.into_iter().rev()),
            TraversalOrder::BreadthFirst => self.pending.extend(children),
        }

        Some((arena.position_of(index), node.element()))
    }
}
