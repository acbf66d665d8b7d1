use thiserror::Error;

/// The kind of contract violation behind a [`PositionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidPosition,
    EmptyContainer,
    NotEmpty,
    SlotOccupied,
    TooManyChildren,
}

/// Errors that can occur when manipulating a list or a tree.
///
/// Every error is raised before the container is touched, so a failed call
/// leaves the container exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    /// The position was not produced by this container, or its element has
    /// since been removed.
    #[error("Invalid position: {0}")]
    InvalidPosition(String),
    /// The operation needs at least one element.
    #[error("Container is empty: {0}")]
    EmptyContainer(String),
    /// A root was added to a tree that already has one.
    #[error("Tree is not empty: {0}")]
    NotEmpty(String),
    /// The targeted child slot already holds a child.
    #[error("Slot is occupied: {0}")]
    SlotOccupied(String),
    /// The node has more than one child, so no single child can take its place.
    #[error("Too many children: {0}")]
    TooManyChildren(String),
}

impl PositionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PositionError::InvalidPosition(_) => ErrorKind::InvalidPosition,
            PositionError::EmptyContainer(_) => ErrorKind::EmptyContainer,
            PositionError::NotEmpty(_) => ErrorKind::NotEmpty,
            PositionError::SlotOccupied(_) => ErrorKind::SlotOccupied,
            PositionError::TooManyChildren(_) => ErrorKind::TooManyChildren,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            PositionError::InvalidPosition(msg)
            | PositionError::EmptyContainer(msg)
            | PositionError::NotEmpty(msg)
            | PositionError::SlotOccupied(msg)
            | PositionError::TooManyChildren(msg) => msg,
        }
    }
}
