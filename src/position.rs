use std::fmt;

use uuid::Uuid;

/// Identity of one container instance.
///
/// Every list and tree draws a fresh id when it is constructed; a [`Position`]
/// is only accepted by the container whose id it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(Uuid);

impl ContainerId {
    pub(crate) fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A handle to one element of one container.
///
/// Positions are plain values: they do not borrow the container and do not
/// keep the element alive. They stay valid until the element they refer to
/// is removed, after which the container rejects them with
/// [`PositionError::InvalidPosition`](crate::PositionError::InvalidPosition).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) owner: ContainerId,
    pub(crate) index: usize,
    pub(crate) generation: u64,
}

impl Position {
    /// The container this position was produced by.
    pub fn owner(&self) -> ContainerId {
        self.owner
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}.{}", self.owner, self.index, self.generation)
    }
}
