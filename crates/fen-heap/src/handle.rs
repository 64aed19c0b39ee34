//! Block handles.
//!
//! A [`BlockRef`] stands in for a pointer into the arena: it records
//! the start offset of an allocation and nothing else. The engine
//! recovers a block's size from the status map, so the handle stays a
//! single word.

use std::fmt;

/// Start offset of a block within the arena.
///
/// Returned by the allocation operations and consumed by resize and
/// release. A `BlockRef` carries no proof of liveness: it can outlive
/// its block, and [`BlockRef::at`] can forge one at any offset. The
/// consuming operations deliberately do not validate it; see
/// [`SimHeap::release`](crate::SimHeap::release) for what an invalid
/// handle does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct BlockRef {
    offset: usize,
}

impl BlockRef {
    /// Create a handle at the given arena offset.
    ///
    /// No bounds or liveness check is performed. Out-of-range handles
    /// are legal values and degrade to no-ops in the operations that
    /// consume them.
    pub fn at(offset: usize) -> Self {
        Self { offset }
    }

    /// The arena offset this handle points at.
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl fmt::Display for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockRef(off={})", self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_round_trip() {
        let block = BlockRef::at(42);
        assert_eq!(block.offset(), 42);
    }

    #[test]
    fn display_names_the_offset() {
        assert_eq!(BlockRef::at(7).to_string(), "BlockRef(off=7)");
    }
}
