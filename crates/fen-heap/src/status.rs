//! Per-byte allocation status with the size-in-status encoding.
//!
//! The status map is a byte array parallel to the arena. `0` marks a
//! free byte. A block of size `s` starting at offset `i` is recorded
//! as the descending run `s, s-1, .., 1` over `cells[i..i+s]`, so the
//! value at a block's start equals the block's size and every cell
//! knows its distance to the block's end. Blocks and free runs tile
//! the whole map between operations.

use std::fmt::Write as _;

use smallvec::SmallVec;

/// One maximal run in the status map's tiling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    /// A live block of `size` bytes starting at `start`.
    Block {
        /// First cell of the block.
        start: usize,
        /// Block size in bytes.
        size: usize,
    },
    /// A maximal run of free cells starting at `start`.
    Free {
        /// First cell of the run.
        start: usize,
        /// Run length in cells.
        len: usize,
    },
}

/// Byte-per-byte allocation state for the arena.
pub struct StatusMap {
    cells: Vec<u8>,
}

impl StatusMap {
    /// A fully-free map with one cell per arena byte.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            cells: vec![0; capacity],
        }
    }

    /// Number of cells (equals the arena capacity).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the map has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Status value at `index`, or `None` out of range.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.cells.get(index).copied()
    }

    /// All cells as a slice.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Whether `index` is in range and free.
    pub(crate) fn is_free(&self, index: usize) -> bool {
        self.get(index) == Some(0)
    }

    /// Write the descending run for a block of `size` bytes at `start`.
    ///
    /// Callers guarantee the target cells are in range; whether they
    /// were free beforehand is not re-checked here.
    pub(crate) fn mark_block(&mut self, start: usize, size: usize) {
        for i in 0..size {
            self.cells[start + i] = (size - i) as u8;
        }
    }

    /// Zero the run described by the status value at `start`.
    ///
    /// Reads `size = cells[start]` and clears that many cells from
    /// `start` on. A cell already reading 0 clears nothing, and an
    /// out-of-range `start` is a no-op.
    pub(crate) fn clear_block(&mut self, start: usize) {
        let Some(size) = self.get(start) else { return };
        for i in 0..size as usize {
            self.cells[start + i] = 0;
        }
    }

    /// Enumerate the tiling of blocks and free runs, left to right.
    ///
    /// Trusts the encoding: each non-zero start cell is read as a block
    /// size and skipped over in one step.
    pub fn regions(&self) -> SmallVec<[Region; 8]> {
        let mut regions = SmallVec::new();
        let mut i = 0;
        while i < self.cells.len() {
            if self.cells[i] == 0 {
                let start = i;
                while i < self.cells.len() && self.cells[i] == 0 {
                    i += 1;
                }
                regions.push(Region::Free {
                    start,
                    len: i - start,
                });
            } else {
                let size = self.cells[i] as usize;
                regions.push(Region::Block { start: i, size });
                i += size;
            }
        }
        regions
    }

    /// Check the tiling invariant.
    ///
    /// Every cell must be 0 or belong to a complete descending run
    /// whose start value equals the run length and which ends inside
    /// the map.
    pub fn is_well_formed(&self) -> bool {
        let mut i = 0;
        while i < self.cells.len() {
            let size = self.cells[i] as usize;
            if size == 0 {
                i += 1;
                continue;
            }
            if i + size > self.cells.len() {
                return false;
            }
            for k in 0..size {
                if self.cells[i + k] as usize != size - k {
                    return false;
                }
            }
            i += size;
        }
        true
    }

    /// Render the human-readable dump.
    ///
    /// Format: a literal `Heap status:` header line, then every cell as
    /// a decimal integer followed by one space, then a newline.
    pub fn render(&self) -> String {
        let mut out = String::from("Heap status:\n");
        for &cell in &self.cells {
            let _ = write!(out, "{cell} ");
        }
        out.push('\n');
        out
    }
}
