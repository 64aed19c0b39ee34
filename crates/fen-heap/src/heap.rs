//! The allocation engine.
//!
//! [`SimHeap`] owns the arena bytes and their status map and exposes
//! the four allocation operations plus the status dump. All state
//! lives in the instance; every operation takes `&mut self` and
//! assumes it is the only call in flight.

use crate::config::HeapConfig;
use crate::handle::BlockRef;
use crate::search::{best_fit, placement_start};
use crate::status::StatusMap;

/// A simulated heap: a fixed byte arena plus per-byte status.
///
/// ```
/// use fen_heap::SimHeap;
///
/// let mut heap = SimHeap::default();
/// let block = heap.allocate(10).unwrap();
/// heap.bytes_mut(block).fill(0xAB);
/// assert_eq!(heap.block_size(block), 10);
/// heap.release(Some(block));
/// ```
pub struct SimHeap {
    config: HeapConfig,
    data: Vec<u8>,
    status: StatusMap,
}

impl SimHeap {
    /// Create a heap with the given configuration.
    ///
    /// The arena starts zeroed, but only [`SimHeap::zero_allocate`]
    /// guarantees zeroed bytes to callers; `allocate` hands out
    /// whatever the arena currently holds.
    pub fn new(config: HeapConfig) -> Self {
        Self {
            data: vec![0; config.capacity],
            status: StatusMap::new(config.capacity),
            config,
        }
    }

    /// Arena capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Read-only view of the status map.
    pub fn status(&self) -> &StatusMap {
        &self.status
    }

    /// Allocate `size` bytes.
    ///
    /// Finds the tightest free run that fits, places the block against
    /// the run edge with the smaller allocated neighbourhood, and
    /// marks it. Returns `None` when `size` is 0, exceeds the
    /// capacity, or no free run is large enough; the heap is untouched
    /// on failure.
    pub fn allocate(&mut self, size: usize) -> Option<BlockRef> {
        if size == 0 || size > self.config.capacity {
            return None;
        }
        let run = best_fit(&self.status, size)?;
        let start = placement_start(&self.status, run, size);
        self.status.mark_block(start, size);
        Some(BlockRef::at(start))
    }

    /// Allocate `count * elem_size` bytes and zero them.
    ///
    /// The product is computed with wrapping arithmetic; keeping it in
    /// range is the caller's responsibility. Returns `None` exactly
    /// when [`SimHeap::allocate`] would for the computed total.
    pub fn zero_allocate(&mut self, count: usize, elem_size: usize) -> Option<BlockRef> {
        let total = count.wrapping_mul(elem_size);
        let block = self.allocate(total)?;
        self.data[block.offset()..block.offset() + total].fill(0);
        Some(block)
    }

    /// Release a block.
    ///
    /// `None` and out-of-range handles are no-ops. In-range handles
    /// are not validated: the status value at the offset is read as a
    /// size and that many status cells are zeroed. A stale or
    /// mid-block handle therefore releases whatever run that value
    /// describes, and a handle whose cell already reads 0 releases
    /// nothing.
    pub fn release(&mut self, block: Option<BlockRef>) {
        let Some(block) = block else { return };
        self.status.clear_block(block.offset());
    }

    /// Resize a block to `size` bytes.
    ///
    /// A `None` input behaves exactly like [`SimHeap::allocate`]. A
    /// shrink frees the tail and keeps the handle. An expansion first
    /// tries the free run immediately after the block and re-marks in
    /// place; when that run is too short the block relocates: fresh
    /// allocation, copy of the current bytes, release of the old
    /// range. Returns `None` if relocation finds no space, leaving the
    /// original block untouched.
    ///
    /// Resizing a live block to 0 releases it entirely and returns the
    /// now-dangling handle unchanged.
    pub fn resize(&mut self, block: Option<BlockRef>, size: usize) -> Option<BlockRef> {
        let Some(block) = block else {
            return self.allocate(size);
        };
        let start = block.offset();
        let current = self.status.get(start).unwrap_or(0) as usize;

        if current > size {
            // The cell at start + size reads current - size, so a
            // release there frees exactly the surplus tail.
            self.status.clear_block(start + size);
            self.status.mark_block(start, size);
            return Some(block);
        }

        let mut free_after = 0;
        while self.status.is_free(start + current + free_after) {
            free_after += 1;
        }
        if current + free_after >= size {
            self.status.mark_block(start, size);
            return Some(block);
        }

        let moved = self.allocate(size)?;
        if current > 0 {
            self.data.copy_within(start..start + current, moved.offset());
        }
        self.status.clear_block(start);
        Some(moved)
    }

    /// Size in bytes of the block at `block`, read from the status map.
    ///
    /// 0 for a free or out-of-range offset.
    pub fn block_size(&self, block: BlockRef) -> usize {
        self.status.get(block.offset()).unwrap_or(0) as usize
    }

    /// The block's bytes.
    ///
    /// The slice length is the status-encoded size; empty for a handle
    /// that does not point at a live block start.
    pub fn bytes(&self, block: BlockRef) -> &[u8] {
        let size = self.block_size(block);
        if size == 0 {
            return &[];
        }
        &self.data[block.offset()..block.offset() + size]
    }

    /// The block's bytes, mutably.
    pub fn bytes_mut(&mut self, block: BlockRef) -> &mut [u8] {
        let size = self.block_size(block);
        if size == 0 {
            return &mut [];
        }
        let start = block.offset();
        &mut self.data[start..start + size]
    }

    /// Print the status dump to stdout.
    ///
    /// Format: a `Heap status:` header line, then one decimal integer
    /// per arena byte, each followed by a space, then a newline.
    pub fn dump_status(&self) {
        print!("{}", self.status.render());
    }
}

impl Default for SimHeap {
    /// A heap with the default 128-byte capacity.
    fn default() -> Self {
        Self::new(HeapConfig::default())
    }
}
