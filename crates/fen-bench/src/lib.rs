//! Benchmark profiles for the Fen allocator.
//!
//! Deterministic heap layouts for the `heap_ops` benches: an empty
//! heap and a fragmented one that maximises the number of free runs
//! the best-fit scan has to weigh.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use fen_heap::{BlockRef, SimHeap};

/// A fresh heap at the default capacity.
pub fn empty_heap() -> SimHeap {
    SimHeap::default()
}

/// Pack the heap with 8-byte blocks, then free every second one in
/// address order.
///
/// The edge heuristic alternates placements between the arena's
/// flanks, so the packing is deterministic: 15 blocks on a 128-byte
/// heap. Freeing alternate blocks by address leaves a comb of short
/// holes for the scan to walk. Returns the heap and the surviving
/// blocks.
pub fn fragmented_heap() -> (SimHeap, Vec<BlockRef>) {
    let mut heap = SimHeap::default();
    let mut blocks = Vec::new();
    while let Some(block) = heap.allocate(8) {
        blocks.push(block);
    }
    blocks.sort_by_key(|block| block.offset());

    let mut survivors = Vec::new();
    for (i, block) in blocks.into_iter().enumerate() {
        if i % 2 == 0 {
            heap.release(Some(block));
        } else {
            survivors.push(block);
        }
    }
    (heap, survivors)
}
