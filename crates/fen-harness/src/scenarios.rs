//! The scripted scenarios.
//!
//! Each scenario drives the engine's public operations and checks the
//! observable status map. Scenarios assume an all-free heap on entry
//! and restore one on success, so the battery can run them back to
//! back against a single shared heap.

use fen_heap::{BlockRef, SimHeap};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::report::CheckFailure;

fn must_allocate(heap: &mut SimHeap, size: usize) -> Result<BlockRef, CheckFailure> {
    heap.allocate(size)
        .ok_or(CheckFailure::AllocationFailed { size })
}

fn must_resize(
    heap: &mut SimHeap,
    block: BlockRef,
    size: usize,
) -> Result<BlockRef, CheckFailure> {
    heap.resize(Some(block), size)
        .ok_or(CheckFailure::AllocationFailed { size })
}

fn expect_status(heap: &SimHeap, index: usize, expected: u8) -> Result<(), CheckFailure> {
    let actual = heap.status().get(index).unwrap_or(0);
    if actual != expected {
        return Err(CheckFailure::StatusMismatch {
            index,
            expected,
            actual,
        });
    }
    Ok(())
}

fn expect_all_free(heap: &SimHeap) -> Result<(), CheckFailure> {
    for (index, &actual) in heap.status().cells().iter().enumerate() {
        if actual != 0 {
            return Err(CheckFailure::StatusMismatch {
                index,
                expected: 0,
                actual,
            });
        }
    }
    Ok(())
}

/// Allocate twice, release both, and verify the heap is fully free.
pub fn basic_allocation(heap: &mut SimHeap) -> Result<(), CheckFailure> {
    let first = must_allocate(heap, 10)?;
    let second = must_allocate(heap, 20)?;
    heap.release(Some(first));
    heap.release(Some(second));
    expect_all_free(heap)
}

/// A request beyond the arena capacity must fail.
pub fn memory_exhaustion(heap: &mut SimHeap) -> Result<(), CheckFailure> {
    if heap.allocate(heap.capacity() + 1).is_some() {
        return Err(CheckFailure::UnexpectedSuccess);
    }
    Ok(())
}

/// Shrinking re-encodes the head and frees the surplus tail.
pub fn resize_shrink(heap: &mut SimHeap) -> Result<(), CheckFailure> {
    let block = must_allocate(heap, 20)?;
    let block = must_resize(heap, block, 10)?;
    let start = block.offset();
    for i in 0..10 {
        expect_status(heap, start + i, (10 - i) as u8)?;
    }
    for i in 10..20 {
        expect_status(heap, start + i, 0)?;
    }
    heap.release(Some(block));
    expect_all_free(heap)
}

/// Growing into adjacent free space keeps the block where it is.
pub fn resize_expand(heap: &mut SimHeap) -> Result<(), CheckFailure> {
    let block = must_allocate(heap, 10)?;
    let grown = must_resize(heap, block, 20)?;
    if grown.offset() != block.offset() {
        return Err(CheckFailure::WrongOffset {
            expected: block.offset(),
            actual: grown.offset(),
        });
    }
    expect_status(heap, grown.offset(), 20)?;
    heap.release(Some(grown));
    expect_all_free(heap)
}

/// Growing past a neighbour relocates the block.
///
/// With blocks of 20, 50 and 1 in place the layout is pinned: the
/// 50-block hugs the right edge, the 1-block sits at offset 20, and
/// the relocated 21-block can only land at offset 21.
pub fn resize_move(heap: &mut SimHeap) -> Result<(), CheckFailure> {
    let first = must_allocate(heap, 20)?;
    let second = must_allocate(heap, 50)?;
    let third = must_allocate(heap, 1)?;

    let moved = must_resize(heap, first, 21)?;
    if moved.offset() != 21 {
        return Err(CheckFailure::WrongOffset {
            expected: 21,
            actual: moved.offset(),
        });
    }
    expect_status(heap, 21, 21)?;

    heap.release(Some(moved));
    heap.release(Some(second));
    heap.release(Some(third));
    expect_all_free(heap)
}

/// Releasing and re-allocating the same size lands on the same start.
pub fn free_and_reallocate(heap: &mut SimHeap) -> Result<(), CheckFailure> {
    let first = must_allocate(heap, 20)?;
    heap.release(Some(first));
    let second = must_allocate(heap, 20)?;
    if second.offset() != first.offset() {
        return Err(CheckFailure::WrongOffset {
            expected: first.offset(),
            actual: second.offset(),
        });
    }
    heap.release(Some(second));
    expect_all_free(heap)
}

/// Releasing null or a forged out-of-range handle changes nothing.
pub fn invalid_free(heap: &mut SimHeap) -> Result<(), CheckFailure> {
    heap.release(None);
    heap.release(Some(BlockRef::at(heap.capacity() + 1)));
    expect_all_free(heap)
}

/// Zero-allocation hands out zeroed bytes even over recycled space,
/// and a zero-byte total fails without side effects.
pub fn zero_allocation(heap: &mut SimHeap) -> Result<(), CheckFailure> {
    let dirty = must_allocate(heap, 16)?;
    heap.bytes_mut(dirty).fill(0xA5);
    heap.release(Some(dirty));

    let block = heap
        .zero_allocate(4, 4)
        .ok_or(CheckFailure::AllocationFailed { size: 16 })?;
    if let Some(lost) = heap.bytes(block).iter().position(|&b| b != 0) {
        return Err(CheckFailure::ContentMismatch {
            offset: block.offset() + lost,
        });
    }
    heap.release(Some(block));

    if heap.zero_allocate(0, 8).is_some() {
        return Err(CheckFailure::UnexpectedSuccess);
    }
    expect_all_free(heap)
}

/// A second large allocation goes flush against the right edge of its
/// free run when the right flank is the smaller allocated span.
pub fn edge_placement(heap: &mut SimHeap) -> Result<(), CheckFailure> {
    let left = must_allocate(heap, 20)?;
    let right = must_allocate(heap, 50)?;
    let expected = heap.capacity() - 51;
    if right.offset() != expected {
        return Err(CheckFailure::WrongOffset {
            expected,
            actual: right.offset(),
        });
    }
    heap.release(Some(left));
    heap.release(Some(right));
    expect_all_free(heap)
}

/// Seeded random churn: hundreds of allocate/resize/release steps must
/// keep the tiling intact and preserve every live block's payload,
/// then drain back to a fully-free heap. Deterministic for a fixed
/// seed.
pub fn random_churn(heap: &mut SimHeap) -> Result<(), CheckFailure> {
    const SEED: u64 = 0xFE2E;
    const STEPS: usize = 400;

    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let mut live: Vec<(BlockRef, u8)> = Vec::new();

    for _ in 0..STEPS {
        match rng.random_range(0..3u32) {
            0 => {
                let size = rng.random_range(1..=16usize);
                if let Some(block) = heap.allocate(size) {
                    let tag = rng.random::<u8>();
                    heap.bytes_mut(block).fill(tag);
                    live.push((block, tag));
                }
            }
            1 => {
                if !live.is_empty() {
                    let idx = rng.random_range(0..live.len());
                    let (block, _) = live.swap_remove(idx);
                    heap.release(Some(block));
                }
            }
            _ => {
                if !live.is_empty() {
                    let idx = rng.random_range(0..live.len());
                    let (block, tag) = live[idx];
                    let old_size = heap.block_size(block);
                    let new_size = rng.random_range(1..=24usize);
                    if let Some(moved) = heap.resize(Some(block), new_size) {
                        let keep = old_size.min(new_size);
                        if let Some(lost) = heap.bytes(moved)[..keep]
                            .iter()
                            .position(|&b| b != tag)
                        {
                            return Err(CheckFailure::ContentMismatch {
                                offset: moved.offset() + lost,
                            });
                        }
                        heap.bytes_mut(moved).fill(tag);
                        live[idx] = (moved, tag);
                    }
                }
            }
        }
        if !heap.status().is_well_formed() {
            return Err(CheckFailure::TilingViolated);
        }
    }

    for (block, _) in live.drain(..) {
        heap.release(Some(block));
    }
    expect_all_free(heap)
}
