//! Best-fit allocation over a fixed-size simulated heap arena.
//!
//! `fen-heap` implements the allocation engine of the Fen workspace:
//! a byte arena of fixed capacity paired with a parallel status map
//! that records, for every arena byte, whether it is free and how far
//! it sits from the end of its block. The engine exposes the classic
//! allocator surface (allocate, zero-allocate, resize, release) without
//! touching any real allocator.
//!
//! # Architecture
//!
//! ```text
//! SimHeap (orchestrator)
//! ├── arena: Vec<u8>     (caller-visible bytes)
//! ├── StatusMap          (per-byte free/size bookkeeping)
//! │   └── regions() / is_well_formed() / render()
//! └── search             (best-fit scan + edge placement)
//! ```
//!
//! # Encoding
//!
//! A block of size `s` starting at offset `i` is recorded in the status
//! map as the descending run `s, s-1, .., 1` over `status[i..i+s]`;
//! free bytes read 0. A block's size is therefore recoverable from its
//! start offset alone, with no side table.
//!
//! # Concurrency
//!
//! None. Every operation takes `&mut SimHeap` and assumes it is the
//! only call in flight. Callers that need sharing must serialize
//! access externally; the engine contains no locks.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod handle;
pub mod heap;
mod search;
pub mod status;

pub use config::HeapConfig;
pub use handle::BlockRef;
pub use heap::SimHeap;
pub use status::{Region, StatusMap};
