//! Battery entry point: run the standard scenarios against a default
//! heap. Failures show up in the summary line, not the exit code.

use fen_harness::Battery;
use fen_heap::SimHeap;

fn main() {
    let mut heap = SimHeap::default();
    Battery::standard().run(&mut heap);
}
