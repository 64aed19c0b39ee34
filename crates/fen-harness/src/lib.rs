//! Scripted validation battery for the `fen-heap` engine.
//!
//! The harness owns no allocation logic: it drives the engine's public
//! operations through fixed scenarios and checks the observable status
//! map after each step. Scenarios run in registration order against
//! one shared heap, and every scenario leaves the heap fully free, so
//! the battery behaves like the single process-wide heap it validates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod report;
pub mod scenarios;

use fen_heap::SimHeap;
use indexmap::IndexMap;

use report::{BatteryReport, CheckFailure, ScenarioFailure};

/// A scenario: drives the heap and checks its post-conditions.
pub type ScenarioFn = fn(&mut SimHeap) -> Result<(), CheckFailure>;

/// An insertion-ordered collection of labelled scenarios.
pub struct Battery {
    scenarios: IndexMap<&'static str, ScenarioFn>,
}

impl Battery {
    /// An empty battery.
    pub fn new() -> Self {
        Self {
            scenarios: IndexMap::new(),
        }
    }

    /// The standard battery: the seven classic scenarios plus the
    /// zero-allocation, edge-placement, and churn supplements.
    pub fn standard() -> Self {
        let mut battery = Self::new();
        battery.register("Basic allocation and free", scenarios::basic_allocation);
        battery.register("Memory exhaustion", scenarios::memory_exhaustion);
        battery.register("Resize shrink", scenarios::resize_shrink);
        battery.register("Resize expand", scenarios::resize_expand);
        battery.register("Resize move", scenarios::resize_move);
        battery.register("Free and reallocate", scenarios::free_and_reallocate);
        battery.register("Invalid free", scenarios::invalid_free);
        battery.register("Zero allocation", scenarios::zero_allocation);
        battery.register("Edge placement", scenarios::edge_placement);
        battery.register("Random churn", scenarios::random_churn);
        battery
    }

    /// Add a scenario under `label`, replacing any scenario already
    /// registered under the same label (the original keeps its slot
    /// in the running order).
    pub fn register(&mut self, label: &'static str, scenario: ScenarioFn) {
        self.scenarios.insert(label, scenario);
    }

    /// Number of registered scenarios.
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Whether the battery has no scenarios.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Run every scenario in registration order, narrating to stdout.
    ///
    /// Prints `Running tests...`, one `Test: <label>` line per
    /// scenario, and the report's summary line.
    pub fn run(&self, heap: &mut SimHeap) -> BatteryReport {
        println!("Running tests...");
        let mut report = BatteryReport::default();
        for (label, scenario) in &self.scenarios {
            println!("Test: {label}");
            report.executed += 1;
            if let Err(cause) = scenario(heap) {
                report.failures.push(ScenarioFailure {
                    scenario: label,
                    cause,
                });
            }
        }
        println!("{}", report.summary());
        report
    }
}

impl Default for Battery {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_battery_passes_on_a_default_heap() {
        let mut heap = SimHeap::default();
        let report = Battery::standard().run(&mut heap);
        assert_eq!(report.executed, 10);
        assert!(report.all_passed(), "failures: {:?}", report.failures);
        assert!(heap.status().cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn register_replaces_by_label() {
        let mut battery = Battery::new();
        battery.register("only", scenarios::basic_allocation);
        battery.register("only", scenarios::memory_exhaustion);
        assert_eq!(battery.len(), 1);
    }

    #[test]
    fn failures_carry_their_scenario_label() {
        fn always_fails(_heap: &mut SimHeap) -> Result<(), CheckFailure> {
            Err(CheckFailure::TilingViolated)
        }
        let mut battery = Battery::new();
        battery.register("Doomed", always_fails);
        let mut heap = SimHeap::default();
        let report = battery.run(&mut heap);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].scenario, "Doomed");
        assert_eq!(report.summary(), "1 test(s) failed.");
    }
}
