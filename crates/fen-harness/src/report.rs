//! Scenario outcomes and failure reporting.

use std::error::Error;
use std::fmt;

/// Why a scenario missed its post-conditions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckFailure {
    /// An allocation that had to succeed returned no block.
    AllocationFailed {
        /// Requested size in bytes.
        size: usize,
    },
    /// A status cell did not hold the expected value.
    StatusMismatch {
        /// Cell index.
        index: usize,
        /// Expected status value.
        expected: u8,
        /// Observed status value.
        actual: u8,
    },
    /// A block landed at, or stayed at, the wrong offset.
    WrongOffset {
        /// Expected arena offset.
        expected: usize,
        /// Observed arena offset.
        actual: usize,
    },
    /// Arena bytes did not hold the expected content.
    ContentMismatch {
        /// Offset of the first wrong byte.
        offset: usize,
    },
    /// An operation that had to fail produced a block.
    UnexpectedSuccess,
    /// The status map lost its block/free tiling.
    TilingViolated,
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocationFailed { size } => {
                write!(f, "allocation of {size} bytes returned no block")
            }
            Self::StatusMismatch {
                index,
                expected,
                actual,
            } => {
                write!(f, "status[{index}] read {actual}, expected {expected}")
            }
            Self::WrongOffset { expected, actual } => {
                write!(f, "block at offset {actual}, expected {expected}")
            }
            Self::ContentMismatch { offset } => {
                write!(f, "arena byte at offset {offset} lost its value")
            }
            Self::UnexpectedSuccess => {
                write!(f, "operation succeeded where failure was required")
            }
            Self::TilingViolated => {
                write!(f, "status map is no longer tiled into blocks and free runs")
            }
        }
    }
}

impl Error for CheckFailure {}

/// A scenario that failed, with its label and cause.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScenarioFailure {
    /// Label the scenario was registered under.
    pub scenario: &'static str,
    /// The failed check.
    pub cause: CheckFailure,
}

impl fmt::Display for ScenarioFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scenario '{}' failed: {}", self.scenario, self.cause)
    }
}

impl Error for ScenarioFailure {}

/// Aggregate outcome of a battery run.
#[derive(Clone, Debug, Default)]
pub struct BatteryReport {
    /// Number of scenarios executed.
    pub executed: usize,
    /// Failures in execution order.
    pub failures: Vec<ScenarioFailure>,
}

impl BatteryReport {
    /// Whether every scenario passed.
    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// The summary line the runner prints.
    pub fn summary(&self) -> String {
        if self.failures.is_empty() {
            "All tests passed!".to_string()
        } else {
            format!("{} test(s) failed.", self.failures.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_for_a_clean_run() {
        let report = BatteryReport {
            executed: 7,
            failures: Vec::new(),
        };
        assert!(report.all_passed());
        assert_eq!(report.summary(), "All tests passed!");
    }

    #[test]
    fn summary_counts_failures() {
        let failure = ScenarioFailure {
            scenario: "Resize shrink",
            cause: CheckFailure::StatusMismatch {
                index: 12,
                expected: 0,
                actual: 3,
            },
        };
        let report = BatteryReport {
            executed: 7,
            failures: vec![failure.clone(), failure],
        };
        assert_eq!(report.summary(), "2 test(s) failed.");
    }

    #[test]
    fn failure_display_names_scenario_and_cause() {
        let failure = ScenarioFailure {
            scenario: "Invalid free",
            cause: CheckFailure::TilingViolated,
        };
        assert_eq!(
            failure.to_string(),
            "scenario 'Invalid free' failed: \
             status map is no longer tiled into blocks and free runs",
        );
    }
}
