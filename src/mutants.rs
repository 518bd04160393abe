use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome the engine assigned to a single mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetectionStatus {
    Killed,
    Survived,
    TimedOut,
    NonViable,
    MemoryError,
    NotStarted,
    Started,
    RunError,
    NoCoverage,
}

impl DetectionStatus {
    /// Whether the test suite noticed the mutation.
    ///
    /// Timeouts, memory errors and run errors count as detected: the mutant
    /// changed observable behaviour even if no assertion failed.
    pub fn is_detected(self) -> bool {
        matches!(
            self,
            DetectionStatus::Killed
                | DetectionStatus::TimedOut
                | DetectionStatus::NonViable
                | DetectionStatus::MemoryError
                | DetectionStatus::RunError
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DetectionStatus::Killed => "KILLED",
            DetectionStatus::Survived => "SURVIVED",
            DetectionStatus::TimedOut => "TIMED_OUT",
            DetectionStatus::NonViable => "NON_VIABLE",
            DetectionStatus::MemoryError => "MEMORY_ERROR",
            DetectionStatus::NotStarted => "NOT_STARTED",
            DetectionStatus::Started => "STARTED",
            DetectionStatus::RunError => "RUN_ERROR",
            DetectionStatus::NoCoverage => "NO_COVERAGE",
        }
    }
}

impl fmt::Display for DetectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One mutation and what happened when the tests ran against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationRecord {
    pub status: DetectionStatus,
    pub number_of_tests_run: u32,
    #[serde(rename = "sourcefile")]
    pub source_file: String,
    pub mutated_class: String,
    pub mutated_method: String,
    pub method_description: String,
    pub line_number: u32,
    pub mutator: String,
    pub index: u32,
    pub block: u32,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub killing_test: Option<String>,
    #[serde(default)]
    pub killing_tests: Vec<String>,
    #[serde(default)]
    pub succeeding_tests: Vec<String>,
}

impl MutationRecord {
    pub fn detected(&self) -> bool {
        self.status.is_detected()
    }
}

/// All results the engine collected for one mutated class, delivered as a unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMutationResults {
    #[serde(default)]
    pub mutated_class: String,
    #[serde(default)]
    pub mutations: Vec<MutationRecord>,
}

impl ClassMutationResults {
    pub fn new(mutated_class: impl Into<String>, mutations: Vec<MutationRecord>) -> Self {
        ClassMutationResults {
            mutated_class: mutated_class.into(),
            mutations,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }
}
