use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Availability of a single course relative to a completed set.
///
/// - `Completed`: the course id is in the completed set.
/// - `Available`: not completed, and every prerequisite id is completed.
/// - `Locked`: not completed, and at least one prerequisite id is missing
///   from the completed set (dangling ids included).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    Completed,
    Available,
    Locked,
}

impl CourseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Completed => "completed",
            CourseStatus::Available => "available",
            CourseStatus::Locked => "locked",
        }
    }
}

impl fmt::Display for CourseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Relation an edge was emitted for. Only used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// `prerequisite -> course`
    Prerequisite,
    /// `course -> corequisite`
    Corequisite,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Prerequisite => f.pad("prerequisite"),
            EdgeKind::Corequisite => f.pad("corequisite"),
        }
    }
}

/// Where the completed-course set lives between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Store the set as a JSON array in a file (`[progress].path`).
    File,
    /// Keep the set in memory only (lost on exit).
    Memory,
}

impl Default for StorageMode {
    fn default() -> Self {
        StorageMode::File
    }
}

impl FromStr for StorageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(StorageMode::File),
            "memory" => Ok(StorageMode::Memory),
            other => Err(format!(
                "invalid progress storage: {other} (expected \"file\" or \"memory\")"
            )),
        }
    }
}
