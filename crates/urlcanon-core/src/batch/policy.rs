use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the batch driver does with a record that cannot be canonicalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Drop the record silently.
    Skip,
    /// Drop the record and log a warning.
    #[default]
    Log,
    /// Stop the run and return the error.
    Halt,
}

impl FailurePolicy {
    /// Returns true when processing should continue past the failing record.
    pub fn tolerate(self, record: u64, err: &dyn fmt::Display) -> bool {
        match self {
            FailurePolicy::Skip => true,
            FailurePolicy::Log => {
                tracing::warn!(record, "skipping record: {}", err);
                true
            }
            FailurePolicy::Halt => false,
        }
    }
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skip" => Ok(FailurePolicy::Skip),
            "log" => Ok(FailurePolicy::Log),
            "halt" => Ok(FailurePolicy::Halt),
            other => Err(format!("unknown failure policy {other:?} (expected skip, log or halt)")),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FailurePolicy::Skip => "skip",
            FailurePolicy::Log => "log",
            FailurePolicy::Halt => "halt",
        })
    }
}
