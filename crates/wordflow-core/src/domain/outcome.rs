//! Outcome model: per-line results and the dispatch-level aggregate.
//!
//! Failures are plain data here. Nothing in this module is an error that
//! crosses the dispatch boundary with `?`.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::errors::CountError;
use super::ids::LineIndex;
use crate::config::duration_to_millis;

/// Why a single line did not produce a count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// The unit rejected its input.
    InvalidInput { message: String },

    /// The unit did not reply before its deadline.
    Timeout { timeout_ms: u64 },

    /// The unit terminated without replying (panic or abort).
    UnitLost { message: String },
}

impl FailureReason {
    pub fn timeout(after: Duration) -> Self {
        Self::Timeout {
            timeout_ms: duration_to_millis(after),
        }
    }

    pub fn unit_lost(message: impl Into<String>) -> Self {
        Self::UnitLost {
            message: message.into(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

impl From<CountError> for FailureReason {
    fn from(err: CountError) -> Self {
        match err {
            CountError::InvalidInput => Self::InvalidInput {
                message: err.to_string(),
            },
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { message } => write!(f, "invalid input: {message}"),
            Self::Timeout { timeout_ms } => write!(f, "timed out after {timeout_ms}ms"),
            Self::UnitLost { message } => write!(f, "unit terminated without reply: {message}"),
        }
    }
}

/// Count-or-failure of one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LineOutcome {
    Count { words: usize },
    Failed { reason: FailureReason },
}

/// The reply of one unit, tagged with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineResult {
    pub index: LineIndex,
    #[serde(flatten)]
    pub outcome: LineOutcome,
}

impl LineResult {
    pub fn count(index: LineIndex, words: usize) -> Self {
        Self {
            index,
            outcome: LineOutcome::Count { words },
        }
    }

    pub fn failed(index: LineIndex, reason: FailureReason) -> Self {
        Self {
            index,
            outcome: LineOutcome::Failed { reason },
        }
    }

    pub fn from_reply(index: LineIndex, reply: Result<usize, CountError>) -> Self {
        match reply {
            Ok(words) => Self::count(index, words),
            Err(err) => Self::failed(index, err.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, LineOutcome::Failed { .. })
    }
}

/// Dispatch-level result.
///
/// `Failed` dominates: a total is only ever reported when every line counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Aggregate {
    Total { words: usize },
    Failed { reason: FailureReason },
}

impl Aggregate {
    pub fn total(&self) -> Option<usize> {
        match self {
            Self::Total { words } => Some(*words),
            Self::Failed { .. } => None,
        }
    }

    pub fn failure(&self) -> Option<&FailureReason> {
        match self {
            Self::Total { .. } => None,
            Self::Failed { reason } => Some(reason),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Total { words } => write!(f, "{words}"),
            Self::Failed { reason } => write!(f, "error: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_error_becomes_invalid_input_reason() {
        let reason = FailureReason::from(CountError::InvalidInput);
        assert!(reason.is_invalid_input());
        assert_eq!(
            reason.to_string(),
            "invalid input: input line must not be null"
        );
    }

    #[test]
    fn timeout_reason_records_millis() {
        let reason = FailureReason::timeout(Duration::from_millis(1000));
        assert_eq!(reason, FailureReason::Timeout { timeout_ms: 1000 });
        assert_eq!(reason.to_string(), "timed out after 1000ms");
    }

    #[test]
    fn huge_timeout_reason_saturates() {
        let reason = FailureReason::timeout(Duration::MAX);
        assert_eq!(reason, FailureReason::Timeout { timeout_ms: u64::MAX });
        assert!(reason.is_timeout());
    }

    #[test]
    fn aggregate_display_is_bare_total_or_error() {
        assert_eq!(Aggregate::Total { words: 6 }.to_string(), "6");

        let failed = Aggregate::Failed {
            reason: FailureReason::timeout(Duration::from_millis(5)),
        };
        assert_eq!(failed.to_string(), "error: timed out after 5ms");
        assert_eq!(failed.total(), None);
    }

    #[test]
    fn aggregate_json_shape() {
        let v = serde_json::to_value(Aggregate::Total { words: 4 }).unwrap();
        assert_eq!(v, serde_json::json!({"status": "total", "words": 4}));

        let v = serde_json::to_value(Aggregate::Failed {
            reason: FailureReason::timeout(Duration::from_millis(20)),
        })
        .unwrap();
        assert_eq!(v["status"], "failed");
        assert_eq!(v["reason"]["kind"], "timeout");
        assert_eq!(v["reason"]["timeout_ms"], 20);
    }

    #[test]
    fn line_result_flattens_outcome() {
        let r = LineResult::from_reply(LineIndex::new(2), Ok(3));
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v, serde_json::json!({"index": 2, "status": "count", "words": 3}));
        assert!(!r.is_failed());
    }
}
