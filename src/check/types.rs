use thiserror::Error;

use crate::common::dns::DnsError;

/// One parsed input line: a host to query plus an optional first label the
/// CNAME target must carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    pub host: String,
    pub expected_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail(String),
}

/// Per-host verdict. Exactly one is produced per request, in input order,
/// and never mutated afterwards. A `Fail` always carries a non-empty reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostResult {
    pub host: String,
    pub outcome: Outcome,
}

impl HostResult {
    pub fn pass(host: &str) -> Self {
        Self {
            host: host.to_string(),
            outcome: Outcome::Pass,
        }
    }

    pub fn fail(host: &str, reason: String) -> Self {
        Self {
            host: host.to_string(),
            outcome: Outcome::Fail(reason),
        }
    }

    pub fn is_pass(&self) -> bool {
        self.outcome == Outcome::Pass
    }
}

/// Why a host failed validation. The Display strings are the user-visible
/// failure reasons, so they stay terse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// The DNS transport failed; carries the underlying resolver error.
    #[error(transparent)]
    Resolution(#[from] DnsError),

    /// The first label of the CNAME target did not match the expected label.
    #[error("got {got:?}; expected {expected:?}")]
    LabelMismatch { got: String, expected: String },

    /// The labels after the first did not equal the parent-domain sequence.
    #[error("got {got:?}; expected {expected:?}")]
    ParentMismatch {
        got: Vec<String>,
        expected: Vec<String>,
    },

    /// The answer carried no CNAME record at all.
    #[error("no CNAME for {host:?}")]
    NoCname { host: String },
}
