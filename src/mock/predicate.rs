//! Call-count predicates checked against spy recordings.

use std::fmt;
use std::str::FromStr;

use super::MockDefinition;
use crate::error::MockError;

/// A condition on how often a method was called.
///
/// Parses from `calledTimes(n)`, `calledAtLeastOnce` or `neverCalled`,
/// ignoring ASCII case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallPredicate {
    /// Exactly `n` calls.
    CalledTimes(usize),
    /// One or more calls.
    CalledAtLeastOnce,
    /// No calls.
    NeverCalled,
}

impl CallPredicate {
    /// Returns whether `count` calls satisfy the predicate.
    #[must_use]
    pub const fn is_satisfied_by(self, count: usize) -> bool {
        match self {
            Self::CalledTimes(expected) => count == expected,
            Self::CalledAtLeastOnce => count > 0,
            Self::NeverCalled => count == 0,
        }
    }

    pub(super) fn check(self, mock: &MockDefinition, method: &str, count: usize) -> Verification {
        let success = self.is_satisfied_by(count);
        let noun = if count == 1 { "time" } else { "times" };
        let mut details = format!(
            "{}->{method}() was called {count} {noun}, expected {self}",
            mock.variable()
        );
        if !mock.is_spying() {
            details.push_str(" (spy not enabled, no calls recorded)");
        }
        Verification { success, details }
    }
}

impl fmt::Display for CallPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CalledTimes(count) => write!(f, "calledTimes({count})"),
            Self::CalledAtLeastOnce => f.write_str("calledAtLeastOnce"),
            Self::NeverCalled => f.write_str("neverCalled"),
        }
    }
}

impl FromStr for CallPredicate {
    type Err = MockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || MockError::InvalidPredicate {
            text: String::from(text),
        };

        if text.eq_ignore_ascii_case("calledAtLeastOnce") {
            return Ok(Self::CalledAtLeastOnce);
        }
        if text.eq_ignore_ascii_case("neverCalled") {
            return Ok(Self::NeverCalled);
        }

        let prefix = "calledtimes(";
        let head = text.get(..prefix.len()).ok_or_else(invalid)?;
        if !head.eq_ignore_ascii_case(prefix) {
            return Err(invalid());
        }
        text.get(prefix.len()..)
            .and_then(|rest| rest.strip_suffix(')'))
            .and_then(|count| count.trim().parse().ok())
            .map(Self::CalledTimes)
            .ok_or_else(invalid)
    }
}

/// Outcome of a call verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    /// Whether the predicate held.
    pub success: bool,
    /// Human-readable account of what was checked.
    pub details: String,
}
