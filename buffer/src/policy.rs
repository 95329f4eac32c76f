//! Overflow policy configuration.

use std::str::FromStr;

/// What a bounded copy does with the destination when the input does not fit.
///
/// Regardless of the policy, an oversized input is always reported as
/// [`CopyError::InputTooLarge`](crate::CopyError::InputTooLarge).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OverflowPolicy {
    /// Leave the destination untouched.
    #[default]
    Reject,

    /// Store the longest prefix that fits.
    ///
    /// When copying a [`str`], the prefix is cut back to the previous UTF-8 character boundary.
    Truncate,
}

impl OverflowPolicy {
    /// All policies.
    pub const ALL: [Self; 2] = [Self::Reject, Self::Truncate];

    /// Configuration name of the policy.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Truncate => "truncate",
        }
    }
}

impl std::fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverflowPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPolicy(s.to_owned()))
    }
}

/// Unknown [`OverflowPolicy`] name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPolicy(String);

impl std::fmt::Display for UnknownPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown overflow policy '{}', expected one of: {}",
            self.0,
            OverflowPolicy::ALL.map(OverflowPolicy::as_str).join(", "),
        )
    }
}

impl std::error::Error for UnknownPolicy {}
