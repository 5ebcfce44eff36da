//! The fixed set of recognized login identities.
//!
//! The demo ships with six well-known usernames sharing one password. Each
//! maps deterministically to a [`ProfileKind`] that perturbs the rest of the
//! app in a documented way - the whole point of the storefront is giving UI
//! automation suites predictable misbehavior to detect.

use serde::{Deserialize, Serialize};

/// A recognized login name.
///
/// Closed set: anything else fails authentication with `UnknownIdentity`
/// before the password is even looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Identity {
    StandardUser,
    LockedOutUser,
    ProblemUser,
    PerformanceGlitchUser,
    ErrorUser,
    VisualUser,
}

impl Identity {
    /// All recognized identities, in the order the login screen lists them.
    pub const ALL: [Self; 6] = [
        Self::StandardUser,
        Self::LockedOutUser,
        Self::ProblemUser,
        Self::PerformanceGlitchUser,
        Self::ErrorUser,
        Self::VisualUser,
    ];

    /// Parse a raw username. Returns `None` for anything outside the set.
    #[must_use]
    pub fn parse(username: &str) -> Option<Self> {
        match username {
            "standard_user" => Some(Self::StandardUser),
            "locked_out_user" => Some(Self::LockedOutUser),
            "problem_user" => Some(Self::ProblemUser),
            "performance_glitch_user" => Some(Self::PerformanceGlitchUser),
            "error_user" => Some(Self::ErrorUser),
            "visual_user" => Some(Self::VisualUser),
            _ => None,
        }
    }

    /// The raw username string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StandardUser => "standard_user",
            Self::LockedOutUser => "locked_out_user",
            Self::ProblemUser => "problem_user",
            Self::PerformanceGlitchUser => "performance_glitch_user",
            Self::ErrorUser => "error_user",
            Self::VisualUser => "visual_user",
        }
    }

    /// The behavior profile this identity is assigned.
    ///
    /// Deterministic: exactly one profile per identity. The catch-all arm is
    /// a fallback for identities added to the set without a dedicated
    /// profile - they behave as standard.
    #[must_use]
    pub const fn profile_kind(&self) -> ProfileKind {
        match self {
            Self::LockedOutUser => ProfileKind::LockedOut,
            Self::ProblemUser => ProfileKind::Problem,
            Self::PerformanceGlitchUser => ProfileKind::PerformanceGlitch,
            Self::ErrorUser => ProfileKind::Error,
            Self::VisualUser => ProfileKind::Visual,
            Self::StandardUser => ProfileKind::Standard,
        }
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Identity {
    type Err = UnknownIdentity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(UnknownIdentity)
    }
}

/// Error for parsing a username outside the recognized set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("username is not in the recognized set")]
pub struct UnknownIdentity;

/// The behavior flavor attached to an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    /// No perturbations.
    Standard,
    /// Never reaches a session; login fails after the password check.
    LockedOut,
    /// Some actions silently do nothing.
    Problem,
    /// Fixed artificial latency on reads and cart mutations.
    PerformanceGlitch,
    /// Postal code field is rendered read-only while staying required.
    Error,
    /// Every product image replaced by one placeholder.
    Visual,
}
