//! Behavior profiles - the per-identity perturbation parameters.
//!
//! A profile is a pure function of the identity. It owns no state: the other
//! components consult it to decide how long an action is delayed, whether it
//! silently fails, and what the catalog looks like.

use std::time::Duration;

use crate::identity::ProfileKind;

/// Artificial delay applied for the performance-glitch profile before
/// product-list reads and cart mutations.
pub const GLITCH_LATENCY: Duration = Duration::from_millis(2000);

/// Chance that a flaky action (add-to-cart, checkout confirmation) goes
/// through for the problem profile. Tunable, not a contract value.
pub const PROBLEM_SUCCESS_RATE: f64 = 0.5;

/// The one image every product gets under the visual profile.
pub const VISUAL_PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x400?text=mango";

/// Behavior perturbations derived from an identity.
///
/// Stateless and copyable; derive it fresh from the session whenever needed
/// rather than caching it across logins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BehaviorProfile {
    kind: ProfileKind,
}

impl BehaviorProfile {
    #[must_use]
    pub const fn new(kind: ProfileKind) -> Self {
        Self { kind }
    }

    #[must_use]
    pub const fn kind(&self) -> ProfileKind {
        self.kind
    }

    /// Delay to apply before product-list reads and cart mutations.
    #[must_use]
    pub const fn latency(&self) -> Duration {
        match self.kind {
            ProfileKind::PerformanceGlitch => GLITCH_LATENCY,
            _ => Duration::ZERO,
        }
    }

    /// Probability in `[0, 1]` that a flaky cart action takes effect.
    #[must_use]
    pub const fn cart_action_success_rate(&self) -> f64 {
        match self.kind {
            ProfileKind::Problem => PROBLEM_SUCCESS_RATE,
            _ => 1.0,
        }
    }

    /// Replacement image URL, if this profile substitutes product images.
    #[must_use]
    pub const fn image_override(&self) -> Option<&'static str> {
        match self.kind {
            ProfileKind::Visual => Some(VISUAL_PLACEHOLDER_IMAGE),
            _ => None,
        }
    }

    /// Whether the postal-code input is rendered read-only.
    ///
    /// This is a UI-level lock only. The field stays subject to the
    /// required-field validation, which makes checkout unfinishable for the
    /// error profile. That dead end is intentional and must not be relaxed.
    #[must_use]
    pub const fn postal_code_locked(&self) -> bool {
        matches!(self.kind, ProfileKind::Error)
    }
}

impl From<ProfileKind> for BehaviorProfile {
    fn from(kind: ProfileKind) -> Self {
        Self::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_glitch_has_latency() {
        for kind in [
            ProfileKind::Standard,
            ProfileKind::LockedOut,
            ProfileKind::Problem,
            ProfileKind::Error,
            ProfileKind::Visual,
        ] {
            assert_eq!(BehaviorProfile::new(kind).latency(), Duration::ZERO);
        }
        assert_eq!(
            BehaviorProfile::new(ProfileKind::PerformanceGlitch).latency(),
            GLITCH_LATENCY
        );
    }

    #[test]
    fn test_only_problem_is_flaky() {
        assert!(BehaviorProfile::new(ProfileKind::Problem).cart_action_success_rate() < 1.0);
        assert!(
            (BehaviorProfile::new(ProfileKind::Standard).cart_action_success_rate() - 1.0).abs()
                < f64::EPSILON
        );
    }

    #[test]
    fn test_only_visual_substitutes_images() {
        assert_eq!(
            BehaviorProfile::new(ProfileKind::Visual).image_override(),
            Some(VISUAL_PLACEHOLDER_IMAGE)
        );
        assert_eq!(BehaviorProfile::new(ProfileKind::Problem).image_override(), None);
    }

    #[test]
    fn test_only_error_locks_postal_code() {
        assert!(BehaviorProfile::new(ProfileKind::Error).postal_code_locked());
        assert!(!BehaviorProfile::new(ProfileKind::Standard).postal_code_locked());
    }
}
