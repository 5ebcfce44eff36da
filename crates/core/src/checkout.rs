//! The checkout sequencer.
//!
//! A strictly linear flow: `Start -> Information -> Overview -> Complete`.
//! The only way backwards is an explicit cancel, which returns to `Start`.
//! Entering `Complete` clears the cart and discards the shipping info; a
//! later checkout starts a fresh cycle.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::CartLedger;
use crate::fault::FaultSource;
use crate::profile::BehaviorProfile;

/// Where the flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStage {
    Start,
    Information,
    Overview,
    Complete,
}

/// A required shipping field that came back empty.
///
/// Display strings are the inline messages shown next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Validated shipping details, held only for the duration of one checkout
/// cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    pub postal_code: String,
}

impl ShippingInfo {
    /// Validate raw form fields. All three must be non-empty after trimming;
    /// every invalid field yields its own error.
    ///
    /// # Errors
    ///
    /// One [`ValidationError::MissingField`] per blank field, in form order.
    pub fn validate(
        first_name: &str,
        last_name: &str,
        postal_code: &str,
    ) -> Result<Self, Vec<ValidationError>> {
        let mut errors = Vec::new();
        if first_name.trim().is_empty() {
            errors.push(ValidationError::MissingField("First name"));
        }
        if last_name.trim().is_empty() {
            errors.push(ValidationError::MissingField("Last name"));
        }
        if postal_code.trim().is_empty() {
            errors.push(ValidationError::MissingField("Postal code"));
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Self {
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            postal_code: postal_code.trim().to_string(),
        })
    }
}

/// Errors from driving the flow out of order or with nothing to buy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// The entry point stays disabled while the ledger is empty.
    #[error("cart is empty")]
    EmptyCart,

    /// An operation was issued for a stage the flow is not at.
    #[error("checkout is at the {actual:?} stage, expected {expected:?}")]
    OutOfSequence {
        expected: CheckoutStage,
        actual: CheckoutStage,
    },

    /// The information form failed validation; the flow stays at
    /// `Information`.
    #[error("shipping information is incomplete")]
    Invalid(Vec<ValidationError>),
}

/// The three-stage checkout state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutFlow {
    stage: CheckoutStage,
    shipping: Option<ShippingInfo>,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutFlow {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stage: CheckoutStage::Start,
            shipping: None,
        }
    }

    #[must_use]
    pub const fn stage(&self) -> CheckoutStage {
        self.stage
    }

    /// Shipping info captured at the information stage, if the flow has
    /// passed it in this cycle.
    #[must_use]
    pub const fn shipping(&self) -> Option<&ShippingInfo> {
        self.shipping.as_ref()
    }

    /// Begin a checkout cycle: `Start -> Information`.
    ///
    /// Allowed from `Start` or from `Complete` (a finished cycle rolls over
    /// into a fresh one).
    ///
    /// # Errors
    ///
    /// [`CheckoutError::EmptyCart`] when the ledger has no lines;
    /// [`CheckoutError::OutOfSequence`] mid-flow.
    pub fn begin(&mut self, ledger: &CartLedger) -> Result<(), CheckoutError> {
        if !matches!(self.stage, CheckoutStage::Start | CheckoutStage::Complete) {
            return Err(CheckoutError::OutOfSequence {
                expected: CheckoutStage::Start,
                actual: self.stage,
            });
        }
        if ledger.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.stage = CheckoutStage::Information;
        self.shipping = None;
        Ok(())
    }

    /// Submit the shipping form: `Information -> Overview`.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::Invalid`] keeps the flow at `Information` with one
    /// error per blank field; [`CheckoutError::OutOfSequence`] elsewhere.
    pub fn submit_information(
        &mut self,
        first_name: &str,
        last_name: &str,
        postal_code: &str,
    ) -> Result<(), CheckoutError> {
        if self.stage != CheckoutStage::Information {
            return Err(CheckoutError::OutOfSequence {
                expected: CheckoutStage::Information,
                actual: self.stage,
            });
        }
        let shipping = ShippingInfo::validate(first_name, last_name, postal_code)
            .map_err(CheckoutError::Invalid)?;
        self.shipping = Some(shipping);
        self.stage = CheckoutStage::Overview;
        Ok(())
    }

    /// Confirm the order: `Overview -> Complete`.
    ///
    /// Under the problem profile the confirmation is flaky: the fault source
    /// may drop it, in which case nothing transitions, nothing is shown, and
    /// the caller gets `Ok(false)` - the user just has to press again. On a
    /// successful confirmation the ledger is cleared, the shipping info is
    /// discarded, and `Ok(true)` is returned.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::OutOfSequence`] when not at `Overview`.
    pub fn confirm(
        &mut self,
        ledger: &mut CartLedger,
        profile: &BehaviorProfile,
        faults: &mut dyn FaultSource,
    ) -> Result<bool, CheckoutError> {
        if self.stage != CheckoutStage::Overview {
            return Err(CheckoutError::OutOfSequence {
                expected: CheckoutStage::Overview,
                actual: self.stage,
            });
        }
        if !faults.attempt(profile.cart_action_success_rate()) {
            return Ok(false);
        }
        self.stage = CheckoutStage::Complete;
        self.shipping = None;
        ledger.clear();
        Ok(true)
    }

    /// Abandon the cycle and return to `Start`. Idempotent; the cart is left
    /// alone.
    pub fn cancel(&mut self) {
        self.stage = CheckoutStage::Start;
        self.shipping = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::{AlwaysFail, AlwaysSucceed};
    use crate::identity::ProfileKind;
    use crate::types::{Product, ProductId};
    use rust_decimal::Decimal;

    fn stocked_cart() -> CartLedger {
        let mut cart = CartLedger::new();
        cart.add_line(
            Product {
                id: ProductId::new(1),
                name: "Canvas Tote".to_string(),
                description: String::new(),
                price: Decimal::new(999, 2),
                image: String::new(),
                stock: 5,
            },
            3,
        );
        cart
    }

    fn standard() -> BehaviorProfile {
        BehaviorProfile::new(ProfileKind::Standard)
    }

    #[test]
    fn test_empty_cart_blocks_entry() {
        let mut flow = CheckoutFlow::new();
        let empty = CartLedger::new();
        assert_eq!(flow.begin(&empty), Err(CheckoutError::EmptyCart));
        assert_eq!(flow.stage(), CheckoutStage::Start);
    }

    #[test]
    fn test_happy_path_clears_ledger() {
        let mut flow = CheckoutFlow::new();
        let mut cart = stocked_cart();
        assert_eq!(cart.total_price(), Decimal::new(2997, 2));

        flow.begin(&cart).expect("begin");
        flow.submit_information("Sadie", "Mangold", "EC1A 1BB").expect("information");
        assert_eq!(flow.stage(), CheckoutStage::Overview);
        assert!(flow.shipping().is_some());

        let done = flow
            .confirm(&mut cart, &standard(), &mut AlwaysSucceed)
            .expect("confirm");
        assert!(done);
        assert_eq!(flow.stage(), CheckoutStage::Complete);
        assert_eq!(cart.total_item_count(), 0);
        assert_eq!(flow.shipping(), None);
    }

    #[test]
    fn test_validation_reports_every_blank_field() {
        let mut flow = CheckoutFlow::new();
        let cart = stocked_cart();
        flow.begin(&cart).expect("begin");

        let err = flow.submit_information("  ", "", "").expect_err("invalid");
        let CheckoutError::Invalid(errors) = err else {
            panic!("expected validation errors");
        };
        assert_eq!(
            errors,
            vec![
                ValidationError::MissingField("First name"),
                ValidationError::MissingField("Last name"),
                ValidationError::MissingField("Postal code"),
            ]
        );
        assert_eq!(flow.stage(), CheckoutStage::Information);
    }

    #[test]
    fn test_missing_postal_only() {
        let err = ShippingInfo::validate("Sadie", "Mangold", " ").expect_err("invalid");
        assert_eq!(err, vec![ValidationError::MissingField("Postal code")]);
        assert_eq!(
            err[0].to_string(),
            "Postal code is required"
        );
    }

    #[test]
    fn test_flaky_confirm_is_silent() {
        let mut flow = CheckoutFlow::new();
        let mut cart = stocked_cart();
        flow.begin(&cart).expect("begin");
        flow.submit_information("Pat", "Lee", "90210").expect("information");

        let problem = BehaviorProfile::new(ProfileKind::Problem);
        let done = flow
            .confirm(&mut cart, &problem, &mut AlwaysFail)
            .expect("confirm call itself is not an error");
        assert!(!done);
        assert_eq!(flow.stage(), CheckoutStage::Overview);
        assert!(!cart.is_empty());
        assert!(flow.shipping().is_some());

        // Retrying with a kinder coin finishes the cycle.
        let done = flow
            .confirm(&mut cart, &problem, &mut AlwaysSucceed)
            .expect("confirm");
        assert!(done);
        assert_eq!(flow.stage(), CheckoutStage::Complete);
    }

    #[test]
    fn test_out_of_sequence_calls_rejected() {
        let mut flow = CheckoutFlow::new();
        let mut cart = stocked_cart();

        assert!(matches!(
            flow.submit_information("a", "b", "c"),
            Err(CheckoutError::OutOfSequence { .. })
        ));
        assert!(matches!(
            flow.confirm(&mut cart, &standard(), &mut AlwaysSucceed),
            Err(CheckoutError::OutOfSequence { .. })
        ));

        flow.begin(&cart).expect("begin");
        assert!(matches!(
            flow.begin(&cart),
            Err(CheckoutError::OutOfSequence { .. })
        ));
    }

    #[test]
    fn test_cancel_returns_to_start_and_keeps_cart() {
        let mut flow = CheckoutFlow::new();
        let cart = stocked_cart();
        flow.begin(&cart).expect("begin");
        flow.submit_information("Pat", "Lee", "90210").expect("information");
        flow.cancel();
        assert_eq!(flow.stage(), CheckoutStage::Start);
        assert_eq!(flow.shipping(), None);
        assert!(!cart.is_empty());
        flow.cancel();
        assert_eq!(flow.stage(), CheckoutStage::Start);
    }

    #[test]
    fn test_complete_rolls_over_into_fresh_cycle() {
        let mut flow = CheckoutFlow::new();
        let mut cart = stocked_cart();
        flow.begin(&cart).expect("begin");
        flow.submit_information("Pat", "Lee", "90210").expect("information");
        flow.confirm(&mut cart, &standard(), &mut AlwaysSucceed).expect("confirm");

        // New cycle needs a non-empty cart again.
        assert_eq!(flow.begin(&cart), Err(CheckoutError::EmptyCart));
        cart.add_line(
            Product {
                id: ProductId::new(2),
                name: "Enamel Mug".to_string(),
                description: String::new(),
                price: Decimal::new(450, 2),
                image: String::new(),
                stock: 2,
            },
            1,
        );
        flow.begin(&cart).expect("fresh cycle");
        assert_eq!(flow.stage(), CheckoutStage::Information);
    }
}
