//! Checkout state machine
//!
//! `idle → submitting → {succeeded, failed}` for submissions, plus the
//! independent `confirming` flag toggled by [`CheckoutFlow::begin`] and
//! [`CheckoutFlow::cancel`]. The flow never performs I/O itself: the caller
//! runs the submission between [`CheckoutFlow::start_submission`] and
//! [`CheckoutFlow::complete_submission`].

use super::{
    errors::CheckoutError,
    models::{CheckoutForm, Order},
};
use crate::cart::store::CartStore;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Checkout progress of one session
#[derive(Debug, Clone, Default)]
pub struct CheckoutFlow {
    phase: CheckoutPhase,
    confirming: bool,
    error: Option<String>,
}

impl CheckoutFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    pub fn is_confirming(&self) -> bool {
        self.confirming
    }

    /// Inline error shown until dismissed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Enters the checkout form.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::EmptyCart`] when there is nothing to check out.
    pub fn begin(&mut self, cart: &CartStore) -> Result<(), CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        self.confirming = true;
        Ok(())
    }

    /// Leaves the checkout form, keeping the cart intact.
    ///
    /// # Errors
    ///
    /// [`CheckoutError::NotCancellable`] once a submission is running.
    pub fn cancel(&mut self) -> Result<(), CheckoutError> {
        if self.phase == CheckoutPhase::Submitting {
            return Err(CheckoutError::NotCancellable);
        }

        self.confirming = false;
        self.phase = CheckoutPhase::Idle;
        self.error = None;
        Ok(())
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
        if self.phase == CheckoutPhase::Failed {
            self.phase = CheckoutPhase::Idle;
        }
    }

    /// Validates the form against the cart and moves to `submitting`.
    ///
    /// On a validation failure the phase becomes `failed`, the message is kept
    /// as the inline error and the cart is left untouched.
    ///
    /// # Errors
    ///
    /// * [`CheckoutError::SubmissionInProgress`] if already submitting.
    /// * [`CheckoutError::MissingFields`] or [`CheckoutError::EmptyCart`] when
    ///   validation fails.
    pub fn start_submission(
        &mut self,
        cart: &CartStore,
        form: &CheckoutForm,
        default_delivery_charge: Decimal,
    ) -> Result<Order, CheckoutError> {
        if self.phase == CheckoutPhase::Submitting {
            return Err(CheckoutError::SubmissionInProgress);
        }

        if let Err(error) = validate(cart, form) {
            debug!(%error, "checkout validation failed");
            self.phase = CheckoutPhase::Failed;
            self.error = Some(error.to_string());
            return Err(error);
        }

        self.phase = CheckoutPhase::Submitting;
        self.error = None;
        Ok(Order::build(cart, form, default_delivery_charge))
    }

    /// Finishes a submission: takes the ordered quantities out of the cart
    /// and closes it.
    ///
    /// `ordered` is [`CartStore::quantities`] as captured when the submission
    /// started, so a cart left untouched meanwhile ends up empty.
    pub fn complete_submission(&mut self, cart: &mut CartStore, ordered: &[(u64, u32)]) {
        self.phase = CheckoutPhase::Succeeded;
        self.confirming = false;
        cart.take_quantities(ordered);
        cart.close();
    }
}

fn validate(cart: &CartStore, form: &CheckoutForm) -> Result<(), CheckoutError> {
    if !form.has_required_fields() {
        return Err(CheckoutError::MissingFields);
    }

    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    Ok(())
}
