//! Checkout errors.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Please fill in all required fields")]
    MissingFields,

    #[error("Your cart is empty")]
    EmptyCart,

    #[error("An order is already being submitted")]
    SubmissionInProgress,

    #[error("Checkout cannot be cancelled while the order is being submitted")]
    NotCancellable,

    #[error("Order submission was interrupted")]
    SubmissionInterrupted,
}

impl CheckoutError {
    /// Whether the error comes from the customer's input rather than the
    /// state of the flow.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingFields | Self::EmptyCart)
    }
}
