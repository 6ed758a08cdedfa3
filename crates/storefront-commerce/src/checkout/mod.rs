//! Checkout module.
//!
//! Contains the order summary calculator, the checkout form and its
//! validation, and the simulated submission flow.

mod flow;
mod form;
mod order;
mod summary;

pub use flow::{CheckoutSession, CheckoutStatus, DEFAULT_PROCESSING_DELAY};
pub use form::{
    validate_field, CheckoutField, CheckoutForm, FieldError, PaymentDetails, ShippingAddress,
    ValidationErrors,
};
pub use order::OrderConfirmation;
pub use summary::{
    OrderSummary, FLAT_SHIPPING_CENTS, FREE_SHIPPING_THRESHOLD_CENTS, TAX_RATE_BASIS_POINTS,
};
