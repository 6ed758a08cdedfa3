//! Checkout form: contact, shipping address and payment details.
//!
//! Every field is required. Validation is a plain function per field, and the
//! form as a whole reports every failing field at once.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A checkout form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckoutField {
    Email,
    FirstName,
    LastName,
    Address,
    City,
    State,
    ZipCode,
    NameOnCard,
    CardNumber,
    ExpiryDate,
    Cvv,
}

impl CheckoutField {
    /// All fields in form order.
    pub const ALL: [CheckoutField; 11] = [
        CheckoutField::Email,
        CheckoutField::FirstName,
        CheckoutField::LastName,
        CheckoutField::Address,
        CheckoutField::City,
        CheckoutField::State,
        CheckoutField::ZipCode,
        CheckoutField::NameOnCard,
        CheckoutField::CardNumber,
        CheckoutField::ExpiryDate,
        CheckoutField::Cvv,
    ];

    /// Wire name, as used in form data.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutField::Email => "email",
            CheckoutField::FirstName => "firstName",
            CheckoutField::LastName => "lastName",
            CheckoutField::Address => "address",
            CheckoutField::City => "city",
            CheckoutField::State => "state",
            CheckoutField::ZipCode => "zipCode",
            CheckoutField::NameOnCard => "nameOnCard",
            CheckoutField::CardNumber => "cardNumber",
            CheckoutField::ExpiryDate => "expiryDate",
            CheckoutField::Cvv => "cvv",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }

    /// Label shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            CheckoutField::Email => "Email",
            CheckoutField::FirstName => "First Name",
            CheckoutField::LastName => "Last Name",
            CheckoutField::Address => "Address",
            CheckoutField::City => "City",
            CheckoutField::State => "State",
            CheckoutField::ZipCode => "ZIP Code",
            CheckoutField::NameOnCard => "Name on Card",
            CheckoutField::CardNumber => "Card Number",
            CheckoutField::ExpiryDate => "Expiry Date",
            CheckoutField::Cvv => "CVV",
        }
    }

    /// Message reported when the field is left empty.
    pub fn required_message(&self) -> String {
        let noun = match self {
            CheckoutField::FirstName => "First name",
            CheckoutField::LastName => "Last name",
            CheckoutField::ZipCode => "ZIP code",
            CheckoutField::NameOnCard => "Name on card",
            CheckoutField::CardNumber => "Card number",
            CheckoutField::ExpiryDate => "Expiry date",
            other => other.label(),
        };
        format!("{} is required", noun)
    }

    /// Whether the value is sensitive and should not be echoed back.
    pub fn is_secret(&self) -> bool {
        matches!(self, CheckoutField::CardNumber | CheckoutField::Cvv)
    }
}

impl fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single field's validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: CheckoutField,
    pub message: String,
}

/// Every failing field of a form, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Message for `field`, if it failed.
    pub fn get(&self, field: CheckoutField) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

/// Where the order ships.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl ShippingAddress {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Format as single line.
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.address, self.city, self.state, self.zip_code
        )
    }
}

/// Card details. Nothing here is ever persisted.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentDetails {
    pub name_on_card: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
}

impl PaymentDetails {
    /// Card number reduced to its last four digits (e.g., "**** 4242").
    pub fn masked_card_number(&self) -> String {
        let digits: Vec<char> = self
            .card_number
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        let last4: String = digits[digits.len().saturating_sub(4)..].iter().collect();
        format!("**** {}", last4)
    }
}

impl fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentDetails")
            .field("name_on_card", &self.name_on_card)
            .field("card_number", &self.masked_card_number())
            .field("expiry_date", &self.expiry_date)
            .field("cvv", &"***")
            .finish()
    }
}

/// The full checkout form, flat on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutForm {
    pub email: String,
    #[serde(flatten)]
    pub shipping: ShippingAddress,
    #[serde(flatten)]
    pub payment: PaymentDetails,
}

impl CheckoutForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `field`.
    pub fn value(&self, field: CheckoutField) -> &str {
        match field {
            CheckoutField::Email => &self.email,
            CheckoutField::FirstName => &self.shipping.first_name,
            CheckoutField::LastName => &self.shipping.last_name,
            CheckoutField::Address => &self.shipping.address,
            CheckoutField::City => &self.shipping.city,
            CheckoutField::State => &self.shipping.state,
            CheckoutField::ZipCode => &self.shipping.zip_code,
            CheckoutField::NameOnCard => &self.payment.name_on_card,
            CheckoutField::CardNumber => &self.payment.card_number,
            CheckoutField::ExpiryDate => &self.payment.expiry_date,
            CheckoutField::Cvv => &self.payment.cvv,
        }
    }

    /// Set `field` to `value`.
    pub fn set(&mut self, field: CheckoutField, value: impl Into<String>) {
        let slot = match field {
            CheckoutField::Email => &mut self.email,
            CheckoutField::FirstName => &mut self.shipping.first_name,
            CheckoutField::LastName => &mut self.shipping.last_name,
            CheckoutField::Address => &mut self.shipping.address,
            CheckoutField::City => &mut self.shipping.city,
            CheckoutField::State => &mut self.shipping.state,
            CheckoutField::ZipCode => &mut self.shipping.zip_code,
            CheckoutField::NameOnCard => &mut self.payment.name_on_card,
            CheckoutField::CardNumber => &mut self.payment.card_number,
            CheckoutField::ExpiryDate => &mut self.payment.expiry_date,
            CheckoutField::Cvv => &mut self.payment.cvv,
        };
        *slot = value.into();
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, field: CheckoutField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Validate a single field.
    pub fn validate_field(&self, field: CheckoutField) -> Option<FieldError> {
        validate_field(field, self.value(field))
    }

    /// Validate every field, collecting all failures.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let errors: Vec<FieldError> = CheckoutField::ALL
            .into_iter()
            .filter_map(|f| self.validate_field(f))
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }

    /// Fields that still have no value.
    pub fn missing_fields(&self) -> Vec<CheckoutField> {
        CheckoutField::ALL
            .into_iter()
            .filter(|f| self.value(*f).trim().is_empty())
            .collect()
    }
}

/// Validate `value` as the content of `field`.
///
/// Whitespace-only counts as empty.
pub fn validate_field(field: CheckoutField, value: &str) -> Option<FieldError> {
    let value = value.trim();
    let message = if value.is_empty() {
        field.required_message()
    } else if field == CheckoutField::Email && !value.contains('@') {
        "Enter a valid email address".to_string()
    } else {
        return None;
    };
    Some(FieldError { field, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> CheckoutForm {
        CheckoutForm::new()
            .with(CheckoutField::Email, "jane@example.com")
            .with(CheckoutField::FirstName, "Jane")
            .with(CheckoutField::LastName, "Doe")
            .with(CheckoutField::Address, "1 Market St")
            .with(CheckoutField::City, "Springfield")
            .with(CheckoutField::State, "IL")
            .with(CheckoutField::ZipCode, "62701")
            .with(CheckoutField::NameOnCard, "Jane Doe")
            .with(CheckoutField::CardNumber, "4242 4242 4242 4242")
            .with(CheckoutField::ExpiryDate, "12/30")
            .with(CheckoutField::Cvv, "123")
    }

    #[test]
    fn test_complete_form_is_valid() {
        assert!(complete_form().validate().is_ok());
        assert!(complete_form().missing_fields().is_empty());
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = CheckoutForm::new().validate().unwrap_err();
        assert_eq!(errors.len(), CheckoutField::ALL.len());
        assert_eq!(errors.get(CheckoutField::Email), Some("Email is required"));
        assert_eq!(
            errors.get(CheckoutField::ZipCode),
            Some("ZIP code is required")
        );
        assert_eq!(errors.get(CheckoutField::Cvv), Some("CVV is required"));
    }

    #[test]
    fn test_required_messages() {
        let messages: Vec<String> = CheckoutField::ALL
            .iter()
            .map(|f| f.required_message())
            .collect();
        assert!(messages.iter().all(|m| m.ends_with(" is required")));
        assert_eq!(
            CheckoutField::NameOnCard.required_message(),
            "Name on card is required"
        );
    }

    #[test]
    fn test_whitespace_is_empty() {
        let error = validate_field(CheckoutField::City, "   ").unwrap();
        assert_eq!(error.field, CheckoutField::City);
        assert_eq!(error.message, "City is required");
    }

    #[test]
    fn test_email_needs_at_sign() {
        let form = complete_form().with(CheckoutField::Email, "jane.example.com");
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.get(CheckoutField::Email).is_some());
    }

    #[test]
    fn test_flat_wire_format() {
        let json = serde_json::to_value(complete_form()).unwrap();
        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["zipCode"], "62701");
        assert_eq!(json["nameOnCard"], "Jane Doe");

        let partial: CheckoutForm =
            serde_json::from_str(r#"{"email": "a@b.c", "city": "Springfield"}"#).unwrap();
        assert_eq!(partial.shipping.city, "Springfield");
        assert_eq!(partial.missing_fields().len(), 9);
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in CheckoutField::ALL {
            assert_eq!(CheckoutField::parse(field.as_str()), Some(field));
        }
        assert_eq!(CheckoutField::parse("phone"), None);
    }

    #[test]
    fn test_card_masking() {
        let form = complete_form();
        assert_eq!(form.payment.masked_card_number(), "**** 4242");
        let debug = format!("{:?}", form.payment);
        assert!(!debug.contains("4242 4242"));
        assert!(!debug.contains("123"));
    }
}
