use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::duration::{DurationError, RawDuration};
use super::pricing::BookingQuote;
use crate::config::PaymentConfig;
use crate::marketplace::catalog::PropertyId;

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required information.";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CheckoutError {
    #[error("Please fill in all required information.")]
    MissingFields { fields: Vec<&'static str> },
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error(transparent)]
    Duration(#[from] DurationError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    #[error("payment gateway is not configured: {0}")]
    NotConfigured(&'static str),
    #[error("payment gateway rejected the order: {0}")]
    Rejected(String),
}

/// Booking form as posted by the checkout page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub property_id: PropertyId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub duration: Option<RawDuration>,
}

/// Renter details that survived validation, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl ContactDetails {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl BookingRequest {
    pub fn validate(&self) -> Result<(ContactDetails, RawDuration), CheckoutError> {
        let fields = [
            ("first_name", self.first_name.trim()),
            ("last_name", self.last_name.trim()),
            ("email", self.email.trim()),
            ("phone", self.phone.trim()),
        ];
        let mut missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| *name)
            .collect();

        let duration = match &self.duration {
            Some(raw) if !raw.is_blank() => Some(raw.clone()),
            _ => {
                missing.push("duration");
                None
            }
        };

        let Some(duration) = duration.filter(|_| missing.is_empty()) else {
            return Err(CheckoutError::MissingFields { fields: missing });
        };

        let email = self.email.trim();
        if !email.contains('@') {
            return Err(CheckoutError::InvalidEmail(email.to_string()));
        }

        Ok((
            ContactDetails {
                first_name: self.first_name.trim().to_string(),
                last_name: self.last_name.trim().to_string(),
                email: email.to_string(),
                phone: self.phone.trim().to_string(),
            },
            duration,
        ))
    }
}

/// Everything a gateway needs to open a payment for one booking.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutOrder {
    pub quote: BookingQuote,
    pub contact: ContactDetails,
    pub placed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomField {
    pub display_name: String,
    pub variable_name: String,
    pub value: String,
}

impl CustomField {
    fn new(display_name: &str, variable_name: &str, value: impl Into<String>) -> Self {
        Self {
            display_name: display_name.to_string(),
            variable_name: variable_name.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutMetadata {
    pub custom_fields: Vec<CustomField>,
}

/// Setup payload handed to the client-side payment widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutSession {
    pub provider: &'static str,
    pub key: String,
    pub email: String,
    /// Minor units (pesewas).
    pub amount: u64,
    pub currency: String,
    #[serde(rename = "ref")]
    pub reference: String,
    pub metadata: CheckoutMetadata,
}

pub trait PaymentGateway: Send + Sync {
    fn begin_checkout(&self, order: &CheckoutOrder) -> Result<CheckoutSession, PaymentError>;
}

/// Paystack inline popup. The browser completes the charge; nothing settles here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaystackInline {
    public_key: Option<String>,
    currency: String,
}

impl PaystackInline {
    pub fn new(public_key: Option<String>, currency: impl Into<String>) -> Self {
        Self {
            public_key: public_key.filter(|key| !key.trim().is_empty()),
            currency: currency.into(),
        }
    }

    pub fn from_config(config: &PaymentConfig) -> Self {
        Self::new(config.public_key.clone(), config.currency.clone())
    }

    pub fn is_configured(&self) -> bool {
        self.public_key.is_some()
    }
}

pub fn booking_reference(placed_at: DateTime<Utc>) -> String {
    format!("BOOK-{}", placed_at.timestamp_millis())
}

impl PaymentGateway for PaystackInline {
    fn begin_checkout(&self, order: &CheckoutOrder) -> Result<CheckoutSession, PaymentError> {
        let key = self
            .public_key
            .clone()
            .ok_or(PaymentError::NotConfigured("APP_PAYSTACK_PUBLIC_KEY is not set"))?;

        let amount = order.quote.total.minor();
        if amount == 0 {
            return Err(PaymentError::Rejected("order total is zero".to_string()));
        }

        let contact = &order.contact;
        let custom_fields = vec![
            CustomField::new("First Name", "first_name", contact.first_name.as_str()),
            CustomField::new("Last Name", "last_name", contact.last_name.as_str()),
            CustomField::new("Phone", "phone", contact.phone.as_str()),
            CustomField::new(
                "Duration",
                "duration",
                order.quote.duration.years().to_string(),
            ),
            CustomField::new(
                "Property",
                "property_id",
                order.quote.property_id.to_string(),
            ),
        ];

        Ok(CheckoutSession {
            provider: "paystack",
            key,
            email: contact.email.clone(),
            amount,
            currency: self.currency.clone(),
            reference: booking_reference(order.placed_at),
            metadata: CheckoutMetadata { custom_fields },
        })
    }
}

/// Quote plus the widget payload, returned to the checkout page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub quote: BookingQuote,
    pub contact: ContactDetails,
    pub checkout: CheckoutSession,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marketplace::booking::pricing::FeeSchedule;
    use crate::marketplace::booking::LeaseDuration;
    use crate::marketplace::catalog::Catalog;
    use chrono::{NaiveDate, TimeZone};

    fn request() -> BookingRequest {
        BookingRequest {
            property_id: PropertyId(1),
            first_name: " Ama ".to_string(),
            last_name: "Mensah".to_string(),
            email: "ama@example.com".to_string(),
            phone: "+233 24 000 0000".to_string(),
            duration: Some(RawDuration::Text("2".to_string())),
        }
    }

    fn order() -> CheckoutOrder {
        let catalog = Catalog::sample();
        let property = catalog.get(PropertyId(1)).expect("sample property");
        let quote = FeeSchedule::default().quote(
            property,
            LeaseDuration::new(2).expect("valid duration"),
            NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid date"),
        );
        let (contact, _) = request().validate().expect("valid request");
        CheckoutOrder {
            quote,
            contact,
            placed_at: Utc
                .timestamp_millis_opt(1_735_689_600_123)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[test]
    fn validation_trims_contact_details() {
        let (contact, duration) = request().validate().expect("valid request");
        assert_eq!(contact.first_name, "Ama");
        assert_eq!(contact.full_name(), "Ama Mensah");
        assert_eq!(duration, RawDuration::Text("2".to_string()));
    }

    #[test]
    fn blank_fields_are_reported_together() {
        let mut incomplete = request();
        incomplete.phone = "   ".to_string();
        incomplete.duration = None;

        let error = incomplete.validate().expect_err("incomplete form");
        assert_eq!(
            error,
            CheckoutError::MissingFields {
                fields: vec!["phone", "duration"]
            }
        );
        assert_eq!(error.to_string(), MISSING_FIELDS_MESSAGE);
    }

    #[test]
    fn email_without_at_sign_is_rejected() {
        let mut invalid = request();
        invalid.email = "ama.example.com".to_string();

        assert!(matches!(
            invalid.validate(),
            Err(CheckoutError::InvalidEmail(_))
        ));
    }

    #[test]
    fn paystack_payload_uses_minor_units_and_custom_fields() {
        let gateway = PaystackInline::new(Some("pk_test_123".to_string()), "GHS");
        let session = gateway.begin_checkout(&order()).expect("session");

        // 6,400 + 5% + 50 walking fee
        assert_eq!(session.amount, 677_000);
        assert_eq!(session.currency, "GHS");
        assert_eq!(session.key, "pk_test_123");
        assert_eq!(session.reference, "BOOK-1735689600123");

        let labels: Vec<_> = session
            .metadata
            .custom_fields
            .iter()
            .map(|field| {
                (
                    field.display_name.as_str(),
                    field.variable_name.as_str(),
                    field.value.as_str(),
                )
            })
            .collect();
        assert_eq!(
            labels,
            vec![
                ("First Name", "first_name", "Ama"),
                ("Last Name", "last_name", "Mensah"),
                ("Phone", "phone", "+233 24 000 0000"),
                ("Duration", "duration", "2"),
                ("Property", "property_id", "1"),
            ]
        );
    }

    #[test]
    fn missing_public_key_is_a_configuration_fault() {
        let gateway = PaystackInline::new(Some("  ".to_string()), "GHS");
        assert!(!gateway.is_configured());
        assert!(matches!(
            gateway.begin_checkout(&order()),
            Err(PaymentError::NotConfigured(_))
        ));
    }

    #[test]
    fn serialized_session_names_reference_field_ref() {
        let gateway = PaystackInline::new(Some("pk_test_123".to_string()), "GHS");
        let session = gateway.begin_checkout(&order()).expect("session");
        let value = serde_json::to_value(&session).expect("serialize");

        assert_eq!(value["ref"], "BOOK-1735689600123");
        assert_eq!(value["metadata"]["custom_fields"][0]["variable_name"], "first_name");
    }
}
