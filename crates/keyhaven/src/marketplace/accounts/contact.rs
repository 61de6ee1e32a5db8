use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

pub const CONTACT_ACKNOWLEDGEMENT: &str =
    "Thank you for your message! We'll get back to you soon.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactEnquiry {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub received_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("Please fill in all required information.")]
    MissingFields { fields: Vec<&'static str> },
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("enquiry inbox unavailable")]
    Inbox,
}

/// Storage for submitted contact enquiries.
pub trait EnquiryInbox: Send + Sync {
    fn store(&self, enquiry: ContactEnquiry) -> Result<(), ContactError>;
    fn list(&self) -> Result<Vec<ContactEnquiry>, ContactError>;
}

#[derive(Default, Clone)]
pub struct InMemoryInbox {
    enquiries: Arc<Mutex<Vec<ContactEnquiry>>>,
}

impl EnquiryInbox for InMemoryInbox {
    fn store(&self, enquiry: ContactEnquiry) -> Result<(), ContactError> {
        let mut guard = self.enquiries.lock().map_err(|_| ContactError::Inbox)?;
        guard.push(enquiry);
        Ok(())
    }

    fn list(&self) -> Result<Vec<ContactEnquiry>, ContactError> {
        let guard = self.enquiries.lock().map_err(|_| ContactError::Inbox)?;
        Ok(guard.clone())
    }
}

static ENQUIRY_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_enquiry_id() -> String {
    let id = ENQUIRY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("msg-{id:06}")
}

impl ContactForm {
    pub fn into_enquiry(self, received_at: DateTime<Utc>) -> Result<ContactEnquiry, ContactError> {
        let fields = [
            ("name", self.name.trim()),
            ("email", self.email.trim()),
            ("subject", self.subject.trim()),
            ("message", self.message.trim()),
        ];
        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(ContactError::MissingFields { fields: missing });
        }
        if !self.email.contains('@') {
            return Err(ContactError::InvalidEmail(self.email.trim().to_string()));
        }

        Ok(ContactEnquiry {
            id: next_enquiry_id(),
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
            received_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "Yaw".to_string(),
            email: "yaw@example.com".to_string(),
            subject: "Viewing".to_string(),
            message: " Is the Labone flat still free? ".to_string(),
        }
    }

    #[test]
    fn enquiries_are_trimmed_and_stored() {
        let inbox = InMemoryInbox::default();
        let enquiry = form().into_enquiry(Utc::now()).expect("valid form");
        assert!(enquiry.id.starts_with("msg-"));
        assert_eq!(enquiry.message, "Is the Labone flat still free?");

        inbox.store(enquiry).expect("stored");
        assert_eq!(inbox.list().expect("listed").len(), 1);
    }

    #[test]
    fn every_field_is_required() {
        let mut incomplete = form();
        incomplete.subject = " ".to_string();

        match incomplete.into_enquiry(Utc::now()) {
            Err(ContactError::MissingFields { fields }) => assert_eq!(fields, vec!["subject"]),
            other => panic!("expected missing subject, got {other:?}"),
        }
    }
}
