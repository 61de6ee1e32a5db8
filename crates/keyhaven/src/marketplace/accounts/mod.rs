//! Sign-in, sign-up, and contact form handling. Accounts are not persisted.

pub mod auth;
pub mod contact;
pub mod router;

pub use auth::{
    login, roles, signup, AuthError, AuthOutcome, LoginRequest, SignupRequest, UserType,
};
pub use contact::{
    ContactEnquiry, ContactError, ContactForm, EnquiryInbox, InMemoryInbox,
    CONTACT_ACKNOWLEDGEMENT,
};
pub use router::accounts_router;

use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Front desk for the auth screens and the contact page.
pub struct AccountService<I> {
    inbox: Arc<I>,
}

impl<I> AccountService<I>
where
    I: EnquiryInbox + 'static,
{
    pub fn new(inbox: Arc<I>) -> Self {
        Self { inbox }
    }

    pub fn login(&self, request: &LoginRequest) -> Result<AuthOutcome, AuthError> {
        let outcome = login(request)?;
        info!(user_type = %outcome.user_type, "mock login accepted");
        Ok(outcome)
    }

    pub fn signup(&self, request: &SignupRequest) -> Result<AuthOutcome, AuthError> {
        let outcome = signup(request)?;
        info!(user_type = %outcome.user_type, "mock account created");
        Ok(outcome)
    }

    pub fn submit_enquiry(&self, form: ContactForm) -> Result<ContactEnquiry, ContactError> {
        let enquiry = form.into_enquiry(Utc::now())?;
        self.inbox.store(enquiry.clone())?;
        info!(enquiry_id = %enquiry.id, subject = %enquiry.subject, "contact enquiry received");
        Ok(enquiry)
    }

    pub fn enquiries(&self) -> Result<Vec<ContactEnquiry>, ContactError> {
        self.inbox.list()
    }
}
