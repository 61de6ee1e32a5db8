use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use tracing::info;

use super::admin::ListingAddress;
use super::{search_rows, seed, DashboardError, SearchQuery};
use crate::marketplace::money::Money;

pub const DEFAULT_PROPERTY_NAME: &str = "New Property";
pub const DEFAULT_CARD_EXPIRY: &str = "01/30";
pub const MANUAL_PAYMENT_LABEL: &str = "Manual Payment";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerProperty {
    pub id: String,
    pub name: String,
    pub address: ListingAddress,
    pub beds: u8,
    pub price: Money,
    pub is_active: bool,
    pub image: String,
    pub host: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnerBookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Paid,
}

impl OwnerBookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OwnerBookingStatus::Pending => "pending",
            OwnerBookingStatus::Confirmed => "confirmed",
            OwnerBookingStatus::Cancelled => "cancelled",
            OwnerBookingStatus::Paid => "paid",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerBooking {
    pub id: String,
    /// `None` for manual payment records.
    pub property_id: Option<String>,
    pub property_name: String,
    pub guest_name: String,
    pub guest_email: Option<String>,
    pub duration: String,
    pub start_date: NaiveDate,
    pub amount: Money,
    pub status: OwnerBookingStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentMethod {
    pub id: String,
    pub brand: String,
    pub last4: String,
    pub exp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpResource {
    pub id: String,
    pub title: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SupportTicket {
    pub id: String,
    pub message: String,
    pub opened_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeownerSummary {
    pub total_properties: usize,
    pub total_bookings: usize,
    pub total_revenue: Money,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProperty {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<ListingAddress>,
    #[serde(default)]
    pub beds: Option<u8>,
    #[serde(default)]
    pub price: Option<Money>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Partial edit; absent fields are left as they are.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<ListingAddress>,
    #[serde(default)]
    pub beds: Option<u8>,
    #[serde(default)]
    pub price: Option<Money>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingAction {
    Confirm,
    Cancel,
}

impl BookingAction {
    fn resulting_status(self) -> OwnerBookingStatus {
        match self {
            BookingAction::Confirm => OwnerBookingStatus::Confirmed,
            BookingAction::Cancel => OwnerBookingStatus::Cancelled,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPaymentMethod {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub last4: String,
    #[serde(default)]
    pub exp: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManualPayment {
    #[serde(default)]
    pub amount: Money,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub method_id: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PasswordChange {
    #[serde(default)]
    pub current: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm: String,
}

#[derive(Debug, Clone)]
pub(crate) struct HomeownerTables {
    pub profile: OwnerProfile,
    pub properties: Vec<OwnerProperty>,
    pub bookings: Vec<OwnerBooking>,
    pub payment_methods: Vec<PaymentMethod>,
    pub help: Vec<HelpResource>,
    pub tickets: Vec<SupportTicket>,
    pub next_property: u64,
    pub next_payment_method: u64,
    pub next_payment: u64,
    pub next_ticket: u64,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// A single homeowner's listings, bookings, payouts, and account settings.
pub struct HomeownerDesk {
    tables: Mutex<HomeownerTables>,
}

impl Default for HomeownerDesk {
    fn default() -> Self {
        Self::seeded()
    }
}

impl HomeownerDesk {
    pub fn seeded() -> Self {
        Self {
            tables: Mutex::new(seed::homeowner_tables()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HomeownerTables>, DashboardError> {
        self.tables.lock().map_err(|_| DashboardError::Unavailable)
    }

    pub fn summary(&self) -> Result<HomeownerSummary, DashboardError> {
        let tables = self.lock()?;
        Ok(HomeownerSummary {
            total_properties: tables.properties.len(),
            total_bookings: tables.bookings.len(),
            total_revenue: tables.bookings.iter().map(|booking| booking.amount).sum(),
        })
    }

    pub fn properties(&self, query: &SearchQuery) -> Result<Vec<OwnerProperty>, DashboardError> {
        let tables = self.lock()?;
        Ok(search_rows(&tables.properties, query, |property| {
            vec![
                property.name.clone(),
                property.address.city.clone(),
                property.price.search_digits(),
            ]
        }))
    }

    pub fn bookings(&self, query: &SearchQuery) -> Result<Vec<OwnerBooking>, DashboardError> {
        let tables = self.lock()?;
        Ok(search_rows(&tables.bookings, query, |booking| {
            vec![
                booking.property_name.clone(),
                booking.guest_name.clone(),
                booking.id.clone(),
                booking.status.as_str().to_string(),
            ]
        }))
    }

    pub fn payment_methods(
        &self,
        query: &SearchQuery,
    ) -> Result<Vec<PaymentMethod>, DashboardError> {
        let tables = self.lock()?;
        Ok(search_rows(&tables.payment_methods, query, |method| {
            vec![method.brand.clone(), method.last4.clone()]
        }))
    }

    /// Adds a listing hosted by the profile owner, shown first.
    pub fn add_property(&self, draft: NewProperty) -> Result<OwnerProperty, DashboardError> {
        let mut tables = self.lock()?;
        tables.next_property += 1;
        let property = OwnerProperty {
            id: format!("p-{}", tables.next_property),
            name: non_blank(draft.name).unwrap_or_else(|| DEFAULT_PROPERTY_NAME.to_string()),
            address: draft.address.unwrap_or(ListingAddress {
                city: String::new(),
                state: Some(String::new()),
                country: None,
            }),
            beds: draft.beds.filter(|beds| *beds > 0).unwrap_or(1),
            price: draft.price.unwrap_or(Money::ZERO),
            is_active: true,
            image: draft.image.unwrap_or_default(),
            host: tables.profile.name.clone(),
        };
        tables.properties.insert(0, property.clone());
        info!(property_id = %property.id, "homeowner property added");
        Ok(property)
    }

    pub fn edit_property(
        &self,
        id: &str,
        update: PropertyUpdate,
    ) -> Result<OwnerProperty, DashboardError> {
        let mut tables = self.lock()?;
        let property = tables
            .properties
            .iter_mut()
            .find(|property| property.id == id)
            .ok_or_else(|| DashboardError::NotFound {
                kind: "property",
                id: id.to_string(),
            })?;

        if let Some(name) = update.name {
            property.name = name;
        }
        if let Some(address) = update.address {
            property.address = address;
        }
        if let Some(beds) = update.beds {
            property.beds = beds;
        }
        if let Some(price) = update.price {
            property.price = price;
        }
        if let Some(is_active) = update.is_active {
            property.is_active = is_active;
        }
        if let Some(image) = update.image {
            property.image = image;
        }
        Ok(property.clone())
    }

    /// Removes a listing together with every booking made against it.
    pub fn delete_property(&self, id: &str) -> Result<usize, DashboardError> {
        let mut tables = self.lock()?;
        let before = tables.properties.len();
        tables.properties.retain(|property| property.id != id);
        if tables.properties.len() == before {
            return Err(DashboardError::NotFound {
                kind: "property",
                id: id.to_string(),
            });
        }

        let bookings_before = tables.bookings.len();
        tables
            .bookings
            .retain(|booking| booking.property_id.as_deref() != Some(id));
        let dropped = bookings_before - tables.bookings.len();
        info!(property_id = id, dropped_bookings = dropped, "homeowner property deleted");
        Ok(dropped)
    }

    pub fn apply_booking_action(
        &self,
        id: &str,
        action: BookingAction,
    ) -> Result<OwnerBooking, DashboardError> {
        let mut tables = self.lock()?;
        let booking = tables
            .bookings
            .iter_mut()
            .find(|booking| booking.id == id)
            .ok_or_else(|| DashboardError::NotFound {
                kind: "booking",
                id: id.to_string(),
            })?;
        booking.status = action.resulting_status();
        info!(booking_id = id, status = booking.status.as_str(), "booking updated");
        Ok(booking.clone())
    }

    pub fn add_payment_method(
        &self,
        method: NewPaymentMethod,
    ) -> Result<PaymentMethod, DashboardError> {
        let brand = method.brand.trim();
        let last4 = method.last4.trim();
        if brand.is_empty() || last4.is_empty() {
            return Err(DashboardError::Invalid("Provide brand and last4"));
        }

        let mut tables = self.lock()?;
        tables.next_payment_method += 1;
        let added = PaymentMethod {
            id: format!("pm-{}", tables.next_payment_method),
            brand: brand.to_string(),
            last4: last4.to_string(),
            exp: non_blank(method.exp).unwrap_or_else(|| DEFAULT_CARD_EXPIRY.to_string()),
        };
        tables.payment_methods.insert(0, added.clone());
        Ok(added)
    }

    pub fn remove_payment_method(&self, id: &str) -> Result<(), DashboardError> {
        let mut tables = self.lock()?;
        let before = tables.payment_methods.len();
        tables.payment_methods.retain(|method| method.id != id);
        if tables.payment_methods.len() == before {
            return Err(DashboardError::NotFound {
                kind: "payment method",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Logs an off-platform payment as a paid pseudo-booking in the owner's name.
    pub fn record_manual_payment(
        &self,
        payment: ManualPayment,
        today: NaiveDate,
    ) -> Result<OwnerBooking, DashboardError> {
        if payment.amount.is_zero() {
            return Err(DashboardError::Invalid("Enter amount"));
        }

        let mut tables = self.lock()?;
        tables.next_payment += 1;
        let record = OwnerBooking {
            id: format!("pay-{}", tables.next_payment),
            property_id: None,
            property_name: MANUAL_PAYMENT_LABEL.to_string(),
            guest_name: tables.profile.name.clone(),
            guest_email: None,
            duration: "-".to_string(),
            start_date: payment.date.unwrap_or(today),
            amount: payment.amount,
            status: OwnerBookingStatus::Paid,
        };
        tables.bookings.insert(0, record.clone());
        info!(
            payment_id = %record.id,
            amount = %record.amount,
            method = payment.method_id.as_deref().unwrap_or("unspecified"),
            note = payment.note.as_deref().unwrap_or(""),
            "manual payment recorded"
        );
        Ok(record)
    }

    pub fn profile(&self) -> Result<OwnerProfile, DashboardError> {
        Ok(self.lock()?.profile.clone())
    }

    pub fn update_profile(&self, update: ProfileUpdate) -> Result<OwnerProfile, DashboardError> {
        let mut tables = self.lock()?;
        if let Some(name) = update.name {
            tables.profile.name = name;
        }
        if let Some(email) = update.email {
            tables.profile.email = email;
        }
        if let Some(phone) = update.phone {
            tables.profile.phone = phone;
        }
        Ok(tables.profile.clone())
    }

    /// Mock password change; only the confirmation is checked.
    pub fn change_password(&self, change: &PasswordChange) -> Result<(), DashboardError> {
        if change.password.is_empty() {
            return Err(DashboardError::Invalid("Password cannot be empty"));
        }
        if change.password != change.confirm {
            return Err(DashboardError::Invalid("Passwords do not match"));
        }
        info!(
            current_provided = !change.current.is_empty(),
            "homeowner password changed"
        );
        Ok(())
    }

    pub fn open_ticket(
        &self,
        message: &str,
        opened_at: DateTime<Utc>,
    ) -> Result<SupportTicket, DashboardError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(DashboardError::Invalid("Message cannot be empty"));
        }

        let mut tables = self.lock()?;
        tables.next_ticket += 1;
        let ticket = SupportTicket {
            id: format!("t-{}", tables.next_ticket),
            message: message.to_string(),
            opened_at,
        };
        tables.tickets.insert(0, ticket.clone());
        info!(ticket_id = %ticket.id, "support ticket opened");
        Ok(ticket)
    }

    pub fn tickets(&self) -> Result<Vec<SupportTicket>, DashboardError> {
        Ok(self.lock()?.tickets.clone())
    }

    pub fn help_resources(&self) -> Result<Vec<HelpResource>, DashboardError> {
        Ok(self.lock()?.help.clone())
    }
}
