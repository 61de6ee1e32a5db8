use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use tracing::info;

use super::{search_rows, seed, DashboardError, SearchQuery};
use crate::marketplace::money::Money;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingAddress {
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagedProperty {
    pub id: u32,
    pub name: String,
    pub host: String,
    pub address: ListingAddress,
    pub price: Money,
    pub beds: Option<u8>,
    pub is_active: bool,
    pub image: Option<String>,
    pub description: Option<String>,
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Homeowner {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub payment_info: Option<String>,
    pub joined_at: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Confirmed,
    Pending,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reservation {
    pub id: String,
    pub property_id: u32,
    pub property_name: Option<String>,
    pub homeowner: Option<String>,
    pub guest_name: String,
    pub guest_email: Option<String>,
    pub start_date: NaiveDate,
    pub duration: String,
    pub total: Money,
    pub status: ReservationStatus,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Guest {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    Read,
    Unread,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: String,
    pub from: String,
    pub to: String,
    pub property: Option<String>,
    pub date: NaiveDateTime,
    pub message: String,
    pub status: MessageStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeownerRow {
    #[serde(flatten)]
    pub homeowner: Homeowner,
    pub property_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuestRow {
    #[serde(flatten)]
    pub guest: Guest,
    pub booking_count: usize,
    pub total_spent: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminSummary {
    pub total_properties: usize,
    pub total_homeowners: usize,
    pub total_bookings: usize,
    pub total_guests: usize,
    pub total_revenue: Money,
}

/// Table a record is removed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    #[serde(alias = "properties")]
    Property,
    #[serde(alias = "homeowners")]
    Homeowner,
    #[serde(alias = "bookings")]
    Booking,
    #[serde(alias = "guests")]
    Guest,
    #[serde(alias = "messages")]
    Message,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Property => "property",
            RecordKind::Homeowner => "homeowner",
            RecordKind::Booking => "booking",
            RecordKind::Guest => "guest",
            RecordKind::Message => "message",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct AdminTables {
    pub properties: Vec<ManagedProperty>,
    pub homeowners: Vec<Homeowner>,
    pub bookings: Vec<Reservation>,
    pub guests: Vec<Guest>,
    pub messages: Vec<Message>,
    pub next_reply: u64,
}

/// Platform-wide administration over the mock back office.
pub struct AdminDesk {
    tables: Mutex<AdminTables>,
}

impl Default for AdminDesk {
    fn default() -> Self {
        Self::seeded()
    }
}

fn remove_where<T>(rows: &mut Vec<T>, keep: impl Fn(&T) -> bool) -> bool {
    let before = rows.len();
    rows.retain(keep);
    rows.len() != before
}

impl AdminDesk {
    pub fn seeded() -> Self {
        Self::from_tables(seed::admin_tables())
    }

    pub(crate) fn from_tables(tables: AdminTables) -> Self {
        Self {
            tables: Mutex::new(tables),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, AdminTables>, DashboardError> {
        self.tables.lock().map_err(|_| DashboardError::Unavailable)
    }

    pub fn summary(&self) -> Result<AdminSummary, DashboardError> {
        let tables = self.lock()?;
        Ok(AdminSummary {
            total_properties: tables.properties.len(),
            total_homeowners: tables.homeowners.len(),
            total_bookings: tables.bookings.len(),
            total_guests: tables.guests.len(),
            total_revenue: tables.bookings.iter().map(|booking| booking.total).sum(),
        })
    }

    pub fn properties(&self, query: &SearchQuery) -> Result<Vec<ManagedProperty>, DashboardError> {
        let tables = self.lock()?;
        Ok(search_rows(&tables.properties, query, |property| {
            vec![
                property.name.clone(),
                property.host.clone(),
                property.address.city.clone(),
                property.price.search_digits(),
            ]
        }))
    }

    /// Homeowners with the number of listings they host.
    pub fn homeowners(&self, query: &SearchQuery) -> Result<Vec<HomeownerRow>, DashboardError> {
        let tables = self.lock()?;
        let matches = search_rows(&tables.homeowners, query, |owner| {
            vec![
                owner.name.clone(),
                owner.email.clone(),
                owner.phone.clone().unwrap_or_default(),
            ]
        });
        Ok(matches
            .into_iter()
            .map(|homeowner| HomeownerRow {
                property_count: tables
                    .properties
                    .iter()
                    .filter(|property| property.host == homeowner.name)
                    .count(),
                homeowner,
            })
            .collect())
    }

    pub fn bookings(&self, query: &SearchQuery) -> Result<Vec<Reservation>, DashboardError> {
        let tables = self.lock()?;
        Ok(search_rows(&tables.bookings, query, |booking| {
            vec![
                booking.id.clone(),
                booking.property_name.clone().unwrap_or_default(),
                booking.guest_name.clone(),
                booking.homeowner.clone().unwrap_or_default(),
            ]
        }))
    }

    /// Guests with their booking count and spend, matched by guest name.
    pub fn guests(&self, query: &SearchQuery) -> Result<Vec<GuestRow>, DashboardError> {
        let tables = self.lock()?;
        let matches = search_rows(&tables.guests, query, |guest| {
            vec![
                guest.name.clone(),
                guest.email.clone(),
                guest.phone.clone().unwrap_or_default(),
            ]
        });
        Ok(matches
            .into_iter()
            .map(|guest| {
                let own: Vec<&Reservation> = tables
                    .bookings
                    .iter()
                    .filter(|booking| booking.guest_name == guest.name)
                    .collect();
                GuestRow {
                    booking_count: own.len(),
                    total_spent: own.iter().map(|booking| booking.total).sum(),
                    guest,
                }
            })
            .collect())
    }

    pub fn messages(&self, query: &SearchQuery) -> Result<Vec<Message>, DashboardError> {
        let tables = self.lock()?;
        Ok(search_rows(&tables.messages, query, |message| {
            vec![
                message.from.clone(),
                message.to.clone(),
                message.property.clone().unwrap_or_default(),
                message.message.clone(),
            ]
        }))
    }

    pub fn delete(&self, kind: RecordKind, id: &str) -> Result<(), DashboardError> {
        let mut tables = self.lock()?;
        let id = id.trim();
        let removed = match kind {
            RecordKind::Property => {
                remove_where(&mut tables.properties, |row| row.id.to_string() != id)
            }
            RecordKind::Homeowner => {
                remove_where(&mut tables.homeowners, |row| row.id.to_string() != id)
            }
            RecordKind::Booking => remove_where(&mut tables.bookings, |row| row.id != id),
            RecordKind::Guest => remove_where(&mut tables.guests, |row| row.id.to_string() != id),
            RecordKind::Message => remove_where(&mut tables.messages, |row| row.id != id),
        };

        if removed {
            info!(kind = kind.as_str(), id, "admin record deleted");
            Ok(())
        } else {
            Err(DashboardError::NotFound {
                kind: kind.as_str(),
                id: id.to_string(),
            })
        }
    }

    /// Answers the newest message on behalf of its recipient.
    pub fn reply(&self, text: &str, now: NaiveDateTime) -> Result<Message, DashboardError> {
        let body = text.trim();
        if body.is_empty() {
            return Err(DashboardError::Invalid("Reply cannot be empty."));
        }

        let mut tables = self.lock()?;
        let latest = tables
            .messages
            .first()
            .cloned()
            .ok_or(DashboardError::Invalid("No message to reply to."))?;

        tables.next_reply += 1;
        let reply = Message {
            id: format!("r-{}", tables.next_reply),
            from: latest.to,
            to: latest.from,
            property: latest.property,
            date: now,
            message: body.to_string(),
            status: MessageStatus::Read,
        };
        tables.messages.insert(0, reply.clone());
        info!(reply_id = %reply.id, to = %reply.to, "admin reply sent");
        Ok(reply)
    }
}
