use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::marketplace::catalog::{Property, PropertyId};
use crate::marketplace::money::Money;

pub const BOOKING_CODE_LEN: usize = 6;
pub const PROPERTY_NOT_FOUND_LABEL: &str = "Property Not Found";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingCodeError {
    #[error("Please enter a booking code")]
    Empty,
    #[error("booking code must be {BOOKING_CODE_LEN} letters or digits, got '{0}'")]
    Malformed(String),
}

/// Six character reservation code, stored upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BookingCode(String);

impl BookingCode {
    pub fn parse(input: &str) -> Result<Self, BookingCodeError> {
        let code = input.trim().to_ascii_uppercase();
        if code.is_empty() {
            return Err(BookingCodeError::Empty);
        }
        if code.len() != BOOKING_CODE_LEN || !code.chars().all(|ch| ch.is_ascii_alphanumeric()) {
            return Err(BookingCodeError::Malformed(code));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Completed,
}

impl BookingStatus {
    pub fn label(self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Pending => "Pending Approval",
            BookingStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRecord {
    pub id: BookingCode,
    pub property_id: PropertyId,
    pub booking_date: NaiveDate,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: BookingStatus,
    pub total_amount: Money,
}

impl BookingRecord {
    pub fn stay_days(&self) -> i64 {
        (self.check_out - self.check_in).num_days().max(0)
    }

    /// Stay length in years, one decimal place.
    pub fn stay_length_years(&self) -> f64 {
        let years = self.stay_days() as f64 / 365.0;
        (years * 10.0).round() / 10.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("booking ledger unavailable: {0}")]
    Unavailable(String),
}

/// Read side of the reservation store.
pub trait BookingLedger: Send + Sync {
    fn find(&self, code: &BookingCode) -> Result<Option<BookingRecord>, LedgerError>;
}

/// Status page payload for one reservation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingStatusView {
    pub booking: BookingRecord,
    pub status_label: &'static str,
    pub property: Option<Property>,
    pub property_name: String,
    pub stay_length_years: f64,
}

impl BookingStatusView {
    pub fn new(booking: BookingRecord, property: Option<Property>) -> Self {
        let property_name = property
            .as_ref()
            .map(|property| property.name.clone())
            .unwrap_or_else(|| PROPERTY_NOT_FOUND_LABEL.to_string());
        Self {
            status_label: booking.status.label(),
            stay_length_years: booking.stay_length_years(),
            property_name,
            property,
            booking,
        }
    }
}

struct SeedBooking {
    code: &'static str,
    property_id: u32,
    booked: (i32, u32, u32),
    check_in: (i32, u32, u32),
    check_out: (i32, u32, u32),
    status: BookingStatus,
    total: u64,
}

const SEED_BOOKINGS: &[SeedBooking] = &[
    SeedBooking {
        code: "ABC123",
        property_id: 1,
        booked: (2024, 1, 10),
        check_in: (2024, 2, 15),
        check_out: (2024, 2, 20),
        status: BookingStatus::Confirmed,
        total: 1_200,
    },
    SeedBooking {
        code: "XYZ789",
        property_id: 2,
        booked: (2024, 2, 1),
        check_in: (2024, 3, 10),
        check_out: (2024, 3, 17),
        status: BookingStatus::Pending,
        total: 2_800,
    },
    SeedBooking {
        code: "DEF456",
        property_id: 3,
        booked: (2023, 12, 15),
        check_in: (2024, 1, 20),
        check_out: (2024, 1, 25),
        status: BookingStatus::Completed,
        total: 1_800,
    },
    SeedBooking {
        code: "GHI789",
        property_id: 6,
        booked: (2023, 11, 20),
        check_in: (2024, 1, 5),
        check_out: (2024, 1, 12),
        status: BookingStatus::Completed,
        total: 3_500,
    },
    SeedBooking {
        code: "JKL012",
        property_id: 11,
        booked: (2024, 1, 25),
        check_in: (2024, 4, 1),
        check_out: (2024, 4, 8),
        status: BookingStatus::Confirmed,
        total: 4_200,
    },
];

fn seed_date((year, month, day): (i32, u32, u32)) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Reservations the status page knows about out of the box.
pub fn sample_bookings() -> Vec<BookingRecord> {
    SEED_BOOKINGS
        .iter()
        .filter_map(|seed| {
            Some(BookingRecord {
                id: BookingCode::parse(seed.code).ok()?,
                property_id: PropertyId(seed.property_id),
                booking_date: seed_date(seed.booked)?,
                check_in: seed_date(seed.check_in)?,
                check_out: seed_date(seed.check_out)?,
                status: seed.status,
                total_amount: Money::from_major(seed.total),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_trimmed_and_uppercased() {
        let code = BookingCode::parse("  abc123 ").expect("valid code");
        assert_eq!(code.as_str(), "ABC123");
    }

    #[test]
    fn blank_and_malformed_codes_are_rejected() {
        assert_eq!(BookingCode::parse("   "), Err(BookingCodeError::Empty));
        assert_eq!(
            BookingCode::parse("abc12"),
            Err(BookingCodeError::Malformed("ABC12".to_string()))
        );
        assert!(matches!(
            BookingCode::parse("AB-123"),
            Err(BookingCodeError::Malformed(_))
        ));
        assert!(matches!(
            BookingCode::parse("ÀBC123"),
            Err(BookingCodeError::Malformed(_))
        ));
    }

    #[test]
    fn seeded_bookings_cover_every_status() {
        let bookings = sample_bookings();
        assert_eq!(bookings.len(), 5);

        let pending = bookings
            .iter()
            .find(|booking| booking.id.as_str() == "XYZ789")
            .expect("seeded booking");
        assert_eq!(pending.status.label(), "Pending Approval");
        assert_eq!(pending.total_amount, Money::from_major(2_800));
        assert_eq!(pending.stay_days(), 7);
    }

    #[test]
    fn short_stays_round_to_a_tenth_of_a_year() {
        let mut booking = sample_bookings().remove(0);
        assert_eq!(booking.stay_length_years(), 0.0);

        booking.check_out = NaiveDate::from_ymd_opt(2025, 8, 15).expect("valid date");
        // 547 days
        assert_eq!(booking.stay_length_years(), 1.5);
    }

    #[test]
    fn missing_property_renders_placeholder_name() {
        let booking = sample_bookings().remove(0);
        let view = BookingStatusView::new(booking, None);

        assert_eq!(view.property_name, PROPERTY_NOT_FOUND_LABEL);
        assert_eq!(view.status_label, "Confirmed");
    }
}
