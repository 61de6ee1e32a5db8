use serde::{Deserialize, Serialize};
use std::fmt;

use crate::marketplace::catalog::Property;

pub const MIN_LEASE_YEARS: u8 = 1;
pub const MAX_LEASE_YEARS: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DurationError {
    #[error("lease length must be between {MIN_LEASE_YEARS} and {MAX_LEASE_YEARS} years, got {0}")]
    OutOfRange(i64),
    #[error("a {years} year lease is not offered for this property (available: {accepted:?})")]
    NotAccepted { years: u8, accepted: Vec<u8> },
}

/// Whole years of lease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LeaseDuration(u8);

impl LeaseDuration {
    pub const ONE_YEAR: LeaseDuration = LeaseDuration(1);

    pub fn new(years: u8) -> Result<Self, DurationError> {
        if (MIN_LEASE_YEARS..=MAX_LEASE_YEARS).contains(&years) {
            Ok(Self(years))
        } else {
            Err(DurationError::OutOfRange(i64::from(years)))
        }
    }

    pub const fn years(self) -> u8 {
        self.0
    }

    pub fn label(self) -> String {
        if self.0 == 1 {
            "1 Year".to_string()
        } else {
            format!("{} Years", self.0)
        }
    }
}

impl fmt::Display for LeaseDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl TryFrom<u8> for LeaseDuration {
    type Error = DurationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LeaseDuration> for u8 {
    fn from(value: LeaseDuration) -> Self {
        value.0
    }
}

/// Duration as typed into the booking form: a select value string or a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDuration {
    Years(i64),
    Text(String),
}

impl RawDuration {
    /// Reads the leading integer of the input ("2 years" is two years, "2.5" is two). Text
    /// without one, and zero, count as a one year lease; other integers outside the offered
    /// range are rejected.
    pub fn resolve(&self) -> Result<LeaseDuration, DurationError> {
        let years = match self {
            RawDuration::Years(years) => Some(*years),
            RawDuration::Text(text) => leading_integer(text),
        };

        match years {
            None | Some(0) => Ok(LeaseDuration::ONE_YEAR),
            Some(years) => u8::try_from(years)
                .ok()
                .and_then(|years| LeaseDuration::new(years).ok())
                .ok_or(DurationError::OutOfRange(years)),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, RawDuration::Text(text) if text.trim().is_empty())
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits = rest
        .find(|c: char| !c.is_ascii_digit())
        .map_or(rest, |end| &rest[..end]);
    let value = digits.parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

impl From<u8> for RawDuration {
    fn from(years: u8) -> Self {
        RawDuration::Years(i64::from(years))
    }
}

/// One entry of the lease-length dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationOption {
    pub value: u8,
    pub label: String,
}

/// Lease lengths a property offers; listings without any offer a single year.
pub fn acceptable_durations(property: &Property) -> Vec<u8> {
    if property.acceptable_durations.is_empty() {
        vec![MIN_LEASE_YEARS]
    } else {
        property.acceptable_durations.clone()
    }
}

pub fn duration_options(property: &Property) -> Vec<DurationOption> {
    let accepted = acceptable_durations(property);
    (MIN_LEASE_YEARS..=MAX_LEASE_YEARS)
        .filter(|years| accepted.contains(years))
        .map(|years| {
            let duration = LeaseDuration(years);
            DurationOption {
                value: years,
                label: duration.label(),
            }
        })
        .collect()
}

/// First selectable option, or one year when nothing is selectable.
pub fn default_duration(property: &Property) -> LeaseDuration {
    duration_options(property)
        .first()
        .map(|option| LeaseDuration(option.value))
        .unwrap_or(LeaseDuration::ONE_YEAR)
}

pub fn ensure_accepted(property: &Property, duration: LeaseDuration) -> Result<(), DurationError> {
    let accepted = acceptable_durations(property);
    if accepted.contains(&duration.years()) {
        Ok(())
    } else {
        Err(DurationError::NotAccepted {
            years: duration.years(),
            accepted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marketplace::catalog::{Catalog, PropertyId};

    fn property(id: u32) -> Property {
        Catalog::sample()
            .get(PropertyId(id))
            .cloned()
            .expect("sample property")
    }

    #[test]
    fn options_follow_acceptable_durations() {
        let options = duration_options(&property(6));
        let labels: Vec<&str> = options.iter().map(|option| option.label.as_str()).collect();
        assert_eq!(labels, vec!["2 Years", "3 Years", "5 Years"]);
        assert_eq!(default_duration(&property(6)).years(), 2);
    }

    #[test]
    fn property_without_durations_offers_one_year() {
        let mut listing = property(1);
        listing.acceptable_durations.clear();

        assert_eq!(acceptable_durations(&listing), vec![1]);
        assert_eq!(
            duration_options(&listing),
            vec![DurationOption {
                value: 1,
                label: "1 Year".to_string()
            }]
        );
    }

    #[test]
    fn unparseable_text_falls_back_to_one_year() {
        let raw = RawDuration::Text("forever".to_string());
        assert_eq!(raw.resolve(), Ok(LeaseDuration::ONE_YEAR));
        assert_eq!(
            RawDuration::Text(" 3 ".to_string()).resolve().map(LeaseDuration::years),
            Ok(3)
        );
    }

    #[test]
    fn leading_integer_decides_the_lease_length() {
        let years = |text: &str| {
            RawDuration::Text(text.to_string())
                .resolve()
                .map(LeaseDuration::years)
        };
        assert_eq!(years("2 years"), Ok(2));
        assert_eq!(years("2.5"), Ok(2));
        assert_eq!(years("0"), Ok(1));
        assert_eq!(years("years: 3"), Ok(1));
        assert_eq!(RawDuration::Years(0).resolve(), Ok(LeaseDuration::ONE_YEAR));
    }

    #[test]
    fn integers_outside_range_are_rejected() {
        assert_eq!(
            RawDuration::Years(7).resolve(),
            Err(DurationError::OutOfRange(7))
        );
        assert_eq!(
            RawDuration::Text("-2".to_string()).resolve(),
            Err(DurationError::OutOfRange(-2))
        );
    }

    #[test]
    fn ensure_accepted_lists_the_offer() {
        let listing = property(2);
        let err = ensure_accepted(&listing, LeaseDuration::new(4).expect("valid"))
            .expect_err("4 years not offered");
        assert_eq!(
            err,
            DurationError::NotAccepted {
                years: 4,
                accepted: vec![1, 2]
            }
        );
    }
}
