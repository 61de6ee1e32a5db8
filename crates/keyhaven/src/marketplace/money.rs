use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

const MINOR_PER_MAJOR: u64 = 100;

/// Cedi amount held in pesewas so fee arithmetic never drifts.
///
/// On the wire an amount is a plain JSON number in cedis (`3360` or `168.5`), which is what the
/// booking widgets and dashboards exchange.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
    minor: u64,
}

impl Money {
    pub const ZERO: Money = Money { minor: 0 };

    pub const fn from_major(cedis: u64) -> Self {
        Self {
            minor: cedis * MINOR_PER_MAJOR,
        }
    }

    pub const fn from_minor(pesewas: u64) -> Self {
        Self { minor: pesewas }
    }

    /// Rounds to the nearest pesewa. Negative or non-finite input yields `None`.
    pub fn from_major_f64(cedis: f64) -> Option<Self> {
        if !cedis.is_finite() || cedis < 0.0 {
            return None;
        }
        let minor = (cedis * MINOR_PER_MAJOR as f64).round();
        if minor > u64::MAX as f64 {
            return None;
        }
        Some(Self {
            minor: minor as u64,
        })
    }

    pub const fn minor(self) -> u64 {
        self.minor
    }

    pub fn as_major_f64(self) -> f64 {
        self.minor as f64 / MINOR_PER_MAJOR as f64
    }

    pub const fn is_zero(self) -> bool {
        self.minor == 0
    }

    pub fn times(self, factor: u64) -> Self {
        Self {
            minor: self.minor.saturating_mul(factor),
        }
    }

    /// `percent` of this amount, rounded half-up to the pesewa.
    pub fn percent(self, percent: f64) -> Self {
        if !percent.is_finite() || percent <= 0.0 {
            return Self::ZERO;
        }
        let scaled = (self.minor as f64 * percent / 100.0).round();
        Self {
            minor: scaled.min(u64::MAX as f64) as u64,
        }
    }

    /// Whole-cedi digits as typed into a search box (`3200` for 3,200.00).
    pub fn search_digits(self) -> String {
        let whole = self.minor / MINOR_PER_MAJOR;
        let fraction = self.minor % MINOR_PER_MAJOR;
        if fraction == 0 {
            whole.to_string()
        } else {
            format!("{whole}.{fraction:02}")
        }
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money {
            minor: self.minor.saturating_add(rhs.minor),
        }
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.minor / MINOR_PER_MAJOR;
        let fraction = self.minor % MINOR_PER_MAJOR;

        let digits = whole.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (index, ch) in digits.chars().enumerate() {
            if index > 0 && (digits.len() - index) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        if fraction == 0 {
            write!(f, "Ghc {grouped}")
        } else {
            write!(f, "Ghc {grouped}.{fraction:02}")
        }
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.minor % MINOR_PER_MAJOR == 0 {
            serializer.serialize_u64(self.minor / MINOR_PER_MAJOR)
        } else {
            serializer.serialize_f64(self.as_major_f64())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let cedis = f64::deserialize(deserializer)?;
        Money::from_major_f64(cedis).ok_or_else(|| {
            serde::de::Error::custom(format!("amount must be a non-negative number, got {cedis}"))
        })
    }
}
