use chrono::NaiveDate;
use serde::Serialize;

use super::duration::{acceptable_durations, LeaseDuration};
use crate::config::PaymentConfig;
use crate::marketplace::catalog::{Property, PropertyId};
use crate::marketplace::money::Money;

pub const DEFAULT_AGENT_FEE_PERCENT: f64 = 5.0;
pub const DEFAULT_WALKING_FEE: Money = Money::from_major(50);

/// Fees charged when a listing does not carry its own.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeSchedule {
    pub default_agent_fee_percent: f64,
    pub default_walking_fee: Money,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            default_agent_fee_percent: DEFAULT_AGENT_FEE_PERCENT,
            default_walking_fee: DEFAULT_WALKING_FEE,
        }
    }
}

impl From<&PaymentConfig> for FeeSchedule {
    fn from(config: &PaymentConfig) -> Self {
        Self {
            default_agent_fee_percent: config.default_agent_fee_percent,
            default_walking_fee: Money::from_major(u64::from(config.default_walking_fee)),
        }
    }
}

/// Order summary figures for one property and lease length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingQuote {
    pub property_id: PropertyId,
    pub property_name: String,
    pub property_image: String,
    /// Yearly price.
    pub price: Money,
    pub duration: LeaseDuration,
    pub total_property_price: Money,
    pub agent_fee_percentage: f64,
    pub agent_fee: Money,
    pub walking_fee: Money,
    pub subtotal: Money,
    pub total: Money,
    pub start_date: NaiveDate,
    pub acceptable_durations: Vec<u8>,
}

impl FeeSchedule {
    /// A zero percentage on the listing means it was never filled in.
    pub fn agent_fee_percent_for(&self, property: &Property) -> f64 {
        property
            .agent_fee_percentage
            .filter(|percent| percent.is_finite() && *percent > 0.0)
            .unwrap_or(self.default_agent_fee_percent)
    }

    pub fn walking_fee_for(&self, property: &Property) -> Money {
        property
            .walking_fee
            .filter(|fee| !fee.is_zero())
            .unwrap_or(self.default_walking_fee)
    }

    /// The agent fee scales with the whole lease; the walking fee is charged once.
    pub fn quote(
        &self,
        property: &Property,
        duration: LeaseDuration,
        start_date: NaiveDate,
    ) -> BookingQuote {
        let price = property.price;
        let agent_fee_percentage = self.agent_fee_percent_for(property);
        let walking_fee = self.walking_fee_for(property);

        let total_property_price = price.times(u64::from(duration.years()));
        let agent_fee = total_property_price.percent(agent_fee_percentage);
        let subtotal = total_property_price;
        let total = subtotal + agent_fee + walking_fee;

        BookingQuote {
            property_id: property.id,
            property_name: property.name.clone(),
            property_image: property.primary_image().to_string(),
            price,
            duration,
            total_property_price,
            agent_fee_percentage,
            agent_fee,
            walking_fee,
            subtotal,
            total,
            start_date,
            acceptable_durations: acceptable_durations(property),
        }
    }
}
