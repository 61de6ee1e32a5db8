use serde::{Deserialize, Serialize};
use std::fmt;

use crate::marketplace::money::Money;

/// Listing identifier. Higher ids are newer listings.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PropertyId(pub u32);

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub state: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub user: String,
    pub comment: String,
    pub rating: f32,
}

/// A rentable listing. `price` is per year of lease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub name: String,
    pub address: Address,
    pub rating: f32,
    #[serde(default)]
    pub category: Vec<String>,
    pub price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_fee_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walking_fee: Option<Money>,
    #[serde(default)]
    pub acceptable_durations: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beds: Option<u8>,
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    /// Discount badge text; empty when the listing has no deal.
    #[serde(default)]
    pub discount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Property {
    pub fn has_discount(&self) -> bool {
        !self.discount.trim().is_empty()
    }

    /// First gallery image, falling back to the cover image.
    pub fn primary_image(&self) -> &str {
        self.images
            .first()
            .map(String::as_str)
            .unwrap_or(self.image.as_str())
    }

    fn matches_text(&self, needle: &str) -> bool {
        let haystacks = [
            self.name.as_str(),
            self.address.city.as_str(),
            self.address.state.as_str(),
            self.address.country.as_str(),
        ];
        haystacks
            .iter()
            .any(|value| value.to_lowercase().contains(needle))
            || self
                .category
                .iter()
                .any(|category| category.to_lowercase().contains(needle))
    }
}

/// Browse filter accepted by the listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyFilter {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub min_price: Option<Money>,
    #[serde(default)]
    pub max_price: Option<Money>,
    #[serde(default)]
    pub min_beds: Option<u8>,
}

impl PropertyFilter {
    pub fn text(query: impl Into<String>) -> Self {
        Self {
            q: Some(query.into()),
            ..Self::default()
        }
    }

    pub fn matches(&self, property: &Property) -> bool {
        if let Some(needle) = normalized(self.q.as_deref()) {
            if !property.matches_text(&needle) {
                return false;
            }
        }

        if let Some(city) = normalized(self.city.as_deref()) {
            if property.address.city.to_lowercase() != city {
                return false;
            }
        }

        if let Some(category) = normalized(self.category.as_deref()) {
            if !property
                .category
                .iter()
                .any(|value| value.to_lowercase() == category)
            {
                return false;
            }
        }

        if let Some(min) = self.min_price {
            if property.price < min {
                return false;
            }
        }

        if let Some(max) = self.max_price {
            if property.price > max {
                return false;
            }
        }

        if let Some(min_beds) = self.min_beds {
            if property.beds.unwrap_or(0) < min_beds {
                return false;
            }
        }

        true
    }
}

fn normalized(value: Option<&str>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_lowercase())
        .filter(|raw| !raw.is_empty())
}
