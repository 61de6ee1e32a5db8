//! Listing catalog: the browse, featured, and detail views of the marketplace.

pub mod domain;
mod import;
pub mod router;
mod sample;

pub use domain::{Address, Property, PropertyFilter, PropertyId, Review};
pub use router::catalog_router;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use tracing::{info, warn};

use crate::config::CatalogConfig;

/// Listings must rate at least this to be featured.
pub const TOP_RATED_MIN_RATING: f32 = 4.8;
/// Size of the featured and new-listing rails.
pub const FEATURED_LIMIT: usize = 6;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog line {line}: {reason}")]
    InvalidRow { line: usize, reason: String },
    #[error("duplicate property id {0}")]
    DuplicateId(PropertyId),
    #[error("property not found")]
    NotFound(PropertyId),
}

/// Immutable, ordered set of listings.
#[derive(Debug, Clone)]
pub struct Catalog {
    properties: Vec<Property>,
}

impl Catalog {
    pub fn new(properties: Vec<Property>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(properties.len());
        for property in &properties {
            if !seen.insert(property.id) {
                return Err(CatalogError::DuplicateId(property.id));
            }
        }
        Ok(Self { properties })
    }

    pub fn sample() -> Self {
        Self {
            properties: sample::sample_properties(),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Self::new(import::parse_properties(reader)?)
    }

    /// Loads the configured CSV catalog, falling back to the bundled sample when none is
    /// configured or the file cannot be used.
    pub fn load(config: &CatalogConfig) -> Self {
        let Some(path) = config.csv_path.as_ref() else {
            return Self::sample();
        };

        match Self::from_path(path) {
            Ok(catalog) => {
                info!(path = %path.display(), listings = catalog.len(), "catalog imported");
                catalog
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "catalog import failed, using sample listings");
                Self::sample()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn all(&self) -> &[Property] {
        &self.properties
    }

    pub fn get(&self, id: PropertyId) -> Option<&Property> {
        self.properties.iter().find(|property| property.id == id)
    }

    pub fn require(&self, id: PropertyId) -> Result<&Property, CatalogError> {
        self.get(id).ok_or(CatalogError::NotFound(id))
    }

    /// Highly rated listings that also carry a deal, in catalog order.
    pub fn top_rated(&self) -> Vec<&Property> {
        self.properties
            .iter()
            .filter(|property| property.rating >= TOP_RATED_MIN_RATING && property.has_discount())
            .take(FEATURED_LIMIT)
            .collect()
    }

    pub fn new_listings(&self) -> Vec<&Property> {
        let mut newest: Vec<&Property> = self.properties.iter().collect();
        newest.sort_by(|a, b| b.id.cmp(&a.id));
        newest.truncate(FEATURED_LIMIT);
        newest
    }

    pub fn reviews(&self, id: PropertyId) -> Result<&[Review], CatalogError> {
        self.require(id).map(|property| property.reviews.as_slice())
    }

    pub fn search(&self, filter: &PropertyFilter) -> Vec<&Property> {
        self.properties
            .iter()
            .filter(|property| filter.matches(property))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marketplace::money::Money;

    #[test]
    fn top_rated_requires_rating_and_discount() {
        let catalog = Catalog::sample();
        let top = catalog.top_rated();

        assert!(!top.is_empty());
        assert!(top.len() <= FEATURED_LIMIT);
        for property in &top {
            assert!(property.rating >= TOP_RATED_MIN_RATING);
            assert!(property.has_discount());
        }
        // rated 4.9 but no deal
        assert!(top.iter().all(|property| property.id != PropertyId(12)));
        assert!(top.iter().any(|property| property.id == PropertyId(3)));
    }

    #[test]
    fn new_listings_are_highest_ids_first() {
        let catalog = Catalog::sample();
        let ids: Vec<u32> = catalog
            .new_listings()
            .iter()
            .map(|property| property.id.0)
            .collect();

        assert_eq!(ids, vec![12, 11, 10, 9, 8, 7]);
    }

    #[test]
    fn search_matches_city_and_category_case_insensitively() {
        let catalog = Catalog::sample();

        let accra = catalog.search(&PropertyFilter::text("  ACCRA "));
        assert!(accra.iter().all(|property| property.address.city == "Accra"));
        assert_eq!(accra.len(), 5);

        let gardens = catalog.search(&PropertyFilter::text("garden"));
        assert!(gardens.iter().any(|property| property.id == PropertyId(11)));

        assert_eq!(catalog.search(&PropertyFilter::text("   ")).len(), catalog.len());
    }

    #[test]
    fn search_applies_price_and_bed_bounds() {
        let catalog = Catalog::sample();
        let filter = PropertyFilter {
            min_price: Some(Money::from_major(1_500)),
            max_price: Some(Money::from_major(2_000)),
            min_beds: Some(2),
            ..PropertyFilter::default()
        };

        let ids: Vec<u32> = catalog
            .search(&filter)
            .iter()
            .map(|property| property.id.0)
            .collect();
        assert_eq!(ids, vec![2, 3, 7, 11]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut properties = Catalog::sample().all().to_vec();
        let copy = properties[0].clone();
        properties.push(copy);

        assert!(matches!(
            Catalog::new(properties),
            Err(CatalogError::DuplicateId(PropertyId(1)))
        ));
    }

    #[test]
    fn reviews_for_unknown_property_is_not_found() {
        let catalog = Catalog::sample();
        assert!(matches!(
            catalog.reviews(PropertyId(404)),
            Err(CatalogError::NotFound(PropertyId(404)))
        ));
        assert_eq!(catalog.reviews(PropertyId(1)).expect("reviews").len(), 2);
    }
}
