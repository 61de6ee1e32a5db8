use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::domain::{Address, Property, PropertyId};
use super::CatalogError;
use crate::marketplace::booking::LeaseDuration;
use crate::marketplace::money::Money;

const LIST_SEPARATOR: char = '|';

pub(crate) fn parse_properties<R: Read>(reader: R) -> Result<Vec<Property>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut properties = Vec::new();

    for (index, record) in csv_reader.deserialize::<ListingRow>().enumerate() {
        let row = record?;
        // header is line 1
        let line = index + 2;
        properties.push(row.into_property(line)?);
    }

    Ok(properties)
}

#[derive(Debug, Deserialize)]
struct ListingRow {
    id: u32,
    name: String,
    city: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    state: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    country: Option<String>,
    #[serde(default)]
    rating: Option<f32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    category: Option<String>,
    price: f64,
    #[serde(default)]
    agent_fee_percentage: Option<f64>,
    #[serde(default)]
    walking_fee: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    acceptable_durations: Option<String>,
    #[serde(default)]
    beds: Option<u8>,
    image: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    images: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    discount: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    amenities: Option<String>,
}

impl ListingRow {
    fn into_property(self, line: usize) -> Result<Property, CatalogError> {
        let invalid = |reason: String| CatalogError::InvalidRow { line, reason };

        if self.name.trim().is_empty() {
            return Err(invalid("name is required".to_string()));
        }

        let price = Money::from_major_f64(self.price)
            .ok_or_else(|| invalid(format!("price {} is not a valid amount", self.price)))?;

        let walking_fee = match self.walking_fee {
            Some(fee) => Some(
                Money::from_major_f64(fee)
                    .ok_or_else(|| invalid(format!("walking fee {fee} is not a valid amount")))?,
            ),
            None => None,
        };

        if let Some(percent) = self.agent_fee_percentage {
            if !percent.is_finite() || percent < 0.0 {
                return Err(invalid(format!("agent fee {percent}% is not valid")));
            }
        }

        let rating = self.rating.unwrap_or(0.0);
        if !(0.0..=5.0).contains(&rating) {
            return Err(invalid(format!("rating {rating} is outside 0-5")));
        }

        let mut acceptable_durations = Vec::new();
        for raw in split_list(self.acceptable_durations.as_deref()) {
            let years = raw
                .parse::<u8>()
                .ok()
                .and_then(|years| LeaseDuration::new(years).ok())
                .ok_or_else(|| invalid(format!("'{raw}' is not a lease length of 1-5 years")))?;
            if !acceptable_durations.contains(&years.years()) {
                acceptable_durations.push(years.years());
            }
        }
        acceptable_durations.sort_unstable();

        let images = split_list(self.images.as_deref());

        Ok(Property {
            id: PropertyId(self.id),
            name: self.name,
            address: Address {
                state: self.state.unwrap_or_default(),
                city: self.city,
                country: self.country.unwrap_or_else(|| "Ghana".to_string()),
            },
            rating,
            category: split_list(self.category.as_deref()),
            price,
            agent_fee_percentage: self.agent_fee_percentage,
            walking_fee,
            acceptable_durations,
            beds: self.beds,
            image: self.image,
            images,
            discount: self.discount.unwrap_or_default(),
            description: self.description,
            amenities: split_list(self.amenities.as_deref()),
            reviews: Vec::new(),
        })
    }
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(LIST_SEPARATOR)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "id,name,city,state,country,rating,category,price,agent_fee_percentage,walking_fee,acceptable_durations,beds,image,images,discount,description,amenities\n";

    #[test]
    fn parses_lists_and_optional_cells() {
        let csv = format!(
            "{HEADER}21,Dzorwulu Flat,Accra,Greater Accra Region,,4.2,Apartment|Serviced,1800,,,3|1,2,https://img/a.jpg,https://img/b.jpg|https://img/c.jpg,,,WiFi|Parking\n"
        );

        let properties = parse_properties(csv.as_bytes()).expect("csv parses");
        assert_eq!(properties.len(), 1);
        let property = &properties[0];
        assert_eq!(property.id, PropertyId(21));
        assert_eq!(property.address.country, "Ghana");
        assert_eq!(property.category, vec!["Apartment", "Serviced"]);
        assert_eq!(property.price, Money::from_major(1_800));
        assert!(property.agent_fee_percentage.is_none());
        assert!(property.walking_fee.is_none());
        assert_eq!(property.acceptable_durations, vec![1, 3]);
        assert_eq!(property.primary_image(), "https://img/b.jpg");
        assert!(!property.has_discount());
        assert_eq!(property.amenities, vec!["WiFi", "Parking"]);
    }

    #[test]
    fn rejects_out_of_range_durations() {
        let csv = format!("{HEADER}22,Long Lease,Accra,,,4.0,,900,,,1|7,,https://img/a.jpg,,,,\n");

        match parse_properties(csv.as_bytes()) {
            Err(CatalogError::InvalidRow { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("'7'"));
            }
            other => panic!("expected invalid row, got {other:?}"),
        }
    }

    #[test]
    fn rejects_negative_prices() {
        let csv = format!("{HEADER}23,Broken,Accra,,,4.0,,-10,,,1,,https://img/a.jpg,,,,\n");

        assert!(matches!(
            parse_properties(csv.as_bytes()),
            Err(CatalogError::InvalidRow { .. })
        ));
    }
}
