use super::domain::{Address, Property, PropertyId, Review};
use crate::marketplace::money::Money;

struct Seed {
    id: u32,
    name: &'static str,
    city: &'static str,
    state: &'static str,
    rating: f32,
    category: &'static [&'static str],
    price: u64,
    agent_fee_percentage: Option<f64>,
    walking_fee: Option<u64>,
    acceptable_durations: &'static [u8],
    beds: u8,
    photo: &'static str,
    discount: &'static str,
    description: &'static str,
    amenities: &'static [&'static str],
    reviews: &'static [(&'static str, &'static str, f32)],
}

const PHOTO_BASE: &str = "https://images.unsplash.com/";
const PHOTO_QUERY: &str = "?auto=format&fit=crop&w=1200&q=80";

const SEEDS: &[Seed] = &[
    Seed {
        id: 1,
        name: "Villa Ocean Breeze",
        city: "Accra",
        state: "Greater Accra Region",
        rating: 4.9,
        category: &["Luxury Villa", "Pool", "Beachfront"],
        price: 3_200,
        agent_fee_percentage: Some(5.0),
        walking_fee: Some(50),
        acceptable_durations: &[1, 2, 3],
        beds: 3,
        photo: "photo-1564013799919-ab600027ffc6",
        discount: "15",
        description: "Beachfront villa with ocean views, a private pool and a shaded terrace.",
        amenities: &["Pool", "WiFi", "Air Conditioning", "Parking"],
        reviews: &[
            ("Kwame Appiah", "Spotless and right on the beach.", 5.0),
            ("Efua Mensah", "Great host, slow water pressure upstairs.", 4.5),
        ],
    },
    Seed {
        id: 2,
        name: "Mountain Escape Chalet",
        city: "Kumasi",
        state: "Ashanti Region",
        rating: 4.7,
        category: &["Chalet", "Mountain View"],
        price: 1_800,
        agent_fee_percentage: Some(6.0),
        walking_fee: Some(40),
        acceptable_durations: &[1, 2],
        beds: 4,
        photo: "photo-1505691723518-36a8d1f6b9a0",
        discount: "",
        description: "Timber chalet with a fireplace and direct access to hiking trails.",
        amenities: &["Fireplace", "Balcony", "WiFi"],
        reviews: &[("Ama Serwaa", "Cozy evenings by the fire.", 4.7)],
    },
    Seed {
        id: 3,
        name: "Cozy Desert Retreat",
        city: "Tamale",
        state: "Northern Region",
        rating: 4.8,
        category: &["Retreat", "Self Catering"],
        price: 1_500,
        agent_fee_percentage: None,
        walking_fee: None,
        acceptable_durations: &[1],
        beds: 2,
        photo: "photo-1512917774080-9991f1c4c750",
        discount: "10",
        description: "Quiet compound house under open skies, ten minutes from the city centre.",
        amenities: &["Kitchen", "Parking"],
        reviews: &[],
    },
    Seed {
        id: 4,
        name: "Labone Garden Apartment",
        city: "Accra",
        state: "Greater Accra Region",
        rating: 4.6,
        category: &["Apartment", "Garden"],
        price: 2_400,
        agent_fee_percentage: Some(5.0),
        walking_fee: Some(60),
        acceptable_durations: &[1, 2, 3, 4, 5],
        beds: 2,
        photo: "photo-1502672260266-1c1ef2d93688",
        discount: "",
        description: "Ground floor apartment opening onto a walled garden.",
        amenities: &["WiFi", "Generator", "Security"],
        reviews: &[("Yaw Boateng", "Quiet street, reliable power.", 4.6)],
    },
    Seed {
        id: 5,
        name: "Cape Coast Heritage Loft",
        city: "Cape Coast",
        state: "Central Region",
        rating: 4.5,
        category: &["Loft", "Historic"],
        price: 1_350,
        agent_fee_percentage: Some(4.0),
        walking_fee: Some(30),
        acceptable_durations: &[1, 2],
        beds: 1,
        photo: "photo-1522708323590-d24dbb6b0267",
        discount: "5",
        description: "Restored colonial-era loft a short walk from the castle.",
        amenities: &["WiFi", "Ceiling Fans"],
        reviews: &[],
    },
    Seed {
        id: 6,
        name: "East Legon Family Home",
        city: "Accra",
        state: "Greater Accra Region",
        rating: 4.9,
        category: &["House", "Family"],
        price: 4_500,
        agent_fee_percentage: Some(7.5),
        walking_fee: Some(100),
        acceptable_durations: &[2, 3, 5],
        beds: 5,
        photo: "photo-1568605114967-8130f3a36994",
        discount: "20",
        description: "Five bedroom detached home with boys' quarters and a large yard.",
        amenities: &["Pool", "Generator", "Borehole", "Security"],
        reviews: &[("Abena Owusu", "Plenty of space for the kids.", 5.0)],
    },
    Seed {
        id: 7,
        name: "Takoradi Harbour View",
        city: "Takoradi",
        state: "Western Region",
        rating: 4.4,
        category: &["Apartment", "Sea View"],
        price: 2_000,
        agent_fee_percentage: None,
        walking_fee: Some(45),
        acceptable_durations: &[1, 2, 3],
        beds: 3,
        photo: "photo-1493809842364-78817add7ffb",
        discount: "",
        description: "Top floor flat overlooking the harbour.",
        amenities: &["WiFi", "Balcony"],
        reviews: &[],
    },
    Seed {
        id: 8,
        name: "Ho Hillside Bungalow",
        city: "Ho",
        state: "Volta Region",
        rating: 4.8,
        category: &["Bungalow", "Mountain View"],
        price: 1_200,
        agent_fee_percentage: Some(5.0),
        walking_fee: Some(35),
        acceptable_durations: &[1, 2, 3],
        beds: 2,
        photo: "photo-1449844908441-8829872d2607",
        discount: "12",
        description: "Bungalow on the slopes above Ho with views of the Togo range.",
        amenities: &["Parking", "Garden"],
        reviews: &[("Selorm Agbeko", "Cool breeze every evening.", 4.8)],
    },
    Seed {
        id: 9,
        name: "Airport Residential Studio",
        city: "Accra",
        state: "Greater Accra Region",
        rating: 4.3,
        category: &["Studio", "Serviced"],
        price: 2_100,
        agent_fee_percentage: Some(5.0),
        walking_fee: None,
        acceptable_durations: &[1],
        beds: 1,
        photo: "photo-1536376072261-38c75010e6c9",
        discount: "",
        description: "Serviced studio with weekly cleaning, close to the airport.",
        amenities: &["WiFi", "Air Conditioning", "Gym"],
        reviews: &[],
    },
    Seed {
        id: 10,
        name: "Sunyani Green Court",
        city: "Sunyani",
        state: "Bono Region",
        rating: 4.6,
        category: &["Townhouse"],
        price: 1_100,
        agent_fee_percentage: Some(3.0),
        walking_fee: Some(25),
        acceptable_durations: &[1, 2, 3, 4],
        beds: 3,
        photo: "photo-1570129477492-45c003edd2be",
        discount: "8",
        description: "Townhouse in a gated court with shared green space.",
        amenities: &["Parking", "Security"],
        reviews: &[],
    },
    Seed {
        id: 11,
        name: "Aburi Botanical Cottage",
        city: "Aburi",
        state: "Eastern Region",
        rating: 4.9,
        category: &["Cottage", "Garden", "Mountain View"],
        price: 1_700,
        agent_fee_percentage: Some(5.0),
        walking_fee: Some(50),
        acceptable_durations: &[1, 2, 3],
        beds: 2,
        photo: "photo-1518780664697-55e3ad937233",
        discount: "18",
        description: "Stone cottage next to the botanical gardens.",
        amenities: &["Fireplace", "Garden", "WiFi"],
        reviews: &[("Nana Yeboah", "Felt like a holiday every weekend.", 4.9)],
    },
    Seed {
        id: 12,
        name: "Osu Penthouse Suite",
        city: "Accra",
        state: "Greater Accra Region",
        rating: 4.9,
        category: &["Penthouse", "Luxury"],
        price: 5_200,
        agent_fee_percentage: Some(8.0),
        walking_fee: Some(120),
        acceptable_durations: &[1, 2],
        beds: 3,
        photo: "photo-1600585154340-be6161a56a0c",
        discount: "",
        description: "Penthouse above Oxford Street with a wraparound terrace.",
        amenities: &["Pool", "Gym", "Concierge", "Air Conditioning"],
        reviews: &[],
    },
];

fn photo_url(photo: &str) -> String {
    format!("{PHOTO_BASE}{photo}{PHOTO_QUERY}")
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

impl Seed {
    fn to_property(&self) -> Property {
        let cover = photo_url(self.photo);
        Property {
            id: PropertyId(self.id),
            name: self.name.to_string(),
            address: Address {
                state: self.state.to_string(),
                city: self.city.to_string(),
                country: "Ghana".to_string(),
            },
            rating: self.rating,
            category: strings(self.category),
            price: Money::from_major(self.price),
            agent_fee_percentage: self.agent_fee_percentage,
            walking_fee: self.walking_fee.map(Money::from_major),
            acceptable_durations: self.acceptable_durations.to_vec(),
            beds: Some(self.beds),
            image: cover.clone(),
            images: vec![cover],
            discount: self.discount.to_string(),
            description: Some(self.description.to_string()),
            amenities: strings(self.amenities),
            reviews: self
                .reviews
                .iter()
                .map(|(user, comment, rating)| Review {
                    user: user.to_string(),
                    comment: comment.to_string(),
                    rating: *rating,
                })
                .collect(),
        }
    }
}

/// Listings bundled with the service for demos and as the import fallback.
pub(crate) fn sample_properties() -> Vec<Property> {
    SEEDS.iter().map(Seed::to_property).collect()
}
