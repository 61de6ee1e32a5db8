use chrono::{NaiveDate, NaiveDateTime};

use super::admin::{
    AdminTables, Guest, Homeowner, ListingAddress, ManagedProperty, Message, MessageStatus,
    Reservation, ReservationStatus,
};
use super::homeowner::{
    HelpResource, HomeownerTables, OwnerBooking, OwnerBookingStatus, OwnerProfile, OwnerProperty,
    PaymentMethod,
};
use crate::marketplace::money::Money;

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

fn stamp(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<NaiveDateTime> {
    date(year, month, day).and_then(|date| date.and_hms_opt(hour, minute, 0))
}

fn address(city: &str, state: &str, country: Option<&str>) -> ListingAddress {
    ListingAddress {
        city: city.to_string(),
        state: Some(state.to_string()),
        country: country.map(str::to_string),
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(crate) fn admin_tables() -> AdminTables {
    let properties = vec![
        ManagedProperty {
            id: 1,
            name: "Villa Ocean Breeze".to_string(),
            host: "Maltiti".to_string(),
            address: address("Accra", "Greater Accra Region", Some("Ghana")),
            price: Money::from_major(3_200),
            beds: Some(3),
            is_active: true,
            image: Some("https://images.unsplash.com/photo-1564013799919-ab600027ffc6".to_string()),
            description: Some(
                "Beachfront luxury with ocean views and a private pool.".to_string(),
            ),
            amenities: strings(&["Pool", "WiFi", "Air Conditioning"]),
        },
        ManagedProperty {
            id: 2,
            name: "Mountain Escape Chalet".to_string(),
            host: "Mary Smith".to_string(),
            address: address("Kumasi", "Ashanti Region", Some("Ghana")),
            price: Money::from_major(1_800),
            beds: Some(4),
            is_active: false,
            image: Some("https://images.unsplash.com/photo-1505691723518-36a8d1f6b9a0".to_string()),
            description: Some("Rustic chalet with a fireplace and hiking access.".to_string()),
            amenities: strings(&["Fireplace", "Balcony"]),
        },
        ManagedProperty {
            id: 3,
            name: "Cozy Desert Retreat".to_string(),
            host: "John Doe".to_string(),
            address: address("Tamale", "Northern Region", Some("Ghana")),
            price: Money::from_major(1_500),
            beds: Some(2),
            is_active: true,
            image: Some("https://images.unsplash.com/photo-1505691723518-36a8d1f6b9a0".to_string()),
            description: Some("Quiet retreat under the stars.".to_string()),
            amenities: strings(&["Kitchen", "Parking"]),
        },
    ];

    let homeowners = vec![
        Homeowner {
            id: 1,
            name: "Maltiti".to_string(),
            email: "maltiti@hosts.com".to_string(),
            phone: Some("+233241234567".to_string()),
            payment_info: Some("MTN Momo 0244123456".to_string()),
            joined_at: date(2023, 9, 1),
        },
        Homeowner {
            id: 2,
            name: "Mary Smith".to_string(),
            email: "mary@example.com".to_string(),
            phone: Some("+233245678901".to_string()),
            payment_info: Some("GCB 0012456789".to_string()),
            joined_at: date(2024, 2, 20),
        },
        Homeowner {
            id: 3,
            name: "Iddrisu Sulemana".to_string(),
            email: "iddrisu@example.com".to_string(),
            phone: Some("+233249876543".to_string()),
            payment_info: Some("AirtelTigo 0549876543".to_string()),
            joined_at: date(2024, 1, 10),
        },
    ];

    let bookings = [
        (
            "ABC123",
            1,
            "Villa Ocean Breeze",
            "Maltiti",
            "Kwame Appiah",
            "kwame@example.com",
            date(2024, 2, 15),
            "5",
            3_410,
            ReservationStatus::Confirmed,
            "Accra",
        ),
        (
            "XYZ789",
            2,
            "Mountain Escape Chalet",
            "Mary Smith",
            "Ama Serwaa",
            "ama@example.com",
            date(2024, 3, 10),
            "7",
            2_130,
            ReservationStatus::Pending,
            "Kumasi",
        ),
    ]
    .into_iter()
    .filter_map(
        |(id, property_id, property, owner, guest, email, start, duration, total, status, city)| {
            Some(Reservation {
                id: id.to_string(),
                property_id,
                property_name: Some(property.to_string()),
                homeowner: Some(owner.to_string()),
                guest_name: guest.to_string(),
                guest_email: Some(email.to_string()),
                start_date: start?,
                duration: duration.to_string(),
                total: Money::from_major(total),
                status,
                location: Some(city.to_string()),
            })
        },
    )
    .collect();

    let guests = [
        (1, "Kwame Appiah", "kwame@example.com", "+233201234567"),
        (2, "Ama Serwaa", "ama@example.com", "+233205678901"),
        (3, "Alice Mensah", "alice@example.com", "+233207890123"),
    ]
    .into_iter()
    .map(|(id, name, email, phone)| Guest {
        id,
        name: name.to_string(),
        email: email.to_string(),
        phone: Some(phone.to_string()),
    })
    .collect();

    let messages = [
        (
            "m1",
            "Kwame Appiah",
            "Maltiti",
            "Villa Ocean Breeze",
            stamp(2024, 1, 10, 9, 15),
            "Hi, I want to confirm whether the villa has working wifi and if early check-in is possible.",
            MessageStatus::Unread,
        ),
        (
            "m2",
            "Ama Serwaa",
            "Mary Smith",
            "Mountain Escape Chalet",
            stamp(2024, 2, 2, 14, 22),
            "Hello, is there a baby cot available during our stay?",
            MessageStatus::Read,
        ),
    ]
    .into_iter()
    .filter_map(|(id, from, to, property, sent, body, status)| {
        Some(Message {
            id: id.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            property: Some(property.to_string()),
            date: sent?,
            message: body.to_string(),
            status,
        })
    })
    .collect();

    AdminTables {
        properties,
        homeowners,
        bookings,
        guests,
        messages,
        next_reply: 0,
    }
}

pub(crate) fn homeowner_tables() -> HomeownerTables {
    let profile = OwnerProfile {
        id: "u-1".to_string(),
        name: "Kwame Mensah".to_string(),
        email: "kwame@example.com".to_string(),
        phone: "+233 24 000 0000".to_string(),
    };

    let properties = vec![
        OwnerProperty {
            id: "p-1".to_string(),
            name: "Sunset Villa".to_string(),
            address: address("Accra", "Greater Accra", None),
            beds: 3,
            price: Money::from_major(450),
            is_active: true,
            image: "https://source.unsplash.com/collection/483251/800x600".to_string(),
            host: profile.name.clone(),
        },
        OwnerProperty {
            id: "p-2".to_string(),
            name: "Lakeside Cottage".to_string(),
            address: address("Kumasi", "Ashanti", None),
            beds: 2,
            price: Money::from_major(300),
            is_active: false,
            image: "https://source.unsplash.com/collection/483251/801x601".to_string(),
            host: profile.name.clone(),
        },
    ];

    let bookings = [
        (
            "b-1",
            "p-1",
            "Sunset Villa",
            "Amina Abubakar",
            "amina@example.com",
            "3 nights",
            date(2025, 9, 10),
            1_350,
            OwnerBookingStatus::Pending,
        ),
        (
            "b-2",
            "p-2",
            "Lakeside Cottage",
            "John Doe",
            "john@example.com",
            "2 nights",
            date(2025, 10, 1),
            600,
            OwnerBookingStatus::Confirmed,
        ),
    ]
    .into_iter()
    .filter_map(
        |(id, property_id, property, guest, email, duration, start, amount, status)| {
            Some(OwnerBooking {
                id: id.to_string(),
                property_id: Some(property_id.to_string()),
                property_name: property.to_string(),
                guest_name: guest.to_string(),
                guest_email: Some(email.to_string()),
                duration: duration.to_string(),
                start_date: start?,
                amount: Money::from_major(amount),
                status,
            })
        },
    )
    .collect();

    let payment_methods = vec![
        PaymentMethod {
            id: "pm-1".to_string(),
            brand: "Visa".to_string(),
            last4: "4242".to_string(),
            exp: "12/26".to_string(),
        },
        PaymentMethod {
            id: "pm-2".to_string(),
            brand: "Mastercard".to_string(),
            last4: "1111".to_string(),
            exp: "03/27".to_string(),
        },
    ];

    let help = [
        ("h-1", "Getting started as a homeowner"),
        ("h-2", "How to manage bookings"),
        ("h-3", "Payment & payouts"),
    ]
    .into_iter()
    .map(|(id, title)| HelpResource {
        id: id.to_string(),
        title: title.to_string(),
        link: "#".to_string(),
    })
    .collect();

    HomeownerTables {
        profile,
        properties,
        bookings,
        payment_methods,
        help,
        tickets: Vec::new(),
        next_property: 2,
        next_payment_method: 2,
        next_payment: 0,
        next_ticket: 0,
    }
}
