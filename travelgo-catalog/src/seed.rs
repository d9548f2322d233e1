use crate::listing::{Category, Listing};
use rust_decimal::Decimal;

const TRANSPORT: &[(Category, &str, &str, &str, i64, &str)] = &[
    (Category::Bus, "Hyderabad", "Bangalore", "SRS Travels", 610, "Non-AC Sleeper"),
    (Category::Bus, "Hyderabad", "Bangalore", "VRL Travels", 620, "Non-AC Sleeper"),
    (Category::Bus, "Hyderabad", "Vijayawada", "Morning Star", 450, "AC Sleeper"),
    (Category::Bus, "Vijayawada", "Hyderabad", "Garuda Plus", 550, "Multi-Axle AC"),
    (Category::Bus, "Vijayawada", "Bangalore", "Orange Travels", 800, "AC Sleeper"),
    (Category::Train, "Hyderabad", "Bangalore", "Rajdhani Express", 1200, "3rd AC"),
    (Category::Train, "Hyderabad", "Vijayawada", "Satavahana Exp", 150, "General/CC"),
    (Category::Train, "Vijayawada", "Hyderabad", "Intercity Express", 180, "Chair Car"),
    (Category::Flight, "Hyderabad", "Bangalore", "IndiGo", 2900, "Economy"),
    (Category::Flight, "Hyderabad", "Vijayawada", "Air India", 3500, "Economy"),
    (Category::Flight, "Vijayawada", "Bangalore", "SpiceJet", 3200, "Economy"),
];

const HOTELS: &[(&str, &str, i64, &str)] = &[
    ("Bangalore", "Hotel Minerva Grand", 1500, "Luxury"),
    ("Vijayawada", "The Gateway Hotel", 2500, "Luxury"),
    ("Hyderabad", "ITC Kohenur", 5000, "Luxury"),
];

/// The bulk-migration dataset. Every call mints fresh service ids, so loading
/// it twice stores every entry twice.
pub fn seed_listings() -> Vec<Listing> {
    // Every TRANSPORT row carries a transport category, so none is dropped here
    let transport = TRANSPORT.iter().filter_map(|&(category, source, destination, name, price, details)| {
        Listing::transport(category, source, destination, name, Decimal::from(price), details).ok()
    });

    let hotels = HOTELS
        .iter()
        .map(|&(location, name, price, details)| Listing::hotel(location, name, Decimal::from(price), details));

    transport.chain(hotels).collect()
}
