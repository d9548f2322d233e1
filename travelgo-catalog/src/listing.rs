use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Listing categories offered by the catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Bus,
    Train,
    Flight,
    Hotel,
}

impl Category {
    pub const TRANSPORT: [Category; 3] = [Category::Bus, Category::Train, Category::Flight];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bus => "bus",
            Category::Train => "train",
            Category::Flight => "flight",
            Category::Hotel => "hotel",
        }
    }

    /// Transport listings are matched by route, hotels by city.
    pub fn is_transport(&self) -> bool {
        !matches!(self, Category::Hotel)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bus" => Ok(Category::Bus),
            "train" => Ok(Category::Train),
            "flight" => Ok(Category::Flight),
            "hotel" | "hotels" => Ok(Category::Hotel),
            other => Err(ListingError::UnknownCategory(other.to_string())),
        }
    }
}

/// A bookable transport or hotel offering.
///
/// `source`/`destination` are set for transport categories, `location` for
/// hotels. Listings are never mutated once stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub service_id: String,
    pub category: Category,
    pub source: Option<String>,
    pub destination: Option<String>,
    pub location: Option<String>,
    pub name: String,
    pub price: Decimal,
    pub details: String,
}

impl Listing {
    pub fn transport(
        category: Category,
        source: &str,
        destination: &str,
        name: &str,
        price: Decimal,
        details: &str,
    ) -> Result<Self, ListingError> {
        if !category.is_transport() {
            return Err(ListingError::NotTransport(category));
        }

        Ok(Self {
            service_id: new_service_id(),
            category,
            source: Some(source.trim().to_string()),
            destination: Some(destination.trim().to_string()),
            location: None,
            name: name.trim().to_string(),
            price,
            details: details.trim().to_string(),
        })
    }

    pub fn hotel(location: &str, name: &str, price: Decimal, details: &str) -> Self {
        Self {
            service_id: new_service_id(),
            category: Category::Hotel,
            source: None,
            destination: None,
            location: Some(location.trim().to_string()),
            name: name.trim().to_string(),
            price,
            details: details.trim().to_string(),
        }
    }
}

/// Listing as submitted by an administrator; the id is optional and filled
/// in on conversion.
#[derive(Debug, Clone, Deserialize)]
pub struct NewListing {
    pub service_id: Option<String>,
    pub category: String,
    pub source: Option<String>,
    pub destination: Option<String>,
    pub location: Option<String>,
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub details: String,
}

impl TryFrom<NewListing> for Listing {
    type Error = ListingError;

    fn try_from(new: NewListing) -> Result<Self, Self::Error> {
        let category: Category = new.category.parse()?;
        let price = parse_price(&new.price)?;

        let mut listing = if category.is_transport() {
            let source = required(new.source, "source")?;
            let destination = required(new.destination, "destination")?;
            Listing::transport(category, &source, &destination, &new.name, price, &new.details)?
        } else {
            let location = required(new.location, "location")?;
            Listing::hotel(&location, &new.name, price, &new.details)
        };

        if let Some(id) = new.service_id.filter(|id| !id.trim().is_empty()) {
            listing.service_id = id;
        }

        Ok(listing)
    }
}

/// Prices are stored as `NUMERIC(12, 2)`: at most two decimal places and
/// ten integer digits.
const PRICE_SCALE: u32 = 2;
const PRICE_LIMIT: i64 = 10_000_000_000;

/// Parse a submitted price, rejecting anything the price columns would round
/// or refuse.
pub fn parse_price(raw: &str) -> Result<Decimal, ListingError> {
    let invalid = || ListingError::InvalidPrice(raw.to_string());
    let price = Decimal::from_str(raw.trim()).map_err(|_| invalid())?;

    if price.is_sign_negative()
        || price.normalize().scale() > PRICE_SCALE
        || price >= Decimal::from(PRICE_LIMIT)
    {
        return Err(invalid());
    }
    Ok(price.round_dp(PRICE_SCALE))
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ListingError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ListingError::MissingField(field))
}

fn new_service_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Category {0} is not a transport category")]
    NotTransport(Category),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(category: &str) -> NewListing {
        NewListing {
            service_id: None,
            category: category.to_string(),
            source: Some(" Hyderabad ".to_string()),
            destination: Some("Chennai".to_string()),
            location: Some("Goa".to_string()),
            name: "Night Rider".to_string(),
            price: "725.50".to_string(),
            details: "AC Sleeper".to_string(),
        }
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("Bus".parse::<Category>().unwrap(), Category::Bus);
        assert_eq!(" hotels ".parse::<Category>().unwrap(), Category::Hotel);
        assert!("ferry".parse::<Category>().is_err());
        assert!(Category::Flight.is_transport());
        assert!(!Category::Hotel.is_transport());
    }

    #[test]
    fn test_new_transport_listing_gets_id() {
        let listing = Listing::try_from(form("bus")).unwrap();
        assert!(!listing.service_id.is_empty());
        assert_eq!(listing.source.as_deref(), Some("Hyderabad"));
        assert_eq!(listing.location, None);
        assert_eq!(listing.price, Decimal::new(72550, 2));
    }

    #[test]
    fn test_new_hotel_listing_uses_location() {
        let listing = Listing::try_from(form("hotel")).unwrap();
        assert_eq!(listing.category, Category::Hotel);
        assert_eq!(listing.location.as_deref(), Some("Goa"));
        assert_eq!(listing.source, None);
    }

    #[test]
    fn test_supplied_id_is_kept() {
        let mut new = form("train");
        new.service_id = Some("svc-1".to_string());
        assert_eq!(Listing::try_from(new).unwrap().service_id, "svc-1");
    }

    #[test]
    fn test_invalid_listing_rejected() {
        let mut new = form("bus");
        new.price = "cheap".to_string();
        assert!(matches!(Listing::try_from(new), Err(ListingError::InvalidPrice(_))));

        let mut new = form("flight");
        new.destination = None;
        assert!(matches!(
            Listing::try_from(new),
            Err(ListingError::MissingField("destination"))
        ));

        assert!(Listing::transport(Category::Hotel, "a", "b", "c", Decimal::ONE, "d").is_err());
    }

    #[test]
    fn test_price_must_fit_the_column() {
        assert_eq!(parse_price(" 610 ").unwrap(), Decimal::from(610));
        assert_eq!(parse_price("610.500").unwrap().to_string(), "610.50");
        assert!(matches!(parse_price("610.555"), Err(ListingError::InvalidPrice(_))));
        assert!(parse_price("-1").is_err());
        assert!(parse_price("9999999999.99").is_ok());
        assert!(parse_price("10000000000").is_err());

        let mut new = form("hotel");
        new.price = "1800.125".to_string();
        assert!(matches!(Listing::try_from(new), Err(ListingError::InvalidPrice(_))));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Listing::hotel("Goa", "A", Decimal::ONE, "");
        let b = Listing::hotel("Goa", "A", Decimal::ONE, "");
        assert_ne!(a.service_id, b.service_id);
    }
}
