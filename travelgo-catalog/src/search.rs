use crate::listing::{Category, Listing};

/// Attribute filter applied when scanning the catalog.
///
/// Inputs are trimmed on construction and compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingFilter {
    Route {
        category: Category,
        source: String,
        destination: String,
    },
    City {
        location: String,
    },
}

impl ListingFilter {
    pub fn route(category: Category, source: &str, destination: &str) -> Self {
        Self::Route {
            category,
            source: source.trim().to_string(),
            destination: destination.trim().to_string(),
        }
    }

    pub fn city(location: &str) -> Self {
        Self::City {
            location: location.trim().to_string(),
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Self::Route { category, .. } => *category,
            Self::City { .. } => Category::Hotel,
        }
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        if listing.category != self.category() {
            return false;
        }

        match self {
            Self::Route { source, destination, .. } => {
                same_text(listing.source.as_deref(), source)
                    && same_text(listing.destination.as_deref(), destination)
            }
            Self::City { location } => same_text(listing.location.as_deref(), location),
        }
    }

    /// Scan `listings` in order, keeping the matches.
    pub fn apply<'a, I>(&self, listings: I) -> Vec<Listing>
    where
        I: IntoIterator<Item = &'a Listing>,
    {
        listings
            .into_iter()
            .filter(|listing| self.matches(listing))
            .cloned()
            .collect()
    }
}

fn same_text(stored: Option<&str>, wanted: &str) -> bool {
    stored.is_some_and(|s| s.to_lowercase() == wanted.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_listings;
    use rust_decimal::Decimal;

    #[test]
    fn test_route_search_against_seed() {
        let seed = seed_listings();
        let filter = ListingFilter::route(Category::Bus, "Hyderabad", "Bangalore");
        let found = filter.apply(&seed);

        assert_eq!(found.len(), 2);
        let mut names: Vec<_> = found.iter().map(|l| (l.name.as_str(), l.price)).collect();
        names.sort();
        assert_eq!(
            names,
            vec![("SRS Travels", Decimal::from(610)), ("VRL Travels", Decimal::from(620))]
        );
    }

    #[test]
    fn test_reversed_route_is_empty() {
        let seed = seed_listings();
        let filter = ListingFilter::route(Category::Bus, "Bangalore", "Hyderabad");
        assert!(filter.apply(&seed).is_empty());
    }

    #[test]
    fn test_search_trims_and_ignores_case() {
        let seed = seed_listings();
        let filter = ListingFilter::route(Category::Train, "  hyderabad ", "VIJAYAWADA");
        let found = filter.apply(&seed);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Satavahana Exp");
    }

    #[test]
    fn test_category_must_match() {
        let seed = seed_listings();
        let flights = ListingFilter::route(Category::Flight, "Hyderabad", "Bangalore").apply(&seed);
        assert_eq!(flights.len(), 1);
        assert!(flights.iter().all(|l| l.category == Category::Flight));
    }

    #[test]
    fn test_city_search() {
        let seed = seed_listings();
        let hotels = ListingFilter::city("bangalore").apply(&seed);
        assert_eq!(hotels.len(), 1);
        assert_eq!(hotels[0].name, "Hotel Minerva Grand");
        assert!(ListingFilter::city("Mumbai").apply(&seed).is_empty());
    }
}
