pub mod listing;
pub mod search;
pub mod seed;

pub use listing::{parse_price, Category, Listing, ListingError, NewListing};
pub use search::ListingFilter;
pub use seed::seed_listings;
