use crate::booking::Booking;
use crate::identity::User;
use crate::session::SessionState;
use async_trait::async_trait;
use travelgo_catalog::{Listing, ListingFilter};

pub type RepoError = Box<dyn std::error::Error + Send + Sync>;
pub type RepoResult<T> = Result<T, RepoError>;

/// Repository trait for catalog listings
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn insert_listing(&self, listing: &Listing) -> RepoResult<()>;

    /// Full scan keeping the listings accepted by `filter`, in insertion order.
    async fn scan_listings(&self, filter: &ListingFilter) -> RepoResult<Vec<Listing>>;
}

/// Repository trait for user records keyed by email
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_user(&self, email: &str) -> RepoResult<Option<User>>;

    /// Returns `false` without writing when the email is already taken.
    async fn insert_user_if_absent(&self, user: &User) -> RepoResult<bool>;

    /// Atomically add one to the login counter and return the new value.
    async fn increment_logins(&self, email: &str) -> RepoResult<i64>;
}

/// Repository trait for bookings keyed by `(email, booking_id)`
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Inserts or silently overwrites.
    async fn put_booking(&self, booking: &Booking) -> RepoResult<()>;

    async fn get_booking(&self, email: &str, booking_id: &str) -> RepoResult<Option<Booking>>;

    async fn scan_bookings(&self, email: &str) -> RepoResult<Vec<Booking>>;

    /// Deleting a missing key is not an error.
    async fn delete_booking(&self, email: &str, booking_id: &str) -> RepoResult<()>;
}

/// External storage for per-browser sessions, keyed by an opaque token
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, token: &str) -> RepoResult<Option<SessionState>>;

    async fn save(&self, token: &str, session: &SessionState) -> RepoResult<()>;

    async fn remove(&self, token: &str) -> RepoResult<()>;
}
