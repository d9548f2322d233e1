//! Store-level operations layered over the repository traits.
//!
//! These carry the failure policy: scans that may degrade return
//! [`Scanned`], writes that must not fail silently return [`CoreResult`].

use crate::booking::Booking;
use crate::identity::User;
use crate::repository::{BookingRepository, CatalogRepository, UserRepository};
use crate::{CoreError, CoreResult};
use std::sync::Arc;
use tracing::{error, info};
use travelgo_catalog::{Category, Listing, ListingFilter};

/// Items from a scan that is allowed to fall back to empty.
#[derive(Debug)]
pub struct Scanned<T> {
    pub items: Vec<T>,
    pub fault: Option<CoreError>,
}

impl<T> Scanned<T> {
    fn complete(items: Vec<T>) -> Self {
        Self { items, fault: None }
    }

    fn degraded(fault: CoreError) -> Self {
        Self { items: Vec::new(), fault: Some(fault) }
    }

    pub fn is_degraded(&self) -> bool {
        self.fault.is_some()
    }
}

fn unavailable(op: &str, err: impl std::fmt::Display) -> CoreError {
    CoreError::StoreUnavailable(format!("{}: {}", op, err))
}

#[derive(Clone)]
pub struct CatalogStore {
    repo: Arc<dyn CatalogRepository>,
}

impl CatalogStore {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self { repo }
    }

    pub async fn add_listing(&self, listing: &Listing) -> CoreResult<()> {
        self.repo
            .insert_listing(listing)
            .await
            .map_err(|e| unavailable("insert listing", e))?;
        info!("Listing added: {} ({})", listing.service_id, listing.category);
        Ok(())
    }

    /// Route search for a transport category.
    pub async fn search(&self, category: Category, source: &str, destination: &str) -> Scanned<Listing> {
        self.scan(ListingFilter::route(category, source, destination)).await
    }

    pub async fn search_hotels(&self, city: &str) -> Scanned<Listing> {
        self.scan(ListingFilter::city(city)).await
    }

    async fn scan(&self, filter: ListingFilter) -> Scanned<Listing> {
        match self.repo.scan_listings(&filter).await {
            Ok(items) => Scanned::complete(items),
            Err(e) => {
                error!("Catalog scan failed for {:?}: {}", filter, e);
                Scanned::degraded(unavailable("scan listings", e))
            }
        }
    }

    /// Insert every entry; ids are whatever the entries carry, so re-running
    /// with a freshly minted dataset duplicates it.
    pub async fn bulk_load(&self, entries: Vec<Listing>) -> CoreResult<usize> {
        let mut inserted = 0;
        for entry in &entries {
            self.repo
                .insert_listing(entry)
                .await
                .map_err(|e| unavailable("bulk load", e))?;
            inserted += 1;
        }
        info!("Bulk load inserted {} listings", inserted);
        Ok(inserted)
    }
}

#[derive(Clone)]
pub struct UserStore {
    repo: Arc<dyn UserRepository>,
}

impl UserStore {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn exists(&self, email: &str) -> CoreResult<bool> {
        Ok(self.get(email).await?.is_some())
    }

    pub async fn get(&self, email: &str) -> CoreResult<Option<User>> {
        self.repo.get_user(email).await.map_err(|e| unavailable("get user", e))
    }

    pub async fn register(&self, email: &str, name: &str, password: &str) -> CoreResult<User> {
        if self.exists(email).await? {
            return Err(CoreError::AlreadyExists(email.to_string()));
        }

        let user = User::new(email, name, password);
        let inserted = self
            .repo
            .insert_user_if_absent(&user)
            .await
            .map_err(|e| unavailable("insert user", e))?;
        // Lost a race with a concurrent registration.
        if !inserted {
            return Err(CoreError::AlreadyExists(email.to_string()));
        }

        info!("User registered: {}", email);
        Ok(user)
    }

    /// Fetch and compare; the caller bumps the login counter separately.
    pub async fn authenticate(&self, email: &str, password: &str) -> CoreResult<Option<User>> {
        Ok(self.get(email).await?.filter(|user| user.password_matches(password)))
    }

    pub async fn record_login(&self, email: &str) -> CoreResult<i64> {
        self.repo
            .increment_logins(email)
            .await
            .map_err(|e| unavailable("increment logins", e))
    }
}

#[derive(Clone)]
pub struct BookingStore {
    repo: Arc<dyn BookingRepository>,
}

impl BookingStore {
    pub fn new(repo: Arc<dyn BookingRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, booking: &Booking) -> CoreResult<()> {
        self.repo
            .put_booking(booking)
            .await
            .map_err(|e| unavailable("put booking", e))?;
        info!("Booking stored: {} for {}", booking.booking_id, booking.email);
        Ok(())
    }

    /// Degrades to no bookings when the scan fails.
    pub async fn list_for(&self, email: &str) -> Scanned<Booking> {
        match self.repo.scan_bookings(email).await {
            Ok(items) => Scanned::complete(items),
            Err(e) => {
                error!("Error accessing bookings for {}: {}", email, e);
                Scanned::degraded(unavailable("scan bookings", e))
            }
        }
    }

    pub async fn get(&self, email: &str, booking_id: &str) -> CoreResult<Option<Booking>> {
        self.repo
            .get_booking(email, booking_id)
            .await
            .map_err(|e| unavailable("get booking", e))
    }

    pub async fn delete(&self, email: &str, booking_id: &str) -> CoreResult<()> {
        self.repo
            .delete_booking(email, booking_id)
            .await
            .map_err(|e| unavailable("delete booking", e))?;
        info!("Booking removed: {} for {}", booking_id, email);
        Ok(())
    }
}
