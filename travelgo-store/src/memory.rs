//! In-process backends for every store trait.
//!
//! Selected with `storage.backend = "memory"` and used by the test suites.
//! Each repository can be switched into an outage so the degraded paths of
//! the workflow can be exercised.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};
use travelgo_catalog::{Listing, ListingFilter};
use travelgo_core::repository::{
    BookingRepository, CatalogRepository, RepoError, RepoResult, SessionStore, UserRepository,
};
use travelgo_core::{Booking, Notifier, SessionState, User};
use travelgo_shared::models::BookingConfirmedEvent;

#[derive(Debug, Default)]
struct Outage(AtomicBool);

impl Outage {
    fn set(&self, down: bool) {
        self.0.store(down, Ordering::SeqCst);
    }

    fn check(&self) -> RepoResult<()> {
        if self.0.load(Ordering::SeqCst) {
            return Err("store unavailable".into());
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepoError> {
    mutex.lock().map_err(|_| "Mutex lock failed".into())
}

#[derive(Debug, Default)]
pub struct MemoryCatalogRepository {
    listings: Mutex<Vec<Listing>>,
    outage: Outage,
}

impl MemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, down: bool) {
        self.outage.set(down);
    }

    pub fn len(&self) -> usize {
        self.listings.lock().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CatalogRepository for MemoryCatalogRepository {
    async fn insert_listing(&self, listing: &Listing) -> RepoResult<()> {
        self.outage.check()?;
        let mut listings = lock(&self.listings)?;
        match listings.iter_mut().find(|l| l.service_id == listing.service_id) {
            Some(existing) => *existing = listing.clone(),
            None => listings.push(listing.clone()),
        }
        Ok(())
    }

    async fn scan_listings(&self, filter: &ListingFilter) -> RepoResult<Vec<Listing>> {
        self.outage.check()?;
        let listings = lock(&self.listings)?;
        Ok(filter.apply(listings.iter()))
    }
}

#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
    outage: Outage,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, down: bool) {
        self.outage.set(down);
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn get_user(&self, email: &str) -> RepoResult<Option<User>> {
        self.outage.check()?;
        Ok(lock(&self.users)?.get(email).cloned())
    }

    async fn insert_user_if_absent(&self, user: &User) -> RepoResult<bool> {
        self.outage.check()?;
        let mut users = lock(&self.users)?;
        if users.contains_key(&user.email) {
            return Ok(false);
        }
        users.insert(user.email.clone(), user.clone());
        Ok(true)
    }

    async fn increment_logins(&self, email: &str) -> RepoResult<i64> {
        self.outage.check()?;
        // Read-modify-write under one lock
        let mut users = lock(&self.users)?;
        let user = users
            .get_mut(email)
            .ok_or_else(|| format!("No user record for {}", email))?;
        user.logins += 1;
        Ok(user.logins)
    }
}

#[derive(Debug, Default)]
pub struct MemoryBookingRepository {
    bookings: Mutex<BTreeMap<(String, String), Booking>>,
    outage: Outage,
}

impl MemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, down: bool) {
        self.outage.set(down);
    }
}

#[async_trait]
impl BookingRepository for MemoryBookingRepository {
    async fn put_booking(&self, booking: &Booking) -> RepoResult<()> {
        self.outage.check()?;
        let key = (booking.email.clone(), booking.booking_id.clone());
        lock(&self.bookings)?.insert(key, booking.clone());
        Ok(())
    }

    async fn get_booking(&self, email: &str, booking_id: &str) -> RepoResult<Option<Booking>> {
        self.outage.check()?;
        let key = (email.to_string(), booking_id.to_string());
        Ok(lock(&self.bookings)?.get(&key).cloned())
    }

    async fn scan_bookings(&self, email: &str) -> RepoResult<Vec<Booking>> {
        self.outage.check()?;
        let bookings = lock(&self.bookings)?;
        Ok(bookings.values().filter(|b| b.email == email).cloned().collect())
    }

    async fn delete_booking(&self, email: &str, booking_id: &str) -> RepoResult<()> {
        self.outage.check()?;
        let key = (email.to_string(), booking_id.to_string());
        lock(&self.bookings)?.remove(&key);
        Ok(())
    }
}

/// Sessions keyed by token. Entries expire `ttl` after their last save, the
/// same sliding window the Redis store applies; expired entries are dropped
/// on lookup and pruned on every save.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, (SessionState, Option<Instant>)>>,
    ttl: Option<Duration>,
    outage: Outage,
}

impl MemorySessionStore {
    /// Entries never expire; intended for tests.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl: Some(ttl),
            ..Self::default()
        }
    }

    pub fn set_unavailable(&self, down: bool) {
        self.outage.set(down);
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }
}

fn expired(expires_at: &Option<Instant>, now: Instant) -> bool {
    expires_at.is_some_and(|at| now >= at)
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, token: &str) -> RepoResult<Option<SessionState>> {
        self.outage.check()?;
        let mut sessions = lock(&self.sessions)?;
        let now = Instant::now();

        if sessions.get(token).is_some_and(|(_, expires_at)| expired(expires_at, now)) {
            sessions.remove(token);
        }
        Ok(sessions.get(token).map(|(session, _)| session.clone()))
    }

    async fn save(&self, token: &str, session: &SessionState) -> RepoResult<()> {
        self.outage.check()?;
        let mut sessions = lock(&self.sessions)?;
        let now = Instant::now();

        sessions.retain(|_, (_, expires_at)| !expired(expires_at, now));
        sessions.insert(token.to_string(), (session.clone(), self.ttl.map(|ttl| now + ttl)));
        Ok(())
    }

    async fn remove(&self, token: &str) -> RepoResult<()> {
        self.outage.check()?;
        lock(&self.sessions)?.remove(token);
        Ok(())
    }
}

/// Keeps every published confirmation; can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    published: Mutex<Vec<BookingConfirmedEvent>>,
    outage: Outage,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, down: bool) {
        self.outage.set(down);
    }

    pub fn published(&self) -> Vec<BookingConfirmedEvent> {
        self.published.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn publish(&self, event: &BookingConfirmedEvent) -> RepoResult<()> {
        self.outage.check()?;
        lock(&self.published)?.push(event.clone());
        Ok(())
    }
}
