//! Request workflow: login, search, the booking draft and the admin surface.
//!
//! Every transition takes the caller's [`SessionState`] by reference and
//! returns a [`Step`]. Session states run
//! `Anonymous → Authenticated → BookingPending → Authenticated`; the admin is
//! an Authenticated session flagged `is_admin`.

use crate::forms::{
    BookForm, CitySearchForm, HotelForm, LoginForm, PaymentForm, RegisterForm, RemoveBookingForm,
    RouteSearchForm, SeatsForm,
};
use crate::outcome::{results_key, Page, Route, Step, View};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, warn};
use travelgo_catalog::{parse_price, seed_listings, Category, Listing, NewListing};
use travelgo_core::repository::{BookingRepository, CatalogRepository, UserRepository};
use travelgo_core::{
    AdminCredentials, BookingDraft, BookingStore, BookingType, CatalogStore, CoreError, DraftRequest,
    Notifier, SessionState, UserStore,
};
use travelgo_shared::models::BookingConfirmedEvent;

/// Storage and notification collaborators, injected at start-up.
pub struct Backends {
    pub catalog: Arc<dyn CatalogRepository>,
    pub users: Arc<dyn UserRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub notifier: Arc<dyn Notifier>,
}

pub struct Workflow {
    catalog: CatalogStore,
    users: UserStore,
    bookings: BookingStore,
    notifier: Arc<dyn Notifier>,
    admin: AdminCredentials,
    subject: String,
}

fn login_redirect() -> Step {
    Step::redirect(Route::Login).rejected(CoreError::NotAuthenticated)
}

fn payment_page(draft: &BookingDraft) -> Page {
    Page::new(View::Payment).with("booking", json!(draft))
}

impl Workflow {
    pub fn new(backends: Backends, admin: AdminCredentials, subject: &str) -> Self {
        Self {
            catalog: CatalogStore::new(backends.catalog),
            users: UserStore::new(backends.users),
            bookings: BookingStore::new(backends.bookings),
            notifier: backends.notifier,
            admin,
            subject: subject.to_string(),
        }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn home(&self, session: &SessionState) -> Step {
        Step::render(Page::new(View::Index).with("logged_in", json!(session.is_authenticated())))
    }

    // ------------------------------------------------------------------
    // Search (any state, read only)
    // ------------------------------------------------------------------

    /// The empty search form for a category.
    pub fn search_form(&self, category: Category) -> Step {
        Step::render(Page::new(View::for_category(category)).with(results_key(category), Value::Null))
    }

    pub async fn search(&self, category: Category, form: &RouteSearchForm) -> Step {
        if !category.is_transport() {
            return Step::bad_request(CoreError::Validation(format!(
                "{} is searched by city",
                category
            )));
        }

        let source = form.source.trim();
        let destination = form.destination.trim();
        let found = self.catalog.search(category, source, destination).await;

        let page = Page::new(View::for_category(category))
            .with(results_key(category), json!(found.items))
            .with("source", json!(source))
            .with("destination", json!(destination));

        match found.fault {
            Some(fault) => Step::render(page).degraded(fault),
            None => Step::render(page),
        }
    }

    pub async fn search_hotels(&self, form: &CitySearchForm) -> Step {
        let city = form.city.trim();
        let found = self.catalog.search_hotels(city).await;

        let page = Page::new(View::Hotels)
            .with(results_key(Category::Hotel), json!(found.items))
            .with("city", json!(city));

        match found.fault {
            Some(fault) => Step::render(page).degraded(fault),
            None => Step::render(page),
        }
    }

    // ------------------------------------------------------------------
    // Identity
    // ------------------------------------------------------------------

    pub fn register_form(&self) -> Step {
        Step::render(Page::new(View::Register))
    }

    /// Registration leaves the session anonymous; the user logs in next.
    pub async fn register(&self, form: &RegisterForm) -> Step {
        let message_page = |message: &str| Page::new(View::Register).with("message", json!(message));

        if form.email.trim().is_empty() || form.password.expose().is_empty() {
            return Step::render(message_page("Email and password are required"))
                .rejected(CoreError::Validation("missing credentials".to_string()));
        }

        match self.users.register(&form.email, &form.name, form.password.expose()).await {
            Ok(_) => Step::redirect(Route::Login),
            Err(err @ CoreError::AlreadyExists(_)) => {
                info!("Registration rejected, {} already exists", form.email);
                Step::render(message_page("User already exists")).rejected(err)
            }
            Err(err) => {
                error!("Registration failed for {}: {}", form.email, err);
                Step::render(message_page("Registration is unavailable right now")).degraded(err)
            }
        }
    }

    pub fn login_form(&self) -> Step {
        Step::render(Page::new(View::Login))
    }

    /// Admin credentials are checked first and bypass the user store.
    pub async fn login(&self, session: &mut SessionState, form: &LoginForm) -> Step {
        if self.admin.matches(&form.email, form.password.expose()) {
            session.login_admin(&form.email);
            info!("Admin logged in: {}", form.email);
            return Step::redirect(Route::Admin);
        }

        let user = match self.users.authenticate(&form.email, form.password.expose()).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                info!("Login failed for {}", form.email);
                return Step::render(Page::new(View::Login)).rejected(CoreError::NotAuthenticated);
            }
            Err(err) => {
                error!("Login lookup failed for {}: {}", form.email, err);
                return Step::render(Page::new(View::Login)).degraded(err);
            }
        };

        session.login(&user.email);

        // The counter bump is separate from the credential check; a failure
        // here leaves the user logged in with a stale count.
        match self.users.record_login(&user.email).await {
            Ok(logins) => {
                info!("User logged in: {} (login #{})", user.email, logins);
                Step::redirect(Route::Dashboard)
            }
            Err(err) => {
                warn!("Login counter not updated for {}: {}", user.email, err);
                Step::redirect(Route::Dashboard).degraded(err)
            }
        }
    }

    /// Clears everything, including a pending draft.
    pub fn logout(&self, session: &mut SessionState) -> Step {
        if let Some(draft) = session.pending() {
            info!("Abandoning pending booking {} on logout", draft.booking_id);
        }
        session.clear();
        Step::redirect(Route::Home)
    }

    // ------------------------------------------------------------------
    // Dashboard and existing bookings
    // ------------------------------------------------------------------

    pub async fn dashboard(&self, session: &SessionState) -> Step {
        let Some(email) = session.email() else {
            return login_redirect();
        };

        let (name, user_fault) = match self.users.get(email).await {
            Ok(Some(user)) => (user.name, None),
            Ok(None) => (email.to_string(), None),
            Err(err) => {
                error!("Error reading user {}: {}", email, err);
                (email.to_string(), Some(err))
            }
        };

        let listed = self.bookings.list_for(email).await;
        let page = Page::new(View::Dashboard)
            .with("name", json!(name))
            .with("bookings", json!(listed.items));

        match user_fault.or(listed.fault) {
            Some(fault) => Step::render(page).degraded(fault),
            None => Step::render(page),
        }
    }

    pub async fn print_ticket(&self, session: &SessionState, booking_id: &str) -> Step {
        let Some(email) = session.email() else {
            return login_redirect();
        };

        match self.bookings.get(email, booking_id).await {
            Ok(Some(booking)) => Step::render(Page::new(View::Ticket).with("booking", json!(booking))),
            Ok(None) => Step::not_found("Booking not found"),
            Err(err) => {
                error!("Error reading booking {} for {}: {}", booking_id, email, err);
                Step::not_found("Booking not found").degraded(err)
            }
        }
    }

    /// Scoped to the caller's own email; unknown ids are a no-op.
    pub async fn remove_booking(&self, session: &SessionState, form: &RemoveBookingForm) -> Step {
        let Some(email) = session.email() else {
            return login_redirect();
        };

        match self.bookings.delete(email, &form.booking_id).await {
            Ok(()) => Step::redirect(Route::Dashboard),
            Err(err) => {
                error!("Error removing booking {} for {}: {}", form.booking_id, email, err);
                Step::redirect(Route::Dashboard).swallowed(err)
            }
        }
    }

    // ------------------------------------------------------------------
    // Booking draft: book → (select/confirm seats) → payment
    // ------------------------------------------------------------------

    /// Start a draft. Transport goes to seat selection, hotels straight to payment.
    pub fn book(&self, session: &mut SessionState, form: &BookForm) -> Step {
        let Some(email) = session.email().map(str::to_string) else {
            return login_redirect();
        };

        let booking_type = match form.booking_type.parse::<BookingType>() {
            Ok(booking_type) => booking_type,
            Err(err) => return Step::bad_request(err.into()),
        };
        let price = match parse_price(&form.price) {
            Ok(price) => price,
            Err(err) => return Step::bad_request(err.into()),
        };

        let draft = BookingDraft::new(
            &email,
            DraftRequest {
                booking_type,
                source: form.source.clone(),
                destination: form.destination.clone(),
                date: form.date.clone(),
                details: form.details.clone(),
                price,
            },
        );
        info!("Booking {} started by {} ({})", draft.booking_id, email, draft.booking_type);

        let step = if booking_type.requires_seats() {
            Step::redirect(Route::SelectSeats)
        } else {
            Step::render(payment_page(&draft))
        };

        // Replaces any earlier draft in this session
        session.start_draft(draft);
        step
    }

    pub fn select_seats(&self, session: &SessionState) -> Step {
        if !session.is_authenticated() {
            return login_redirect();
        }
        let Some(draft) = session.pending() else {
            return login_redirect();
        };

        if draft.is_ready_for_payment() {
            return Step::render(payment_page(draft));
        }
        Step::render(Page::new(View::SelectSeats).with("booking", json!(draft)))
    }

    pub fn confirm_seats(&self, session: &mut SessionState, form: &SeatsForm) -> Step {
        if !session.is_authenticated() {
            return login_redirect();
        }
        let Some(draft) = session.pending_mut() else {
            return login_redirect();
        };

        let selected = form.selected_seats.trim();
        if selected.is_empty() && !draft.is_ready_for_payment() {
            let page = Page::new(View::SelectSeats)
                .with("booking", json!(draft))
                .with("message", json!("Select at least one seat"));
            return Step::render(page).rejected(CoreError::Validation("no seats selected".to_string()));
        }

        match draft.confirm_seats(selected) {
            Ok(()) => {
                info!("Seats {} held on booking {}", selected, draft.booking_id);
                Step::render(payment_page(draft))
            }
            Err(err) => Step::render(payment_page(draft)).rejected(err.into()),
        }
    }

    /// Consumes the draft, persists it and publishes the confirmation.
    ///
    /// A persistence failure is logged and the user is still sent to the
    /// dashboard; the draft is gone either way.
    pub async fn payment(&self, session: &mut SessionState, form: &PaymentForm) -> Step {
        let Some(email) = session.email().map(str::to_string) else {
            return login_redirect();
        };
        match session.pending() {
            None => return login_redirect(),
            Some(draft) if !draft.is_ready_for_payment() => {
                return Step::redirect(Route::SelectSeats)
                    .rejected(CoreError::Validation("seats not selected".to_string()));
            }
            Some(_) => {}
        }
        let Some(draft) = session.take_pending() else {
            return login_redirect();
        };

        let booking = match draft.into_booking(&email, &form.method, &form.reference) {
            Ok(booking) => booking,
            Err(err) => return Step::bad_request(err.into()),
        };

        if let Err(err) = self.bookings.create(&booking).await {
            error!("Error saving booking {}: {}", booking.booking_id, err);
            return Step::redirect(Route::Dashboard).swallowed(err);
        }

        let message = format!("Booking Confirmed! {} for ₹{}", booking.details, booking.price);
        let event = BookingConfirmedEvent::new(&booking.booking_id, &email, &self.subject, &message, booking.price);

        match self.notifier.publish(&event).await {
            Ok(()) => Step::redirect(Route::Dashboard),
            Err(err) => {
                error!("Confirmation for booking {} not published: {}", booking.booking_id, err);
                Step::redirect(Route::Dashboard).swallowed(CoreError::NotifyFailure(err.to_string()))
            }
        }
    }

    // ------------------------------------------------------------------
    // Admin
    // ------------------------------------------------------------------

    fn admin_gate(&self, session: &SessionState) -> Option<Step> {
        if session.is_admin() {
            return None;
        }
        Some(Step::redirect(Route::Home).rejected(CoreError::NotAuthenticated))
    }

    fn admin_page(session: &SessionState, message: Option<String>) -> Page {
        Page::new(View::Admin)
            .with("admin", json!(session.email()))
            .with("message", json!(message))
    }

    pub fn admin_panel(&self, session: &SessionState) -> Step {
        if let Some(step) = self.admin_gate(session) {
            return step;
        }
        Step::render(Self::admin_page(session, None))
    }

    pub async fn admin_add_listing(&self, session: &SessionState, form: NewListing) -> Step {
        if let Some(step) = self.admin_gate(session) {
            return step;
        }

        let listing = match Listing::try_from(form) {
            Ok(listing) => listing,
            Err(err) => return Step::bad_request(err.into()),
        };

        match self.catalog.add_listing(&listing).await {
            Ok(()) => {
                let message = format!("Added {} {} ({})", listing.category, listing.name, listing.service_id);
                Step::render(Self::admin_page(session, Some(message)).with("listing", json!(listing)))
            }
            Err(err) => Step::failed(err),
        }
    }

    pub async fn admin_add_hotel(&self, session: &SessionState, form: HotelForm) -> Step {
        let listing = NewListing {
            service_id: None,
            category: Category::Hotel.as_str().to_string(),
            source: None,
            destination: None,
            location: Some(form.location),
            name: form.name,
            price: form.price,
            details: form.details,
        };
        self.admin_add_listing(session, listing).await
    }

    /// Bulk-load the seed dataset. Re-running duplicates it.
    pub async fn admin_migrate(&self, session: &SessionState) -> Step {
        if let Some(step) = self.admin_gate(session) {
            return step;
        }

        match self.catalog.bulk_load(seed_listings()).await {
            Ok(count) => Step::render(Self::admin_page(session, Some(format!("Migrated {} listings", count)))),
            Err(err) => Step::failed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::{Completion, Reply};
    use travelgo_store::memory::{
        MemoryBookingRepository, MemoryCatalogRepository, MemoryUserRepository, RecordingNotifier,
    };

    const ADMIN_EMAIL: &str = "admin@travelgo.local";
    const ADMIN_PASSWORD: &str = "letmein";

    struct Harness {
        workflow: Workflow,
        catalog: Arc<MemoryCatalogRepository>,
        users: Arc<MemoryUserRepository>,
        bookings: Arc<MemoryBookingRepository>,
        notifier: Arc<RecordingNotifier>,
    }

    fn harness() -> Harness {
        let catalog = Arc::new(MemoryCatalogRepository::new());
        let users = Arc::new(MemoryUserRepository::new());
        let bookings = Arc::new(MemoryBookingRepository::new());
        let notifier = Arc::new(RecordingNotifier::new());

        let workflow = Workflow::new(
            Backends {
                catalog: catalog.clone(),
                users: users.clone(),
                bookings: bookings.clone(),
                notifier: notifier.clone(),
            },
            AdminCredentials::new(ADMIN_EMAIL, ADMIN_PASSWORD),
            "TravelGo Booking Confirmation",
        );

        Harness { workflow, catalog, users, bookings, notifier }
    }

    async fn logged_in(h: &Harness, email: &str) -> SessionState {
        h.workflow
            .register(&RegisterForm {
                email: email.to_string(),
                name: "Asha".to_string(),
                password: "pw".into(),
            })
            .await;
        let mut session = SessionState::default();
        let step = h
            .workflow
            .login(&mut session, &LoginForm { email: email.to_string(), password: "pw".into() })
            .await;
        assert!(step.redirects_to(Route::Dashboard));
        session
    }

    fn book_form(booking_type: &str) -> BookForm {
        BookForm {
            booking_type: booking_type.to_string(),
            source: Some("Hyderabad".to_string()),
            destination: Some("Bangalore".to_string()),
            date: Some("2026-11-02".to_string()),
            details: "SRS Travels".to_string(),
            price: "610".to_string(),
        }
    }

    fn pay() -> PaymentForm {
        PaymentForm { method: "UPI".to_string(), reference: "txn-42".to_string() }
    }

    fn admin_session() -> SessionState {
        let mut session = SessionState::default();
        session.login_admin(ADMIN_EMAIL);
        session
    }

    #[tokio::test]
    async fn test_search_seeded_route() {
        let h = harness();
        h.workflow.admin_migrate(&admin_session()).await;

        let step = h
            .workflow
            .search(
                Category::Bus,
                &RouteSearchForm { source: " Hyderabad ".to_string(), destination: "Bangalore".to_string() },
            )
            .await;

        let page = step.page().unwrap();
        assert_eq!(page.view, View::Bus);
        assert_eq!(page.get("buses").unwrap().as_array().unwrap().len(), 2);
        assert_eq!(page.get("source").unwrap(), "Hyderabad");

        let reversed = h
            .workflow
            .search(
                Category::Bus,
                &RouteSearchForm { source: "Bangalore".to_string(), destination: "Hyderabad".to_string() },
            )
            .await;
        assert!(reversed.page().unwrap().get("buses").unwrap().as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_degrades_on_outage() {
        let h = harness();
        h.catalog.set_unavailable(true);

        let step = h.workflow.search_hotels(&CitySearchForm { city: "Goa".to_string() }).await;
        assert!(matches!(step.completion, Completion::Degraded(CoreError::StoreUnavailable(_))));
        assert!(step.page().unwrap().get("hotels").unwrap().as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_register_duplicate_shows_message() {
        let h = harness();
        let form = RegisterForm {
            email: "asha@example.com".to_string(),
            name: "Asha".to_string(),
            password: "pw".into(),
        };

        assert!(h.workflow.register(&form).await.redirects_to(Route::Login));

        let again = h.workflow.register(&form).await;
        assert_eq!(again.page().unwrap().get("message").unwrap(), "User already exists");
        assert!(matches!(again.completion, Completion::Rejected(CoreError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_login_counts_only_successes() {
        let h = harness();
        let _session = logged_in(&h, "asha@example.com").await;

        let mut session = SessionState::default();
        let failed = h
            .workflow
            .login(&mut session, &LoginForm { email: "asha@example.com".to_string(), password: "nope".into() })
            .await;
        assert_eq!(failed.page().unwrap().view, View::Login);
        assert!(!session.is_authenticated());

        let user = h.users.get_user("asha@example.com").await.unwrap().unwrap();
        assert_eq!(user.logins, 1);
    }

    #[tokio::test]
    async fn test_admin_login_skips_user_store() {
        let h = harness();
        let mut session = SessionState::default();
        let step = h
            .workflow
            .login(&mut session, &LoginForm { email: ADMIN_EMAIL.to_string(), password: ADMIN_PASSWORD.into() })
            .await;

        assert!(step.redirects_to(Route::Admin));
        assert!(session.is_admin());
        assert!(h.users.get_user(ADMIN_EMAIL).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_hotel_booking_goes_straight_to_payment() {
        let h = harness();
        let mut session = logged_in(&h, "asha@example.com").await;

        let step = h.workflow.book(&mut session, &book_form("Hotel"));
        assert_eq!(step.page().unwrap().view, View::Payment);

        let paid = h.workflow.payment(&mut session, &pay()).await;
        assert!(paid.redirects_to(Route::Dashboard));
        assert!(paid.is_succeeded());
        assert!(session.pending().is_none());

        let stored = h.bookings.scan_bookings("asha@example.com").await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].payment_reference, "txn-42");
    }

    #[tokio::test]
    async fn test_transport_booking_requires_seats() {
        let h = harness();
        let mut session = logged_in(&h, "asha@example.com").await;

        let step = h.workflow.book(&mut session, &book_form("Bus"));
        assert!(step.redirects_to(Route::SelectSeats));

        // Paying before seats keeps the draft
        let early = h.workflow.payment(&mut session, &pay()).await;
        assert!(early.redirects_to(Route::SelectSeats));
        assert!(session.pending().is_some());

        let seats = h.workflow.select_seats(&session);
        assert_eq!(seats.page().unwrap().view, View::SelectSeats);

        let confirmed = h
            .workflow
            .confirm_seats(&mut session, &SeatsForm { selected_seats: "A1,A2".to_string() });
        assert_eq!(confirmed.page().unwrap().view, View::Payment);

        let paid = h.workflow.payment(&mut session, &pay()).await;
        assert!(paid.is_succeeded());

        let stored = h.bookings.scan_bookings("asha@example.com").await.unwrap();
        assert_eq!(stored[0].details, "SRS Travels | Seats: A1,A2");
    }

    #[tokio::test]
    async fn test_second_payment_without_book_redirects_to_login() {
        let h = harness();
        let mut session = logged_in(&h, "asha@example.com").await;

        h.workflow.book(&mut session, &book_form("Hotel"));
        assert!(h.workflow.payment(&mut session, &pay()).await.is_succeeded());

        let again = h.workflow.payment(&mut session, &pay()).await;
        assert!(again.redirects_to(Route::Login));
        assert!(matches!(again.completion, Completion::Rejected(CoreError::NotAuthenticated)));
        assert_eq!(h.bookings.scan_bookings("asha@example.com").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_logout_abandons_draft() {
        let h = harness();
        let mut session = logged_in(&h, "asha@example.com").await;
        h.workflow.book(&mut session, &book_form("Hotel"));

        assert!(h.workflow.logout(&mut session).redirects_to(Route::Home));
        h.workflow
            .login(&mut session, &LoginForm { email: "asha@example.com".to_string(), password: "pw".into() })
            .await;

        let step = h.workflow.payment(&mut session, &pay()).await;
        assert!(step.redirects_to(Route::Login));
        assert!(h.bookings.scan_bookings("asha@example.com").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_payment_persistence_failure_is_swallowed() {
        let h = harness();
        let mut session = logged_in(&h, "asha@example.com").await;
        h.workflow.book(&mut session, &book_form("Hotel"));
        h.bookings.set_unavailable(true);

        let step = h.workflow.payment(&mut session, &pay()).await;
        assert!(step.redirects_to(Route::Dashboard));
        assert!(matches!(step.completion, Completion::Swallowed(CoreError::StoreUnavailable(_))));
        assert!(session.pending().is_none());
        assert!(h.notifier.published().is_empty());
    }

    #[tokio::test]
    async fn test_notification_failure_does_not_affect_booking() {
        let h = harness();
        let mut session = logged_in(&h, "asha@example.com").await;
        h.workflow.book(&mut session, &book_form("Hotel"));
        h.notifier.set_unavailable(true);

        let step = h.workflow.payment(&mut session, &pay()).await;
        assert!(step.redirects_to(Route::Dashboard));
        assert!(matches!(step.completion, Completion::Swallowed(CoreError::NotifyFailure(_))));
        assert_eq!(h.bookings.scan_bookings("asha@example.com").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_confirmation_message() {
        let h = harness();
        let mut session = logged_in(&h, "asha@example.com").await;
        h.workflow.book(&mut session, &book_form("Hotel"));
        h.workflow.payment(&mut session, &pay()).await;

        let published = h.notifier.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].message, "Booking Confirmed! SRS Travels for ₹610");
        assert_eq!(published[0].subject, "TravelGo Booking Confirmation");
    }

    #[tokio::test]
    async fn test_dashboard_degrades_to_empty_bookings() {
        let h = harness();
        let session = logged_in(&h, "asha@example.com").await;
        h.bookings.set_unavailable(true);

        let step = h.workflow.dashboard(&session).await;
        let page = step.page().unwrap();
        assert_eq!(page.get("name").unwrap(), "Asha");
        assert!(page.get("bookings").unwrap().as_array().unwrap().is_empty());
        assert!(matches!(step.completion, Completion::Degraded(_)));
    }

    #[tokio::test]
    async fn test_print_and_cancel() {
        let h = harness();
        let mut session = logged_in(&h, "asha@example.com").await;
        h.workflow.book(&mut session, &book_form("Hotel"));
        h.workflow.payment(&mut session, &pay()).await;
        let booking_id = h.bookings.scan_bookings("asha@example.com").await.unwrap()[0].booking_id.clone();

        let ticket = h.workflow.print_ticket(&session, &booking_id).await;
        assert_eq!(ticket.page().unwrap().view, View::Ticket);

        let mut other = logged_in(&h, "ravi@example.com").await;
        let foreign = h.workflow.print_ticket(&other, &booking_id).await;
        assert!(matches!(foreign.reply, Reply::NotFound(_)));

        // Cancelling someone else's id only touches the caller's key
        h.workflow
            .remove_booking(&other, &RemoveBookingForm { booking_id: booking_id.clone() })
            .await;
        assert_eq!(h.bookings.scan_bookings("asha@example.com").await.unwrap().len(), 1);
        h.workflow.logout(&mut other);

        let removed = h
            .workflow
            .remove_booking(&session, &RemoveBookingForm { booking_id: booking_id.clone() })
            .await;
        assert!(removed.redirects_to(Route::Dashboard));
        assert!(h.bookings.scan_bookings("asha@example.com").await.unwrap().is_empty());

        let missing = h
            .workflow
            .remove_booking(&session, &RemoveBookingForm { booking_id: "nothere1".to_string() })
            .await;
        assert!(missing.is_succeeded());
    }

    #[tokio::test]
    async fn test_anonymous_is_redirected_to_login() {
        let h = harness();
        let mut session = SessionState::default();

        assert!(h.workflow.book(&mut session, &book_form("Bus")).redirects_to(Route::Login));
        assert!(h.workflow.select_seats(&session).redirects_to(Route::Login));
        assert!(h.workflow.dashboard(&session).await.redirects_to(Route::Login));
        assert!(h.workflow.print_ticket(&session, "ab12cd34").await.redirects_to(Route::Login));
    }

    #[tokio::test]
    async fn test_invalid_book_form_is_bad_request() {
        let h = harness();
        let mut session = logged_in(&h, "asha@example.com").await;

        let mut form = book_form("Cruise");
        assert!(matches!(h.workflow.book(&mut session, &form).reply, Reply::BadRequest(_)));

        form = book_form("Bus");
        form.price = "free".to_string();
        assert!(matches!(h.workflow.book(&mut session, &form).reply, Reply::BadRequest(_)));
        assert!(session.pending().is_none());
    }

    #[tokio::test]
    async fn test_price_the_store_would_round_is_rejected() {
        let h = harness();
        let mut session = logged_in(&h, "asha@example.com").await;

        let mut form = book_form("Hotel");
        form.price = "610.555".to_string();
        let step = h.workflow.book(&mut session, &form);
        assert!(matches!(step.reply, Reply::BadRequest(_)));
        assert!(matches!(step.completion, Completion::Rejected(CoreError::Validation(_))));

        form.price = "12345678901".to_string();
        assert!(matches!(h.workflow.book(&mut session, &form).reply, Reply::BadRequest(_)));
        assert!(session.pending().is_none());

        // The confirmation quotes the same two-place price the booking keeps
        form.price = "610.50".to_string();
        h.workflow.book(&mut session, &form);
        h.workflow.payment(&mut session, &pay()).await;
        let stored = h.bookings.scan_bookings("asha@example.com").await.unwrap();
        assert_eq!(stored[0].price.to_string(), "610.50");
        assert_eq!(h.notifier.published()[0].message, "Booking Confirmed! SRS Travels for ₹610.50");
    }

    #[tokio::test]
    async fn test_admin_surface_is_gated() {
        let h = harness();
        let user_session = logged_in(&h, "asha@example.com").await;

        let step = h.workflow.admin_migrate(&user_session).await;
        assert!(step.redirects_to(Route::Home));
        assert!(h.catalog.is_empty());

        let hotel = HotelForm {
            location: "Goa".to_string(),
            name: "Sea Breeze".to_string(),
            price: "1800".to_string(),
            details: "Beachfront".to_string(),
        };
        let added = h.workflow.admin_add_hotel(&admin_session(), hotel).await;
        assert_eq!(added.page().unwrap().view, View::Admin);

        let found = h.workflow.search_hotels(&CitySearchForm { city: "goa".to_string() }).await;
        assert_eq!(found.page().unwrap().get("hotels").unwrap().as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_admin_add_fails_on_store_outage() {
        let h = harness();
        h.catalog.set_unavailable(true);

        let listing = NewListing {
            service_id: None,
            category: "flight".to_string(),
            source: Some("Hyderabad".to_string()),
            destination: Some("Chennai".to_string()),
            location: None,
            name: "Akasa".to_string(),
            price: "2700".to_string(),
            details: "Economy".to_string(),
        };
        let step = h.workflow.admin_add_listing(&admin_session(), listing).await;
        assert!(matches!(step.reply, Reply::Failed(_)));
    }
}
