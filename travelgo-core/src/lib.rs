pub mod booking;
pub mod identity;
pub mod notifier;
pub mod repository;
pub mod session;
pub mod stores;

pub use booking::{Booking, BookingDraft, BookingType, DraftError, DraftRequest, DraftStage};
pub use identity::{AdminCredentials, User};
pub use notifier::Notifier;
pub use session::{SessionState, SessionUser};
pub use stores::{BookingStore, CatalogStore, Scanned, UserStore};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Already exists: {0}")]
    AlreadyExists(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("Notification failed: {0}")]
    NotifyFailure(String),
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl From<travelgo_catalog::ListingError> for CoreError {
    fn from(err: travelgo_catalog::ListingError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

impl From<DraftError> for CoreError {
    fn from(err: DraftError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
