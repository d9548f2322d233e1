use crate::repository::RepoResult;
use async_trait::async_trait;
use travelgo_shared::models::BookingConfirmedEvent;

/// One-way publish of booking confirmations.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, event: &BookingConfirmedEvent) -> RepoResult<()>;
}
