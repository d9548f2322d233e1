use std::sync::Arc;
use travelgo_booking::Workflow;
use travelgo_core::repository::SessionStore;

#[derive(Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
}

#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<Workflow>,
    pub sessions: Arc<dyn SessionStore>,
    pub session: SessionConfig,
}
