use axum::{
    extract::State,
    response::Response,
    routing::{get, post},
    Form, Router,
};
use travelgo_booking::forms::HotelForm;
use travelgo_catalog::NewListing;

use crate::{session::Session, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(panel))
        .route("/admin/add_listing", post(add_listing))
        .route("/admin/add_hotel", post(add_hotel))
        .route("/admin/migrate", post(migrate))
}

async fn panel(State(state): State<AppState>, session: Session) -> Response {
    let step = state.workflow.admin_panel(&session.state);
    session.respond(&state, step).await
}

async fn add_listing(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<NewListing>,
) -> Response {
    let step = state.workflow.admin_add_listing(&session.state, form).await;
    session.respond(&state, step).await
}

async fn add_hotel(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<HotelForm>,
) -> Response {
    let step = state.workflow.admin_add_hotel(&session.state, form).await;
    session.respond(&state, step).await
}

async fn migrate(State(state): State<AppState>, session: Session) -> Response {
    let step = state.workflow.admin_migrate(&session.state).await;
    session.respond(&state, step).await
}
