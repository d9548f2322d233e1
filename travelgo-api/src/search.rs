use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Form, Router,
};
use travelgo_booking::forms::{CitySearchForm, RouteSearchForm};
use travelgo_booking::Step;
use travelgo_catalog::Category;

use crate::{session::Session, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/hotels", get(hotel_form).post(search_hotels))
        .route("/{category}", get(route_form).post(search_route))
}

async fn home(State(state): State<AppState>, session: Session) -> Response {
    let step = state.workflow.home(&session.state);
    session.respond(&state, step).await
}

fn transport(category: &str) -> Option<Category> {
    category.parse::<Category>().ok().filter(Category::is_transport)
}

async fn route_form(
    State(state): State<AppState>,
    Path(category): Path<String>,
    session: Session,
) -> Response {
    let step = match transport(&category) {
        Some(category) => state.workflow.search_form(category),
        None => Step::not_found("Page not found"),
    };
    session.respond(&state, step).await
}

async fn search_route(
    State(state): State<AppState>,
    Path(category): Path<String>,
    session: Session,
    Form(form): Form<RouteSearchForm>,
) -> Response {
    let step = match transport(&category) {
        Some(category) => state.workflow.search(category, &form).await,
        None => Step::not_found("Page not found"),
    };
    session.respond(&state, step).await
}

async fn hotel_form(State(state): State<AppState>, session: Session) -> Response {
    let step = state.workflow.search_form(Category::Hotel);
    session.respond(&state, step).await
}

async fn search_hotels(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CitySearchForm>,
) -> Response {
    let step = state.workflow.search_hotels(&form).await;
    session.respond(&state, step).await
}
