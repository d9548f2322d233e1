use axum::{
    extract::{Path, State},
    response::Response,
    routing::{get, post},
    Form, Router,
};
use travelgo_booking::forms::{BookForm, PaymentForm, RemoveBookingForm, SeatsForm};

use crate::{session::Session, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/book", post(book))
        .route("/select_seats", get(select_seats))
        .route("/confirm_seats", post(confirm_seats))
        .route("/payment", post(payment))
        .route("/remove_booking", post(remove_booking))
        .route("/print_ticket/{booking_id}", get(print_ticket))
}

async fn book(
    State(state): State<AppState>,
    mut session: Session,
    Form(form): Form<BookForm>,
) -> Response {
    let step = state.workflow.book(&mut session.state, &form);
    session.respond(&state, step).await
}

async fn select_seats(State(state): State<AppState>, session: Session) -> Response {
    let step = state.workflow.select_seats(&session.state);
    session.respond(&state, step).await
}

async fn confirm_seats(
    State(state): State<AppState>,
    mut session: Session,
    Form(form): Form<SeatsForm>,
) -> Response {
    let step = state.workflow.confirm_seats(&mut session.state, &form);
    session.respond(&state, step).await
}

async fn payment(
    State(state): State<AppState>,
    mut session: Session,
    Form(form): Form<PaymentForm>,
) -> Response {
    let step = state.workflow.payment(&mut session.state, &form).await;
    session.respond(&state, step).await
}

async fn remove_booking(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveBookingForm>,
) -> Response {
    let step = state.workflow.remove_booking(&session.state, &form).await;
    session.respond(&state, step).await
}

async fn print_ticket(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
    session: Session,
) -> Response {
    let step = state.workflow.print_ticket(&session.state, &booking_id).await;
    session.respond(&state, step).await
}
