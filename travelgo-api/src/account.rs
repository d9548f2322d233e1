use axum::{
    extract::State,
    response::Response,
    routing::get,
    Form, Router,
};
use travelgo_booking::forms::{LoginForm, RegisterForm};

use crate::{session::Session, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_form).post(register))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
        .route("/dashboard", get(dashboard))
}

async fn register_form(State(state): State<AppState>, session: Session) -> Response {
    let step = state.workflow.register_form();
    session.respond(&state, step).await
}

async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Response {
    let step = state.workflow.register(&form).await;
    session.respond(&state, step).await
}

async fn login_form(State(state): State<AppState>, session: Session) -> Response {
    let step = state.workflow.login_form();
    session.respond(&state, step).await
}

async fn login(
    State(state): State<AppState>,
    mut session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let step = state.workflow.login(&mut session.state, &form).await;
    session.respond(&state, step).await
}

async fn logout(State(state): State<AppState>, mut session: Session) -> Response {
    let step = state.workflow.logout(&mut session.state);
    session.respond(&state, step).await
}

async fn dashboard(State(state): State<AppState>, session: Session) -> Response {
    let step = state.workflow.dashboard(&session.state).await;
    session.respond(&state, step).await
}
