//! Cookie-token session binding.
//!
//! The browser only holds an opaque token; the [`SessionState`] itself lives
//! in the configured [`SessionStore`](travelgo_core::repository::SessionStore).
//! Handlers take a [`Session`], hand `session.state` to the workflow and then
//! call [`Session::respond`], which writes the state back and renders the step.

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use std::convert::Infallible;
use tracing::{debug, error, warn};
use travelgo_booking::{Completion, Page, Reply, Step};
use travelgo_core::SessionState;
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

pub struct Session {
    jar: CookieJar,
    token: Option<String>,
    /// The store could not be read; the stored state is unknown, not empty.
    load_failed: bool,
    pub state: SessionState,
}

impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(&state.session.cookie_name)
            .map(|c| c.value().to_string())
            .filter(|t| !t.is_empty());

        let mut load_failed = false;
        let loaded = match &token {
            Some(token) => match state.sessions.load(token).await {
                Ok(found) => found,
                Err(e) => {
                    // Treated as anonymous for this request only
                    warn!("Session lookup failed: {}", e);
                    load_failed = true;
                    None
                }
            },
            None => None,
        };

        Ok(Session {
            jar,
            token,
            load_failed,
            state: loaded.unwrap_or_default(),
        })
    }
}

impl Session {
    /// Persist the (possibly mutated) state and turn the step into a response.
    pub async fn respond(self, app: &AppState, step: Step) -> Response {
        log_completion(&step.completion);
        let jar = self.commit(app).await;
        let response = reply_into_response(step.reply).unwrap_or_else(IntoResponse::into_response);
        (jar, response).into_response()
    }

    async fn commit(self, app: &AppState) -> CookieJar {
        let cookie_name = app.session.cookie_name.clone();

        if self.state.is_empty() {
            // Leave whatever the store holds for the next request
            if self.load_failed {
                return self.jar;
            }
            let Some(token) = self.token else {
                return self.jar;
            };
            if let Err(e) = app.sessions.remove(&token).await {
                warn!("Session {} not removed: {}", token, e);
            }
            return self.jar.remove(Cookie::build((cookie_name, String::new())).path("/"));
        }

        // Saved on every request so the store TTL slides
        let token = self.token.unwrap_or_else(|| Uuid::new_v4().to_string());
        if let Err(e) = app.sessions.save(&token, &self.state).await {
            error!("Session {} not saved: {}", token, e);
            return self.jar;
        }

        self.jar.add(
            Cookie::build((cookie_name, token))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax),
        )
    }
}

fn log_completion(completion: &Completion) {
    match completion {
        Completion::Succeeded => {}
        Completion::Rejected(reason) => debug!("Request rejected: {}", reason),
        Completion::Degraded(reason) => warn!("Served degraded response: {}", reason),
        Completion::Swallowed(reason) => warn!("Failure hidden from user: {}", reason),
        Completion::Failed(reason) => error!("Request failed: {}", reason),
    }
}

#[derive(Serialize)]
struct Rendered<'a> {
    view: travelgo_booking::View,
    context: &'a serde_json::Map<String, serde_json::Value>,
}

fn render(page: &Page) -> Response {
    let body = Rendered {
        view: page.view,
        context: &page.context,
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Render contract: pages as JSON, redirects as 303, failures as JSON errors.
pub fn reply_into_response(reply: Reply) -> Result<Response, AppError> {
    match reply {
        Reply::Render(page) => Ok(render(&page)),
        Reply::Redirect(route) => Ok(Redirect::to(route.path()).into_response()),
        Reply::NotFound(msg) => Err(AppError::NotFound(msg)),
        Reply::BadRequest(msg) => Err(AppError::BadRequest(msg)),
        Reply::Failed(msg) => Err(AppError::InternalServerError(msg)),
    }
}
