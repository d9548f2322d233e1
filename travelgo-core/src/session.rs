use crate::booking::BookingDraft;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Per-browser state carried between requests.
///
/// It is loaded by the HTTP layer, handed to the workflow by reference and
/// written back afterwards. At most one draft is held at a time; starting a
/// new one replaces the old one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionState {
    pub user: Option<SessionUser>,
    pub pending_booking: Option<BookingDraft>,
}

impl SessionState {
    pub fn login(&mut self, email: &str) {
        self.user = Some(SessionUser {
            email: email.to_string(),
            is_admin: false,
        });
    }

    pub fn login_admin(&mut self, email: &str) {
        self.user = Some(SessionUser {
            email: email.to_string(),
            is_admin: true,
        });
    }

    /// Drop everything, including an in-flight draft.
    pub fn clear(&mut self) {
        *self = SessionState::default();
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.email.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_admin)
    }

    pub fn is_empty(&self) -> bool {
        self.user.is_none() && self.pending_booking.is_none()
    }

    pub fn start_draft(&mut self, draft: BookingDraft) {
        self.pending_booking = Some(draft);
    }

    pub fn pending(&self) -> Option<&BookingDraft> {
        self.pending_booking.as_ref()
    }

    pub fn pending_mut(&mut self) -> Option<&mut BookingDraft> {
        self.pending_booking.as_mut()
    }

    /// Consume the pending draft; a second call returns `None`.
    pub fn take_pending(&mut self) -> Option<BookingDraft> {
        self.pending_booking.take()
    }
}
