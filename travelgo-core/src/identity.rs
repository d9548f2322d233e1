use serde::{Deserialize, Serialize};
use travelgo_shared::Masked;

/// A registered traveller, keyed by email.
///
/// The password is kept in clear text and compared by equality; it is only
/// masked in logs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub email: String,
    pub name: String,
    pub password: Masked<String>,
    pub logins: i64,
}

impl User {
    pub fn new(email: &str, name: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            name: name.to_string(),
            password: Masked::from(password),
            logins: 0,
        }
    }

    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password.expose() == candidate
    }
}

/// Fixed credential pair that unlocks the admin surface.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub email: String,
    pub password: Masked<String>,
}

impl AdminCredentials {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: Masked::from(password),
        }
    }

    pub fn matches(&self, email: &str, password: &str) -> bool {
        !self.email.is_empty() && self.email == email && self.password.expose() == password
    }
}
