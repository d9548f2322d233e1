use serde::Deserialize;
use travelgo_shared::Masked;

#[derive(Debug, Clone, Deserialize)]
pub struct RouteSearchForm {
    pub source: String,
    pub destination: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CitySearchForm {
    pub city: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub name: String,
    pub password: Masked<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: Masked<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookForm {
    #[serde(rename = "type")]
    pub booking_type: String,
    pub source: Option<String>,
    pub destination: Option<String>,
    pub date: Option<String>,
    pub details: String,
    pub price: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeatsForm {
    #[serde(default)]
    pub selected_seats: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentForm {
    pub method: String,
    pub reference: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoveBookingForm {
    pub booking_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HotelForm {
    pub location: String,
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub details: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_are_masked_in_logs() {
        let login = LoginForm {
            email: "asha@example.com".to_string(),
            password: "hunter2".into(),
        };
        let rendered = format!("{:?}", login);
        assert!(rendered.contains("asha@example.com"));
        assert!(!rendered.contains("hunter2"));

        let register = RegisterForm {
            email: "asha@example.com".to_string(),
            name: "Asha".to_string(),
            password: "hunter2".into(),
        };
        assert!(!format!("{:?}", register).contains("hunter2"));
        assert_eq!(register.password.expose(), "hunter2");
    }
}
