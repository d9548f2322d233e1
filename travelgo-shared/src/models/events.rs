use rust_decimal::Decimal;

/// Payload published when a booking has been paid for and persisted.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct BookingConfirmedEvent {
    pub booking_id: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub price: Decimal,
    pub timestamp: i64,
}

impl BookingConfirmedEvent {
    pub fn new(booking_id: &str, email: &str, subject: &str, message: &str, price: Decimal) -> Self {
        Self {
            booking_id: booking_id.to_string(),
            email: email.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
            price,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}
