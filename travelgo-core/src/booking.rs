use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use travelgo_catalog::Category;
use uuid::Uuid;

/// Placeholder stored for optional draft fields the request left out.
pub const NOT_APPLICABLE: &str = "N/A";

/// Category label echoed from the listing that was booked
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BookingType {
    Bus,
    Train,
    Flight,
    Hotel,
}

impl BookingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingType::Bus => "Bus",
            BookingType::Train => "Train",
            BookingType::Flight => "Flight",
            BookingType::Hotel => "Hotel",
        }
    }

    /// Transport bookings pick seats before payment.
    pub fn requires_seats(&self) -> bool {
        !matches!(self, BookingType::Hotel)
    }
}

impl fmt::Display for BookingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingType {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bus" => Ok(BookingType::Bus),
            "train" => Ok(BookingType::Train),
            "flight" => Ok(BookingType::Flight),
            "hotel" => Ok(BookingType::Hotel),
            other => Err(DraftError::UnknownType(other.to_string())),
        }
    }
}

impl From<Category> for BookingType {
    fn from(category: Category) -> Self {
        match category {
            Category::Bus => BookingType::Bus,
            Category::Train => BookingType::Train,
            Category::Flight => BookingType::Flight,
            Category::Hotel => BookingType::Hotel,
        }
    }
}

/// A paid booking, keyed by `(email, booking_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub booking_id: String,
    pub email: String,
    #[serde(rename = "type")]
    pub booking_type: BookingType,
    pub source: String,
    pub destination: String,
    pub date: String,
    pub details: String,
    pub price: Decimal,
    pub payment_method: String,
    pub payment_reference: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DraftStage {
    AwaitingSeats,
    ReadyForPayment,
}

/// An in-progress booking that lives only in the session until paid for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingDraft {
    pub booking_id: String,
    pub email: String,
    #[serde(rename = "type")]
    pub booking_type: BookingType,
    pub source: String,
    pub destination: String,
    pub date: String,
    pub details: String,
    pub price: Decimal,
    pub stage: DraftStage,
}

/// Request fields captured by the "book" action.
#[derive(Debug, Clone)]
pub struct DraftRequest {
    pub booking_type: BookingType,
    pub source: Option<String>,
    pub destination: Option<String>,
    pub date: Option<String>,
    pub details: String,
    pub price: Decimal,
}

impl BookingDraft {
    /// Start a draft owned by `email` with a freshly generated id.
    pub fn new(email: &str, request: DraftRequest) -> Self {
        let stage = if request.booking_type.requires_seats() {
            DraftStage::AwaitingSeats
        } else {
            DraftStage::ReadyForPayment
        };

        Self {
            booking_id: new_booking_id(),
            email: email.to_string(),
            booking_type: request.booking_type,
            source: or_not_applicable(request.source),
            destination: or_not_applicable(request.destination),
            date: or_not_applicable(request.date),
            details: request.details,
            price: request.price,
            stage,
        }
    }

    pub fn is_ready_for_payment(&self) -> bool {
        self.stage == DraftStage::ReadyForPayment
    }

    /// Transition: AwaitingSeats → ReadyForPayment, appending the seat label.
    pub fn confirm_seats(&mut self, selected: &str) -> Result<(), DraftError> {
        if !self.booking_type.requires_seats() {
            return Err(DraftError::SeatsNotApplicable(self.booking_type));
        }
        if self.stage != DraftStage::AwaitingSeats {
            return Err(DraftError::SeatsAlreadyConfirmed);
        }

        self.details = format!("{} | Seats: {}", self.details, selected.trim());
        self.stage = DraftStage::ReadyForPayment;
        Ok(())
    }

    /// Turn the draft into a persisted-shape booking, stamped with the payer.
    pub fn into_booking(self, email: &str, payment_method: &str, payment_reference: &str) -> Result<Booking, DraftError> {
        if self.stage != DraftStage::ReadyForPayment {
            return Err(DraftError::AwaitingSeats);
        }

        Ok(Booking {
            booking_id: self.booking_id,
            email: email.to_string(),
            booking_type: self.booking_type,
            source: self.source,
            destination: self.destination,
            date: self.date,
            details: self.details,
            price: self.price,
            payment_method: payment_method.to_string(),
            payment_reference: payment_reference.to_string(),
        })
    }
}

/// Eight hex characters taken from a v4 uuid.
pub fn new_booking_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

fn or_not_applicable(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| NOT_APPLICABLE.to_string())
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Unknown booking type: {0}")]
    UnknownType(String),

    #[error("{0} bookings have no seats to select")]
    SeatsNotApplicable(BookingType),

    #[error("Seats were already confirmed for this booking")]
    SeatsAlreadyConfirmed,

    #[error("Seats must be selected before payment")]
    AwaitingSeats,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(booking_type: BookingType) -> DraftRequest {
        DraftRequest {
            booking_type,
            source: Some("Hyderabad".to_string()),
            destination: Some("Bangalore".to_string()),
            date: None,
            details: "SRS Travels".to_string(),
            price: Decimal::from(610),
        }
    }

    #[test]
    fn test_booking_id_shape() {
        let id = new_booking_id();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_transport_draft_lifecycle() {
        let mut draft = BookingDraft::new("asha@example.com", request(BookingType::Bus));
        assert_eq!(draft.stage, DraftStage::AwaitingSeats);
        assert_eq!(draft.date, NOT_APPLICABLE);

        // AwaitingSeats cannot be paid for
        let premature = draft.clone().into_booking("asha@example.com", "UPI", "ref-1");
        assert_eq!(premature, Err(DraftError::AwaitingSeats));

        // AwaitingSeats → ReadyForPayment
        draft.confirm_seats("A1, A2").unwrap();
        assert_eq!(draft.details, "SRS Travels | Seats: A1, A2");
        assert!(draft.is_ready_for_payment());

        // Seats are appended once
        assert_eq!(draft.confirm_seats("B1"), Err(DraftError::SeatsAlreadyConfirmed));
        assert_eq!(draft.details, "SRS Travels | Seats: A1, A2");

        let booking = draft.into_booking("asha@example.com", "UPI", "ref-1").unwrap();
        assert_eq!(booking.payment_method, "UPI");
        assert_eq!(booking.payment_reference, "ref-1");
        assert_eq!(booking.booking_type, BookingType::Bus);
    }

    #[test]
    fn test_hotel_draft_is_ready_immediately() {
        let mut draft = BookingDraft::new("asha@example.com", request(BookingType::Hotel));
        assert!(draft.is_ready_for_payment());
        assert_eq!(draft.confirm_seats("A1"), Err(DraftError::SeatsNotApplicable(BookingType::Hotel)));
        assert!(draft.into_booking("asha@example.com", "Card", "4242").is_ok());
    }

    #[test]
    fn test_booking_type_parsing() {
        assert_eq!("Flight".parse::<BookingType>().unwrap(), BookingType::Flight);
        assert_eq!("hotel".parse::<BookingType>().unwrap(), BookingType::Hotel);
        assert!("Cruise".parse::<BookingType>().is_err());
        assert_eq!(BookingType::from(Category::Train), BookingType::Train);
    }

    #[test]
    fn test_booking_serializes_type_label() {
        let draft = BookingDraft::new("asha@example.com", request(BookingType::Hotel));
        let booking = draft.into_booking("asha@example.com", "Card", "4242").unwrap();
        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(json["type"], "Hotel");
        assert_eq!(json["price"], "610");
    }
}
