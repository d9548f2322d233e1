use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use travelgo_core::repository::{BookingRepository, RepoResult};
use travelgo_core::{Booking, BookingType, DraftError};

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    email: String,
    booking_id: String,
    booking_type: String,
    source: String,
    destination: String,
    travel_date: String,
    details: String,
    price: Decimal,
    payment_method: String,
    payment_reference: String,
}

impl TryFrom<BookingRow> for Booking {
    type Error = DraftError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Booking {
            booking_id: row.booking_id,
            email: row.email,
            booking_type: row.booking_type.parse::<BookingType>()?,
            source: row.source,
            destination: row.destination,
            date: row.travel_date,
            details: row.details,
            price: row.price,
            payment_method: row.payment_method,
            payment_reference: row.payment_reference,
        })
    }
}

const SELECT_BOOKING: &str = "SELECT email, booking_id, booking_type, source, destination, travel_date, details, price, payment_method, payment_reference FROM bookings";

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn put_booking(&self, booking: &Booking) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings (email, booking_id, booking_type, source, destination, travel_date, details, price, payment_method, payment_reference)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (email, booking_id) DO UPDATE
            SET booking_type = EXCLUDED.booking_type, source = EXCLUDED.source, destination = EXCLUDED.destination,
                travel_date = EXCLUDED.travel_date, details = EXCLUDED.details, price = EXCLUDED.price,
                payment_method = EXCLUDED.payment_method, payment_reference = EXCLUDED.payment_reference
            "#,
        )
        .bind(&booking.email)
        .bind(&booking.booking_id)
        .bind(booking.booking_type.as_str())
        .bind(&booking.source)
        .bind(&booking.destination)
        .bind(&booking.date)
        .bind(&booking.details)
        .bind(booking.price)
        .bind(&booking.payment_method)
        .bind(&booking.payment_reference)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_booking(&self, email: &str, booking_id: &str) -> RepoResult<Option<Booking>> {
        let row: Option<BookingRow> =
            sqlx::query_as(&format!("{} WHERE email = $1 AND booking_id = $2", SELECT_BOOKING))
                .bind(email)
                .bind(booking_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Booking::try_from).transpose()?)
    }

    async fn scan_bookings(&self, email: &str) -> RepoResult<Vec<Booking>> {
        let rows: Vec<BookingRow> =
            sqlx::query_as(&format!("{} WHERE email = $1 ORDER BY booking_id", SELECT_BOOKING))
                .bind(email)
                .fetch_all(&self.pool)
                .await?;

        let bookings = rows
            .into_iter()
            .map(Booking::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(bookings)
    }

    async fn delete_booking(&self, email: &str, booking_id: &str) -> RepoResult<()> {
        sqlx::query("DELETE FROM bookings WHERE email = $1 AND booking_id = $2")
            .bind(email)
            .bind(booking_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
