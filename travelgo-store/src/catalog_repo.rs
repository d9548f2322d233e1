use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use travelgo_catalog::{Category, Listing, ListingFilter};
use travelgo_core::repository::{CatalogRepository, RepoResult};

pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ListingRow {
    service_id: String,
    category: String,
    source: Option<String>,
    destination: Option<String>,
    location: Option<String>,
    name: String,
    price: Decimal,
    details: String,
}

impl TryFrom<ListingRow> for Listing {
    type Error = travelgo_catalog::ListingError;

    fn try_from(row: ListingRow) -> Result<Self, Self::Error> {
        Ok(Listing {
            service_id: row.service_id,
            category: row.category.parse::<Category>()?,
            source: row.source,
            destination: row.destination,
            location: row.location,
            name: row.name,
            price: row.price,
            details: row.details,
        })
    }
}

const SELECT_LISTING: &str =
    "SELECT service_id, category, source, destination, location, name, price, details FROM listings";

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn insert_listing(&self, listing: &Listing) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO listings (service_id, category, source, destination, location, name, price, details)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (service_id) DO UPDATE
            SET category = EXCLUDED.category, source = EXCLUDED.source, destination = EXCLUDED.destination,
                location = EXCLUDED.location, name = EXCLUDED.name, price = EXCLUDED.price, details = EXCLUDED.details
            "#,
        )
        .bind(&listing.service_id)
        .bind(listing.category.as_str())
        .bind(&listing.source)
        .bind(&listing.destination)
        .bind(&listing.location)
        .bind(&listing.name)
        .bind(listing.price)
        .bind(&listing.details)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn scan_listings(&self, filter: &ListingFilter) -> RepoResult<Vec<Listing>> {
        // Same predicate as ListingFilter::matches, pushed down to the database
        let rows: Vec<ListingRow> = match filter {
            ListingFilter::Route { category, source, destination } => {
                sqlx::query_as(&format!(
                    "{} WHERE category = $1 AND lower(source) = lower($2) AND lower(destination) = lower($3) ORDER BY seq",
                    SELECT_LISTING
                ))
                .bind(category.as_str())
                .bind(source)
                .bind(destination)
                .fetch_all(&self.pool)
                .await?
            }
            ListingFilter::City { location } => {
                sqlx::query_as(&format!(
                    "{} WHERE category = $1 AND lower(location) = lower($2) ORDER BY seq",
                    SELECT_LISTING
                ))
                .bind(Category::Hotel.as_str())
                .bind(location)
                .fetch_all(&self.pool)
                .await?
            }
        };

        let listings = rows
            .into_iter()
            .map(Listing::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(listings)
    }
}
