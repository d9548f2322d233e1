pub mod app_config;
pub mod booking_repo;
pub mod catalog_repo;
pub mod database;
pub mod events;
pub mod memory;
pub mod redis_repo;
pub mod user_repo;

pub use booking_repo::PgBookingRepository;
pub use catalog_repo::PgCatalogRepository;
pub use database::DbClient;
pub use events::{EventProducer, KafkaNotifier, LogNotifier};
pub use redis_repo::RedisSessionStore;
pub use user_repo::PgUserRepository;
