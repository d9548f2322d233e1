use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use travelgo_api::{app, state::{AppState, SessionConfig}};
use travelgo_booking::{Backends, Workflow};
use travelgo_catalog::seed_listings;
use travelgo_core::repository::SessionStore;
use travelgo_core::{AdminCredentials, Notifier};
use travelgo_store::app_config::{Config, StorageBackend};
use travelgo_store::memory::{
    MemoryBookingRepository, MemoryCatalogRepository, MemorySessionStore, MemoryUserRepository,
};
use travelgo_store::{
    DbClient, EventProducer, KafkaNotifier, LogNotifier, PgBookingRepository, PgCatalogRepository,
    PgUserRepository, RedisSessionStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "travelgo_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting TravelGo on port {}", config.server.port);

    // Kafka Connection
    let notifier: Arc<dyn Notifier> = match config.kafka.brokers.as_deref().filter(|b| !b.is_empty()) {
        Some(brokers) => {
            let producer = EventProducer::new(brokers).context("Failed to create Kafka producer")?;
            Arc::new(KafkaNotifier::new(producer, &config.notifications.topic))
        }
        None => {
            tracing::warn!("No Kafka brokers configured, booking confirmations are only logged");
            Arc::new(LogNotifier)
        }
    };

    let (backends, sessions): (Backends, Arc<dyn SessionStore>) = match config.storage.backend {
        StorageBackend::Postgres => {
            let db = DbClient::new(&config.database.url, config.database.max_connections)
                .await
                .context("Failed to connect to Postgres")?;
            db.migrate().await.context("Failed to run migrations")?;

            let sessions = RedisSessionStore::new(&config.redis.url, config.session.ttl_seconds)
                .await
                .context("Failed to connect to Redis")?;

            let backends = Backends {
                catalog: Arc::new(PgCatalogRepository::new(db.pool.clone())),
                users: Arc::new(PgUserRepository::new(db.pool.clone())),
                bookings: Arc::new(PgBookingRepository::new(db.pool.clone())),
                notifier,
            };
            (backends, Arc::new(sessions))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, nothing survives a restart");
            let backends = Backends {
                catalog: Arc::new(MemoryCatalogRepository::new()),
                users: Arc::new(MemoryUserRepository::new()),
                bookings: Arc::new(MemoryBookingRepository::new()),
                notifier,
            };
            let ttl = Duration::from_secs(config.session.ttl_seconds);
            (backends, Arc::new(MemorySessionStore::with_ttl(ttl)))
        }
    };

    let workflow = Workflow::new(
        backends,
        AdminCredentials::new(&config.admin.email, &config.admin.password),
        &config.notifications.subject,
    );

    if config.seeds_on_start() {
        let count = workflow
            .catalog()
            .bulk_load(seed_listings())
            .await
            .context("Failed to seed listings")?;
        tracing::info!("Seeded {} listings", count);
    } else if config.storage.seed_on_start {
        tracing::warn!("storage.seed_on_start ignored for the postgres backend, use /admin/migrate");
    }

    let app_state = AppState {
        workflow: Arc::new(workflow),
        sessions,
        session: SessionConfig {
            cookie_name: config.session.cookie_name.clone(),
        },
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
