//! CourseApp API Server
//!
//! CRUD backend for a course-management domain: students, instructors,
//! courses, lessons, exams, exam results and registrations.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use sea_orm::{ConnectOptions, Database};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::SeaOrmUnitOfWorkFactory;
use config::Config;
use domain::ports::UnitOfWorkFactory;

/// Application state shared across all handlers.
///
/// Holds only the unit-of-work factory; managers and units of work are
/// created per request.
pub struct AppState<F> {
    pub units: Arc<F>,
}

impl<F: UnitOfWorkFactory> AppState<F> {
    pub fn new(units: Arc<F>) -> Self {
        Self { units }
    }
}

// Manual impl: `F` itself need not be `Clone`
impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            units: self.units.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,courseapp_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting CourseApp API...");

    // Load configuration
    let config = Config::from_env()?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    let state = AppState::new(Arc::new(SeaOrmUnitOfWorkFactory::new(db)));
    let app = handlers::router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
