//! Calorie Tracker
//!
//! A single-user calorie tracker backed by a local SQLite file.
//!
//! ## Architecture
//!
//! - Console: terminal rendering and input
//! - Controller: view-model holding the interaction state
//! - Services: validation and business logic
//! - Repositories: data access
//! - Database: SQLite with SQLx

use anyhow::Result;
use calorie_tracker::{config, console::Console, controller::Controller, db, state::AppState};
use tokio::io::BufReader;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        database = %config.database.path,
        locale = %config.ui.locale,
        "Starting Calorie Tracker"
    );
    debug!(config = %config.to_toml()?, "Effective configuration");

    let state = AppState::open(config).await?;
    db::health_check(state.db()).await?;
    let controller = Controller::new(state.clone());

    let stdin = BufReader::new(tokio::io::stdin());
    let mut console = Console::new(controller, stdin, std::io::stdout());
    console.run().await?;

    state.db().close().await;
    info!("Calorie Tracker closed");
    Ok(())
}

/// Initialize tracing/logging
///
/// Logs go to stderr so they never interleave with the console on stdout.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "calorie_tracker=warn,sqlx=warn".into()
        } else {
            "calorie_tracker=info,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        // Compact single-line logging keeps the terminal readable
        subscriber
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}
