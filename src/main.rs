//! SnapComponent API server.

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use snap_component::adapters::ai::{OpenAIVisionConfig, OpenAIVisionGenerator};
use snap_component::adapters::auth::{JwtConfig, JwtSessionValidator};
use snap_component::adapters::http::{api_router, AppState, BillingSettings, RouterSettings};
use snap_component::adapters::postgres::{PostgresConversionRepository, PostgresUserRepository};
use snap_component::adapters::storage::LocalImageStorage;
use snap_component::adapters::stripe::{StripeConfig, StripePaymentAdapter};
use snap_component::config::{AppConfig, ConfigError, ValidationError};
use snap_component::domain::billing::StripeWebhookVerifier;
use snap_component::domain::conversion::UploadPolicy;
use snap_component::ports::{GenerationError, PaymentError};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migrations: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Vision model client: {0}")]
    Generator(#[from] GenerationError),

    #[error("Stripe client: {0}")]
    Payment(#[from] PaymentError),

    #[error("Server: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        tracing::error!(error = %e, "startup failed");
        eprintln!("snap-component: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("migrations applied");
    }

    let ai = &config.ai;
    let generator = OpenAIVisionGenerator::new(
        OpenAIVisionConfig::new(ai.openai_api_key().unwrap_or_default())
            .with_model(ai.model.clone())
            .with_base_url(ai.base_url.clone())
            .with_max_tokens(ai.max_tokens)
            .with_temperature(ai.temperature)
            .with_timeout(ai.timeout()),
    )?;

    let payment = &config.payment;
    let stripe = StripePaymentAdapter::new(
        StripeConfig::new(payment.stripe_api_key.clone()).with_base_url(payment.api_base_url.clone()),
    )?;

    let auth = &config.auth;
    let sessions = JwtSessionValidator::new(JwtConfig::new(
        auth.jwt_secret.clone(),
        auth.issuer.clone(),
        auth.audience.clone(),
    ));

    let storage = LocalImageStorage::new(
        &config.storage.root_dir,
        config.storage.public_base_url.clone(),
    );

    let state = AppState {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        conversions: Arc::new(PostgresConversionRepository::new(pool)),
        code_generator: Arc::new(generator),
        payment_provider: Arc::new(stripe),
        image_storage: Arc::new(storage),
        session_validator: Arc::new(sessions),
        billing: BillingSettings {
            pro_price_id: payment.stripe_pro_price_id.clone(),
            app_url: config.server.app_url.clone(),
            webhook_verifier: StripeWebhookVerifier::new(payment.stripe_webhook_secret.clone()),
        },
        upload_policy: UploadPolicy::new(config.storage.max_upload_bytes),
    };

    let router = api_router(
        state,
        RouterSettings {
            request_timeout: config.server.request_timeout(),
            cors_origins: config.server.cors_origins_list(),
        },
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        stripe_test_mode = payment.is_test_mode(),
        "listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// JSON logs in production, human-readable otherwise.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
