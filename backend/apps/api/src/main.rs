//! Marketplace API server.
//!
//! Wires the accounts and catalog crates to Postgres, SMTP, and the JWT
//! issuer, then serves them under `/api`. Startup errors use `anyhow`;
//! request-path errors are the crates' own types.

use accounts::domain::repository::CodeStore;
use accounts::infra::smtp::{LogMailer, SmtpConfig, SmtpMailer};
use accounts::{AccountsConfig, PgAccountRepository, PgCodeStore};
use axum::{
    Router, http,
    http::{Method, header},
};
use catalog::PgCatalogRepository;
use platform::token::{TokenConfig, TokenIssuer};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,accounts=info,catalog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = connect_database().await?;
    let issuer = build_token_issuer();
    let config = accounts_config_from_env()?;

    // Leftover expired codes from before the last shutdown; a failure here
    // is not worth refusing to start over
    match PgCodeStore::new(pool.clone()).cleanup_expired().await {
        Ok(n) => tracing::info!(codes_deleted = n, "Expired verification codes purged"),
        Err(e) => tracing::warn!(error = %e, "Code cleanup failed, continuing"),
    }

    let app = build_router(pool, issuer, config)?
        .layer(TraceLayer::new_for_http())
        .layer(build_cors());

    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:31113".to_string())
        .parse()?;
    tracing::info!("Listening on {addr}");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn connect_database() -> anyhow::Result<PgPool> {
    let url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new().max_connections(5).connect(&url).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("../../../database/migrations").run(&pool).await?;
    tracing::info!("Migrations completed");

    Ok(pool)
}

fn build_token_issuer() -> Arc<TokenIssuer> {
    let secret = if cfg!(debug_assertions) {
        env::var("JWT_SECRET").unwrap_or_else(|_| "dev-only-secret-do-not-deploy".to_string())
    } else {
        env::var("JWT_SECRET").expect("JWT_SECRET must be set in production")
    };
    let issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| "marketplace-api".to_string());

    Arc::new(TokenIssuer::new(TokenConfig::new(secret, issuer)))
}

fn accounts_config_from_env() -> anyhow::Result<AccountsConfig> {
    let mut config = AccountsConfig::default();
    if let Ok(minutes) = env::var("CODE_TTL_MINUTES") {
        config.code_ttl = Duration::from_secs(minutes.parse::<u64>()? * 60);
    }
    if let Ok(pepper) = env::var("PASSWORD_PEPPER") {
        config.password_pepper = Some(pepper.into_bytes());
    }
    if let Ok(support) = env::var("SUPPORT_EMAIL") {
        config.support_email = support;
    }
    if let Ok(from) = env::var("MAIL_FROM") {
        config.mail_from = from;
    }
    Ok(config)
}

fn build_router(
    pool: PgPool,
    issuer: Arc<TokenIssuer>,
    config: AccountsConfig,
) -> anyhow::Result<Router> {
    let repo = PgAccountRepository::new(pool.clone());
    let codes = PgCodeStore::new(pool.clone());

    // Without SMTP settings, outbound mail goes to the log instead
    let accounts_routes = match env::var("SMTP_HOST") {
        Ok(host) => {
            let mailer = SmtpMailer::new(SmtpConfig {
                host,
                username: env::var("SMTP_USERNAME").unwrap_or_default(),
                password: env::var("SMTP_PASSWORD").unwrap_or_default(),
                from: config.mail_from.clone(),
            })?;
            accounts::accounts_router_generic(
                repo,
                codes,
                mailer,
                issuer.as_ref().clone(),
                config,
            )
        }
        Err(_) => {
            tracing::warn!("SMTP_HOST not set, outbound mail will only be logged");
            accounts::accounts_router_generic(
                repo,
                codes,
                LogMailer,
                issuer.as_ref().clone(),
                config,
            )
        }
    };

    let catalog_routes = catalog::catalog_router(PgCatalogRepository::new(pool), issuer);

    Ok(Router::new()
        .nest("/api/accounts", accounts_routes)
        .nest("/api/catalog", catalog_routes))
}

fn build_cors() -> CorsLayer {
    let origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed: Vec<http::HeaderValue> = origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}
