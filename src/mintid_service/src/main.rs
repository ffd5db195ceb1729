use color_eyre::eyre::Result;
use mintid_adapters::{PostgresAccountStore, PostmarkEmailClient, config::Settings};
use mintid_core::Email;
use mintid_service::{AccountService, get_postgres_pool, spawn_code_sweeper};
use reqwest::Client as HttpClient;
use secrecy::{ExposeSecret, Secret};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    // Load configuration once; everything downstream gets it passed in.
    dotenvy::dotenv().ok();
    let settings = Settings::load()?;

    // Setup database connection pool
    let pg_pool = get_postgres_pool(
        settings.postgres.url.expose_secret(),
        settings.postgres.max_connections,
    )
    .await?;

    // Run migrations
    sqlx::migrate!().run(&pg_pool).await?;

    let store = PostgresAccountStore::new(pg_pool);

    // Create email client; the timeout bounds every delivery attempt.
    let http_client = HttpClient::builder()
        .timeout(settings.email_client.timeout())
        .build()?;

    let email_client = PostmarkEmailClient::new(
        settings.email_client.base_url.clone(),
        Email::try_from(Secret::from(settings.email_client.sender.clone()))?,
        settings.email_client.auth_token.clone(),
        http_client,
    );

    // Retention sweep for expired verification codes, off the request path.
    spawn_code_sweeper(store.clone(), settings.maintenance.sweep_interval());

    let listener = tokio::net::TcpListener::bind(&settings.server.address).await?;

    AccountService::new(store, email_client)
        .run_standalone(listener)
        .await?;

    Ok(())
}

fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
