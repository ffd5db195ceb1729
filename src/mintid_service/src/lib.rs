//! Router assembly and server plumbing for the account access service.
//!
//! Wires the three account operations onto an axum router with the
//! permissive CORS contract the frontend expects, and runs the background
//! sweep that keeps the verification-code table from growing without bound.

use std::time::Duration;

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use chrono::Utc;
use mintid_adapters::http::routes::{login, method_not_allowed, preflight, register, verify};
use mintid_core::{AccountStore, EmailClient};
use sqlx::{PgPool, postgres::PgPoolOptions};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Main account service that provides the register/verify/login routes
pub struct AccountService {
    router: Router,
}

impl AccountService {
    /// Create a new AccountService over the provided store and email client.
    ///
    /// Stores implement Clone via internal pools or Arcs for thread-safe
    /// sharing; each route is given only the state it needs.
    pub fn new<S, E>(store: S, email_client: E) -> Self
    where
        S: AccountStore + Clone + 'static,
        E: EmailClient + Clone + 'static,
    {
        let router = Router::new()
            // Register needs the store and the email client
            .route(
                "/register",
                post(register::<S, E>)
                    .options(preflight)
                    .fallback(method_not_allowed),
            )
            .with_state((store.clone(), email_client))
            // Verify and login only need the store
            .route(
                "/verify",
                post(verify::<S>)
                    .options(preflight)
                    .fallback(method_not_allowed),
            )
            .with_state(store.clone())
            .route(
                "/login",
                post(login::<S>)
                    .options(preflight)
                    .fallback(method_not_allowed),
            )
            .with_state(store)
            .route("/health", get(health));

        Self { router }
    }

    /// Finalize the router: permissive CORS on every response plus request
    /// tracing. `Access-Control-Allow-Origin: *` is the published contract,
    /// so no origin predicate here.
    pub fn into_router(self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]);

        self.router
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the account service as a standalone server
    pub async fn run_standalone(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let router = self.into_router();

        tracing::info!("account service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}

async fn health() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}

/// Create a PostgreSQL connection pool
pub async fn get_postgres_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
}

/// Periodically delete verification codes past their expiry. Stale rows are
/// dead weight only - validation never looks at them - so this runs entirely
/// off the request path and failures just get logged.
pub fn spawn_code_sweeper<S>(store: S, interval: Duration) -> JoinHandle<()>
where
    S: AccountStore + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match store.purge_expired_codes(Utc::now()).await {
                Ok(0) => {}
                Ok(purged) => {
                    tracing::debug!(purged, "removed expired verification codes");
                }
                Err(error) => {
                    tracing::warn!(%error, "verification code sweep failed");
                }
            }
        }
    })
}
