pub mod config;
pub mod email;
pub mod http;
pub mod persistence;

pub use config::Settings;
pub use email::{MockEmailClient, PostmarkEmailClient};
pub use persistence::{InMemoryAccountStore, PostgresAccountStore};
