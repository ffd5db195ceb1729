pub mod in_memory_account_store;
pub mod postgres_account_store;

pub use in_memory_account_store::InMemoryAccountStore;
pub use postgres_account_store::PostgresAccountStore;
