pub mod settings;

pub use settings::{
    EmailClientSettings, MaintenanceSettings, PostgresSettings, ServerSettings, Settings,
};
