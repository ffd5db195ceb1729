//! # Mintid - Account Access Service Library
//!
//! This is a facade crate that re-exports all public APIs from the account
//! service components. Use this crate to get access to registration, email
//! verification and login in one place.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! mintid = { path = "../mintid" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `VerificationCode`, etc.
//! - **Repository traits**: `AccountStore`, `EmailClient`
//! - **Use cases**: `RegisterUseCase`, `VerifyEmailUseCase`, `LoginUseCase`
//! - **Adapters**: `PostgresAccountStore`, `PostmarkEmailClient`, etc.
//! - **Service**: `AccountService` - The main entry point for the service

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use mintid_core::*;
}

// Re-export most commonly used core types at the root level
pub use mintid_core::{
    Account, DisplayName, Email, EmailError, IssuedCode, NewAccount, Password, PasswordError,
    UserId, VerificationCode,
};

// ============================================================================
// Repository Traits (Ports)
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use mintid_core::{AccountStore, AccountStoreError};
}

// Re-export repository traits at root level
pub use mintid_core::{AccountStore, AccountStoreError, EmailClient};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use mintid_application::*;
}

// Re-export use cases at root level
pub use mintid_application::{LoginUseCase, RegisterUseCase, VerifyEmailUseCase};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP route handlers
    pub mod http {
        pub use mintid_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use mintid_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use mintid_adapters::email::*;
    }

    /// Configuration
    pub mod config {
        pub use mintid_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use mintid_adapters::{
    email::{MockEmailClient, PostmarkEmailClient},
    persistence::{InMemoryAccountStore, PostgresAccountStore},
};

// ============================================================================
// Account Service (Main Entry Point)
// ============================================================================

/// Main account service
pub use mintid_service::{AccountService, get_postgres_pool, spawn_code_sweeper};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing repository traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
