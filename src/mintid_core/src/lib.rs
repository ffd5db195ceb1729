pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    display_name::{DisplayName, DisplayNameError},
    email::{Email, EmailError},
    password::{MIN_PASSWORD_LENGTH, Password, PasswordError},
    user::{Account, NewAccount, UserId, UserIdError},
    verification_code::{
        CODE_LENGTH, CODE_TTL_MINUTES, IssuedCode, VerificationCode, VerificationCodeError,
    },
};

pub use ports::{
    repositories::{AccountStore, AccountStoreError},
    services::EmailClient,
};
