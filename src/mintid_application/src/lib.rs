pub mod use_cases;

pub use use_cases::{
    login::{LoginError, LoginUseCase},
    register::{RegisterUseCase, Registration},
    verify_email::{VerifyEmailError, VerifyEmailUseCase},
};
