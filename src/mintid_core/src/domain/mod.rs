pub mod display_name;
pub mod email;
pub mod password;
pub mod user;
pub mod verification_code;
