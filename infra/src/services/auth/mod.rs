//! Authentication-related infrastructure services

pub mod bcrypt_authentication;

pub use bcrypt_authentication::BcryptAuthenticationService;
