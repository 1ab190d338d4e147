//! Domain entities representing core business objects.

pub mod user;
pub mod verification_code;


// Re-export commonly used types
pub use user::User;
pub use verification_code::{
    codes_match, CodePurpose, VerificationCode, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES,
    MAX_ATTEMPTS,
};
