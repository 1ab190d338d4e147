//! Credential verification and password hashing
//!
//! The hashing scheme lives outside this crate; forms only ask whether a
//! credential identifies a user, and registration asks for a hash to store.

mod mock;
mod traits;

pub use mock::{mock_password_hash, MockAuthenticationService};
pub use traits::AuthenticationService;
