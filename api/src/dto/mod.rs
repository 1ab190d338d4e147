pub mod account;
pub mod error;

pub use account::*;
pub use error::*;
