//! Session-scoped state consulted by the account forms
//!
//! The session store is owned by the host; this module only defines the
//! operations the forms and the account service need from it.

mod mock;
mod traits;

pub use mock::MockSessionStore;
pub use traits::SessionStore;
