//! MySQL repository implementations

mod user_repository_impl;

pub use user_repository_impl::MySqlUserRepository;
#[cfg(test)]
pub(crate) use user_repository_impl::duplicate_key_error;
