//! HTTP API for the MySite account forms
//!
//! Exposes registration, login, logout, nickname change and email binding
//! over JSON, with sessions identified by cookie.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod i18n;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use routes::account::AppState;
