pub mod app;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod events;
pub mod handlers;
pub mod middleware;
pub mod ownership;
pub mod services;

#[cfg(test)]
pub mod testing;

/// The one identity key used across the service (token subject, owner columns).
pub type UserId = uuid::Uuid;
