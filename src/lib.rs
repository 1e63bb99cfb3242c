pub mod api;
pub mod auth;
pub mod config;
pub mod content;
pub mod domain;
pub mod handlers;
pub mod services;
pub mod session;
pub mod state;

#[cfg(test)]
pub mod testing;
