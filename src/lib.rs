//! Bearer-token gate for axum: verifies RSA-signed JWTs against a public key
//! loaded at startup and hands the verified claims to downstream handlers.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
