//! Promotion dashboard server: env config and the axum HTTP surface.

pub mod config;
pub mod http;
