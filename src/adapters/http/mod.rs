//! HTTP surface: routing, response envelopes, and server lifecycle.

pub mod response;
pub mod routes;
pub mod server;

pub use server::{build_router, serve, shutdown_signal, HttpSettings};
