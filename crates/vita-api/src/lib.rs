//! # vita-api
//!
//! REST API server built with Axum. Wires the tiered storage backends into
//! the gateway and exposes the social, health log, and analytics endpoints.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::run;
