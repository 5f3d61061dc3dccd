//! Service facade
//!
//! Wires the store, ingestion pipeline, and query engine into one object
//! with a clear lifetime: constructed at startup, shared by reference with
//! the embedding server's handlers, shut down gracefully at exit. HTTP
//! routing, request validation, and response serialization live outside
//! this crate and call in through [`GeoFleetService`].

mod config;
mod error;
mod facade;

pub use config::ServiceConfig;
pub use error::ServiceError;
pub use facade::GeoFleetService;
