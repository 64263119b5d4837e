//! catalog-service - a small item catalog over a relational table
//!
//! REST CRUD for one entity, placeholder seeding at startup, and explicit
//! not-implemented stubs for SOAP and gRPC callers.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod http_server;
pub mod observability;
