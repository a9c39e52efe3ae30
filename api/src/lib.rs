//! HTTP layer of the VoiceChanger API
//!
//! Exposed as a library so integration tests can build the application
//! around in-memory collaborators.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
