//! Token service module for opaque bearer credentials
//!
//! This module handles the whole token lifecycle:
//! - Issuing access/refresh pairs with collision retries
//! - Refreshing a pair from a live refresh token
//! - Revoking a pair when both tokens are presented
//! - Gating resources on access token validity

mod clock;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "mock"))]
pub use clock::ManualClock;
pub use config::TokenServiceConfig;
pub use service::TokenService;
