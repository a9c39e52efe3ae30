//! Request and response bodies

pub mod error;
pub mod token;

pub use error::{ErrorResponse, ErrorResponseExt};
pub use token::{DestroyTokenRequest, RefreshTokenRequest, TokenResponse};
