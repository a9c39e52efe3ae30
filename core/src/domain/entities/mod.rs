//! Domain entities representing core business objects.

pub mod token;


// Re-export commonly used types
pub use token::{
    hash_token, IssuedTokens, TokenRecord, TokenSecret,
    ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS,
    TOKEN_BYTES, TOKEN_HASH_LENGTH,
};
