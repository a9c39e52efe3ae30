pub mod token;

pub use token::TokenRepository;

#[cfg(any(test, feature = "mock"))]
pub use token::MockTokenRepository;
