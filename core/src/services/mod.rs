//! Business services containing domain logic and use cases.

pub mod audio;
pub mod token;

// Re-export commonly used types
pub use audio::{AudioTransformer, ConversionParams};
pub use token::{Clock, SystemClock, TokenService, TokenServiceConfig};
#[cfg(any(test, feature = "mock"))]
pub use token::ManualClock;
