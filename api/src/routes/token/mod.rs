//! Token lifecycle endpoints
//!
//! - `create` - Issue a brand new pair
//! - `refresh` - Exchange a refresh token for a new pair
//! - `destroy` - Revoke a pair

pub mod create;
pub mod destroy;
pub mod refresh;

pub use create::create_token;
pub use destroy::destroy_token;
pub use refresh::refresh_token;
