//! Audio conversion endpoint gated by an access token

pub mod convert;

pub use convert::convert_audio;
