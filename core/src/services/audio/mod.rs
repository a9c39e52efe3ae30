//! Audio conversion collaborator
//!
//! The service layer only describes the conversion. Decoding and encoding
//! live behind `AudioTransformer` in the infrastructure crate.

mod params;
mod traits;

pub use params::ConversionParams;
pub use traits::AudioTransformer;
