//! Trait for audio codec integration

use crate::errors::DomainError;

use super::params::ConversionParams;

/// Applies pitch, volume and speed adjustments to an uploaded file
pub trait AudioTransformer: Send + Sync {
    /// Transform a WAV payload and return the re-encoded WAV bytes
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - The converted file
    /// * `Err(AudioError::InvalidAudio)` - The input could not be decoded
    /// * `Err(AudioError::InvalidParams)` - The adjustments cannot be applied to this file
    fn transform(&self, wav: &[u8], params: &ConversionParams) -> Result<Vec<u8>, DomainError>;
}
