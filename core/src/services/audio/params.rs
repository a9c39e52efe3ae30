//! Conversion parameters carried in the `params` form field

use serde::{Deserialize, Serialize};

use crate::errors::AudioError;

/// Requested adjustments
///
/// Every field is optional in the JSON form; omitted fields keep the
/// identity value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionParams {
    /// Pitch shift in semitones
    pub pitch: f64,
    /// Gain in decibels
    pub volume: f64,
    /// Playback speed factor
    pub speed: f64,
}

impl Default for ConversionParams {
    fn default() -> Self {
        Self {
            pitch: 0.0,
            volume: 0.0,
            speed: 1.0,
        }
    }
}

impl ConversionParams {
    /// Parses the optional `params` field
    ///
    /// A missing or blank field yields the defaults.
    pub fn from_json(raw: Option<&str>) -> Result<Self, AudioError> {
        let raw = match raw.map(str::trim) {
            None | Some("") => return Ok(Self::default()),
            Some(raw) => raw,
        };

        let params: Self = serde_json::from_str(raw).map_err(|_| AudioError::InvalidParams)?;
        params.validate()?;
        Ok(params)
    }

    /// Rejects non-finite values and non-positive speeds
    pub fn validate(&self) -> Result<(), AudioError> {
        let finite = self.pitch.is_finite() && self.volume.is_finite() && self.speed.is_finite();
        if !finite || self.speed <= 0.0 {
            return Err(AudioError::InvalidParams);
        }
        Ok(())
    }

    /// Sample rate to write into the output header
    ///
    /// Pitch scales the rate by `2^(pitch/12)`, then speed multiplies it.
    /// Each step truncates to a whole rate.
    pub fn output_sample_rate(&self, input_rate: u32) -> Result<u32, AudioError> {
        let mut rate = f64::from(input_rate);
        if self.pitch != 0.0 {
            rate = (rate * 2f64.powf(self.pitch / 12.0)).trunc();
        }
        if self.speed != 1.0 {
            rate = (rate * self.speed).trunc();
        }

        if rate < 1.0 || rate > f64::from(u32::MAX) {
            return Err(AudioError::InvalidParams);
        }
        Ok(rate as u32)
    }

    /// Linear amplitude factor for the requested gain
    pub fn gain(&self) -> f64 {
        10f64.powf(self.volume / 20.0)
    }
}
