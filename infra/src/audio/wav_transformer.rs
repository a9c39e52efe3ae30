//! WAV implementation of the AudioTransformer trait.
//!
//! Pitch and speed are applied by rewriting the sample rate in the output
//! header, so duration and pitch move together. Volume scales every sample
//! and clamps to the range of the input's sample format.

use std::io::Cursor;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use vc_core::errors::{AudioError, DomainError};
use vc_core::services::audio::{AudioTransformer, ConversionParams};

/// Decoded sample data in the input's native representation
enum Samples {
    Int(Vec<i32>),
    Float(Vec<f32>),
}

/// Converts uploaded WAV files
#[derive(Debug, Clone, Copy, Default)]
pub struct WavTransformer;

impl WavTransformer {
    pub fn new() -> Self {
        Self
    }
}

fn load_wav(bytes: &[u8]) -> Result<(WavSpec, Samples), AudioError> {
    let reader = WavReader::new(Cursor::new(bytes)).map_err(|e| {
        tracing::debug!(error = %e, "Rejected audio upload");
        AudioError::InvalidAudio
    })?;
    let spec = reader.spec();
    if spec.sample_format == SampleFormat::Int && int_sample_range(spec.bits_per_sample).is_none() {
        tracing::debug!(bits = spec.bits_per_sample, "Rejected audio upload with unsupported sample width");
        return Err(AudioError::InvalidAudio);
    }

    let samples = match spec.sample_format {
        SampleFormat::Int => Samples::Int(
            reader
                .into_samples::<i32>()
                .collect::<Result<_, _>>()
                .map_err(|_| AudioError::InvalidAudio)?,
        ),
        SampleFormat::Float => Samples::Float(
            reader
                .into_samples::<f32>()
                .collect::<Result<_, _>>()
                .map_err(|_| AudioError::InvalidAudio)?,
        ),
    };

    Ok((spec, samples))
}

fn save_wav(spec: WavSpec, samples: &Samples) -> Result<Vec<u8>, hound::Error> {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec)?;
        match samples {
            Samples::Int(values) => {
                for &sample in values {
                    writer.write_sample(sample)?;
                }
            }
            Samples::Float(values) => {
                for &sample in values {
                    writer.write_sample(sample)?;
                }
            }
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

/// Smallest and largest value of a signed integer sample `bits_per_sample` wide
///
/// `None` for widths hound cannot hold in an `i32`. Extensible headers
/// carry the width verbatim, so it must not be trusted.
fn int_sample_range(bits_per_sample: u16) -> Option<(f64, f64)> {
    if bits_per_sample == 0 || bits_per_sample > 32 {
        return None;
    }
    let max = 1i64.checked_shl(u32::from(bits_per_sample) - 1)? - 1;
    Some((-(max as f64) - 1.0, max as f64))
}

fn apply_gain(samples: &mut Samples, gain: f64, bits_per_sample: u16) -> Result<(), AudioError> {
    match samples {
        Samples::Int(values) => {
            let (min, max) = int_sample_range(bits_per_sample).ok_or(AudioError::InvalidAudio)?;
            for sample in values.iter_mut() {
                *sample = (f64::from(*sample) * gain).round().clamp(min, max) as i32;
            }
        }
        Samples::Float(values) => {
            for sample in values.iter_mut() {
                *sample = (f64::from(*sample) * gain).clamp(-1.0, 1.0) as f32;
            }
        }
    }
    Ok(())
}

impl AudioTransformer for WavTransformer {
    fn transform(&self, wav: &[u8], params: &ConversionParams) -> Result<Vec<u8>, DomainError> {
        params.validate()?;
        let (mut spec, mut samples) = load_wav(wav)?;

        let input_rate = spec.sample_rate;
        spec.sample_rate = params.output_sample_rate(input_rate)?;
        if params.volume != 0.0 {
            apply_gain(&mut samples, params.gain(), spec.bits_per_sample)?;
        }

        tracing::debug!(
            input_rate,
            output_rate = spec.sample_rate,
            channels = spec.channels,
            bits = spec.bits_per_sample,
            "Converted audio"
        );

        save_wav(spec, &samples).map_err(|e| DomainError::Internal {
            message: format!("Failed to encode WAV: {}", e),
        })
    }
}
