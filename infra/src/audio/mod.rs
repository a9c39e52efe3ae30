//! Audio module - WAV conversion through `hound`

mod wav_transformer;

pub use wav_transformer::WavTransformer;
