//! Shared fixtures for the HTTP integration tests

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;

use actix_web::web;
use chrono::{TimeZone, Utc};

use vc_api::routes::AppState;
use vc_core::repositories::MockTokenRepository;
use vc_core::services::{ManualClock, TokenService, TokenServiceConfig};
use vc_infra::WavTransformer;
use vc_shared::config::{AppConfig, CorsConfig};

pub type TestState = AppState<MockTokenRepository, WavTransformer>;

pub const BOUNDARY: &str = "vc-test-boundary-7MA4YWxkTrZu0gW";

/// Application state over an in-memory repository and a manual clock
pub fn test_state(max_audio_bytes: usize) -> (web::Data<TestState>, ManualClock) {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
    let service = TokenService::with_clock(
        MockTokenRepository::new(),
        TokenServiceConfig::default(),
        Arc::new(clock.clone()),
    );
    let state = AppState::new(service, WavTransformer::new(), max_audio_bytes);
    (web::Data::new(state), clock)
}

pub fn test_config() -> AppConfig {
    AppConfig {
        cors: CorsConfig::development(),
        ..AppConfig::default()
    }
}

/// A mono 16-bit WAV with a short ramp of samples
pub fn wav_bytes(sample_rate: u32, samples: &[i16]) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for sample in samples {
            writer.write_sample(*sample).unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

pub fn read_wav(bytes: &[u8]) -> (hound::WavSpec, Vec<i16>) {
    let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
    let spec = reader.spec();
    let samples = reader.samples::<i16>().map(Result::unwrap).collect();
    (spec, samples)
}

/// One part of a hand-built `multipart/form-data` body
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a [u8]),
}

/// Returns the content type header value and the encoded body
pub fn multipart_body(parts: &[Part<'_>]) -> (String, Vec<u8>) {
    let mut body = Vec::new();

    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, data) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"input.wav\"\r\n\
                         Content-Type: audio/wav\r\n\r\n",
                        name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    (format!("multipart/form-data; boundary={}", BOUNDARY), body)
}
