use actix_multipart::{Field, Multipart};
use actix_web::{
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    web, HttpResponse,
};
use futures_util::TryStreamExt;

use crate::handlers::handle_domain_error;

use vc_core::errors::{AudioError, DomainError, ValidationError};
use vc_core::repositories::TokenRepository;
use vc_core::services::{AudioTransformer, ConversionParams};

use super::super::AppState;

/// File name offered to the client for the converted audio
pub const CONVERTED_FILE_NAME: &str = "converted_audio.wav";

/// Form field names accepted for the uploaded file
const AUDIO_FIELD_NAMES: [&str; 2] = ["audio", "audio.wav"];

/// Parts of the conversion form that the handler cares about
#[derive(Debug, Default)]
struct ConvertForm {
    access_token: Option<String>,
    audio: Option<Vec<u8>>,
    params: Option<String>,
}

/// Handler for POST /voicechange/api/audio/convert
///
/// # Request Body
///
/// `multipart/form-data` with:
/// - `access_token`: hex access token
/// - `audio`: WAV file
/// - `params` (optional): `{"pitch": 0, "volume": 0, "speed": 1.0}`
///
/// # Response
///
/// ## Success (200 OK)
/// `audio/wav` body sent as the attachment `converted_audio.wav`.
///
/// ## Errors
/// - 400 Bad Request: Invalid or expired access token, missing file,
///   bad parameters, undecodable WAV or oversized upload
pub async fn convert_audio<R, A>(
    state: web::Data<AppState<R, A>>,
    payload: Multipart,
) -> HttpResponse
where
    R: TokenRepository + 'static,
    A: AudioTransformer + 'static,
{
    match convert(&state, payload).await {
        Ok(wav) => HttpResponse::Ok()
            .content_type("audio/wav")
            .insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(CONVERTED_FILE_NAME.to_string())],
            })
            .body(wav),
        Err(error) => handle_domain_error(error),
    }
}

async fn convert<R, A>(state: &AppState<R, A>, payload: Multipart) -> Result<Vec<u8>, DomainError>
where
    R: TokenRepository + 'static,
    A: AudioTransformer + 'static,
{
    let form = read_form(payload, state.max_audio_bytes).await?;

    state
        .token_service
        .validate_access(form.access_token.as_deref().unwrap_or_default())
        .await?;

    let audio = form
        .audio
        .filter(|bytes| !bytes.is_empty())
        .ok_or(AudioError::MissingFile)?;
    let params = ConversionParams::from_json(form.params.as_deref())?;

    log::debug!(
        "Converting {} bytes of audio (pitch={}, volume={}, speed={})",
        audio.len(),
        params.pitch,
        params.volume,
        params.speed
    );

    let transformer = state.audio_transformer.clone();
    web::block(move || transformer.transform(&audio, &params))
        .await
        .map_err(|e| DomainError::Internal {
            message: format!("Audio conversion task failed: {}", e),
        })?
}

/// Collects the known form fields
///
/// A body that is not valid multipart ends collection early, so the
/// request fails on whichever required field is then missing.
async fn read_form(mut payload: Multipart, max_bytes: usize) -> Result<ConvertForm, DomainError> {
    let mut form = ConvertForm::default();
    let mut received = 0usize;

    loop {
        let field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                log::debug!("Stopped reading multipart body: {}", e);
                break;
            }
        };

        let name = field
            .content_disposition()
            .get_name()
            .unwrap_or_default()
            .to_string();

        if name == "access_token" {
            let bytes = read_field(field, &name, max_bytes, &mut received).await?;
            form.access_token = Some(String::from_utf8_lossy(&bytes).into_owned());
        } else if AUDIO_FIELD_NAMES.contains(&name.as_str()) {
            form.audio = Some(read_field(field, &name, max_bytes, &mut received).await?);
        } else if name == "params" {
            let bytes = read_field(field, &name, max_bytes, &mut received).await?;
            form.params = Some(String::from_utf8_lossy(&bytes).into_owned());
        } else {
            // Unknown parts still count towards the limit
            read_field(field, &name, max_bytes, &mut received).await?;
        }
    }

    Ok(form)
}

/// Reads one part, counting its bytes against the upload limit
///
/// A part cut off mid-stream rejects the whole upload as invalid audio.
async fn read_field(
    mut field: Field,
    name: &str,
    max_bytes: usize,
    received: &mut usize,
) -> Result<Vec<u8>, DomainError> {
    let mut data = Vec::new();

    loop {
        let chunk = match field.try_next().await {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(e) => {
                log::debug!("Truncated multipart field '{}': {}", name, e);
                return Err(AudioError::InvalidAudio.into());
            }
        };

        *received += chunk.len();
        if *received > max_bytes {
            return Err(ValidationError::PayloadTooLarge {
                field: name.to_string(),
                max_bytes,
            }
            .into());
        }
        data.extend_from_slice(&chunk);
    }

    Ok(data)
}
