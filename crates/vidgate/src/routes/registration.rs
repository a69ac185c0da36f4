//! Registration flow endpoints.

use axum::{
    Json,
    extract::{Path, State},
};
use std::time::Duration;

use vidpass_common::constants::messages;
use vidpass_common::types::{
    IdRegRequest, IdRegResponse, PhotoRegRequest, PhotoRegResponse, RegistrationStatus,
};
use vidpass_common::{RegistrationError, VidNumber};

use super::ApiError;
use crate::state::AppState;
use crate::verify::VerifyOutcome;

/// Register an ID document photo and issue a fresh VID
pub async fn id_reg(
    State(state): State<AppState>,
    Json(payload): Json<IdRegRequest>,
) -> Result<Json<IdRegResponse>, ApiError> {
    let image = match payload.image {
        Some(image) if !image.is_empty() => image,
        _ => return Err(RegistrationError::Validation(messages::NO_IMAGE.to_string()).into()),
    };

    // Stand-in for real image validation: anything this short is no photo
    if image.len() < state.config.registration.min_image_bytes {
        return Err(RegistrationError::Validation(messages::INVALID_IMAGE.to_string()).into());
    }

    // Simulated processing time before the identifier is issued
    let delay = Duration::from_millis(state.config.registration.processing_delay_ms);
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let vid = state.registry.create(image).await;

    tracing::info!(vid = %vid, "ID photo registered");

    Ok(Json(IdRegResponse { vid_number: vid }))
}

/// Submit the face photo for an in-flight registration
pub async fn photo_reg(
    State(state): State<AppState>,
    Json(payload): Json<PhotoRegRequest>,
) -> Result<Json<PhotoRegResponse>, ApiError> {
    let (image, vid) = match (payload.image, payload.vid_number) {
        (Some(image), Some(vid)) if !image.is_empty() => (image, vid),
        _ => {
            return Err(
                RegistrationError::Validation(messages::MISSING_FIELDS.to_string()).into(),
            );
        }
    };

    state.registry.begin_face_submission(&vid).await?;

    match state.verifier.verify(&image).await {
        VerifyOutcome::NoMatch => {
            tracing::info!(vid = %vid, "Face verification rejected");
            Err(RegistrationError::Verification(messages::VERIFICATION_FAILED.to_string()).into())
        }
        VerifyOutcome::Match => {
            state.registry.mark_verified(&vid, image).await?;
            tracing::info!(vid = %vid, "Face verification passed");
            Ok(Json(PhotoRegResponse {
                success: true,
                message: messages::REGISTRATION_COMPLETE.to_string(),
            }))
        }
    }
}

/// Read-only status lookup for a registration
pub async fn status(
    State(state): State<AppState>,
    Path(vid_number): Path<String>,
) -> Result<Json<RegistrationStatus>, ApiError> {
    let vid = VidNumber::from(vid_number);

    match state.registry.status(&vid).await {
        Some(summary) => Ok(Json(summary)),
        None => Err(RegistrationError::NotFound(messages::NOT_FOUND.to_string()).into()),
    }
}
