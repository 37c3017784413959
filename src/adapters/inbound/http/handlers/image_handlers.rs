use axum::{
    extract::{multipart::MultipartError, Multipart, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    adapters::inbound::http::{
        dto::{DeleteImageQuery, DeleteImageResponseDto, ErrorResponseDto, UploadedImageDto},
        router::AppState,
    },
    domain::models::{UploadImageRequest, MAX_IMAGE_BYTES},
};

type HandlerError = (StatusCode, Json<ErrorResponseDto>);

fn bad_request(message: &str) -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponseDto::bad_request(message)),
    )
}

fn too_large() -> HandlerError {
    (
        StatusCode::PAYLOAD_TOO_LARGE,
        Json(ErrorResponseDto::payload_too_large(MAX_IMAGE_BYTES)),
    )
}

/// Body limit violations surface as multipart errors; keep their 413
fn multipart_error(error: MultipartError) -> HandlerError {
    let status = error.status();
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        return too_large();
    }
    (
        status,
        Json(ErrorResponseDto::bad_request(&format!(
            "Invalid multipart body: {}",
            error.body_text()
        ))),
    )
}

/// Handle image upload; expects a multipart field named `file`
pub async fn upload_image(
    State(app_state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadedImageDto>), HandlerError> {
    let mut request = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| bad_request("File field has no file name"))?;
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let data = field.bytes().await.map_err(multipart_error)?;
        if data.len() > MAX_IMAGE_BYTES {
            return Err(too_large());
        }

        request = Some(UploadImageRequest {
            file_name,
            content_type,
            data,
        });
        break;
    }

    let request = request.ok_or_else(|| bad_request("Missing multipart field 'file'"))?;

    let uploaded = app_state
        .image_service
        .upload_image(request)
        .await
        .map_err(|e| {
            let status_code = StatusCode::from(e.clone());
            (status_code, Json(ErrorResponseDto::from_storage_error(e)))
        })?;

    Ok((StatusCode::CREATED, Json(uploaded.into())))
}

/// Handle image deletion by public URL
pub async fn delete_image(
    State(app_state): State<AppState>,
    Query(query): Query<DeleteImageQuery>,
) -> Result<Json<DeleteImageResponseDto>, HandlerError> {
    let outcome = app_state
        .image_service
        .delete_image_by_url(&query.url)
        .await
        .map_err(|e| {
            let status_code = StatusCode::from(e.clone());
            (status_code, Json(ErrorResponseDto::from_storage_error(e)))
        })?;

    Ok(Json(outcome.into()))
}
