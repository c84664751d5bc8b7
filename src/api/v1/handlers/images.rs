/*
 * Responsibility
 * - POST /promotions/images
 * - base64 を bytes に戻して ImageAttachmentWorkflow に渡し、image id を返す
 * - 返した id は後続の POST /promotions で imageId として使われる
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::images::{AttachImageRequest, ImageIdResponse},
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    state::AppState,
};

pub async fn attach_image(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Json(req): Json<AttachImageRequest>,
) -> Result<(StatusCode, Json<ImageIdResponse>), AppError> {
    let bytes = req.decode(state.images.locale()).map_err(AppError::Validation)?;

    tracing::debug!(user_id = %ctx.user_id, size = bytes.len(), "attaching image");
    let id = state.images.attach(bytes).await?;

    Ok((StatusCode::CREATED, Json(ImageIdResponse { id })))
}
