/*
 * Responsibility
 * - /promotions 系 handler
 * - Path の {promotion_id} は公開 ID → extractor で内部 ID に復号して受け取る
 * - 更新系では復号できない ID もそのまま service に渡す (404 は権限判定の後)
 * - 更新系は AuthCtx の user_id を service に渡す (権限判定は service 側)
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::promotions::{PromotionIdResponse, PromotionResponse, SavePromotionRequest},
        extractors::{AuthCtxExtractor, PublicPromotionId},
    },
    error::AppError,
    services::{
        id_codec::IdCodecError,
        promotion::{PromotionRef, PromotionView},
    },
    state::AppState,
};

fn to_response(state: &AppState, view: PromotionView) -> Result<PromotionResponse, AppError> {
    let public_id = state.id_codec.encode(view.id)?;
    Ok(PromotionResponse::new(public_id, view))
}

pub async fn list_promotions(
    State(state): State<AppState>,
) -> Result<Json<Vec<PromotionResponse>>, AppError> {
    let views = state.promotions.list().await?;

    let res = views
        .into_iter()
        .map(|view| to_response(&state, view))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(res))
}

/// Creates a promotion, or updates the caller's promotion when the body carries its `id`.
pub async fn save_promotion(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Json(req): Json<SavePromotionRequest>,
) -> Result<(StatusCode, Json<PromotionIdResponse>), AppError> {
    let id = req
        .id
        .as_deref()
        .map(|public_id| match state.id_codec.decode(public_id) {
            Ok(id) => Ok(PromotionRef::Id(id)),
            Err(IdCodecError::Unknown) => Ok(PromotionRef::Unknown),
            Err(e) => Err(e),
        })
        .transpose()?;

    let status = if id.is_some() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    let promotion_id = state
        .promotions
        .create(ctx.user_id, req.into_input(id))
        .await?;

    let id = state.id_codec.encode(promotion_id)?;
    Ok((status, Json(PromotionIdResponse { id })))
}

pub async fn get_promotion(
    State(state): State<AppState>,
    promotion_id: PublicPromotionId,
) -> Result<Json<PromotionResponse>, AppError> {
    let view = state.promotions.read(promotion_id.id()?).await?;
    Ok(Json(to_response(&state, view)?))
}

pub async fn invalidate_promotion(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    promotion_id: PublicPromotionId,
) -> Result<StatusCode, AppError> {
    state
        .promotions
        .invalidate(ctx.user_id, promotion_id.target())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
