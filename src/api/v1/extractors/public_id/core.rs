/*
 * Responsibility
 *  - Path の String を公開 ID として受け、内部 ID (i64) へ復号する
 *  - 復号できない ID は「存在しない ID」として扱う
 *    - 参照系は id() で即 404、更新系は target() で service に渡し権限判定の後に 404
 *  - Axum の FromRequestParts 実装
 */
use std::marker::PhantomData;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::{id_codec::IdCodecError, promotion::PromotionRef};
use crate::state::AppState;

#[derive(Clone, Copy)]
pub struct PublicId<T> {
    decoded: Option<i64>,
    _marker: PhantomData<T>,
}

impl<T> PublicId<T> {
    fn new(decoded: Option<i64>) -> Self {
        Self {
            decoded,
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> Result<i64, AppError> {
        self.decoded.ok_or_else(|| IdCodecError::Unknown.into())
    }
}

impl PublicId<super::types::PromotionTag> {
    pub fn target(&self) -> PromotionRef {
        self.decoded.map_or(PromotionRef::Unknown, PromotionRef::Id)
    }
}

impl<T> FromRequestParts<AppState> for PublicId<T>
where
    T: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(public_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request("INVALID_PATH", "invalid path"))?;
        match state.id_codec.decode(&public_id) {
            Ok(id) => Ok(Self::new(Some(id))),
            Err(IdCodecError::Unknown) => Ok(Self::new(None)),
            Err(e) => Err(e.into()),
        }
    }
}

impl<T> std::fmt::Debug for PublicId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicId")
            .field("id", &self.decoded)
            .finish()
    }
}
