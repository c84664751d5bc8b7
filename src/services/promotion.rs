/*
 * Responsibility
 * - promotions の list / create (create-or-update) / read / invalidate
 * - 更新系は必ず PermissionChecker を先に await してから store を触る
 * - 入力は全ルールを評価してから書き込む (部分書き込みなし)
 * - list は enabled のみ、read は無効化済みも返す (status は外に出さない)
 */
use std::{fmt, sync::Arc};

use thiserror::Error;
use uuid::Uuid;

use crate::repos::{
    error::RepoError,
    promotion_repo::{PromotionRow, PromotionStatus, PromotionStore, PromotionWrite},
};
use crate::services::{
    i18n::Locale,
    permission::{PermissionChecker, PermissionError, Role},
    validation::{ValidationErrorMessage, Validator},
};

#[derive(Debug, Error)]
pub enum PromotionServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrorMessage),

    #[error(transparent)]
    Permission(#[from] PermissionError),

    #[error("promotion not found")]
    NotFound,

    #[error("promotion store error")]
    Store(#[from] RepoError),
}

pub type ServiceResult<T> = Result<T, PromotionServiceError>;

/// A promotion named by a caller. `Unknown` is a public id that was never
/// issued; it only turns into `NotFound` once the permission check has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionRef {
    Id(i64),
    Unknown,
}

impl PromotionRef {
    fn resolve(self) -> ServiceResult<i64> {
        match self {
            PromotionRef::Id(id) => Ok(id),
            PromotionRef::Unknown => Err(PromotionServiceError::NotFound),
        }
    }
}

/// Create-or-update payload. Every field is optional here so that
/// missing values are reported by validation rather than by deserialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromotionInput {
    pub id: Option<PromotionRef>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub redirect_link: Option<String>,
    pub image_id: Option<String>,
    pub enabled: Option<bool>,
}

/// What callers get to see. Owner and status stay internal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub redirect_link: String,
    pub image_id: String,
}

impl From<PromotionRow> for PromotionView {
    fn from(row: PromotionRow) -> Self {
        Self {
            id: row.promotion_id,
            title: row.title,
            description: row.description,
            redirect_link: row.redirect_link,
            image_id: row.image_id,
        }
    }
}

#[derive(Clone)]
pub struct PromotionService {
    store: Arc<dyn PromotionStore>,
    permissions: Arc<dyn PermissionChecker>,
    locale: Locale,
}

impl fmt::Debug for PromotionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromotionService")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl PromotionService {
    pub fn new(
        store: Arc<dyn PromotionStore>,
        permissions: Arc<dyn PermissionChecker>,
        locale: Locale,
    ) -> Self {
        Self {
            store,
            permissions,
            locale,
        }
    }

    pub async fn list(&self) -> ServiceResult<Vec<PromotionView>> {
        let rows = self.store.list_enabled().await?;
        Ok(rows.into_iter().map(PromotionView::from).collect())
    }

    /// Inserts a promotion owned by `caller`, or updates the caller's
    /// promotion when `input.id` is set. Returns the promotion id.
    pub async fn create(&self, caller: Uuid, input: PromotionInput) -> ServiceResult<i64> {
        self.require_admin(caller).await?;

        let target = input.id.map(PromotionRef::resolve);
        let mut write = self.validate(input)?;
        write.promotion_id = target.transpose()?;
        let is_update = write.promotion_id.is_some();

        let row = self
            .store
            .upsert_by_owner(caller, write)
            .await?
            .ok_or(PromotionServiceError::NotFound)?;

        tracing::info!(
            promotion_id = row.promotion_id,
            owner = %caller,
            updated = is_update,
            "promotion saved"
        );
        Ok(row.promotion_id)
    }

    pub async fn read(&self, promotion_id: i64) -> ServiceResult<PromotionView> {
        self.store
            .get(promotion_id)
            .await?
            .map(PromotionView::from)
            .ok_or(PromotionServiceError::NotFound)
    }

    pub async fn invalidate(&self, caller: Uuid, target: PromotionRef) -> ServiceResult<()> {
        self.require_admin(caller).await?;

        let promotion_id = target.resolve()?;
        if !self.store.invalidate(promotion_id).await? {
            return Err(PromotionServiceError::NotFound);
        }

        tracing::info!(promotion_id, by = %caller, "promotion invalidated");
        Ok(())
    }

    async fn require_admin(&self, caller: Uuid) -> ServiceResult<()> {
        self.permissions
            .require(caller, Role::Admin)
            .await
            .inspect_err(|err| match err {
                PermissionError::Denied { .. } => {
                    tracing::warn!(user_id = %caller, "admin permission denied");
                }
                PermissionError::Backend(e) => {
                    tracing::error!(error = ?e, user_id = %caller, "permission check failed");
                }
            })?;
        Ok(())
    }

    fn validate(&self, input: PromotionInput) -> Result<PromotionWrite, ValidationErrorMessage> {
        let mut v = Validator::new();
        v.require_non_empty(
            "title",
            input.title.as_deref(),
            self.locale.required("title"),
        )
        .require_non_empty(
            "description",
            input.description.as_deref(),
            self.locale.required("description"),
        )
        .require_non_empty(
            "redirectLink",
            input.redirect_link.as_deref(),
            self.locale.required("redirectLink"),
        );
        if let Some(image_id) = input.image_id.as_deref() {
            v.check(
                !image_id.trim().is_empty(),
                "imageId",
                self.locale.invalid_image(),
            );
        }
        v.finish()?;

        Ok(PromotionWrite {
            promotion_id: None,
            title: input.title.unwrap_or_default(),
            description: input.description.unwrap_or_default(),
            redirect_link: input.redirect_link.unwrap_or_default(),
            image_id: input.image_id.unwrap_or_default(),
            status: PromotionStatus::from(input.enabled.unwrap_or(true)),
        })
    }
}
