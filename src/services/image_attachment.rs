/*
 * Responsibility
 * - raw image bytes を外部 image store に保存し、image id を得る
 * - 得られた id を検証して呼び出し元に返す (promotion の imageId に使う)
 * - promotion 自体は保存しない
 *
 * Notes
 * - 保存 → 検証の順序は固定 (id は保存しないと得られない)
 * - 後続の promotion 作成が来なかった画像は残る。掃除は image store 側の責務
 */
use std::{fmt, sync::Arc};

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::repos::{error::RepoError, image_repo};
use crate::services::{
    i18n::Locale,
    validation::{ValidationErrorMessage, Validator},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub id: String,
}

#[derive(Debug, Error)]
pub enum ImageStoreError {
    #[error("image store backend error")]
    Backend(#[from] RepoError),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn create(&self, raw: Vec<u8>) -> Result<StoredImage, ImageStoreError>;
}

#[derive(Clone, Debug)]
pub struct PgImageStore {
    pool: PgPool,
}

impl PgImageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageStore for PgImageStore {
    async fn create(&self, raw: Vec<u8>) -> Result<StoredImage, ImageStoreError> {
        let id = image_repo::create(&self.pool, &raw).await?;
        Ok(StoredImage { id: id.to_string() })
    }
}

#[derive(Debug, Error)]
pub enum ImageAttachmentError {
    #[error(transparent)]
    Validation(#[from] ValidationErrorMessage),

    #[error(transparent)]
    Store(#[from] ImageStoreError),
}

#[derive(Clone)]
pub struct ImageAttachmentWorkflow {
    store: Arc<dyn ImageStore>,
    locale: Locale,
}

impl fmt::Debug for ImageAttachmentWorkflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageAttachmentWorkflow")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl ImageAttachmentWorkflow {
    pub fn new(store: Arc<dyn ImageStore>, locale: Locale) -> Self {
        Self { store, locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub async fn attach(&self, raw: Vec<u8>) -> Result<String, ImageAttachmentError> {
        let size = raw.len();
        let stored = self
            .store
            .create(raw)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, size, "image store create failed"))?;

        let mut v = Validator::new();
        v.check(!stored.id.is_empty(), "image", self.locale.invalid_image());
        v.finish()?;

        tracing::info!(image_id = %stored.id, size, "image attached");
        Ok(stored.id)
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;
    use testresult::TestResult;

    use super::*;

    fn workflow(store: MockImageStore) -> ImageAttachmentWorkflow {
        ImageAttachmentWorkflow::new(Arc::new(store), Locale::En)
    }

    #[tokio::test]
    async fn returns_the_stored_image_id() -> TestResult {
        let mut store = MockImageStore::new();
        store
            .expect_create()
            .once()
            .with(eq(vec![1u8, 2, 3]))
            .return_once(|_| {
                Ok(StoredImage {
                    id: "img-1".to_string(),
                })
            });

        let id = workflow(store).attach(vec![1, 2, 3]).await?;

        assert_eq!(id, "img-1");
        Ok(())
    }

    #[tokio::test]
    async fn empty_image_id_is_a_single_image_error() {
        let mut store = MockImageStore::new();
        store
            .expect_create()
            .once()
            .return_once(|_| Ok(StoredImage { id: String::new() }));

        let err = workflow(store).attach(vec![9]).await.unwrap_err();

        let ImageAttachmentError::Validation(report) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path, "image");
        assert_eq!(report.errors[0].message, Locale::En.invalid_image());
    }

    #[tokio::test]
    async fn store_failures_propagate_unchanged() {
        let mut store = MockImageStore::new();
        store
            .expect_create()
            .once()
            .return_once(|_| {
                Err(ImageStoreError::Backend(RepoError::Db(
                    sqlx::Error::PoolClosed,
                )))
            });

        let err = workflow(store).attach(vec![9]).await.unwrap_err();

        assert!(matches!(err, ImageAttachmentError::Store(_)));
    }
}
