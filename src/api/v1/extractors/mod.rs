/*
 * Responsibility
 * - handler が受け取る型 (AuthCtx, 公開 ID) の公開
 */
pub mod auth_ctx;
pub mod public_id;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use public_id::PublicPromotionId;
