/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - promotions: PromotionService, images: ImageAttachmentWorkflow, id_codec: IdCodec
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use crate::services::{
    id_codec::IdCodec, image_attachment::ImageAttachmentWorkflow, promotion::PromotionService,
};

#[derive(Clone, Debug)]
pub struct AppState {
    pub promotions: PromotionService,
    pub images: ImageAttachmentWorkflow,
    pub id_codec: IdCodec,
}

impl AppState {
    pub fn new(
        promotions: PromotionService,
        images: ImageAttachmentWorkflow,
        id_codec: IdCodec,
    ) -> Self {
        Self {
            promotions,
            images,
            id_codec,
        }
    }
}
