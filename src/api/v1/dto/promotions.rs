/*
 * Responsibility
 * - Promotions の request/response DTO (JSON は camelCase)
 * - 公開 ID は encode 済みの値を返す (内部 ID を漏らさない)
 * - 必須チェックは service 側の Validator に任せるため、request は全て Option
 */
use serde::{Deserialize, Serialize};

use crate::services::promotion::{PromotionInput, PromotionRef, PromotionView};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePromotionRequest {
    /// Present when updating an existing promotion. Encoded public id.
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub redirect_link: Option<String>,
    pub image_id: Option<String>,
    pub enabled: Option<bool>,
}

impl SavePromotionRequest {
    /// `id` is `self.id` after decoding.
    pub fn into_input(self, id: Option<PromotionRef>) -> PromotionInput {
        PromotionInput {
            id,
            title: self.title,
            description: self.description,
            redirect_link: self.redirect_link,
            image_id: self.image_id,
            enabled: self.enabled,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PromotionResponse {
    pub id: String, // encoded
    pub title: String,
    pub description: String,
    pub redirect_link: String,
    pub image_id: String,
}

impl PromotionResponse {
    pub fn new(public_id: String, view: PromotionView) -> Self {
        Self {
            id: public_id,
            title: view.title,
            description: view.description,
            redirect_link: view.redirect_link,
            image_id: view.image_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PromotionIdResponse {
    pub id: String, // encoded
}
