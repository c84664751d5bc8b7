/*
 * Responsibility
 * - 画像添付の request/response DTO
 * - image は base64 (data URL 形式 `data:image/png;base64,...` も可)
 * - bytes の中身は解釈しない
 */
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};

use crate::services::{i18n::Locale, validation::ValidationErrorMessage};

#[derive(Debug, Deserialize)]
pub struct AttachImageRequest {
    pub image: Option<String>,
}

impl AttachImageRequest {
    pub fn decode(&self, locale: Locale) -> Result<Vec<u8>, ValidationErrorMessage> {
        let invalid = || ValidationErrorMessage::single("image", locale.invalid_image());

        let encoded = self.image.as_deref().map(str::trim).unwrap_or_default();
        let payload = match encoded.split_once("base64,") {
            Some((prefix, data)) if prefix.starts_with("data:") => data,
            _ => encoded,
        };

        let bytes = STANDARD.decode(payload).map_err(|_| invalid())?;
        if bytes.is_empty() {
            return Err(invalid());
        }
        Ok(bytes)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImageIdResponse {
    pub id: String,
}
