pub mod i18n;
pub mod id_codec;
pub mod image_attachment;
pub mod permission;
pub mod promotion;
pub mod validation;
