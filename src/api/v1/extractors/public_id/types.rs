/*
 * Responsibility
 *  - リソースごとの「意味付きID型」を宣言する
 *  - decode ロジックや AppState 参照は core 側
 */
use super::core::PublicId;

// promotions
pub enum PromotionTag {}
pub type PublicPromotionId = PublicId<PromotionTag>;
