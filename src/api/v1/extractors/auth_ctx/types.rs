/*
 * Responsibility
 * - Handler から見える「識別済みコンテキスト」の型
 * - middleware が request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - role は持たない。admin かどうかは PermissionChecker に毎回問い合わせる
 */
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthCtx {
    pub user_id: Uuid,
}

impl AuthCtx {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}
