/*
 * Responsibility
 * - 更新系操作の前に、呼び出し元が role を持つかを確認する
 * - 実際の判定は外部 (user_roles) に委譲する
 * - backend の失敗は「許可」ではなく Backend エラーとして返す (fail-closed)
 */
use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::repos::{error::RepoError, role_repo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
        }
    }
}

#[derive(Debug, Error)]
pub enum PermissionError {
    #[error("user {user_id} lacks role {role}")]
    Denied { user_id: Uuid, role: &'static str },

    #[error("permission backend error")]
    Backend(#[source] RepoError),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PermissionChecker: Send + Sync {
    async fn require(&self, user_id: Uuid, role: Role) -> Result<(), PermissionError>;
}

#[derive(Clone, Debug)]
pub struct PgPermissionChecker {
    pool: PgPool,
}

impl PgPermissionChecker {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermissionChecker for PgPermissionChecker {
    async fn require(&self, user_id: Uuid, role: Role) -> Result<(), PermissionError> {
        let granted = role_repo::has_role(&self.pool, user_id, role.as_str())
            .await
            .map_err(PermissionError::Backend)?;

        if granted {
            Ok(())
        } else {
            Err(PermissionError::Denied {
                user_id,
                role: role.as_str(),
            })
        }
    }
}
