//! 呼び出し元の識別 → AuthCtx を extensions に入れる
//!
//! 認証プロトコル自体はこのサービスの外 (session/auth サブシステム) の責務。
//! ここでは `Authorization: Bearer <user uuid>` を受け取り、
//! その uuid を `AuthCtx.user_id` として extensions に格納するだけ。
//! 権限 (admin など) の判定は services::permission 側で行う。

use axum::{
    body::Body,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};
use uuid::Uuid;

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// 認証が必要な method にだけ掛ける。同じ path の公開 method には影響しない。
///
/// 例：
/// ```ignore
/// .route("/promotions", get(list_promotions).merge(access::protect(post(save_promotion))))
/// ```
pub fn protect(method_router: MethodRouter<AppState>) -> MethodRouter<AppState> {
    method_router.route_layer(middleware::from_fn(access_middleware))
}

async fn access_middleware(mut req: Request<Body>, next: Next) -> Result<Response, AppError> {
    let auth = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;

    let user_id = match Uuid::parse_str(token.trim()) {
        Ok(id) => id,
        Err(err) => {
            tracing::warn!(error = %err, "malformed bearer identity");
            return Err(AppError::Unauthorized);
        }
    };

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::new(user_id));

    Ok(next.run(req).await)
}
