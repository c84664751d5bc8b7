/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → DB 接続・migration → 依存生成 (services) → Router 組み立て
 * - Middleware の適用 (CORS / security headers / request-id / trace / limit)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::{Router, extract::DefaultBodyLimit};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::Config,
    middleware,
    repos::promotion_repo::PgPromotionRepo,
    services::{
        id_codec::IdCodec,
        image_attachment::{ImageAttachmentWorkflow, PgImageStore},
        permission::PgPermissionChecker,
        promotion::PromotionService,
    },
    state::AppState,
};

fn init_tracing() {
    // RUST_LOG=info,promotions_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development: crash the whole process so we notice immediately
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting promotions API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("failed to run migrations")?;

    let id_codec = IdCodec::new(config.sqids_min_length, &config.sqids_alphabet)?;

    let promotions = PromotionService::new(
        Arc::new(PgPromotionRepo::new(pool.clone())),
        Arc::new(PgPermissionChecker::new(pool.clone())),
        config.locale,
    );
    let images = ImageAttachmentWorkflow::new(Arc::new(PgImageStore::new(pool)), config.locale);

    Ok(AppState::new(promotions, images, id_codec))
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes())
        .layer(DefaultBodyLimit::max(config.request_body_limit_bytes))
        .with_state(state);

    let router = middleware::security_headers::apply(router);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config.request_body_limit_bytes)
}
