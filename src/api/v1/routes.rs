/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - 参照系 (list/read/health) は認証なし、更新系 (save/invalidate/attach) だけ access middleware を通す
 */
use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::middleware::auth::access::protect;
use crate::state::AppState;

use crate::api::v1::handlers::{
    health::health,
    images::attach_image,
    promotions::{get_promotion, invalidate_promotion, list_promotions, save_promotion},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route(
            "/promotions",
            get(list_promotions).merge(protect(post(save_promotion))),
        )
        .route("/promotions/images", protect(post(attach_image)))
        .route(
            "/promotions/{promotion_id}",
            get(get_promotion).merge(protect(delete(invalidate_promotion))),
        )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        response::Response,
    };
    use serde_json::{Value, json};
    use testresult::TestResult;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::services::{
        i18n::Locale,
        id_codec::IdCodec,
        image_attachment::{ImageAttachmentWorkflow, MockImageStore, StoredImage},
        promotion::{
            PromotionService,
            tests::{InMemoryPromotionStore, admin_checker},
        },
    };

    const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    struct Harness {
        app: Router,
        admin: Uuid,
        store: Arc<InMemoryPromotionStore>,
    }

    fn harness(images: MockImageStore) -> Harness {
        let admin = Uuid::new_v4();
        let store = Arc::new(InMemoryPromotionStore::default());
        let promotions =
            PromotionService::new(store.clone(), Arc::new(admin_checker(admin)), Locale::En);
        let images = ImageAttachmentWorkflow::new(Arc::new(images), Locale::En);
        let id_codec = IdCodec::new(10, ALPHABET).unwrap();

        let app = Router::new()
            .nest("/api/v1", routes())
            .with_state(AppState::new(promotions, images, id_codec));

        Harness { app, admin, store }
    }

    fn request(method: &str, uri: &str, user: Option<Uuid>, body: Option<Value>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {user}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(res: Response) -> Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn dia_del_padre() -> Value {
        json!({
            "title": "Dia del Padre",
            "description": "Regalos para papá",
            "redirectLink": "http://x",
        })
    }

    #[tokio::test]
    async fn admin_creates_then_anyone_reads() -> TestResult {
        let h = harness(MockImageStore::new());

        let res = h
            .app
            .clone()
            .oneshot(request("POST", "/api/v1/promotions", Some(h.admin), Some(dia_del_padre())))
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED);
        let id = json_body(res).await["id"].as_str().unwrap().to_string();

        let res = h
            .app
            .clone()
            .oneshot(request("GET", &format!("/api/v1/promotions/{id}"), None, None))
            .await?;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            json_body(res).await,
            json!({
                "id": id,
                "title": "Dia del Padre",
                "description": "Regalos para papá",
                "redirectLink": "http://x",
                "imageId": "",
            })
        );
        Ok(())
    }

    #[tokio::test]
    async fn create_without_identity_is_unauthorized() -> TestResult {
        let h = harness(MockImageStore::new());

        let res = h
            .app
            .oneshot(request("POST", "/api/v1/promotions", None, Some(dia_del_padre())))
            .await?;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(h.store.snapshot().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn create_by_non_admin_is_forbidden() -> TestResult {
        let h = harness(MockImageStore::new());

        let res = h
            .app
            .oneshot(request(
                "POST",
                "/api/v1/promotions",
                Some(Uuid::new_v4()),
                Some(dia_del_padre()),
            ))
            .await?;

        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert!(h.store.snapshot().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn create_with_missing_fields_lists_each_one() -> TestResult {
        let h = harness(MockImageStore::new());

        let res = h
            .app
            .oneshot(request(
                "POST",
                "/api/v1/promotions",
                Some(h.admin),
                Some(json!({ "description": "solo descripción" })),
            ))
            .await?;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = json_body(res).await;
        let paths: Vec<&str> = body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["path"].as_str().unwrap())
            .collect();
        assert_eq!(paths, vec!["title", "redirectLink"]);
        assert!(h.store.snapshot().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn invalidated_promotions_leave_the_list_but_stay_readable() -> TestResult {
        let h = harness(MockImageStore::new());

        let res = h
            .app
            .clone()
            .oneshot(request("POST", "/api/v1/promotions", Some(h.admin), Some(dia_del_padre())))
            .await?;
        let id = json_body(res).await["id"].as_str().unwrap().to_string();
        let uri = format!("/api/v1/promotions/{id}");

        for _ in 0..2 {
            let res = h
                .app
                .clone()
                .oneshot(request("DELETE", &uri, Some(h.admin), None))
                .await?;
            assert_eq!(res.status(), StatusCode::NO_CONTENT);
        }

        let res = h
            .app
            .clone()
            .oneshot(request("GET", "/api/v1/promotions", None, None))
            .await?;
        assert_eq!(json_body(res).await, json!([]));

        let res = h.app.oneshot(request("GET", &uri, None, None)).await?;
        assert_eq!(res.status(), StatusCode::OK);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_promotion_id_is_not_found() -> TestResult {
        let h = harness(MockImageStore::new());

        let res = h
            .app
            .clone()
            .oneshot(request("GET", "/api/v1/promotions/nonexistent", None, None))
            .await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = h
            .app
            .oneshot(request(
                "DELETE",
                "/api/v1/promotions/nonexistent",
                Some(h.admin),
                None,
            ))
            .await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn non_admin_with_unknown_id_is_forbidden() -> TestResult {
        let h = harness(MockImageStore::new());
        let outsider = Uuid::new_v4();

        let res = h
            .app
            .clone()
            .oneshot(request(
                "DELETE",
                "/api/v1/promotions/nonexistent",
                Some(outsider),
                None,
            ))
            .await?;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let mut body = dia_del_padre();
        body["id"] = json!("zzz");
        let res = h
            .app
            .oneshot(request("POST", "/api/v1/promotions", Some(outsider), Some(body)))
            .await?;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert!(h.store.snapshot().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn admin_update_of_unknown_id_is_not_found() -> TestResult {
        let h = harness(MockImageStore::new());

        let mut body = dia_del_padre();
        body["id"] = json!("zzz");
        let res = h
            .app
            .oneshot(request("POST", "/api/v1/promotions", Some(h.admin), Some(body)))
            .await?;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert!(h.store.snapshot().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn attach_image_returns_the_stored_id() -> TestResult {
        let mut images = MockImageStore::new();
        images
            .expect_create()
            .once()
            .withf(|raw| raw == &vec![1u8, 2, 3])
            .return_once(|_| {
                Ok(StoredImage {
                    id: "img-1".to_string(),
                })
            });
        let h = harness(images);

        let res = h
            .app
            .oneshot(request(
                "POST",
                "/api/v1/promotions/images",
                Some(h.admin),
                Some(json!({ "image": "AQID" })),
            ))
            .await?;

        assert_eq!(res.status(), StatusCode::CREATED);
        assert_eq!(json_body(res).await, json!({ "id": "img-1" }));
        assert!(h.store.snapshot().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn attach_image_with_empty_id_is_one_image_error() -> TestResult {
        let mut images = MockImageStore::new();
        images
            .expect_create()
            .once()
            .return_once(|_| Ok(StoredImage { id: String::new() }));
        let h = harness(images);

        let res = h
            .app
            .oneshot(request(
                "POST",
                "/api/v1/promotions/images",
                Some(h.admin),
                Some(json!({ "image": "AQID" })),
            ))
            .await?;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = json_body(res).await;
        assert_eq!(body["errors"].as_array().unwrap().len(), 1);
        assert_eq!(body["errors"][0]["path"], "image");
        assert!(h.store.snapshot().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn undecodable_image_never_reaches_the_store() -> TestResult {
        let mut images = MockImageStore::new();
        images.expect_create().never();
        let h = harness(images);

        let res = h
            .app
            .oneshot(request(
                "POST",
                "/api/v1/promotions/images",
                Some(h.admin),
                Some(json!({ "image": "%%%" })),
            ))
            .await?;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }
}
