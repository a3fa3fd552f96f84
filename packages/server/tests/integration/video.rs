use serde_json::json;
use uuid::Uuid;

use crate::common::{TestApp, routes};

mod video_creation {
    use super::*;

    #[tokio::test]
    async fn title_and_url_are_required() {
        let app = TestApp::spawn().await;

        let res = app.post(routes::VIDEOS, &json!({ "title": "Clip" })).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");

        let res = app
            .post(routes::VIDEOS, &json!({ "title": "", "url": "" }))
            .await;
        assert_eq!(res.status, 400);
        assert!(res.text.contains("Title and URL are required"));

        let list = app.get(routes::VIDEOS).await;
        assert_eq!(list.body["total"], 0);
    }

    #[tokio::test]
    async fn links_models_on_create() {
        let app = TestApp::spawn().await;
        let m1 = app.create_model_named("Ava").await;
        let m2 = app.create_model_named("Mia").await;

        let res = app
            .post(
                routes::VIDEOS,
                &json!({
                    "title": "Clip",
                    "url": "https://x/v.mp4",
                    "modelIds": [m1, m2],
                }),
            )
            .await;
        assert_eq!(res.status, 201);
        assert_eq!(res.body["models"].as_array().unwrap().len(), 2);

        let model = app.get(&routes::model(&m1)).await;
        assert_eq!(model.body["videos"].as_array().unwrap().len(), 1);
        assert_eq!(model.body["videos"][0]["title"], "Clip");
    }

    #[tokio::test]
    async fn unknown_linked_model_is_404_and_nothing_is_persisted() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::VIDEOS,
                &json!({
                    "title": "Clip",
                    "url": "https://x/v.mp4",
                    "modelIds": [Uuid::now_v7().to_string()],
                }),
            )
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");

        let list = app.get(routes::VIDEOS).await;
        assert_eq!(list.body["total"], 0);
    }

    #[tokio::test]
    async fn duration_and_views_accept_numeric_strings() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::VIDEOS,
                &json!({
                    "title": "Clip",
                    "url": "https://x/v.mp4",
                    "duration": "95",
                    "views": "7",
                }),
            )
            .await;
        assert_eq!(res.status, 201);
        assert_eq!(res.body["duration"], 95);
        assert_eq!(res.body["views"], 7);
    }

    #[tokio::test]
    async fn empty_duration_is_absent_and_views_default_to_zero() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::VIDEOS,
                &json!({ "title": "Clip", "url": "https://x/v.mp4", "duration": "" }),
            )
            .await;
        assert_eq!(res.status, 201);
        assert!(res.body["duration"].is_null());
        assert_eq!(res.body["views"], 0);
    }

    #[tokio::test]
    async fn negative_views_are_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::VIDEOS,
                &json!({ "title": "Clip", "url": "https://x/v.mp4", "views": -1 }),
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod video_item {
    use super::*;

    #[tokio::test]
    async fn round_trip_returns_all_supplied_fields() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::VIDEOS,
                &json!({
                    "title": "Clip",
                    "description": "A short clip.",
                    "url": "https://x/v.mp4",
                    "previewUrl": "https://x/v-preview.mp4",
                    "thumbnail": "https://cdn.example.com/v.jpg",
                    "duration": 95,
                    "views": 3,
                }),
            )
            .await;
        assert_eq!(res.status, 201);
        let id = res.body["id"].as_str().unwrap();

        let fetched = app.get(&routes::video(id)).await;
        assert_eq!(fetched.status, 200);
        assert_eq!(fetched.body["title"], "Clip");
        assert_eq!(fetched.body["description"], "A short clip.");
        assert_eq!(fetched.body["url"], "https://x/v.mp4");
        assert_eq!(fetched.body["previewUrl"], "https://x/v-preview.mp4");
        assert_eq!(fetched.body["thumbnail"], "https://cdn.example.com/v.jpg");
        assert_eq!(fetched.body["duration"], 95);
        assert_eq!(fetched.body["views"], 3);
        assert_eq!(fetched.body["models"], json!([]));
        assert!(fetched.body["uploadedAt"].is_string());
    }

    #[tokio::test]
    async fn unknown_id_is_404() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::video(&Uuid::now_v7().to_string())).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod video_update {
    use super::*;

    #[tokio::test]
    async fn put_clears_absent_optionals_but_keeps_views() {
        let app = TestApp::spawn().await;

        let created = app
            .post(
                routes::VIDEOS,
                &json!({
                    "title": "Clip",
                    "url": "https://x/v.mp4",
                    "description": "original",
                    "views": 5,
                }),
            )
            .await;
        let id = created.body["id"].as_str().unwrap();

        let updated = app
            .put(
                &routes::video(id),
                &json!({ "title": "Clip v2", "url": "https://x/v2.mp4" }),
            )
            .await;
        assert_eq!(updated.status, 200);
        assert_eq!(updated.body["title"], "Clip v2");
        assert_eq!(updated.body["url"], "https://x/v2.mp4");
        assert!(updated.body["description"].is_null());
        // Absent views leave the counter unchanged.
        assert_eq!(updated.body["views"], 5);
    }

    #[tokio::test]
    async fn put_with_model_ids_replaces_the_link_set() {
        let app = TestApp::spawn().await;
        let m1 = app.create_model_named("Ava").await;
        let m2 = app.create_model_named("Mia").await;
        let video_id = app.create_video_titled("Clip", &[&m1]).await;

        let updated = app
            .put(
                &routes::video(&video_id),
                &json!({
                    "title": "Clip",
                    "url": "https://x/v.mp4",
                    "modelIds": [m2],
                }),
            )
            .await;
        assert_eq!(updated.status, 200);
        let models = updated.body["models"].as_array().unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0]["id"], json!(m2));

        let old = app.get(&routes::model(&m1)).await;
        assert_eq!(old.body["videos"], json!([]));
        let new = app.get(&routes::model(&m2)).await;
        assert_eq!(new.body["videos"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn put_without_model_ids_keeps_the_link_set() {
        let app = TestApp::spawn().await;
        let m1 = app.create_model_named("Ava").await;
        let video_id = app.create_video_titled("Clip", &[&m1]).await;

        let updated = app
            .put(
                &routes::video(&video_id),
                &json!({ "title": "Clip v2", "url": "https://x/v.mp4" }),
            )
            .await;
        assert_eq!(updated.status, 200);
        assert_eq!(updated.body["models"].as_array().unwrap().len(), 1);
        assert_eq!(updated.body["models"][0]["id"], json!(m1));
    }

    #[tokio::test]
    async fn updating_unknown_id_is_404() {
        let app = TestApp::spawn().await;

        let res = app
            .put(
                &routes::video(&Uuid::now_v7().to_string()),
                &json!({ "title": "Ghost", "url": "https://x/v.mp4" }),
            )
            .await;
        assert_eq!(res.status, 404);
    }
}

mod video_deletion {
    use super::*;

    #[tokio::test]
    async fn deleting_a_video_unlinks_but_keeps_its_models() {
        let app = TestApp::spawn().await;
        let model_id = app.create_model_named("Ava").await;
        let video_id = app.create_video_titled("Clip", &[&model_id]).await;

        let res = app.delete(&routes::video(&video_id)).await;
        assert_eq!(res.status, 204);

        let video = app.get(&routes::video(&video_id)).await;
        assert_eq!(video.status, 404);

        let model = app.get(&routes::model(&model_id)).await;
        assert_eq!(model.status, 200);
        assert_eq!(model.body["videos"], json!([]));
    }
}
