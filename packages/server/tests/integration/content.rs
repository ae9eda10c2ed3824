use serde_json::json;

use crate::common::{TestApp, routes};

async fn setup() -> (TestApp, String) {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("editor@example.com", "securepass").await;
    (app, token)
}

mod lifecycle {
    use super::*;

    #[tokio::test]
    async fn client_can_be_created_read_updated_and_deleted() {
        let (app, token) = setup().await;

        let created = app
            .post_with_token(
                routes::CLIENTS,
                &json!({"client_name": "Acme", "website": "https://acme.test"}),
                &token,
            )
            .await;
        assert_eq!(created.status, 201, "{}", created.text);
        assert_eq!(created.body["message"], "Client created successfully");
        let id = created.id();
        assert_eq!(created.body["client"]["id"], id.as_str());
        assert_eq!(created.body["client"]["created_by"], "editor@example.com");
        assert!(created.body["client"]["created_at"].is_string());

        let fetched = app.get_with_token(&routes::item(routes::CLIENTS, &id), &token).await;
        assert_eq!(fetched.status, 200);
        assert_eq!(fetched.body["client_name"], "Acme");

        let updated = app
            .put_with_token(
                &routes::item(routes::CLIENTS, &id),
                &json!({"website": "https://acme.example"}),
                &token,
            )
            .await;
        assert_eq!(updated.status, 200, "{}", updated.text);
        assert_eq!(updated.body["client"]["client_name"], "Acme");
        assert_eq!(updated.body["client"]["website"], "https://acme.example");
        assert!(updated.body["client"]["updated_at"].is_string());

        let deleted = app.delete_with_token(&routes::item(routes::CLIENTS, &id), &token).await;
        assert_eq!(deleted.status, 200);
        assert_eq!(deleted.body["message"], "Client deleted successfully");

        let gone = app.get_with_token(&routes::item(routes::CLIENTS, &id), &token).await;
        assert_eq!(gone.status, 404);
        assert_eq!(gone.body["code"], "NOT_FOUND");
        assert_eq!(gone.body["message"], "Client not found");
    }

    #[tokio::test]
    async fn missing_ids_are_not_found_for_every_verb() {
        let (app, token) = setup().await;
        let path = routes::item(routes::CERTIFICATES, "missing");

        assert_eq!(app.get_with_token(&path, &token).await.status, 404);
        assert_eq!(
            app.put_with_token(&path, &json!({"certificate_name": "ISO"}), &token)
                .await
                .status,
            404
        );
        assert_eq!(app.delete_with_token(&path, &token).await.status, 404);
        assert_eq!(
            app.get_without_token(&routes::url_item(routes::CERTIFICATES, "missing"))
                .await
                .status,
            404
        );
    }

    #[tokio::test]
    async fn blank_required_names_are_rejected() {
        let (app, token) = setup().await;

        let res = app
            .post_with_token(routes::CERTIFICATES, &json!({"certificate_name": "   "}), &token)
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");

        let id = app
            .create_entity(routes::CERTIFICATES, &json!({"certificate_name": "ISO 9001"}), &token)
            .await;
        let res = app
            .put_with_token(
                &routes::item(routes::CERTIFICATES, &id),
                &json!({"certificate_name": ""}),
                &token,
            )
            .await;
        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn empty_update_is_rejected() {
        let (app, token) = setup().await;
        let id = app
            .create_entity(routes::NEWS, &json!({"title": "Plant opens"}), &token)
            .await;

        let res = app
            .put_with_token(&routes::item(routes::NEWS, &id), &json!({}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn writes_require_a_token() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::CLIENTS, &json!({"client_name": "Acme"}))
            .await;
        assert_eq!(res.status, 401);

        let res = app.get_without_token(routes::CLIENTS).await;
        assert_eq!(res.status, 401);
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn collection_routes_accept_both_slash_forms() {
        let (app, token) = setup().await;
        app.create_entity("/clients", &json!({"client_name": "Acme"}), &token)
            .await;

        let with_slash = app.get_with_token("/clients/", &token).await;
        let without = app.get_with_token("/clients", &token).await;

        assert_eq!(with_slash.status, 200);
        assert_eq!(without.status, 200);
        assert_eq!(with_slash.body["total"], 1);
        assert_eq!(without.body["total"], 1);
    }

    #[tokio::test]
    async fn list_is_paginated_in_insertion_order() {
        let (app, token) = setup().await;
        for name in ["A", "B", "C", "D", "E"] {
            app.create_entity(routes::CLIENTS, &json!({"client_name": name}), &token)
                .await;
        }

        let res = app
            .get_with_token(&format!("{}?page=2&limit=2", routes::CLIENTS), &token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["page"], 2);
        assert_eq!(res.body["limit"], 2);
        assert_eq!(res.body["total"], 5);
        let names: Vec<&str> = res.body["clients"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["client_name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["C", "D"]);
    }

    #[tokio::test]
    async fn page_parameters_are_clamped() {
        let (app, token) = setup().await;

        let res = app
            .get_with_token(&format!("{}?page=0&limit=1000", routes::CLIENTS), &token)
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["page"], 1);
        assert_eq!(res.body["limit"], 100);
    }

    #[tokio::test]
    async fn url_listing_is_public_and_counted() {
        let (app, token) = setup().await;
        app.create_entity(routes::NEWS, &json!({"title": "One"}), &token)
            .await;
        app.create_entity(routes::NEWS, &json!({"title": "Two"}), &token)
            .await;

        let res = app.get_without_token("/news/url").await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["count"], 2);
        assert_eq!(res.body["news"][0]["title"], "One");
        assert_eq!(res.body["news"][1]["title"], "Two");
    }

    #[tokio::test]
    async fn about_pages_use_their_own_list_key() {
        let (app, token) = setup().await;
        app.create_entity(routes::ABOUT, &json!({"title": "Who we are"}), &token)
            .await;

        let res = app.get_with_token(routes::ABOUT, &token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["about_pages"][0]["title"], "Who we are");
    }
}

mod gallery {
    use super::*;

    #[tokio::test]
    async fn update_merges_kept_and_new_ids_in_order() {
        let (app, token) = setup().await;
        let a = app.upload_image(&token, "a.png", b"a").await;
        let b = app.upload_image(&token, "b.png", b"b").await;
        let c = app.upload_image(&token, "c.png", b"c").await;
        let d = app.upload_image(&token, "d.png", b"d").await;

        let id = app
            .create_entity(
                routes::PRODUCTS,
                &json!({"name": "Drill", "images": [a, b, c]}),
                &token,
            )
            .await;

        let res = app
            .put_with_token(
                &routes::item(routes::PRODUCTS, &id),
                &json!({"images": {"keep": [c, a], "new_uploaded_ids": [d]}}),
                &token,
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let ids: Vec<&str> = res.body["product"]["images"]
            .as_array()
            .unwrap()
            .iter()
            .map(|img| img["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, [c.as_str(), a.as_str(), d.as_str()]);
    }

    #[tokio::test]
    async fn create_accepts_a_diff_directive_too() {
        let (app, token) = setup().await;
        let a = app.upload_image(&token, "a.png", b"a").await;
        let b = app.upload_image(&token, "b.png", b"b").await;

        let res = app
            .post_with_token(
                routes::NEWS,
                &json!({
                    "title": "Gallery",
                    "news_images": {"keep": [a], "new_uploaded_ids": [b]},
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        let images = res.body["news"]["news_images"].as_array().unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0]["filename"], "a.png");
        assert_eq!(images[1]["filename"], "b.png");
    }
}
