use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::common::{TestApp, UploadPart, routes};

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-bytes";

#[tokio::test]
async fn uploaded_image_gets_one_id_with_content_and_url_records() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("ed@example.com", "securepass").await;

    let res = app
        .upload_with_token(routes::UPLOAD_IMAGES, "logo.png", PNG.to_vec(), &token)
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
    let result = &res.body[0];
    let id = result["id"].as_str().unwrap();
    let url = result["url"].as_str().unwrap();
    assert_eq!(result["filename"], "logo.png");
    assert!(url.starts_with("/uploads/images/"), "unexpected url {url}");
    assert!(url.ends_with(".png"));
    assert!(result.get("error").is_none());

    let content = app.get_without_token(&routes::file(id)).await;
    assert_eq!(content.status, 200);
    assert_eq!(content.body["id"], id);
    assert_eq!(content.body["filename"], "logo.png");
    let decoded = STANDARD
        .decode(content.body["content"].as_str().unwrap())
        .unwrap();
    assert_eq!(decoded, PNG);

    let located = app.get_without_token(&routes::file_url(id)).await;
    assert_eq!(located.status, 200);
    assert_eq!(located.body["file_id"], id);
    assert_eq!(located.body["url"], format!("{}{url}", app.base_url()));
    assert_eq!(located.body["type"], "image");
}

#[tokio::test]
async fn locally_stored_files_are_served_under_the_public_prefix() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("ed@example.com", "securepass").await;

    let res = app
        .upload_with_token(routes::UPLOAD_DOCS, "spec.pdf", b"%PDF-1.7".to_vec(), &token)
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    let url = res.body[0]["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/docs/"));

    let served = app
        .client
        .get(app.url(&url))
        .send()
        .await
        .unwrap();
    assert_eq!(served.status().as_u16(), 200);
    assert_eq!(served.bytes().await.unwrap().as_ref(), b"%PDF-1.7");
}

#[tokio::test]
async fn batch_results_follow_request_order() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("ed@example.com", "securepass").await;

    let names = ["first.png", "second.png", "third.png", "fourth.png"];
    let parts = names
        .iter()
        .map(|&name| UploadPart {
            file_name: name,
            bytes: name.as_bytes().to_vec(),
            mime: "image/png",
        })
        .collect();

    let res = app
        .upload_parts(routes::UPLOAD_IMAGES, parts, Some(&token))
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
    let results = res.body.as_array().unwrap();
    assert_eq!(results.len(), names.len());
    for (result, name) in results.iter().zip(names) {
        assert_eq!(result["filename"], name);
        let content = app
            .get_without_token(&routes::file(result["id"].as_str().unwrap()))
            .await;
        let decoded = STANDARD
            .decode(content.body["content"].as_str().unwrap())
            .unwrap();
        assert_eq!(decoded, name.as_bytes());
    }

    let mut ids: Vec<&str> = results.iter().map(|r| r["id"].as_str().unwrap()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), names.len());
}

#[tokio::test]
async fn videos_are_recorded_with_their_media_type() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("ed@example.com", "securepass").await;

    let res = app
        .upload_with_token(routes::UPLOAD_VIDEOS, "tour.mp4", b"fake-mp4".to_vec(), &token)
        .await;
    assert_eq!(res.status, 200, "{}", res.text);
    let id = res.body[0]["id"].as_str().unwrap();

    let located = app.get_without_token(&routes::file_url(id)).await;
    assert_eq!(located.body["type"], "video");
    assert!(
        located.body["url"]
            .as_str()
            .unwrap()
            .contains("/uploads/videos/")
    );
}

#[tokio::test]
async fn upload_requires_a_token() {
    let app = TestApp::spawn().await;

    let res = app
        .upload_parts(
            routes::UPLOAD_IMAGES,
            vec![UploadPart {
                file_name: "logo.png",
                bytes: PNG.to_vec(),
                mime: "image/png",
            }],
            None,
        )
        .await;

    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_MISSING");
}

#[tokio::test]
async fn oversized_files_are_rejected() {
    let app = TestApp::spawn_with(|config| config.storage.max_file_size = 16).await;
    let token = app.create_authenticated_user("ed@example.com", "securepass").await;

    let res = app
        .upload_with_token(routes::UPLOAD_IMAGES, "big.png", vec![0u8; 64], &token)
        .await;

    assert_eq!(res.status, 413);
    assert_eq!(res.body["code"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn unknown_file_ids_are_not_found() {
    let app = TestApp::spawn().await;

    assert_eq!(app.get_without_token(&routes::file("nope")).await.status, 404);
    assert_eq!(
        app.get_without_token(&routes::file_url("nope")).await.status,
        404
    );
}
