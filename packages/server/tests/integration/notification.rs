use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn content_mutations_notify_the_acting_user() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("editor@example.com", "securepass").await;

    let id = app
        .create_entity(routes::PRODUCTS, &json!({"name": "Drill"}), &token)
        .await;
    app.put_with_token(
        &routes::item(routes::PRODUCTS, &id),
        &json!({"price": 99.0}),
        &token,
    )
    .await;
    app.delete_with_token(&routes::item(routes::PRODUCTS, &id), &token)
        .await;

    let res = app.get_with_token(routes::NOTIFICATIONS, &token).await;

    assert_eq!(res.status, 200, "{}", res.text);
    let kinds: Vec<&str> = res.body
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["type"].as_str().unwrap())
        .collect();
    assert_eq!(
        kinds,
        ["product_deleted", "product_updated", "product_created"]
    );
    assert_eq!(res.body[2]["message"], "Product 'Drill' has been created.");
    assert_eq!(res.body[2]["user_email"], "editor@example.com");
    assert_eq!(res.body[2]["read"], false);
}

#[tokio::test]
async fn notifications_can_be_created_read_and_deleted() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("editor@example.com", "securepass").await;

    let created = app
        .post_with_token(
            &format!("{}?message=Hello&type=custom", routes::NOTIFICATIONS),
            &json!({}),
            &token,
        )
        .await;
    assert_eq!(created.status, 201, "{}", created.text);
    assert_eq!(created.body["type"], "custom");
    let id = created.id();

    let read = app
        .put_empty_with_token(&routes::notification_read(&id), &token)
        .await;
    assert_eq!(read.status, 200, "{}", read.text);

    let listed = app.get_with_token(routes::NOTIFICATIONS, &token).await;
    assert_eq!(listed.body[0]["read"], true);

    let deleted = app
        .delete_with_token(&routes::notification(&id), &token)
        .await;
    assert_eq!(deleted.status, 200);

    let listed = app.get_with_token(routes::NOTIFICATIONS, &token).await;
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn other_users_cannot_touch_a_notification() {
    let app = TestApp::spawn().await;
    let owner = app.create_authenticated_user("owner@example.com", "securepass").await;
    let other = app.create_authenticated_user("other@example.com", "securepass").await;

    let id = app
        .post_with_token(
            &format!("{}?message=Private&type=custom", routes::NOTIFICATIONS),
            &json!({}),
            &owner,
        )
        .await
        .id();

    assert_eq!(
        app.put_empty_with_token(&routes::notification_read(&id), &other)
            .await
            .status,
        404
    );
    assert_eq!(
        app.delete_with_token(&routes::notification(&id), &other)
            .await
            .status,
        404
    );
    let listed = app.get_with_token(routes::NOTIFICATIONS, &other).await;
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn notification_endpoints_require_a_token() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::NOTIFICATIONS).await;

    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_MISSING");
}
