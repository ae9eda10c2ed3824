use serde_json::json;

use crate::common::{TestApp, routes};

fn quote(first_name: &str, email: &str) -> serde_json::Value {
    json!({
        "first_name": first_name,
        "last_name": "Buyer",
        "email": email,
        "company_name": "Buyers Inc",
        "request_details": "Need 200 drills",
        "subscribe_updates": true,
    })
}

#[tokio::test]
async fn anyone_can_submit_a_quote_request() {
    let app = TestApp::spawn().await;

    let res = app
        .post_without_token(routes::CONTACT, &quote("Bea", "bea@example.com"))
        .await;

    assert_eq!(res.status, 201, "{}", res.text);
    assert!(res.body["id"].is_string());
    assert!(res.body["message"].is_string());
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app
        .post_without_token("/contact-us", &quote("Bea", "bea-at-example"))
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn staff_see_requests_newest_first() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("staff@example.com", "securepass").await;

    let first = app
        .post_without_token(routes::CONTACT, &quote("First", "first@example.com"))
        .await
        .id();
    app.post_without_token(routes::CONTACT, &quote("Second", "second@example.com"))
        .await;

    let unauthenticated = app.get_without_token(routes::CONTACT).await;
    assert_eq!(unauthenticated.status, 401);

    let res = app.get_with_token(routes::CONTACT, &token).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["count"], 2);
    assert_eq!(res.body["quotes"][0]["first_name"], "Second");
    assert_eq!(res.body["quotes"][1]["first_name"], "First");

    let one = app.get_with_token(&routes::contact(&first), &token).await;
    assert_eq!(one.status, 200);
    assert_eq!(one.body["email"], "first@example.com");
    assert_eq!(one.body["subscribe_updates"], true);

    let missing = app.get_with_token(&routes::contact("missing"), &token).await;
    assert_eq!(missing.status, 404);
}
