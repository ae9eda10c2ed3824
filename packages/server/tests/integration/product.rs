use serde_json::json;

use crate::common::{TestApp, routes};

async fn seed_catalog(app: &TestApp, token: &str) {
    let products = [
        json!({
            "name": "Cordless Drill",
            "productType": "tool",
            "specifications": [
                {"key": "Voltage", "value": "18V"},
                {"key": "Color", "value": "Red"},
            ],
        }),
        json!({
            "name": "Impact Driver",
            "productType": "tool",
            "specifications": [{"key": "Voltage", "value": "12V"}],
        }),
        json!({
            "name": "Safety Goggles",
            "productType": "accessory",
            "specifications": [{"key": "Color", "value": "Red"}],
        }),
    ];
    for product in &products {
        app.create_entity(routes::PRODUCTS, product, token).await;
    }
}

fn names(body: &serde_json::Value) -> Vec<String> {
    body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn filter_requires_every_specification_pair() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("editor@example.com", "securepass").await;
    seed_catalog(&app, &token).await;

    let res = app
        .post_with_token(
            routes::PRODUCTS_FILTER,
            &json!({"specifications": {"Voltage": "18V", "Color": "Red"}}),
            &token,
        )
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["total"], 1);
    assert_eq!(names(&res.body), ["Cordless Drill"]);
}

#[tokio::test]
async fn filter_combines_type_and_specifications() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("editor@example.com", "securepass").await;
    seed_catalog(&app, &token).await;

    let res = app
        .post_with_token(
            routes::PRODUCTS_FILTER,
            &json!({"productType": "accessory", "specifications": {"Color": "Red"}}),
            &token,
        )
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(names(&res.body), ["Safety Goggles"]);
}

#[tokio::test]
async fn filter_paginates() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("editor@example.com", "securepass").await;
    seed_catalog(&app, &token).await;

    let res = app
        .post_with_token(
            routes::PRODUCTS_FILTER,
            &json!({"productType": "tool", "page": 2, "limit": 1}),
            &token,
        )
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["page"], 2);
    assert_eq!(res.body["limit"], 1);
    assert_eq!(res.body["total"], 2);
    assert_eq!(names(&res.body), ["Impact Driver"]);
}

#[tokio::test]
async fn empty_filter_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("editor@example.com", "securepass").await;

    let res = app
        .post_with_token(
            routes::PRODUCTS_FILTER,
            &json!({"page": 1, "limit": 10, "specifications": {}}),
            &token,
        )
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn by_type_lists_matching_products() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("editor@example.com", "securepass").await;
    seed_catalog(&app, &token).await;

    let res = app
        .get_with_token(&routes::products_by_type("tool"), &token)
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["total"], 2);
    assert_eq!(names(&res.body), ["Cordless Drill", "Impact Driver"]);

    let none = app
        .get_with_token(&routes::products_by_type("vehicle"), &token)
        .await;
    assert_eq!(none.body["total"], 0);
}

#[tokio::test]
async fn public_url_listing_returns_every_product() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("editor@example.com", "securepass").await;
    seed_catalog(&app, &token).await;

    let res = app.get_without_token(routes::PRODUCTS_URL).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["count"], 3);
}
