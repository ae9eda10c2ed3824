use serde_json::json;

use crate::common::{TestApp, routes};

fn signup_body(email: &str, password: &str) -> serde_json::Value {
    json!({
        "firstname": "Ada",
        "lastname": "Lovelace",
        "company": "Analytical Engines",
        "email": email,
        "password": password,
    })
}

mod signup {
    use super::*;

    #[tokio::test]
    async fn new_user_can_sign_up() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::SIGNUP, &signup_body("ada@example.com", "securepass"))
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert!(res.body["message"].is_string());
    }

    #[tokio::test]
    async fn cannot_sign_up_twice_with_the_same_email() {
        let app = TestApp::spawn().await;

        let first = app
            .post_without_token(routes::SIGNUP, &signup_body("ada@example.com", "securepass"))
            .await;
        assert_eq!(first.status, 201, "First signup failed: {}", first.text);

        let res = app
            .post_without_token(routes::SIGNUP, &signup_body("ADA@example.com ", "securepass"))
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "EMAIL_TAKEN");
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::SIGNUP, &signup_body("ada@example.com", "short"))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn malformed_email_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::SIGNUP, &signup_body("not-an-email", "securepass"))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn malformed_json_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::SIGNUP, &json!({"email": "ada@example.com"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod login {
    use super::*;

    #[tokio::test]
    async fn registered_user_receives_a_bearer_token() {
        let app = TestApp::spawn().await;
        app.post_without_token(routes::SIGNUP, &signup_body("ada@example.com", "securepass"))
            .await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "ada@example.com", "password": "securepass"}),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["token_type"], "bearer");
        assert!(res.body["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let app = TestApp::spawn().await;
        app.post_without_token(routes::SIGNUP, &signup_body("ada@example.com", "securepass"))
            .await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "ada@example.com", "password": "wrongpass"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn unknown_email_is_rejected_the_same_way() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "ghost@example.com", "password": "securepass"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }
}

mod principal {
    use super::*;

    #[tokio::test]
    async fn me_returns_the_token_subject() {
        let app = TestApp::spawn().await;
        let token = app
            .create_authenticated_user("ada@example.com", "securepass")
            .await;

        let res = app.get_with_token(routes::ME, &token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["email"], "ada@example.com");
    }

    #[tokio::test]
    async fn missing_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::ME).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_with_token(routes::ME, "not.a.jwt").await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn health_is_public() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::HEALTH).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["status"], "ok");
    }
}
