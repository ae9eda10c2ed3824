use std::net::SocketAddr;

use reqwest::Client;
use serde_json::Value;
use tempfile::TempDir;

use vitrine::config::{AppConfig, AuthConfig, CorsConfig, DatabaseConfig, ServerConfig};
use vitrine::database::init_store;
use vitrine::state::AppState;
use vitrine::upload::UploadGateway;

pub mod routes {
    pub const SIGNUP: &str = "/auth/signup";
    pub const LOGIN: &str = "/auth/login";
    pub const ME: &str = "/auth/me";
    pub const HEALTH: &str = "/health";

    pub const UPLOAD_IMAGES: &str = "/upload/images";
    pub const UPLOAD_DOCS: &str = "/upload/docs";
    pub const UPLOAD_VIDEOS: &str = "/upload/videos";

    pub const PRODUCTS: &str = "/products/";
    pub const PRODUCTS_URL: &str = "/products/url/";
    pub const PRODUCTS_FILTER: &str = "/products/filter";
    pub const INDUSTRIES: &str = "/industries/";
    pub const INDUSTRIES_URL: &str = "/industries/url/";
    pub const CLIENTS: &str = "/clients/";
    pub const CERTIFICATES: &str = "/certificates/";
    pub const NEWS: &str = "/news/";
    pub const ABOUT: &str = "/about/";
    pub const CONTACT: &str = "/contact-us/";
    pub const NOTIFICATIONS: &str = "/notifications";

    pub fn file(id: &str) -> String {
        format!("/files/{id}")
    }

    pub fn file_url(id: &str) -> String {
        format!("/file-urls/{id}")
    }

    /// `collection` is one of the `/<entity>/` constants above.
    pub fn item(collection: &str, id: &str) -> String {
        format!("{collection}{id}")
    }

    pub fn url_item(collection: &str, id: &str) -> String {
        format!("{collection}url/{id}")
    }

    pub fn products_by_type(product_type: &str) -> String {
        format!("/products/by-type/{product_type}")
    }

    pub fn associate_products(industry_id: &str) -> String {
        format!("/industries/{industry_id}/associate-products")
    }

    pub fn contact(id: &str) -> String {
        format!("/contact-us/{id}")
    }

    pub fn notification(id: &str) -> String {
        format!("/notifications/{id}")
    }

    pub fn notification_read(id: &str) -> String {
        format!("/notifications/{id}/read")
    }
}

/// A running test server over the in-process store and a temporary upload
/// directory.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub uploads: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

/// One part of a multipart upload.
pub struct UploadPart<'a> {
    pub file_name: &'a str,
    pub bytes: Vec<u8>,
    pub mime: &'a str,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(|_| {}).await
    }

    /// Spawn with a tweaked configuration.
    pub async fn spawn_with(configure: impl FnOnce(&mut AppConfig)) -> Self {
        let uploads = TempDir::new().expect("Failed to create upload directory");

        let mut config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors: CorsConfig::default(),
                public_base_url: None,
            },
            database: DatabaseConfig::in_memory(),
            auth: AuthConfig {
                jwt_secret: "test-secret-for-integration-tests".to_string(),
                token_ttl_minutes: 60,
            },
            storage: Default::default(),
        };
        config.storage.local_root = uploads.path().to_path_buf();
        configure(&mut config);

        let store = init_store(&config.database)
            .await
            .expect("Failed to open document store");
        let gateway = UploadGateway::from_config(&config.storage)
            .await
            .expect("Failed to initialize upload storage");

        let state = AppState::new(config, store, gateway);
        let app = vitrine::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            uploads,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// `scheme://host` the server sees for requests from this client.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn post_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_without_token(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn get_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn get_without_token(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn put_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send PUT request");

        TestResponse::from_response(res).await
    }

    pub async fn put_empty_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .put(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send PUT request");

        TestResponse::from_response(res).await
    }

    pub async fn delete_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    pub async fn upload_parts(
        &self,
        path: &str,
        parts: Vec<UploadPart<'_>>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut form = reqwest::multipart::Form::new();
        for part in parts {
            let part = reqwest::multipart::Part::bytes(part.bytes)
                .file_name(part.file_name.to_string())
                .mime_str(part.mime)
                .expect("Failed to set MIME type");
            form = form.part("files", part);
        }

        let mut req = self.client.post(self.url(path)).multipart(form);
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        let res = req
            .send()
            .await
            .expect("Failed to send multipart upload request");

        TestResponse::from_response(res).await
    }

    pub async fn upload_with_token(
        &self,
        path: &str,
        file_name: &str,
        file_bytes: Vec<u8>,
        token: &str,
    ) -> TestResponse {
        self.upload_parts(
            path,
            vec![UploadPart {
                file_name,
                bytes: file_bytes,
                mime: "application/octet-stream",
            }],
            Some(token),
        )
        .await
    }

    /// Upload one image and return its file id.
    pub async fn upload_image(&self, token: &str, file_name: &str, bytes: &[u8]) -> String {
        let res = self
            .upload_with_token(routes::UPLOAD_IMAGES, file_name, bytes.to_vec(), token)
            .await;
        assert_eq!(res.status, 200, "upload failed: {}", res.text);
        res.body[0]["id"]
            .as_str()
            .expect("upload result should contain an id")
            .to_string()
    }

    /// Sign up and log in, returning the bearer token.
    pub async fn create_authenticated_user(&self, email: &str, password: &str) -> String {
        let reg = self
            .post_without_token(
                routes::SIGNUP,
                &serde_json::json!({
                    "firstname": "Test",
                    "lastname": "User",
                    "email": email,
                    "password": password,
                }),
            )
            .await;
        assert_eq!(reg.status, 201, "Signup failed: {}", reg.text);

        let res = self
            .post_without_token(
                routes::LOGIN,
                &serde_json::json!({"email": email, "password": password}),
            )
            .await;
        assert_eq!(res.status, 200, "Login failed: {}", res.text);

        res.body["access_token"]
            .as_str()
            .expect("Login response should contain an access token")
            .to_string()
    }

    /// Create an entity through `collection` and return its id.
    pub async fn create_entity(&self, collection: &str, body: &Value, token: &str) -> String {
        let res = self.post_with_token(collection, body, token).await;
        assert_eq!(res.status, 201, "create on {collection} failed: {}", res.text);
        res.id()
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }

    pub fn id(&self) -> String {
        self.body["id"]
            .as_str()
            .expect("response body should contain 'id'")
            .to_string()
    }
}
