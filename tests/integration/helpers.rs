//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use bytes::Bytes;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use sharebox_auth::JwtEncoder;
use sharebox_core::config::{AppConfig, DatabaseBackend, StorageBackend};
use sharebox_core::types::UserId;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    encoder: JwtEncoder,
}

/// Configuration with in-memory backends.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.database.backend = DatabaseBackend::Memory;
    config.storage.backend = StorageBackend::Memory;
    config.auth.jwt_secret = "integration-test-secret-0123456789".to_string();
    config.server.public_base_url = "http://sharebox.test/api".to_string();
    config
}

impl TestApp {
    /// Create a new test application over in-memory backends
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Create a test application with a custom configuration
    pub async fn with_config(config: AppConfig) -> Self {
        let state = sharebox_api::build_state(config.clone())
            .await
            .expect("Failed to build app state");
        let router = sharebox_api::build_app(state);
        let encoder = JwtEncoder::new(&config.auth);

        Self {
            router,
            config,
            encoder,
        }
    }

    /// Sign a bearer token for `user`
    pub fn token_for(&self, user: UserId) -> String {
        self.encoder.issue(user).expect("Failed to issue token").token
    }

    /// A fresh user and their bearer token
    pub fn new_user(&self) -> (UserId, String) {
        let user = UserId::new();
        (user, self.token_for(user))
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await.into()
    }

    /// Upload `content` as a multipart `file` part
    pub async fn upload(
        &self,
        token: &str,
        folder_id: Option<&str>,
        file_name: &str,
        content: &[u8],
    ) -> TestResponse {
        let boundary = "sharebox-test-boundary";
        let mut body = Vec::new();
        if let Some(folder_id) = folder_id {
            body.extend_from_slice(
                format!(
                    "--{boundary}\r\nContent-Disposition: form-data; name=\"folder_id\"\r\n\r\n{folder_id}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: text/plain\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/files")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await.into()
    }

    /// GET `path` and return the raw response
    pub async fn get_raw(&self, path: &str, token: Option<&str>) -> RawResponse {
        let mut req = Request::builder().method("GET").uri(path);
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        let req = req.body(Body::empty()).expect("Failed to build request");
        self.send(req).await
    }

    /// Create a folder and return its id
    pub async fn create_folder(&self, token: &str, name: &str, parent_id: Option<&str>) -> String {
        let response = self
            .request(
                "POST",
                "/api/folders",
                Some(serde_json::json!({ "name": name, "parent_id": parent_id })),
                Some(token),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Folder create failed: {:?}",
            response.body
        );
        response.id()
    }

    /// Upload a file and return its id
    pub async fn create_file(&self, token: &str, folder_id: Option<&str>, name: &str) -> String {
        let response = self
            .upload(token, folder_id, name, format!("contents of {name}").as_bytes())
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Upload failed: {:?}",
            response.body
        );
        response.id()
    }

    async fn send(&self, req: Request<Body>) -> RawResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        RawResponse {
            status,
            headers,
            body,
        }
    }
}

/// Unparsed response from a test request
#[derive(Debug)]
pub struct RawResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body
    pub body: Bytes,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl From<RawResponse> for TestResponse {
    fn from(raw: RawResponse) -> Self {
        Self {
            status: raw.status,
            body: serde_json::from_slice(&raw.body).unwrap_or(Value::Null),
        }
    }
}

impl TestResponse {
    /// `data` of a success envelope
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// `data.id` as a string
    pub fn id(&self) -> String {
        self.data()["id"]
            .as_str()
            .expect("No id in response data")
            .to_string()
    }

    /// `error` code of an error body
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}
