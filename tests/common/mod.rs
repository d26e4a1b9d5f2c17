#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use office_inventory::{config::Config, db::Store};
use serde_json::{Value, json};
use std::path::PathBuf;
use tower::ServiceExt;

pub const SECRET: &str = "test-secret-test-secret-test-secret!";

pub struct TestApp {
    pub router: Router,
    pub store: Store,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_path);
    }
}

pub fn test_config(db_path: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.general.database_url = format!("sqlite:{}?mode=rwc", db_path.display());
    config.security.jwt_secret = SECRET.to_string();
    // Cheap hashing keeps the suite fast
    config.security.argon2_memory_cost_kib = 1024;
    config.security.argon2_time_cost = 1;
    config.observability.metrics_enabled = false;
    config
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with(customize: impl FnOnce(&mut Config)) -> TestApp {
    let db_path = std::env::temp_dir().join(format!("inventory-test-{}.db", uuid::Uuid::new_v4()));
    let mut config = test_config(&db_path);
    customize(&mut config);

    let state = office_inventory::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    let store = state.store.clone();

    TestApp {
        router: office_inventory::api::router(state),
        store,
        db_path,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/register",
            None,
            Some(json!({
                "username": username,
                "email": email,
                "password": password,
                "confirmPassword": password,
            })),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/login",
            None,
            Some(json!({ "username": username, "password": password })),
        )
        .await
    }

    /// Registers a fresh user and returns `(user_id, access_token, refresh_token)`.
    pub async fn signed_in_user(&self) -> (String, String, String) {
        let (status, body) = self.register("jdoe", "jdoe@example.com", "correct horse").await;
        assert_eq!(status, StatusCode::CREATED);
        let user_id = body["id"].as_str().unwrap().to_string();

        let (status, body) = self.login("jdoe", "correct horse").await;
        assert_eq!(status, StatusCode::OK);

        (
            user_id,
            body["access_token"].as_str().unwrap().to_string(),
            body["refresh_token"].as_str().unwrap().to_string(),
        )
    }

    pub async fn office_id(&self, name: &str) -> i32 {
        self.store
            .get_office_by_name(name)
            .await
            .unwrap()
            .unwrap_or_else(|| panic!("office {name} not seeded"))
            .id
    }
}

pub fn item_body(office_id: i32, mac: &str) -> Value {
    json!({
        "office_id": office_id,
        "computer_device": "Desktop",
        "pc_name": "ENG-PC-01",
        "brand_model": "Dell OptiPlex 7090",
        "processor": "Intel Core i7-11700",
        "ram": "16GB",
        "mac_address": mac,
        "operating_system": "Windows 11 Pro",
        "status": "Working",
    })
}
