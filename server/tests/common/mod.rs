//! Helpers to drive the full router without binding a socket.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use restaurant_server::db::{create_pool, DbPool};
use restaurant_server::{app, AppState};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub pool: DbPool,
    _dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }
}

impl TestApp {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("restaurant.db");
        let pool = create_pool(path.to_str().unwrap(), 4).expect("failed to create pool");
        let router = app(AppState::new(pool.clone()));
        Self {
            router,
            pool,
            _dir: dir,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.request(Method::DELETE, uri, None).await
    }

    /// Creates a recipe and returns its assigned id.
    pub async fn create_recipe(&self, name: &str, description: &str) -> i64 {
        let response = self
            .post(
                "/recipes",
                serde_json::json!({ "name": name, "description": description }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        response.json()["id"].as_i64().unwrap()
    }

    pub async fn count(&self, uri: &str) -> usize {
        let response = self.get(uri).await;
        assert_eq!(response.status, StatusCode::OK);
        response.json().as_array().unwrap().len()
    }
}
