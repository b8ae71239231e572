#![allow(clippy::expect_used, dead_code)]
//! Test helpers for integration tests.
//!
//! Provides utilities for:
//! - Creating a test Salvo service backed by a chosen event store
//! - Making HTTP requests against it
//! - Asserting on responses

use std::sync::Arc;

use lazycal_test::app::api::routes;
use lazycal_test::app::store_handler::{SharedStore, StoreHandler};
use lazycal_test::core::model::Event;
use lazycal_test::store::store::MemoryStore;
use salvo::http::{Method, StatusCode};
use salvo::prelude::*;
use salvo::test::{ResponseExt, TestClient};
use serde::de::DeserializeOwned;

pub use serde_json::json;

/// A service plus direct access to the store behind it.
pub struct TestApp {
    pub service: Service,
    pub store: SharedStore,
}

impl TestApp {
    /// ## Summary
    /// Builds the same router as `main` around `store`.
    #[must_use]
    pub fn with_store(store: SharedStore) -> Self {
        let router = Router::new()
            .hoop(StoreHandler {
                store: Arc::clone(&store),
            })
            .push(routes());

        Self {
            service: Service::new(router),
            store,
        }
    }

    /// Empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// In-memory store seeded with `events` as-is, skipping validation.
    #[must_use]
    pub fn seeded(events: Vec<Event>) -> Self {
        Self::with_store(Arc::new(MemoryStore::with_events(events)))
    }

    pub async fn send(&self, request: TestRequest) -> TestResponse {
        request.send(&self.service).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test request builder for constructing HTTP requests.
pub struct TestRequest {
    method: Method,
    path: String,
    body: Option<serde_json::Value>,
}

impl TestRequest {
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            body: None,
        }
    }

    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: &str) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn patch(path: &str) -> Self {
        Self::new(Method::PATCH, path)
    }

    #[must_use]
    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Sets a JSON request body.
    #[must_use]
    pub fn json_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sends the request to the test service and returns the response.
    ///
    /// ## Panics
    /// Panics on an HTTP method the API does not use.
    pub async fn send(self, service: &Service) -> TestResponse {
        let url = format!("http://127.0.0.1:5800{}", self.path);

        let mut client = match self.method.as_str() {
            "GET" => TestClient::get(&url),
            "POST" => TestClient::post(&url),
            "PATCH" => TestClient::patch(&url),
            "DELETE" => TestClient::delete(&url),
            other => panic!("unsupported method {other}"),
        };

        if let Some(body) = &self.body {
            client = client.json(body);
        }

        let mut response = client.send(service).await;

        let status = response
            .status_code
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Vec<u8> = response.take_bytes(None).await.unwrap_or_default().to_vec();

        TestResponse { status, body }
    }
}

/// Represents an HTTP test response for assertions.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Asserts that the response status matches the expected code.
    #[must_use]
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {expected} but got {}: {}",
            self.status,
            self.body_string()
        );
        self
    }

    /// Asserts that the response body contains the expected substring.
    #[must_use]
    pub fn assert_body_contains(self, expected: &str) -> Self {
        let body = self.body_string();
        assert!(
            body.contains(expected),
            "Expected body to contain '{expected}' but got:\n{body}"
        );
        self
    }

    /// Returns the body as a UTF-8 string.
    #[must_use]
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decodes the body as JSON.
    ///
    /// ## Panics
    /// Panics if the body is not valid JSON for `T`.
    #[must_use]
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Response body should be valid JSON")
    }

    /// `instanceDate` of every element of a JSON instance list.
    #[must_use]
    pub fn instance_dates(&self) -> Vec<String> {
        self.json::<Vec<serde_json::Value>>()
            .iter()
            .map(|instance| {
                instance["instanceDate"]
                    .as_str()
                    .expect("instanceDate should be a string")
                    .to_string()
            })
            .collect()
    }
}
