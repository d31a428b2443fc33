#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use crewlink_api::auth::{JwtConfig, issue_token};
use crewlink_api::{AppState, AppStateInner, router};
use crewlink_db::{Database, reference};
use crewlink_types::{EntityId, UserId};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

/// Fresh in-memory database behind the production router.
pub fn build_test_app() -> TestApp {
    let state: AppState = Arc::new(AppStateInner {
        db: Database::open_in_memory().unwrap(),
        jwt: JwtConfig {
            secret: "integration-test-secret".into(),
            token_ttl_days: 1,
        },
    });

    TestApp {
        router: router::build(state.clone()),
        state,
    }
}

impl TestApp {
    /// Create a user directly in the store and return it with a valid token.
    pub fn user(&self, name: &str) -> (UserId, String) {
        let id = self
            .state
            .db
            .create_user(name, &format!("{name}@example.com"), "not-a-real-hash")
            .unwrap();
        let token = issue_token(&self.state.jwt, id, name).unwrap();
        (id, token)
    }

    pub fn city(&self, name: &str) -> EntityId {
        self.state
            .db
            .with_conn(|conn| reference::insert_city(conn, name))
            .unwrap()
            .id
    }

    pub fn job(&self, title: &str) -> EntityId {
        self.state
            .db
            .with_conn(|conn| reference::insert_job(conn, title))
            .unwrap()
            .id
    }

    pub fn count(&self, table: &str) -> i64 {
        self.state
            .db
            .with_conn(|conn| {
                conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
                    .map_err(crewlink_db::DbError::from)
            })
            .unwrap()
    }

    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::PATCH, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, token, None).await
    }
}
