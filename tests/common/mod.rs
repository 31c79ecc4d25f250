#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use chrono::{Duration, TimeZone, Utc};
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use http_body_util::BodyExt;
use rampart::router::{init_router, route_policies};
use rampart::state::AppState;
use rampart_auth::create_access_token;
use rampart_config::{CorsConfig, JwtConfig};
use rampart_core::Role;
use rampart_db::MemoryCollection;
use rampart_models::User;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-at-least-32-bytes".to_string(),
        access_token_expiry: 3600,
        leeway: 0,
    }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// A fake user created `seconds` after a fixed epoch.
pub fn test_user(role: Role, seconds: i64) -> User {
    let created_at = Utc
        .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .unwrap()
        + Duration::seconds(seconds);

    User {
        id: Uuid::new_v4(),
        email: generate_unique_email(),
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        role,
        is_active: true,
        last_login_at: None,
        created_at,
        updated_at: created_at,
    }
}

/// `count` plain users created one second apart, oldest first.
pub fn test_users(count: i64) -> Vec<User> {
    (1..=count).map(|n| test_user(Role::User, n)).collect()
}

pub fn token_for(user: &User) -> String {
    create_access_token(user.id, &user.email, user.role, &jwt_config()).unwrap()
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryCollection<User>>,
}

pub fn setup_test_app(users: Vec<User>) -> TestApp {
    let store = Arc::new(MemoryCollection::new(users));
    let state = AppState::new(
        store.clone(),
        jwt_config(),
        CorsConfig::default(),
        route_policies().unwrap(),
    );

    TestApp {
        router: init_router(state),
        store,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
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
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let authorization = token.map(|t| format!("Bearer {t}"));
        self.request(Method::GET, uri, authorization.as_deref(), None)
            .await
    }
}
