// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::auth_middleware,
    error::ErrorBody,
    models::{
        CreateUserRequest, FormattedUser, HealthResponse, LoginRequest, LoginResponse, Profile,
        ProfileResponse, RootResponse, UserListResponse, UserResponse, UserSummary,
    },
    state::AppState,
};

pub mod auth;
pub mod health;
pub mod users;

/// Build the application router.
///
/// The auth gate wraps every route, including the 404 fallback; the route
/// policy inside the gate decides which paths it lets through unchecked.
pub fn router(state: AppState) -> Router {
    let auth_config = state.auth.clone();

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/auth/login", post(auth::login))
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/profile", get(users::get_profile))
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .fallback(health::not_found)
        .with_state(state)
        .layer(middleware::from_fn_with_state(auth_config, auth_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CorsLayer::permissive()),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::root,
        auth::login,
        users::list_users,
        users::get_profile,
        users::create_user
    ),
    components(
        schemas(
            ErrorBody,
            LoginRequest,
            LoginResponse,
            UserSummary,
            FormattedUser,
            UserListResponse,
            UserResponse,
            Profile,
            ProfileResponse,
            CreateUserRequest,
            HealthResponse,
            RootResponse
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Health", description = "Service status"),
        (name = "Auth", description = "Token issuance"),
        (name = "Users", description = "User directory and caller profile")
    )
)]
struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{token, AuthConfig};
    use crate::models::UserSummary;
    use axum::{
        body::{to_bytes, Body},
        http::{header::AUTHORIZATION, Method, Request, StatusCode},
        response::Response,
    };
    use chrono::{Duration, Utc};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const SECRET: &str = "test-jwt-secret";

    fn test_state() -> AppState {
        AppState::new(AuthConfig::with_secret(SECRET)).with_environment("test")
    }

    fn admin() -> UserSummary {
        UserSummary {
            id: "1".to_string(),
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            role: "admin".to_string(),
        }
    }

    fn valid_token() -> String {
        token::issue(&admin(), SECRET.as_bytes()).unwrap().token
    }

    fn expired_token() -> String {
        let issued_at = Utc::now() - Duration::hours(25);
        token::issue_at(&admin(), SECRET.as_bytes(), issued_at)
            .unwrap()
            .token
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn send(state: AppState, request: Request<Body>) -> Response {
        router(state).oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(AppState::default());
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn protected_path_without_header_is_401() {
        for uri in ["/", "/users", "/users/profile", "/no/such/route"] {
            let response = send(test_state(), get(uri, None)).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");

            let body = json_body(response).await;
            assert_eq!(
                body,
                json!({"error": "Unauthorized", "message": "Missing or invalid authorization header"}),
                "{uri}"
            );
        }
    }

    #[tokio::test]
    async fn public_paths_bypass_the_gate() {
        for uri in ["/health", "/docs", "/openapi.json"] {
            let response = send(AppState::default(), get(uri, None)).await;
            assert_ne!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");

            let response = send(AppState::default(), get(uri, Some("garbage"))).await;
            assert_ne!(response.status(), StatusCode::UNAUTHORIZED, "{uri} with bad token");
        }

        let login = post_json(
            "/auth/login",
            Some("garbage"),
            json!({"username": "admin", "password": "admin123"}),
        );
        let response = send(test_state(), login).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn health_and_openapi_bodies() {
        let response = send(test_state(), get("/health", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "healthy");

        let response = send(test_state(), get("/openapi.json", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let doc = json_body(response).await;
        assert!(doc["paths"]["/auth/login"].is_object());
        assert!(doc["components"]["securitySchemes"]["bearer"].is_object());
    }

    #[tokio::test]
    async fn login_scenarios() {
        let response = send(
            test_state(),
            post_json("/auth/login", None, json!({"username": "admin", "password": "admin123"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Login successful");
        assert_eq!(body["user"]["role"], "admin");
        assert_eq!(body["user"]["username"], "admin");
        assert_eq!(body["expiresIn"], "24h");
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

        let response = send(
            test_state(),
            post_json("/auth/login", None, json!({"username": "admin", "password": "wrong"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            json_body(response).await,
            json!({"error": "Authentication Failed", "message": "Invalid username or password"})
        );

        let response = send(
            test_state(),
            post_json("/auth/login", None, json!({"username": ""})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "Validation Error");
    }

    #[tokio::test]
    async fn login_with_invalid_json_is_400() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/auth/login")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = send(test_state(), request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "Validation Error");
    }

    #[tokio::test]
    async fn issued_token_round_trips_to_profile() {
        let state = test_state();
        let response = send(
            state.clone(),
            post_json("/auth/login", None, json!({"username": "user", "password": "user123"})),
        )
        .await;
        let login = json_body(response).await;
        let token = login["token"].as_str().unwrap().to_string();

        let response = send(state, get("/users/profile", Some(&token))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let profile = json_body(response).await;
        assert_eq!(profile["data"]["id"], login["user"]["id"]);
        assert_eq!(profile["data"]["email"], login["user"]["email"]);
        assert_eq!(profile["data"]["role"], login["user"]["role"]);
    }

    #[tokio::test]
    async fn expired_token_never_reaches_handler() {
        let state = test_state();
        let response = send(
            state.clone(),
            post_json(
                "/users",
                Some(&expired_token()),
                json!({"name": "Mallory", "email": "mallory@example.com"}),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            json_body(response).await,
            json!({"error": "Unauthorized", "message": "Invalid or expired token"})
        );
        assert_eq!(state.users.read().await.list_users().len(), 2);
    }

    #[tokio::test]
    async fn token_from_other_secret_is_401() {
        let forged = token::issue(&admin(), b"another-secret").unwrap().token;
        let response = send(test_state(), get("/users", Some(&forged))).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["message"], "Invalid or expired token");
    }

    #[tokio::test]
    async fn missing_secret_is_configuration_error() {
        let response = send(AppState::default(), get("/users", Some(&valid_token()))).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            json_body(response).await,
            json!({"error": "Unauthorized", "message": "Authentication configuration error"})
        );
    }

    #[tokio::test]
    async fn valid_token_reaches_protected_routes() {
        let token = valid_token();

        let response = send(test_state(), get("/", Some(&token))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["environment"], "test");

        let response = send(test_state(), get("/users", Some(&token))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
        assert!(body["data"][0]["formattedAt"].is_string());
    }

    #[tokio::test]
    async fn unknown_route_with_token_is_404() {
        let response = send(test_state(), get("/no/such/route", Some(&valid_token()))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(response).await,
            json!({"error": "Not Found", "path": "/no/such/route"})
        );
    }

    #[tokio::test]
    async fn create_user_validation_and_success() {
        let state = test_state();
        let token = valid_token();

        let response = send(
            state.clone(),
            post_json("/users", Some(&token), json!({"name": "Ada"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            json!({"error": "Validation Error", "message": "A valid email address is required"})
        );

        let response = send(
            state.clone(),
            post_json("/users", Some(&token), json!({"name": "Ada", "email": "ada@example.com"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["data"]["email"], "ada@example.com");
        assert!(body["data"]["createdAt"].is_string());
        assert_eq!(state.users.read().await.list_users().len(), 3);
    }

    #[tokio::test]
    async fn request_id_is_propagated() {
        let response = send(test_state(), get("/health", None)).await;
        assert!(response.headers().contains_key("x-request-id"));
    }
}
