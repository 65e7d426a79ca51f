// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
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
    models::{
        Comment, CommentIn, Detail, Post, PostIn, PostLike, PostLikeIn, PostSorting,
        PostWithComments, PostWithLikes, TokenResponse, User, UserIn,
    },
    state::AppState,
};

pub mod comments;
pub mod health;
pub mod likes;
pub mod posts;
pub mod users;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/register", post(users::register))
        .route("/token", post(users::login))
        .route("/confirm/{token}", get(users::confirm_email))
        .route("/users/me", get(users::get_current_user))
        .route("/post", get(posts::get_posts).post(posts::create_post))
        .route("/post/{post_id}", get(posts::get_post_with_comments))
        .route(
            "/post/{post_id}/comments",
            get(comments::get_comments_on_post),
        )
        .route("/comment", post(comments::create_comment))
        .route("/like", post(likes::like_post))
        .route("/health", get(health::health))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        users::register,
        users::login,
        users::confirm_email,
        users::get_current_user,
        posts::create_post,
        posts::get_posts,
        posts::get_post_with_comments,
        comments::create_comment,
        comments::get_comments_on_post,
        likes::like_post,
        health::health
    ),
    components(
        schemas(
            UserIn,
            User,
            Detail,
            TokenResponse,
            Post,
            PostIn,
            PostWithLikes,
            PostWithComments,
            PostSorting,
            Comment,
            CommentIn,
            PostLike,
            PostLikeIn,
            health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Users", description = "Registration, login and email confirmation"),
        (name = "Posts", description = "User posts"),
        (name = "Comments", description = "Comments on posts"),
        (name = "Likes", description = "Likes on posts"),
        (name = "Health", description = "Service health")
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
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
    use crate::mailer::Mailer;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(AppState::default());
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn register_confirm_login_flow_over_http() {
        let (mailer, mut rx) = Mailer::channel();
        let mut state = AppState::default();
        state.mailer = mailer;
        let app = router(state);

        // Register.
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/register",
                r#"{"email":"a@x.com","password":"pw"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        // Login before confirmation is a 401 with a bearer challenge.
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/token",
                r#"{"email":"a@x.com","password":"pw"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
        let body = json_body(response).await;
        assert_eq!(body["detail"], "Please confirm your email");

        // Follow the emailed confirmation link.
        let message = rx.recv().await.unwrap();
        let link = message.body.split("link: ").last().unwrap().trim();
        let path = url::Url::parse(link).unwrap().path().to_string();
        let response = app
            .clone()
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["detail"], "User confirmed");

        // Login now succeeds.
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/token",
                r#"{"email":"a@x.com","password":"pw"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        let access_token = body["access_token"].as_str().unwrap().to_string();
        assert_eq!(body["token_type"], "bearer");

        // The token opens protected routes.
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/post")
                    .header(header::CONTENT_TYPE, "application/json")
                    .header(header::AUTHORIZATION, format!("Bearer {access_token}"))
                    .body(Body::from(r#"{"body":"first post"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["body"], "first post");
        assert_eq!(body["user_id"], 1);

        // Without a token the same route is rejected.
        let response = app
            .clone()
            .oneshot(json_request("POST", "/post", r#"{"body":"nope"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn requests_get_a_correlation_id() {
        let app = router(AppState::default());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn me_requires_and_uses_the_access_token() {
        let (mailer, mut rx) = Mailer::channel();
        let mut state = AppState::default();
        state.mailer = mailer;
        let app = router(state.clone());

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/register",
                r#"{"email":"me@x.com","password":"pw"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        drop(rx.recv().await);

        // Unauthenticated /users/me is rejected.
        let response = app
            .clone()
            .oneshot(Request::get("/users/me").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Access tokens are issued unconditionally, so identity works even
        // before confirmation.
        let token = state.auth.issue_access_token("me@x.com").unwrap();
        let response = app
            .clone()
            .oneshot(
                Request::get("/users/me")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["email"], "me@x.com");
    }
}
