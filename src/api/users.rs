// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints: registration, login, email confirmation and identity.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use url::Url;

use crate::{
    auth::{password, Auth, AuthError},
    error::ApiError,
    models::{Detail, TokenResponse, User, UserIn},
    state::AppState,
};

fn confirmation_url(base_url: &Url, token: &str) -> Result<Url, ApiError> {
    base_url
        .join(&format!("confirm/{token}"))
        .map_err(|e| ApiError::internal(format!("invalid confirmation URL: {e}")))
}

/// Register a new user.
///
/// The account starts unconfirmed; a confirmation link is emailed in the
/// background and login stays rejected until it is followed.
#[utoipa::path(
    post,
    path = "/register",
    request_body = UserIn,
    tag = "Users",
    responses(
        (status = 201, description = "User created, confirmation email queued", body = Detail),
        (status = 400, description = "Email already registered"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(user): Json<UserIn>,
) -> Result<(StatusCode, Json<Detail>), ApiError> {
    info!(email = user.email, "registering user");

    let password_hash =
        password::hash(&user.password).map_err(|e| ApiError::internal(e.to_string()))?;

    // Uniqueness is checked and the row inserted under one write lock.
    state
        .store
        .write()
        .await
        .create_user(&user.email, &password_hash)?;

    let token = state
        .auth
        .issue_confirmation_token(&user.email)
        .map_err(|e| ApiError::internal(e.to_string()))?;
    let confirmation_url = confirmation_url(&state.base_url, &token)?;

    state
        .mailer
        .send_registration_email(&user.email, &confirmation_url);

    Ok((
        StatusCode::CREATED,
        Json(Detail::new("User created. Please confirm your email")),
    ))
}

/// Exchange credentials for an access token.
#[utoipa::path(
    post,
    path = "/token",
    request_body = UserIn,
    tag = "Users",
    responses(
        (status = 201, description = "Access token issued", body = TokenResponse),
        (status = 401, description = "Invalid credentials or unconfirmed email"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(user): Json<UserIn>,
) -> Result<(StatusCode, Json<TokenResponse>), AuthError> {
    let user = state.auth.authenticate(&user.email, &user.password).await?;
    let access_token = state.auth.issue_access_token(&user.email)?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
        }),
    ))
}

/// Confirm the email address a confirmation token was issued for.
#[utoipa::path(
    get,
    path = "/confirm/{token}",
    params(
        ("token" = String, Path, description = "Confirmation token from the registration email")
    ),
    tag = "Users",
    responses(
        (status = 200, description = "User confirmed", body = Detail),
        (status = 401, description = "Invalid, expired or wrong-type token"),
    )
)]
pub async fn confirm_email(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Detail>, AuthError> {
    let user = state.auth.confirm(&token).await?;
    info!(email = user.email, "email confirmed");

    Ok(Json(Detail::new("User confirmed")))
}

/// Get the current authenticated user.
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn get_current_user(Auth(user): Auth) -> Json<User> {
    Json(user.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mailer::Mailer;

    fn test_state() -> (AppState, tokio::sync::mpsc::UnboundedReceiver<crate::mailer::EmailMessage>)
    {
        let (mailer, rx) = Mailer::channel();
        let mut state = AppState::default();
        state.mailer = mailer;
        (state, rx)
    }

    async fn register_user(state: &AppState, email: &str, password: &str) {
        let (status, Json(detail)) = register(
            State(state.clone()),
            Json(UserIn {
                email: email.to_string(),
                password: password.to_string(),
            }),
        )
        .await
        .expect("registration succeeds");

        assert_eq!(status, StatusCode::CREATED);
        assert!(detail.detail.contains("User created"));
    }

    fn token_from_email(body: &str) -> String {
        let url = body.split("link: ").last().unwrap().trim();
        url.rsplit('/').next().unwrap().to_string()
    }

    #[tokio::test]
    async fn register_creates_unconfirmed_user_and_queues_email() {
        let (state, mut rx) = test_state();
        register_user(&state, "test@example.com", "test").await;

        let user = state
            .store
            .read()
            .await
            .find_user_by_email("test@example.com")
            .unwrap();
        assert!(!user.is_confirmed);
        // The stored hash is not the plaintext.
        assert_ne!(user.password_hash, "test");

        let message = rx.recv().await.unwrap();
        assert_eq!(message.to, "test@example.com");
        assert!(message.body.contains("/confirm/"));
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let (state, _rx) = test_state();
        register_user(&state, "test@example.com", "test").await;

        let err = register(
            State(state.clone()),
            Json(UserIn {
                email: "test@example.com".to_string(),
                password: "other".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.message.contains("already exists"));
    }

    #[tokio::test]
    async fn registration_confirmation_login_lifecycle() {
        let (state, mut rx) = test_state();
        register_user(&state, "a@x.com", "pw").await;

        // Login before confirmation is rejected.
        let err = login(
            State(state.clone()),
            Json(UserIn {
                email: "a@x.com".to_string(),
                password: "pw".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AuthError::NotConfirmed));

        // Confirm using the emailed token.
        let message = rx.recv().await.unwrap();
        let token = token_from_email(&message.body);
        let Json(detail) = confirm_email(Path(token.clone()), State(state.clone()))
            .await
            .unwrap();
        assert_eq!(detail.detail, "User confirmed");

        // Confirmation is idempotent.
        confirm_email(Path(token), State(state.clone())).await.unwrap();

        // Login now succeeds and the token resolves back to the user.
        let (status, Json(response)) = login(
            State(state.clone()),
            Json(UserIn {
                email: "a@x.com".to_string(),
                password: "pw".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(response.token_type, "bearer");

        let resolved = state
            .auth
            .resolve_user(&response.access_token, crate::auth::TokenType::Access)
            .await
            .unwrap();
        assert_eq!(resolved.email, "a@x.com");
    }

    #[tokio::test]
    async fn login_failures_do_not_leak_which_part_was_wrong() {
        let (state, mut rx) = test_state();
        register_user(&state, "a@x.com", "pw").await;
        let token = token_from_email(&rx.recv().await.unwrap().body);
        confirm_email(Path(token), State(state.clone())).await.unwrap();

        let wrong_password = login(
            State(state.clone()),
            Json(UserIn {
                email: "a@x.com".to_string(),
                password: "wrong".to_string(),
            }),
        )
        .await
        .unwrap_err();
        let unknown_user = login(
            State(state.clone()),
            Json(UserIn {
                email: "nobody@x.com".to_string(),
                password: "pw".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_user, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn confirm_with_garbage_token_is_unauthorized() {
        let (state, _rx) = test_state();
        let err = confirm_email(Path("invalid".to_string()), State(state))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn confirm_with_access_token_is_rejected() {
        let (state, mut rx) = test_state();
        register_user(&state, "a@x.com", "pw").await;
        let confirmation = token_from_email(&rx.recv().await.unwrap().body);
        confirm_email(Path(confirmation), State(state.clone()))
            .await
            .unwrap();

        // An access token must not confirm anything.
        let access = state.auth.issue_access_token("a@x.com").unwrap();
        let err = confirm_email(Path(access), State(state)).await.unwrap_err();
        assert!(matches!(err, AuthError::WrongTokenType { .. }));
    }

    #[tokio::test]
    async fn current_user_is_the_token_subject() {
        let user = crate::auth::UserRecord {
            id: 3,
            email: "test@example.com".to_string(),
            password_hash: String::new(),
            is_confirmed: true,
        };

        let Json(me) = get_current_user(Auth(user)).await;
        assert_eq!(
            me,
            User {
                id: 3,
                email: "test@example.com".to_string(),
            }
        );
    }

    #[test]
    fn confirmation_url_joins_base() {
        let base = Url::parse("http://localhost:8080").unwrap();
        let url = confirmation_url(&base, "abc.def.ghi").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/confirm/abc.def.ghi");
    }
}
