// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Like endpoints.

use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::{
    auth::Auth,
    error::ApiError,
    models::{PostLike, PostLikeIn},
    state::AppState,
};

/// Like a post as the authenticated user.
#[utoipa::path(
    post,
    path = "/like",
    request_body = PostLikeIn,
    tag = "Likes",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Like created", body = PostLike),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found"),
    )
)]
pub async fn like_post(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(like): Json<PostLikeIn>,
) -> Result<(StatusCode, Json<PostLike>), ApiError> {
    info!(user_id = user.id, post_id = like.post_id, "creating like");

    let mut store = state.store.write().await;
    let like = store.create_like(like, user.id)?;
    Ok((StatusCode::CREATED, Json(like)))
}
