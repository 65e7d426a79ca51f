// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Comment endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::{
    auth::Auth,
    error::ApiError,
    models::{Comment, CommentIn},
    state::AppState,
};

/// Comment on a post as the authenticated user.
#[utoipa::path(
    post,
    path = "/comment",
    request_body = CommentIn,
    tag = "Comments",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Comment created", body = Comment),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found"),
    )
)]
pub async fn create_comment(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(comment): Json<CommentIn>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    info!(user_id = user.id, post_id = comment.post_id, "creating comment");

    let mut store = state.store.write().await;
    let comment = store.create_comment(comment, user.id)?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// List the comments on a post.
#[utoipa::path(
    get,
    path = "/post/{post_id}/comments",
    params(
        ("post_id" = i64, Path, description = "Identifier of the post")
    ),
    tag = "Comments",
    responses(
        (status = 200, body = [Comment]),
        (status = 404, description = "Post not found"),
    )
)]
pub async fn get_comments_on_post(
    Path(post_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Comment>>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.comments_for_post(post_id)?))
}
