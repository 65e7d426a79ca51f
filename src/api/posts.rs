// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Post endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::{
    auth::Auth,
    error::ApiError,
    models::{Post, PostIn, PostWithComments, PostWithLikes, PostsQuery},
    state::AppState,
};

/// Create a post as the authenticated user.
#[utoipa::path(
    post,
    path = "/post",
    request_body = PostIn,
    tag = "Posts",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Post created", body = Post),
        (status = 401, description = "Unauthorized"),
    )
)]
pub async fn create_post(
    Auth(user): Auth,
    State(state): State<AppState>,
    Json(post): Json<PostIn>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    info!(user_id = user.id, "creating post");

    let mut store = state.store.write().await;
    let post = store.create_post(post, user.id);
    Ok((StatusCode::CREATED, Json(post)))
}

/// List all posts with their like counts.
#[utoipa::path(
    get,
    path = "/post",
    params(PostsQuery),
    tag = "Posts",
    responses((status = 200, body = [PostWithLikes]))
)]
pub async fn get_posts(
    State(state): State<AppState>,
    Query(params): Query<PostsQuery>,
) -> Result<Json<Vec<PostWithLikes>>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.list_posts(params.sorting)))
}

/// Get a single post with its like count and comments.
#[utoipa::path(
    get,
    path = "/post/{post_id}",
    params(
        ("post_id" = i64, Path, description = "Identifier of the post")
    ),
    tag = "Posts",
    responses(
        (status = 200, body = PostWithComments),
        (status = 404, description = "Post not found"),
    )
)]
pub async fn get_post_with_comments(
    Path(post_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<PostWithComments>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.post_with_comments(post_id)?))
}
