// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory store for users, posts, comments and likes.
//!
//! Four tables keyed by integer ids, each with its own id sequence. The
//! store itself is synchronous; [`AppState`](crate::state::AppState) wraps
//! it in `Arc<RwLock<...>>` and callers keep lock scopes short. The
//! authentication core never touches the tables directly; it goes through
//! the [`UserStore`] adapter, which implements the `UserDirectory` seam.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::auth::{DirectoryError, UserDirectory, UserRecord};
use crate::error::ApiError;
use crate::models::{
    Comment, CommentIn, Post, PostIn, PostLike, PostLikeIn, PostSorting, PostWithComments,
    PostWithLikes,
};

#[derive(Default)]
pub struct InMemoryStore {
    users: HashMap<String, UserRecord>,
    posts: HashMap<i64, Post>,
    comments: HashMap<i64, Comment>,
    likes: HashMap<i64, PostLike>,
    next_user_id: i64,
    next_post_id: i64,
    next_comment_id: i64,
    next_like_id: i64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    /// Insert a new, unconfirmed user. The email must be unused.
    pub fn create_user(&mut self, email: &str, password_hash: &str) -> Result<UserRecord, ApiError> {
        if self.users.contains_key(email) {
            return Err(ApiError::bad_request(format!(
                "User with email {email} already exists"
            )));
        }

        self.next_user_id += 1;
        let user = UserRecord {
            id: self.next_user_id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            is_confirmed: false,
        };
        self.users.insert(email.to_string(), user.clone());
        Ok(user)
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<UserRecord> {
        self.users.get(email).cloned()
    }

    /// Mark a user as confirmed. Updating a missing row is a no-op, like an
    /// UPDATE that touches zero rows.
    pub fn set_confirmed(&mut self, email: &str) {
        if let Some(user) = self.users.get_mut(email) {
            user.is_confirmed = true;
        }
    }

    // -------------------------------------------------------------------------
    // Posts
    // -------------------------------------------------------------------------

    pub fn create_post(&mut self, request: PostIn, user_id: i64) -> Post {
        self.next_post_id += 1;
        let post = Post {
            id: self.next_post_id,
            body: request.body,
            user_id,
        };
        self.posts.insert(post.id, post.clone());
        post
    }

    pub fn find_post(&self, post_id: i64) -> Option<Post> {
        self.posts.get(&post_id).cloned()
    }

    fn likes_for_post(&self, post_id: i64) -> i64 {
        self.likes
            .values()
            .filter(|like| like.post_id == post_id)
            .count() as i64
    }

    /// List all posts with their like counts, in the requested order.
    pub fn list_posts(&self, sorting: PostSorting) -> Vec<PostWithLikes> {
        let mut posts: Vec<PostWithLikes> = self
            .posts
            .values()
            .map(|post| PostWithLikes {
                post: post.clone(),
                likes: self.likes_for_post(post.id),
            })
            .collect();

        match sorting {
            PostSorting::New => posts.sort_by(|a, b| b.post.id.cmp(&a.post.id)),
            PostSorting::Old => posts.sort_by(|a, b| a.post.id.cmp(&b.post.id)),
            // Newest first among equally liked posts.
            PostSorting::MostLiked => {
                posts.sort_by(|a, b| b.likes.cmp(&a.likes).then(b.post.id.cmp(&a.post.id)))
            }
        }

        posts
    }

    pub fn post_with_comments(&self, post_id: i64) -> Result<PostWithComments, ApiError> {
        let post = self
            .find_post(post_id)
            .ok_or_else(|| ApiError::not_found("Post not found"))?;

        Ok(PostWithComments {
            post: PostWithLikes {
                likes: self.likes_for_post(post.id),
                post,
            },
            comments: self.comments_for_post(post_id)?,
        })
    }

    // -------------------------------------------------------------------------
    // Comments
    // -------------------------------------------------------------------------

    pub fn create_comment(&mut self, request: CommentIn, user_id: i64) -> Result<Comment, ApiError> {
        if self.find_post(request.post_id).is_none() {
            return Err(ApiError::not_found("Post not found"));
        }

        self.next_comment_id += 1;
        let comment = Comment {
            id: self.next_comment_id,
            body: request.body,
            post_id: request.post_id,
            user_id,
        };
        self.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    pub fn comments_for_post(&self, post_id: i64) -> Result<Vec<Comment>, ApiError> {
        if self.find_post(post_id).is_none() {
            return Err(ApiError::not_found("Post not found"));
        }

        let mut comments: Vec<Comment> = self
            .comments
            .values()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by_key(|comment| comment.id);
        Ok(comments)
    }

    // -------------------------------------------------------------------------
    // Likes
    // -------------------------------------------------------------------------

    pub fn create_like(&mut self, request: PostLikeIn, user_id: i64) -> Result<PostLike, ApiError> {
        if self.find_post(request.post_id).is_none() {
            return Err(ApiError::not_found("Post not found"));
        }

        self.next_like_id += 1;
        let like = PostLike {
            id: self.next_like_id,
            post_id: request.post_id,
            user_id,
        };
        self.likes.insert(like.id, like.clone());
        Ok(like)
    }
}

/// `UserDirectory` adapter over the shared store.
///
/// Lock scopes are single statements; no lock is held across an await
/// point or returned to the caller.
#[derive(Clone)]
pub struct UserStore {
    store: Arc<RwLock<InMemoryStore>>,
}

impl UserStore {
    pub fn new(store: Arc<RwLock<InMemoryStore>>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserDirectory for UserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DirectoryError> {
        Ok(self.store.read().await.find_user_by_email(email))
    }

    async fn set_confirmed(&self, email: &str) -> Result<(), DirectoryError> {
        self.store.write().await.set_confirmed(email);
        Ok(())
    }
}
