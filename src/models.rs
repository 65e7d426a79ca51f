// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the request and response data structures used by
//! the REST API. All types derive `Serialize`/`Deserialize` and `ToSchema`
//! for automatic JSON handling and OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **Users**: registration/login input and the public user view
//! - **Posts**: user posts, with like counts on read
//! - **Comments**: comments attached to a post
//! - **Likes**: per-user like rows on a post

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::auth::UserRecord;

// =============================================================================
// User Models
// =============================================================================

/// Credentials supplied on registration and login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserIn {
    /// Email address, the unique user identifier.
    pub email: String,
    /// Plaintext password; only its bcrypt hash is ever stored.
    pub password: String,
}

/// Public view of a user. The password hash never serializes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct User {
    /// Unique identifier for this user.
    pub id: i64,
    /// The user's email address.
    pub email: String,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
        }
    }
}

/// Human-readable outcome of an operation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Detail {
    pub detail: String,
}

impl Detail {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Response to a successful login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// The bearer token for subsequent requests.
    pub access_token: String,
    /// Always `bearer`.
    pub token_type: String,
}

// =============================================================================
// Post Models
// =============================================================================

/// A user post.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Post {
    /// Unique identifier for this post.
    pub id: i64,
    /// Post body text.
    pub body: String,
    /// The author's user id.
    pub user_id: i64,
}

/// Request to create a post.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostIn {
    /// Post body text.
    pub body: String,
}

/// A post together with its like count.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PostWithLikes {
    #[serde(flatten)]
    pub post: Post,
    /// Number of likes on this post.
    pub likes: i64,
}

/// A post with its like count and all of its comments.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PostWithComments {
    pub post: PostWithLikes,
    pub comments: Vec<Comment>,
}

/// Sort order for post listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PostSorting {
    /// Newest first.
    #[default]
    New,
    /// Oldest first.
    Old,
    /// Most-liked first.
    MostLiked,
}

/// Query parameters for `GET /post`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct PostsQuery {
    /// Sort order, defaults to `new`.
    #[serde(default)]
    pub sorting: PostSorting,
}

// =============================================================================
// Comment Models
// =============================================================================

/// A comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Comment {
    /// Unique identifier for this comment.
    pub id: i64,
    /// Comment body text.
    pub body: String,
    /// The post this comment belongs to.
    pub post_id: i64,
    /// The commenting user's id.
    pub user_id: i64,
}

/// Request to create a comment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentIn {
    /// Comment body text.
    pub body: String,
    /// The post to comment on.
    pub post_id: i64,
}

// =============================================================================
// Like Models
// =============================================================================

/// A like on a post.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PostLike {
    /// Unique identifier for this like.
    pub id: i64,
    /// The liked post.
    pub post_id: i64,
    /// The liking user's id.
    pub user_id: i64,
}

/// Request to like a post.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostLikeIn {
    /// The post to like.
    pub post_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_from_record_drops_the_hash() {
        let record = UserRecord {
            id: 1,
            email: "test@example.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            is_confirmed: true,
        };

        let user: User = record.into();
        assert_eq!(user, User {
            id: 1,
            email: "test@example.com".to_string(),
        });

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    fn post_with_likes_flattens() {
        let post = PostWithLikes {
            post: Post {
                id: 1,
                body: "hello".to_string(),
                user_id: 2,
            },
            likes: 3,
        };

        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["body"], "hello");
        assert_eq!(value["likes"], 3);
    }

    #[test]
    fn sorting_defaults_to_new() {
        let query: PostsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.sorting, PostSorting::New);

        let query: PostsQuery = serde_json::from_str(r#"{"sorting":"most_liked"}"#).unwrap();
        assert_eq!(query.sorting, PostSorting::MostLiked);
    }
}
