//! HTTP routes for the community feed
//!
//! - POST /api/community/posts             - Share a post (anonymous by default)
//! - GET  /api/community/posts             - Paginated feed, newest first (public)
//! - POST /api/community/posts/:id/like    - Toggle the caller's like
//! - POST /api/community/posts/:id/replies - Reply to a post
//! - GET  /api/community/posts/:id/replies - Paginated replies, oldest first (public)

use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::helpers::{
    anonymous_name, authenticate, error_response, json_response, paginate, parse_json_body,
    parse_query, BoxBody, PageQuery, Pagination,
};
use crate::domain::community;
use crate::models::{CommunityPost, PostReply};
use crate::server::AppState;
use crate::types::HearthError;

// =============================================================================
// Request/Response Types
// =============================================================================

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_true")]
    pub is_anonymous: bool,
}

#[derive(Debug, Serialize)]
pub struct PostCreated {
    pub success: bool,
    pub post: CommunityPost,
}

#[derive(Debug, Serialize)]
pub struct PostList {
    pub success: bool,
    pub posts: Vec<CommunityPost>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub success: bool,
    pub liked: bool,
    pub like_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ReplyCreated {
    pub success: bool,
    pub reply: PostReply,
}

#[derive(Debug, Serialize)]
pub struct ReplyList {
    pub success: bool,
    pub replies: Vec<PostReply>,
    pub pagination: Pagination,
}

// =============================================================================
// Route Handlers
// =============================================================================

/// POST /api/community/posts
pub async fn handle_create_post(req: Request<Incoming>, state: Arc<AppState>) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let body: PostRequest = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    if body.content.is_empty() {
        return error_response(&HearthError::Validation("Content required".to_string()));
    }

    let post = {
        let mut data = state.store.write().await;
        let display_name = match data.user_by_id(&user_id) {
            Some(u) => u.name.clone(),
            None => return error_response(&HearthError::Auth("User not found".to_string())),
        };
        let author_name = if body.is_anonymous {
            anonymous_name()
        } else {
            display_name
        };

        community::create_post(&mut data, &user_id, body.content, body.is_anonymous, author_name)
    };

    state.store.persist().await;

    json_response(StatusCode::CREATED, &PostCreated {
        success: true,
        post,
    })
}

/// GET /api/community/posts (public)
pub async fn handle_list_posts(req: Request<Incoming>, state: Arc<AppState>) -> Response<BoxBody> {
    let query: PageQuery = match parse_query(&req) {
        Ok(q) => q,
        Err(e) => return error_response(&e),
    };

    let data = state.store.read().await;
    let mut posts: Vec<CommunityPost> = data.community_posts.clone();
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let (posts, pagination) = paginate(&posts, query.page.unwrap_or(1), query.limit.unwrap_or(50));

    json_response(StatusCode::OK, &PostList {
        success: true,
        posts,
        pagination,
    })
}

/// POST /api/community/posts/:id/like
pub async fn handle_like(
    req: Request<Incoming>,
    state: Arc<AppState>,
    post_id: &str,
) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let result = {
        let mut data = state.store.write().await;
        community::toggle_like(&mut data, &user_id, post_id)
    };

    let (liked, like_count) = match result {
        Ok(r) => r,
        Err(e) => return error_response(&e),
    };

    state.store.persist().await;

    json_response(StatusCode::OK, &LikeResponse {
        success: true,
        liked,
        like_count,
    })
}

/// POST /api/community/posts/:id/replies
pub async fn handle_create_reply(
    req: Request<Incoming>,
    state: Arc<AppState>,
    post_id: &str,
) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let body: PostRequest = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    if body.content.is_empty() {
        return error_response(&HearthError::Validation("Content required".to_string()));
    }

    let result = {
        let mut data = state.store.write().await;
        let display_name = match data.user_by_id(&user_id) {
            Some(u) => u.name.clone(),
            None => return error_response(&HearthError::Auth("User not found".to_string())),
        };
        let author_name = if body.is_anonymous {
            anonymous_name()
        } else {
            display_name
        };

        community::add_reply(
            &mut data,
            &user_id,
            post_id,
            body.content,
            body.is_anonymous,
            author_name,
        )
    };

    let reply = match result {
        Ok(r) => r,
        Err(e) => return error_response(&e),
    };

    state.store.persist().await;

    json_response(StatusCode::CREATED, &ReplyCreated {
        success: true,
        reply,
    })
}

/// GET /api/community/posts/:id/replies (public)
pub async fn handle_list_replies(
    req: Request<Incoming>,
    state: Arc<AppState>,
    post_id: &str,
) -> Response<BoxBody> {
    let query: PageQuery = match parse_query(&req) {
        Ok(q) => q,
        Err(e) => return error_response(&e),
    };

    let data = state.store.read().await;
    let mut replies: Vec<PostReply> = data
        .post_replies
        .iter()
        .filter(|r| r.post_id == post_id)
        .cloned()
        .collect();
    replies.sort_by(|a, b| a.created_at.cmp(&b.created_at));

    let (replies, pagination) =
        paginate(&replies, query.page.unwrap_or(1), query.limit.unwrap_or(50));

    json_response(StatusCode::OK, &ReplyList {
        success: true,
        replies,
        pagination,
    })
}
