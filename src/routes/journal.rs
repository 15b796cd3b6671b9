//! HTTP routes for journaling
//!
//! - POST /api/journal         - Create an entry (word count stamped at write)
//! - GET  /api/journal         - Paginated history with date/mood/tag filters
//! - GET  /api/journal/stats   - 30-day aggregate view
//! - GET  /api/journal/prompts - Five random reflection prompts (public)

use chrono::{NaiveDate, Utc};
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::helpers::{
    authenticate, error_response, json_response, paginate, parse_json_body, parse_query, BoxBody,
    Pagination,
};
use crate::domain::journal::{self, NewJournalEntry};
use crate::domain::stats::{self, JournalStats};
use crate::models::JournalEntry;
use crate::server::AppState;
use crate::types::HearthError;

const PROMPTS: [&str; 10] = [
    "What's one small thing you're grateful for today?",
    "What challenged you today, and how did you handle it?",
    "What's something you learned about yourself today?",
    "How did you show yourself kindness today?",
    "What moment brought you peace today?",
    "What's a boundary you honored today?",
    "What's one step you took toward your goals today?",
    "How did you recharge your energy today?",
    "What made you smile today?",
    "What would you tell your past self about today?",
];

// =============================================================================
// Request/Response Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct JournalRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub mood: Option<String>,
    pub tag: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct EntryCreated {
    pub success: bool,
    pub entry: JournalEntry,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub entries: Vec<JournalEntry>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: JournalStats,
}

#[derive(Debug, Serialize)]
pub struct PromptsResponse {
    pub success: bool,
    pub prompts: Vec<&'static str>,
}

// =============================================================================
// Route Handlers
// =============================================================================

/// POST /api/journal
pub async fn handle_create(req: Request<Incoming>, state: Arc<AppState>) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let body: JournalRequest = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    if body.content.is_empty() {
        return error_response(&HearthError::Validation("Content required".to_string()));
    }

    let result = {
        let mut data = state.store.write().await;
        journal::create(
            &mut data,
            &user_id,
            NewJournalEntry {
                content: body.content,
                mood: body.mood,
                tags: body.tags,
                prompt: body.prompt,
            },
            Utc::now(),
        )
    };

    let entry = match result {
        Ok(e) => e,
        Err(e) => return error_response(&e),
    };

    state.store.persist().await;

    json_response(
        StatusCode::CREATED,
        &EntryCreated {
            success: true,
            entry,
        },
    )
}

/// GET /api/journal
pub async fn handle_list(req: Request<Incoming>, state: Arc<AppState>) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let query: ListQuery = match parse_query(&req) {
        Ok(q) => q,
        Err(e) => return error_response(&e),
    };

    let data = state.store.read().await;
    let mut mine: Vec<JournalEntry> = data
        .journals
        .iter()
        .filter(|j| {
            j.user_id == user_id
                && query.start_date.map_or(true, |start| j.date >= start)
                && query.end_date.map_or(true, |end| j.date <= end)
                && query.mood.as_ref().map_or(true, |m| &j.mood == m)
                && query.tag.as_ref().map_or(true, |t| j.tags.contains(t))
        })
        .cloned()
        .collect();
    mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let (entries, pagination) = paginate(&mine, query.page.unwrap_or(1), query.limit.unwrap_or(20));

    json_response(
        StatusCode::OK,
        &ListResponse {
            success: true,
            entries,
            pagination,
        },
    )
}

/// GET /api/journal/stats
pub async fn handle_stats(req: Request<Incoming>, state: Arc<AppState>) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let data = state.store.read().await;
    let stats = stats::journal_stats(&data, &user_id, Utc::now());

    json_response(
        StatusCode::OK,
        &StatsResponse {
            success: true,
            stats,
        },
    )
}

/// GET /api/journal/prompts
pub fn handle_prompts() -> Response<BoxBody> {
    use rand::seq::SliceRandom;

    let mut prompts = PROMPTS.to_vec();
    prompts.shuffle(&mut rand::thread_rng());
    prompts.truncate(5);

    json_response(
        StatusCode::OK,
        &PromptsResponse {
            success: true,
            prompts,
        },
    )
}
