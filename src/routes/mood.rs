//! HTTP routes for mood tracking
//!
//! - POST /api/mood       - Record a mood entry (append-only)
//! - GET  /api/mood       - History with date filters, newest first
//! - GET  /api/mood/stats - 30-day aggregate view

use chrono::{NaiveDate, Utc};
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::helpers::{
    authenticate, error_response, json_response, parse_json_body, parse_query, BoxBody,
};
use crate::domain::stats::{self, MoodStats};
use crate::models::{new_id, MoodEntry};
use crate::server::AppState;
use crate::types::HearthError;

#[derive(Debug, Deserialize)]
pub struct MoodRequest {
    #[serde(default)]
    pub mood: String,
    pub intensity: Option<u32>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub triggers: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodCreated {
    pub success: bool,
    pub mood_entry: MoodEntry,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub success: bool,
    pub mood_entries: Vec<MoodEntry>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: MoodStats,
}

/// POST /api/mood
pub async fn handle_create(req: Request<Incoming>, state: Arc<AppState>) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let body: MoodRequest = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    if body.mood.is_empty() {
        return error_response(&HearthError::Validation("Mood required".to_string()));
    }

    let entry = {
        let mut data = state.store.write().await;
        if data.user_by_id(&user_id).is_none() {
            return error_response(&HearthError::Auth("User not found".to_string()));
        }

        let now = Utc::now();
        let entry = MoodEntry {
            id: new_id(),
            user_id: user_id.clone(),
            mood: body.mood,
            intensity: body.intensity.unwrap_or(5),
            notes: body.notes,
            triggers: body.triggers,
            date: now.date_naive(),
            created_at: now,
        };
        data.mood_entries.push(entry.clone());

        let user = data.user_by_id_mut(&user_id).expect("checked above");
        user.stats.total_mood_entries += 1;
        entry
    };

    state.store.persist().await;

    json_response(
        StatusCode::CREATED,
        &MoodCreated {
            success: true,
            mood_entry: entry,
        },
    )
}

/// GET /api/mood
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
    let mut mine: Vec<MoodEntry> = data
        .mood_entries
        .iter()
        .filter(|m| {
            m.user_id == user_id
                && query.start_date.map_or(true, |start| m.date >= start)
                && query.end_date.map_or(true, |end| m.date <= end)
        })
        .cloned()
        .collect();
    mine.sort_by(|a, b| b.date.cmp(&a.date));

    json_response(
        StatusCode::OK,
        &ListResponse {
            success: true,
            mood_entries: mine,
        },
    )
}

/// GET /api/mood/stats
pub async fn handle_stats(req: Request<Incoming>, state: Arc<AppState>) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let data = state.store.read().await;
    let stats = stats::mood_stats(&data, &user_id, Utc::now().date_naive());

    json_response(
        StatusCode::OK,
        &StatsResponse {
            success: true,
            stats,
        },
    )
}
