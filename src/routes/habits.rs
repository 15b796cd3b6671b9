//! HTTP routes for habit tracking
//!
//! - POST /api/habits              - Create a habit
//! - GET  /api/habits              - Active habits, newest first
//! - POST /api/habits/:id/complete - Toggle completion for a date
//! - GET  /api/habits/stats        - Aggregate view

use chrono::{NaiveDate, Utc};
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::helpers::{
    authenticate, error_response, json_response, parse_json_body, parse_json_body_or_default,
    BoxBody,
};
use crate::domain::habits::{self, NewHabit};
use crate::domain::stats::{self, HabitStats};
use crate::models::Habit;
use crate::server::AppState;
use crate::types::HearthError;

// =============================================================================
// Request/Response Types
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitRequest {
    #[serde(default)]
    pub name: String,
    pub emoji: Option<String>,
    pub category: Option<String>,
    pub frequency: Option<String>,
    pub reminder_time: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CompleteRequest {
    /// Defaults to today when absent.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct HabitCreated {
    pub success: bool,
    pub habit: Habit,
}

#[derive(Debug, Serialize)]
pub struct HabitList {
    pub success: bool,
    pub habits: Vec<Habit>,
}

#[derive(Debug, Serialize)]
pub struct CompleteResponse {
    pub success: bool,
    pub habit: Habit,
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: HabitStats,
}

// =============================================================================
// Route Handlers
// =============================================================================

/// POST /api/habits
pub async fn handle_create(req: Request<Incoming>, state: Arc<AppState>) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let body: HabitRequest = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    if body.name.is_empty() {
        return error_response(&HearthError::Validation("Habit name required".to_string()));
    }

    let habit = {
        let mut data = state.store.write().await;
        habits::create(
            &mut data,
            &user_id,
            NewHabit {
                name: body.name,
                emoji: body.emoji.unwrap_or_else(|| "\u{2728}".to_string()),
                category: body.category.unwrap_or_else(|| "health".to_string()),
                frequency: body.frequency.unwrap_or_else(|| "daily".to_string()),
                reminder_time: body.reminder_time,
            },
        )
    };

    state.store.persist().await;

    json_response(
        StatusCode::CREATED,
        &HabitCreated {
            success: true,
            habit,
        },
    )
}

/// GET /api/habits
pub async fn handle_list(req: Request<Incoming>, state: Arc<AppState>) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let data = state.store.read().await;
    let mut habits: Vec<Habit> = data
        .habits
        .iter()
        .filter(|h| h.user_id == user_id && h.is_active)
        .cloned()
        .collect();
    habits.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    json_response(
        StatusCode::OK,
        &HabitList {
            success: true,
            habits,
        },
    )
}

/// POST /api/habits/:id/complete
pub async fn handle_complete(
    req: Request<Incoming>,
    state: Arc<AppState>,
    habit_id: &str,
) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let body: CompleteRequest = match parse_json_body_or_default(req).await {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    let date = body.date.unwrap_or_else(|| Utc::now().date_naive());
    let result = {
        let mut data = state.store.write().await;
        habits::toggle_completion(&mut data, &user_id, habit_id, date)
    };

    let (habit, completed) = match result {
        Ok(r) => r,
        Err(e) => return error_response(&e),
    };

    state.store.persist().await;

    json_response(
        StatusCode::OK,
        &CompleteResponse {
            success: true,
            habit,
            completed,
        },
    )
}

/// GET /api/habits/stats
pub async fn handle_stats(req: Request<Incoming>, state: Arc<AppState>) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let data = state.store.read().await;
    let stats = stats::habit_stats(&data, &user_id, Utc::now().date_naive());

    json_response(
        StatusCode::OK,
        &StatsResponse {
            success: true,
            stats,
        },
    )
}
