//! HTTP routes for daily check-ins
//!
//! - POST /api/checkins          - Record today's check-in
//! - GET  /api/checkins/today    - Today's check-in, if any
//! - GET  /api/checkins          - Paginated history with date filters
//! - GET  /api/checkins/stats    - 30-day aggregate view
//! - GET  /api/checkins/calendar - Per-date categorical map for one month

use chrono::{Datelike, NaiveDate, Utc};
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use super::helpers::{
    authenticate, error_response, json_response, paginate, parse_json_body, parse_query, BoxBody,
    Pagination,
};
use crate::domain::checkins::{self, NewCheckIn};
use crate::domain::stats::{self, CheckInStats};
use crate::models::CheckIn;
use crate::server::AppState;
use crate::types::HearthError;

// =============================================================================
// Request/Response Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    #[serde(default)]
    pub sleep: String,
    #[serde(default)]
    pub food: String,
    #[serde(default)]
    pub focus: String,
    #[serde(default)]
    pub mood: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    /// 1-12
    pub month: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInCreated {
    pub success: bool,
    pub check_in: CheckIn,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayResponse {
    pub success: bool,
    pub check_in: Option<CheckIn>,
    pub has_checked_in_today: bool,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub checkins: Vec<CheckIn>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: CheckInStats,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarResponse {
    pub success: bool,
    pub year: i32,
    pub month: u32,
    /// Keyed by ISO date string (`2026-03-14`).
    pub data: HashMap<String, CalendarDay>,
}

#[derive(Debug, Serialize)]
pub struct CalendarDay {
    pub mood: String,
    pub sleep: String,
    pub food: String,
    pub focus: String,
}

// =============================================================================
// Route Handlers
// =============================================================================

/// POST /api/checkins
pub async fn handle_create(req: Request<Incoming>, state: Arc<AppState>) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let body: CheckInRequest = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    if body.sleep.is_empty() || body.food.is_empty() || body.focus.is_empty() || body.mood.is_empty()
    {
        return error_response(&HearthError::Validation(
            "Missing required fields".to_string(),
        ));
    }

    let today = Utc::now().date_naive();
    let result = {
        let mut data = state.store.write().await;
        checkins::record(
            &mut data,
            &user_id,
            NewCheckIn {
                sleep: body.sleep,
                food: body.food,
                focus: body.focus,
                mood: body.mood,
                notes: body.notes,
                tags: body.tags,
            },
            today,
        )
    };

    let checkin = match result {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };

    state.store.persist().await;

    json_response(
        StatusCode::CREATED,
        &CheckInCreated {
            success: true,
            check_in: checkin,
        },
    )
}

/// GET /api/checkins/today
pub async fn handle_today(req: Request<Incoming>, state: Arc<AppState>) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let today = Utc::now().date_naive();
    let data = state.store.read().await;
    let checkin = data
        .checkins
        .iter()
        .find(|c| c.user_id == user_id && c.date == today)
        .cloned();

    json_response(
        StatusCode::OK,
        &TodayResponse {
            success: true,
            has_checked_in_today: checkin.is_some(),
            check_in: checkin,
        },
    )
}

/// GET /api/checkins
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
    let mut mine: Vec<CheckIn> = data
        .checkins
        .iter()
        .filter(|c| {
            c.user_id == user_id
                && query.start_date.map_or(true, |start| c.date >= start)
                && query.end_date.map_or(true, |end| c.date <= end)
        })
        .cloned()
        .collect();
    mine.sort_by(|a, b| b.date.cmp(&a.date));

    let (checkins, pagination) = paginate(&mine, query.page.unwrap_or(1), query.limit.unwrap_or(30));

    json_response(
        StatusCode::OK,
        &ListResponse {
            success: true,
            checkins,
            pagination,
        },
    )
}

/// GET /api/checkins/stats
pub async fn handle_stats(req: Request<Incoming>, state: Arc<AppState>) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let data = state.store.read().await;
    let stats = stats::check_in_stats(&data, &user_id, Utc::now().date_naive());

    json_response(
        StatusCode::OK,
        &StatsResponse {
            success: true,
            stats,
        },
    )
}

/// GET /api/checkins/calendar
pub async fn handle_calendar(req: Request<Incoming>, state: Arc<AppState>) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let query: CalendarQuery = match parse_query(&req) {
        Ok(q) => q,
        Err(e) => return error_response(&e),
    };

    let today = Utc::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());

    let start = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d,
        None => {
            return error_response(&HearthError::Validation("Invalid year/month".to_string()))
        }
    };
    // Last day of the month: first of the next month, minus one day
    let end = start
        .checked_add_months(chrono::Months::new(1))
        .and_then(|d| d.pred_opt())
        .expect("in-range date");

    let data = state.store.read().await;
    let days: HashMap<String, CalendarDay> = data
        .checkins
        .iter()
        .filter(|c| c.user_id == user_id && c.date >= start && c.date <= end)
        .map(|c| {
            (
                c.date.to_string(),
                CalendarDay {
                    mood: c.mood.clone(),
                    sleep: c.sleep.clone(),
                    food: c.food.clone(),
                    focus: c.focus.clone(),
                },
            )
        })
        .collect();

    json_response(
        StatusCode::OK,
        &CalendarResponse {
            success: true,
            year,
            month,
            data: days,
        },
    )
}
