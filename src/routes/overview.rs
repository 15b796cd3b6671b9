//! Dashboard overview route.

use chrono::Utc;
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;

use super::helpers::{authenticate, error_response, json_response, BoxBody};
use crate::models::UserStats;
use crate::server::AppState;
use crate::types::HearthError;

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub success: bool,
    pub stats: Overview,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub user: UserStats,
    pub streak: u32,
    pub longest_streak: u32,
    pub total_points: u32,
    pub achievements: u32,
    pub today_checkin: bool,
    pub today_mood: bool,
}

/// GET /api/stats
pub async fn handle_stats(req: Request<Incoming>, state: Arc<AppState>) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let today = Utc::now().date_naive();
    let data = state.store.read().await;
    let user = match data.user_by_id(&user_id) {
        Some(u) => u,
        None => return error_response(&HearthError::Auth("User not found".to_string())),
    };

    let overview = Overview {
        user: user.stats.clone(),
        streak: user.streak.current,
        longest_streak: user.streak.longest,
        total_points: user.stats.total_points,
        achievements: user.stats.achievements,
        today_checkin: data
            .checkins
            .iter()
            .any(|c| c.user_id == user_id && c.date == today),
        today_mood: data
            .mood_entries
            .iter()
            .any(|m| m.user_id == user_id && m.date == today),
    };

    json_response(
        StatusCode::OK,
        &OverviewResponse {
            success: true,
            stats: overview,
        },
    )
}
