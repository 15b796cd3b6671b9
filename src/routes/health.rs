//! Health and info endpoints.
//!
//! `/health` is a liveness probe; it also reports entity counts so operators
//! can eyeball the state document without reading the snapshot file.

use hyper::{Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;

use super::helpers::{json_response, BoxBody};
use crate::server::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: &'static str,
    pub timestamp: String,
    pub version: &'static str,
    /// Git commit hash (short), for deployment verification
    pub commit: &'static str,
    /// Build timestamp
    pub build_time: &'static str,
    /// Seconds since process start
    pub uptime: u64,
    pub stats: EntityCounts,
}

#[derive(Serialize)]
pub struct EntityCounts {
    pub users: usize,
    pub checkins: usize,
    pub journals: usize,
    pub posts: usize,
}

/// Handle liveness probe (/health)
pub async fn health_check(state: Arc<AppState>) -> Response<BoxBody> {
    let data = state.store.read().await;

    json_response(
        StatusCode::OK,
        &HealthResponse {
            success: true,
            message: "Hearth backend is running",
            timestamp: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION"),
            commit: option_env!("GIT_COMMIT_SHORT").unwrap_or("unknown"),
            build_time: option_env!("BUILD_TIMESTAMP").unwrap_or("unknown"),
            uptime: state.started_at.elapsed().as_secs(),
            stats: EntityCounts {
                users: data.users.len(),
                checkins: data.checkins.len(),
                journals: data.journals.len(),
                posts: data.community_posts.len(),
            },
        },
    )
}

#[derive(Serialize)]
pub struct InfoResponse {
    pub success: bool,
    pub app: &'static str,
    pub version: &'static str,
    pub features: &'static [&'static str],
}

/// Handle app info (/api/info)
pub fn app_info() -> Response<BoxBody> {
    json_response(
        StatusCode::OK,
        &InfoResponse {
            success: true,
            app: "Hearth Wellness Companion",
            version: env!("CARGO_PKG_VERSION"),
            features: &[
                "Daily Check-ins",
                "Journaling",
                "Habit Tracking",
                "Mood Tracking",
                "Community Posts",
                "Achievements",
                "Challenges",
                "Self-Care Planning",
                "Reminders",
            ],
        },
    )
}
