//! HTTP routes for self-care planning, reminders, and theme preferences.

use chrono::Utc;
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::helpers::{authenticate, error_response, json_response, parse_json_body, BoxBody};
use crate::models::{new_id, Reminder, SelfCareActivity, Theme};
use crate::server::AppState;
use crate::types::HearthError;

// =============================================================================
// Request/Response Types
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: Option<String>,
    pub day_of_week: Option<u8>,
    #[serde(default)]
    pub time: String,
    pub duration: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub time: String,
    pub days_of_week: Option<Vec<u8>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeRequest {
    pub theme: Option<String>,
    pub accent_color: Option<String>,
    pub font_size: Option<String>,
    pub reduced_motion: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ActivityCreated {
    pub success: bool,
    pub activity: SelfCareActivity,
}

#[derive(Debug, Serialize)]
pub struct ActivityList {
    pub success: bool,
    pub activities: Vec<SelfCareActivity>,
}

#[derive(Debug, Serialize)]
pub struct ReminderCreated {
    pub success: bool,
    pub reminder: Reminder,
}

#[derive(Debug, Serialize)]
pub struct ReminderList {
    pub success: bool,
    pub reminders: Vec<Reminder>,
}

#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub success: bool,
    pub theme: Theme,
}

// =============================================================================
// Self-care activities
// =============================================================================

/// POST /api/selfcare
pub async fn handle_create_activity(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let body: ActivityRequest = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    let day_of_week = match body.day_of_week {
        Some(d) if d <= 6 => d,
        _ => {
            return error_response(&HearthError::Validation(
                "Missing required fields".to_string(),
            ))
        }
    };
    if body.title.is_empty() || body.time.is_empty() {
        return error_response(&HearthError::Validation(
            "Missing required fields".to_string(),
        ));
    }

    let activity = SelfCareActivity {
        id: new_id(),
        user_id: user_id.clone(),
        title: body.title,
        description: body.description,
        category: body.category.unwrap_or_else(|| "selfcare".to_string()),
        day_of_week,
        time: body.time,
        duration: body.duration.unwrap_or(15),
        is_recurring: true,
        is_active: true,
        priority: 2,
        color: "blue".to_string(),
        icon: "\u{2764}".to_string(),
        completions: Vec::new(),
        created_at: Utc::now(),
    };

    {
        let mut data = state.store.write().await;
        data.self_care_activities.push(activity.clone());
    }
    state.store.persist().await;

    json_response(
        StatusCode::CREATED,
        &ActivityCreated {
            success: true,
            activity,
        },
    )
}

/// GET /api/selfcare
pub async fn handle_list_activities(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let data = state.store.read().await;
    let mut activities: Vec<SelfCareActivity> = data
        .self_care_activities
        .iter()
        .filter(|a| a.user_id == user_id && a.is_active)
        .cloned()
        .collect();
    activities.sort_by_key(|a| a.day_of_week);

    json_response(
        StatusCode::OK,
        &ActivityList {
            success: true,
            activities,
        },
    )
}

// =============================================================================
// Reminders
// =============================================================================

/// POST /api/reminders
pub async fn handle_create_reminder(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let body: ReminderRequest = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    if body.title.is_empty() || body.message.is_empty() || body.time.is_empty() {
        return error_response(&HearthError::Validation(
            "Missing required fields".to_string(),
        ));
    }

    let reminder = Reminder {
        id: new_id(),
        user_id: user_id.clone(),
        title: body.title,
        message: body.message,
        kind: "custom".to_string(),
        time: body.time,
        days_of_week: body.days_of_week.unwrap_or_else(|| (0..=6).collect()),
        is_active: true,
        created_at: Utc::now(),
    };

    {
        let mut data = state.store.write().await;
        data.reminders.push(reminder.clone());
    }
    state.store.persist().await;

    json_response(
        StatusCode::CREATED,
        &ReminderCreated {
            success: true,
            reminder,
        },
    )
}

/// GET /api/reminders
pub async fn handle_list_reminders(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let data = state.store.read().await;
    let mut reminders: Vec<Reminder> = data
        .reminders
        .iter()
        .filter(|r| r.user_id == user_id && r.is_active)
        .cloned()
        .collect();
    reminders.sort_by(|a, b| a.time.cmp(&b.time));

    json_response(
        StatusCode::OK,
        &ReminderList {
            success: true,
            reminders,
        },
    )
}

// =============================================================================
// Theme
// =============================================================================

/// GET /api/theme
///
/// A user who has never written a theme gets the defaults; the record is
/// created lazily on the first PUT.
pub async fn handle_get_theme(req: Request<Incoming>, state: Arc<AppState>) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let data = state.store.read().await;
    let theme = data
        .themes
        .iter()
        .find(|t| t.user_id == user_id)
        .cloned()
        .unwrap_or_else(|| Theme::default_for(&user_id));

    json_response(
        StatusCode::OK,
        &ThemeResponse {
            success: true,
            theme,
        },
    )
}

/// PUT /api/theme
///
/// Theme and accent color are mirrored into the user's settings block so the
/// two views never disagree.
pub async fn handle_update_theme(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let body: ThemeRequest = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    let theme = {
        let mut data = state.store.write().await;
        if data.user_by_id(&user_id).is_none() {
            return error_response(&HearthError::Auth("User not found".to_string()));
        }

        if !data.themes.iter().any(|t| t.user_id == user_id) {
            let record = Theme::default_for(&user_id);
            data.themes.push(record);
        }

        let record = data
            .themes
            .iter_mut()
            .find(|t| t.user_id == user_id)
            .expect("inserted above");
        if let Some(ref theme) = body.theme {
            record.theme = theme.clone();
        }
        if let Some(ref color) = body.accent_color {
            record.accent_color = color.clone();
        }
        if let Some(font_size) = body.font_size {
            record.font_size = font_size;
        }
        if let Some(reduced_motion) = body.reduced_motion {
            record.reduced_motion = reduced_motion;
        }
        record.last_updated = Utc::now();
        let record = record.clone();

        let user = data.user_by_id_mut(&user_id).expect("checked above");
        if let Some(theme) = body.theme {
            user.settings.theme = theme;
        }
        if let Some(color) = body.accent_color {
            user.settings.accent_color = color;
        }
        record
    };

    state.store.persist().await;

    json_response(
        StatusCode::OK,
        &ThemeResponse {
            success: true,
            theme,
        },
    )
}
