//! HTTP routes for authentication and account management
//!
//! - POST /api/auth/register       - Create an account, returns a JWT
//! - POST /api/auth/login          - Authenticate, returns a JWT
//! - GET  /api/auth/me             - Current user from token
//! - PUT  /api/auth/profile        - Patch name/avatar/bio
//! - PUT  /api/auth/settings       - Patch notification/theme settings
//! - GET  /api/auth/anonymous-name - Random community pseudonym

use chrono::Utc;
use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use super::helpers::{
    anonymous_name, authenticate, error_response, json_response, parse_json_body, BoxBody,
};
use crate::auth::{hash_password, verify_password};
use crate::models::{new_id, Streak, Theme, User, UserPublic, UserSettings, UserStats};
use crate::server::AppState;
use crate::types::HearthError;

// =============================================================================
// Request/Response Types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdateRequest {
    pub notifications: Option<bool>,
    pub email_notifications: Option<bool>,
    pub theme: Option<String>,
    pub accent_color: Option<String>,
    pub daily_reminder_time: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: UserPublic,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub success: bool,
    pub user: UserPublic,
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub success: bool,
    pub settings: UserSettings,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymousNameResponse {
    pub success: bool,
    pub anonymous_name: String,
}

// =============================================================================
// Route Handlers
// =============================================================================

/// POST /api/auth/register
///
/// Flow:
/// 1. Validate required fields
/// 2. Reject duplicate email/username
/// 3. Hash password with argon2
/// 4. Create user + default theme record
/// 5. Return JWT token and the sanitized user
pub async fn handle_register(req: Request<Incoming>, state: Arc<AppState>) -> Response<BoxBody> {
    let body: RegisterRequest = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    if body.email.is_empty() || body.username.is_empty() || body.name.is_empty() || body.password.is_empty()
    {
        return error_response(&HearthError::Validation(
            "All fields are required".to_string(),
        ));
    }

    let password_hash = match hash_password(&body.password) {
        Ok(h) => h,
        Err(e) => {
            warn!("Password hashing failed: {e}");
            return error_response(&e);
        }
    };

    let user = {
        let mut data = state.store.write().await;

        if let Some(existing) = data
            .users
            .iter()
            .find(|u| u.email == body.email || u.username == body.username)
        {
            let message = if existing.email == body.email {
                "Email already registered"
            } else {
                "Username already taken"
            };
            return error_response(&HearthError::Conflict(message.to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: new_id(),
            email: body.email,
            username: body.username,
            name: body.name,
            password_hash,
            avatar: None,
            bio: String::new(),
            streak: Streak::default(),
            stats: UserStats::default(),
            settings: UserSettings::default(),
            created_at: now,
            last_active: now,
        };
        data.users.push(user.clone());
        let theme = Theme::default_for(&user.id);
        data.themes.push(theme);
        user
    };

    let token = match state.tokens.issue(&user.id, &user.email) {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };

    state.store.persist().await;
    info!("Registered new user: {}", user.username);

    json_response(
        StatusCode::CREATED,
        &AuthResponse {
            success: true,
            token,
            user: user.public(),
        },
    )
}

/// POST /api/auth/login
///
/// Failed lookups and failed password checks both answer with the same
/// generic message so accounts cannot be enumerated.
pub async fn handle_login(req: Request<Incoming>, state: Arc<AppState>) -> Response<BoxBody> {
    let body: LoginRequest = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    if body.email.is_empty() || body.password.is_empty() {
        return error_response(&HearthError::Validation(
            "Email and password required".to_string(),
        ));
    }

    let (user_id, email, stored_hash) = {
        let data = state.store.read().await;
        match data.user_by_email(&body.email) {
            Some(u) => (u.id.clone(), u.email.clone(), u.password_hash.clone()),
            None => {
                warn!("Login failed - unknown email");
                return error_response(&HearthError::Auth("Invalid credentials".to_string()));
            }
        }
    };

    match verify_password(&body.password, &stored_hash) {
        Ok(true) => {}
        Ok(false) => {
            warn!("Login failed - invalid password for {email}");
            return error_response(&HearthError::Auth("Invalid credentials".to_string()));
        }
        Err(e) => {
            warn!("Password verification error: {e}");
            return error_response(&e);
        }
    }

    let user = {
        let mut data = state.store.write().await;
        match data.user_by_id_mut(&user_id) {
            Some(u) => {
                u.last_active = Utc::now();
                u.clone()
            }
            None => return error_response(&HearthError::Auth("Invalid credentials".to_string())),
        }
    };

    let token = match state.tokens.issue(&user.id, &user.email) {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };

    state.store.persist().await;
    info!("Login successful: {}", user.username);

    json_response(
        StatusCode::OK,
        &AuthResponse {
            success: true,
            token,
            user: user.public(),
        },
    )
}

/// GET /api/auth/me
pub async fn handle_me(req: Request<Incoming>, state: Arc<AppState>) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let data = state.store.read().await;
    match data.user_by_id(&user_id) {
        Some(user) => json_response(
            StatusCode::OK,
            &MeResponse {
                success: true,
                user: user.public(),
            },
        ),
        None => error_response(&HearthError::Auth("User not found".to_string())),
    }
}

/// PUT /api/auth/profile
pub async fn handle_update_profile(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let body: ProfileUpdateRequest = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    let user = {
        let mut data = state.store.write().await;
        let user = match data.user_by_id_mut(&user_id) {
            Some(u) => u,
            None => return error_response(&HearthError::Auth("User not found".to_string())),
        };

        if let Some(name) = body.name {
            if !name.is_empty() {
                user.name = name;
            }
        }
        if let Some(avatar) = body.avatar {
            user.avatar = Some(avatar);
        }
        if let Some(bio) = body.bio {
            user.bio = bio;
        }
        user.clone()
    };

    state.store.persist().await;

    json_response(
        StatusCode::OK,
        &MeResponse {
            success: true,
            user: user.public(),
        },
    )
}

/// PUT /api/auth/settings
///
/// Theme and accent color changes are mirrored into the user's theme record
/// so /api/theme and the settings block never disagree.
pub async fn handle_update_settings(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let body: SettingsUpdateRequest = match parse_json_body(req).await {
        Ok(b) => b,
        Err(e) => return error_response(&e),
    };

    let settings = {
        let mut data = state.store.write().await;
        if data.user_by_id(&user_id).is_none() {
            return error_response(&HearthError::Auth("User not found".to_string()));
        }

        if let Some(theme_record) = data.themes.iter_mut().find(|t| t.user_id == user_id) {
            if let Some(ref theme) = body.theme {
                theme_record.theme = theme.clone();
            }
            if let Some(ref color) = body.accent_color {
                theme_record.accent_color = color.clone();
            }
            theme_record.last_updated = Utc::now();
        }

        let user = data.user_by_id_mut(&user_id).expect("checked above");
        if let Some(notifications) = body.notifications {
            user.settings.notifications = notifications;
        }
        if let Some(email_notifications) = body.email_notifications {
            user.settings.email_notifications = email_notifications;
        }
        if let Some(theme) = body.theme {
            user.settings.theme = theme;
        }
        if let Some(color) = body.accent_color {
            user.settings.accent_color = color;
        }
        if let Some(time) = body.daily_reminder_time {
            user.settings.daily_reminder_time = time;
        }
        user.settings.clone()
    };

    state.store.persist().await;

    json_response(
        StatusCode::OK,
        &SettingsResponse {
            success: true,
            settings,
        },
    )
}

/// GET /api/auth/anonymous-name
pub async fn handle_anonymous_name(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    if let Err(e) = authenticate(&state, &req) {
        return error_response(&e);
    }

    json_response(
        StatusCode::OK,
        &AnonymousNameResponse {
            success: true,
            anonymous_name: anonymous_name(),
        },
    )
}
