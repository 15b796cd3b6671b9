//! HTTP routes for achievements and challenges
//!
//! - GET  /api/achievements         - The static catalog (public)
//! - GET  /api/achievements/user    - Caller's grants joined with the catalog
//! - GET  /api/challenges           - Active challenges (public)
//! - POST /api/challenges/:id/join  - Join a challenge
//! - GET  /api/challenges/user      - Caller's memberships joined with the catalog

use hyper::body::Incoming;
use hyper::{Request, Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;

use super::helpers::{authenticate, error_response, json_response, BoxBody};
use crate::domain::challenges;
use crate::models::{Achievement, Challenge, UserAchievement, UserChallenge};
use crate::server::AppState;

// =============================================================================
// Response Types
// =============================================================================

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub success: bool,
    pub achievements: Vec<Achievement>,
}

/// A grant with its catalog entry inlined for the client.
#[derive(Debug, Serialize)]
pub struct GrantView {
    #[serde(flatten)]
    pub grant: UserAchievement,
    pub achievement: Option<Achievement>,
}

#[derive(Debug, Serialize)]
pub struct UserAchievementsResponse {
    pub success: bool,
    pub achievements: Vec<GrantView>,
}

#[derive(Debug, Serialize)]
pub struct ChallengesResponse {
    pub success: bool,
    pub challenges: Vec<Challenge>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinResponse {
    pub success: bool,
    pub user_challenge: UserChallenge,
}

#[derive(Debug, Serialize)]
pub struct MembershipView {
    #[serde(flatten)]
    pub membership: UserChallenge,
    pub challenge: Option<Challenge>,
}

#[derive(Debug, Serialize)]
pub struct UserChallengesResponse {
    pub success: bool,
    pub challenges: Vec<MembershipView>,
}

// =============================================================================
// Route Handlers
// =============================================================================

/// GET /api/achievements (public)
pub async fn handle_achievements(state: Arc<AppState>) -> Response<BoxBody> {
    let data = state.store.read().await;
    json_response(
        StatusCode::OK,
        &CatalogResponse {
            success: true,
            achievements: data.achievements.clone(),
        },
    )
}

/// GET /api/achievements/user
pub async fn handle_user_achievements(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let data = state.store.read().await;
    let achievements: Vec<GrantView> = data
        .user_achievements
        .iter()
        .filter(|ua| ua.user_id == user_id)
        .map(|ua| GrantView {
            grant: ua.clone(),
            achievement: data.achievement(&ua.achievement_id).cloned(),
        })
        .collect();

    json_response(
        StatusCode::OK,
        &UserAchievementsResponse {
            success: true,
            achievements,
        },
    )
}

/// GET /api/challenges (public)
pub async fn handle_challenges(state: Arc<AppState>) -> Response<BoxBody> {
    let data = state.store.read().await;
    let challenges: Vec<Challenge> = data
        .challenges
        .iter()
        .filter(|c| c.is_active)
        .cloned()
        .collect();

    json_response(
        StatusCode::OK,
        &ChallengesResponse {
            success: true,
            challenges,
        },
    )
}

/// POST /api/challenges/:id/join
pub async fn handle_join_challenge(
    req: Request<Incoming>,
    state: Arc<AppState>,
    challenge_id: &str,
) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let result = {
        let mut data = state.store.write().await;
        challenges::join(&mut data, &user_id, challenge_id)
    };

    let membership = match result {
        Ok(m) => m,
        Err(e) => return error_response(&e),
    };

    state.store.persist().await;

    json_response(
        StatusCode::CREATED,
        &JoinResponse {
            success: true,
            user_challenge: membership,
        },
    )
}

/// GET /api/challenges/user
pub async fn handle_user_challenges(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Response<BoxBody> {
    let user_id = match authenticate(&state, &req) {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let data = state.store.read().await;
    let challenges: Vec<MembershipView> = data
        .user_challenges
        .iter()
        .filter(|uc| uc.user_id == user_id)
        .map(|uc| MembershipView {
            membership: uc.clone(),
            challenge: data.challenge(&uc.challenge_id).cloned(),
        })
        .collect();

    json_response(
        StatusCode::OK,
        &UserChallengesResponse {
            success: true,
            challenges,
        },
    )
}
