//! Daily check-in recording.
//!
//! One check-in per user per calendar date. Recording advances the user's
//! streak incrementally and fires the exact-threshold achievement checks.

use chrono::{NaiveDate, Utc};

use super::{achievements, streak};
use crate::models::{new_id, CheckIn};
use crate::store::AppData;
use crate::types::{HearthError, Result};

/// Validated input for a new check-in.
#[derive(Debug, Clone)]
pub struct NewCheckIn {
    pub sleep: String,
    pub food: String,
    pub focus: String,
    pub mood: String,
    pub notes: String,
    pub tags: Vec<String>,
}

/// Record a check-in for `today`.
///
/// Rejects a second check-in on the same date before any state moves, so the
/// streak engine only ever sees day gaps of at least one.
pub fn record(
    data: &mut AppData,
    user_id: &str,
    input: NewCheckIn,
    today: NaiveDate,
) -> Result<CheckIn> {
    let duplicate = data
        .checkins
        .iter()
        .any(|c| c.user_id == user_id && c.date == today);
    if duplicate {
        return Err(HearthError::Conflict("Already checked in today".to_string()));
    }

    let checkin = CheckIn {
        id: new_id(),
        user_id: user_id.to_string(),
        date: today,
        sleep: input.sleep,
        food: input.food,
        focus: input.focus,
        mood: input.mood,
        notes: input.notes,
        tags: input.tags,
        created_at: Utc::now(),
    };
    data.checkins.push(checkin.clone());

    let (total_check_ins, current_streak) = {
        let user = data
            .user_by_id_mut(user_id)
            .ok_or_else(|| HearthError::Auth("User not found".to_string()))?;

        streak::advance(&mut user.streak, today);
        user.stats.total_check_ins += 1;
        (user.stats.total_check_ins, user.streak.current)
    };

    // Exact-threshold achievement checks
    if total_check_ins == 1 {
        achievements::try_grant(data, user_id, "first_checkin");
    }
    if current_streak == 3 {
        achievements::try_grant(data, user_id, "streak_3");
    }
    if current_streak == 7 {
        achievements::try_grant(data, user_id, "streak_7");
    }

    Ok(checkin)
}
