//! Entity types for the hearth state document.
//!
//! All fields serialize in camelCase: the same shapes go over the wire and
//! into the on-disk snapshot. The only divergence is `User.password_hash`,
//! which persists in the snapshot but must never appear in an API response -
//! handlers return [`UserPublic`] instead.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate a fresh entity id.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// User
// =============================================================================

/// Consecutive-day check-in streak, maintained incrementally on each check-in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    pub current: u32,
    /// High-water mark; raised when `current` passes it, never lowered.
    pub longest: u32,
    pub last_check_in: Option<NaiveDate>,
}

/// Lifetime counters shown on the user's dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_check_ins: u32,
    pub total_journal_entries: u32,
    pub total_habits_completed: u32,
    pub total_mood_entries: u32,
    pub total_points: u32,
    pub achievements: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub notifications: bool,
    pub email_notifications: bool,
    pub theme: String,
    pub accent_color: String,
    pub daily_reminder_time: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            notifications: true,
            email_notifications: false,
            theme: "light".to_string(),
            accent_color: "amber".to_string(),
            daily_reminder_time: "09:00".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub name: String,
    /// Argon2 PHC string. Persisted in the snapshot, stripped from responses.
    pub password_hash: String,
    pub avatar: Option<String>,
    pub bio: String,
    pub streak: Streak,
    pub stats: UserStats,
    pub settings: UserSettings,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl User {
    /// Response-safe view of this user (credential hash removed).
    pub fn public(&self) -> UserPublic {
        UserPublic {
            id: self.id.clone(),
            email: self.email.clone(),
            username: self.username.clone(),
            name: self.name.clone(),
            avatar: self.avatar.clone(),
            bio: self.bio.clone(),
            streak: self.streak.clone(),
            stats: self.stats.clone(),
            settings: self.settings.clone(),
            created_at: self.created_at,
            last_active: self.last_active,
        }
    }
}

/// User as returned by the API - everything except the credential hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPublic {
    pub id: String,
    pub email: String,
    pub username: String,
    pub name: String,
    pub avatar: Option<String>,
    pub bio: String,
    pub streak: Streak,
    pub stats: UserStats,
    pub settings: UserSettings,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

// =============================================================================
// Daily check-in
// =============================================================================

/// One per user per calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub sleep: String,
    pub food: String,
    pub focus: String,
    pub mood: String,
    pub notes: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Journal
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub mood: String,
    pub tags: Vec<String>,
    pub prompt: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    /// Whitespace-split word total, stamped at write time.
    pub word_count: u32,
}

// =============================================================================
// Habits
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub emoji: String,
    pub category: String,
    pub frequency: String,
    pub reminder_time: Option<String>,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_completions: u32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Toggle record: at most one per habit per date, flipped in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitCompletion {
    pub id: String,
    pub habit_id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Mood
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: String,
    pub user_id: String,
    pub mood: String,
    pub intensity: u32,
    pub notes: String,
    pub triggers: Vec<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Achievements
// =============================================================================

/// Static catalog entry. Seeded at bootstrap, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub points: u32,
    pub category: String,
    pub color: String,
}

/// Grant record: (user_id, achievement_id) is unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAchievement {
    pub id: String,
    pub user_id: String,
    pub achievement_id: String,
    pub unlocked_at: DateTime<Utc>,
    pub progress: u32,
    pub is_unlocked: bool,
}

// =============================================================================
// Challenges
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub duration: u32,
    pub points: u32,
    pub icon: String,
    pub color: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserChallenge {
    pub id: String,
    pub user_id: String,
    pub challenge_id: String,
    pub joined_at: DateTime<Utc>,
    pub progress: u32,
    pub is_completed: bool,
    pub streak: u32,
    pub check_ins: Vec<NaiveDate>,
}

// =============================================================================
// Self-care planning
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelfCareActivity {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u8,
    pub time: String,
    pub duration: u32,
    pub is_recurring: bool,
    pub is_active: bool,
    pub priority: u32,
    pub color: String,
    pub icon: String,
    pub completions: Vec<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub time: String,
    pub days_of_week: Vec<u8>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Community
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityPost {
    pub id: String,
    pub user_id: String,
    pub content: String,
    /// Pseudonym when anonymous, display name otherwise.
    pub author_name: String,
    pub is_anonymous: bool,
    /// Like set as a user-id list; membership is toggled, never duplicated.
    pub likes: Vec<String>,
    pub reply_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostReply {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub content: String,
    pub author_name: String,
    pub is_anonymous: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Theme
// =============================================================================

/// One per user, created at registration (or lazily on first theme write).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub user_id: String,
    pub theme: String,
    pub accent_color: String,
    pub font_size: String,
    pub reduced_motion: bool,
    pub last_updated: DateTime<Utc>,
}

impl Theme {
    pub fn default_for(user_id: &str) -> Self {
        Self {
            id: new_id(),
            user_id: user_id.to_string(),
            theme: "light".to_string(),
            accent_color: "amber".to_string(),
            font_size: "medium".to_string(),
            reduced_motion: false,
            last_updated: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_view_strips_credential_hash() {
        let user = User {
            id: new_id(),
            email: "fern@example.com".to_string(),
            username: "fern".to_string(),
            name: "Fern".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            avatar: None,
            bio: String::new(),
            streak: Streak::default(),
            stats: UserStats::default(),
            settings: UserSettings::default(),
            created_at: Utc::now(),
            last_active: Utc::now(),
        };

        let json = serde_json::to_value(user.public()).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["username"], "fern");
        // Wire format is camelCase throughout
        assert!(json.get("createdAt").is_some());
        assert!(json["stats"].get("totalCheckIns").is_some());
    }

    #[test]
    fn test_check_in_date_serializes_as_plain_date() {
        let checkin = CheckIn {
            id: new_id(),
            user_id: "u1".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            sleep: "good".to_string(),
            food: "balanced".to_string(),
            focus: "sharp".to_string(),
            mood: "calm".to_string(),
            notes: String::new(),
            tags: vec![],
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&checkin).unwrap();
        assert_eq!(json["date"], "2026-03-14");
        assert!(json.get("userId").is_some());
    }
}
