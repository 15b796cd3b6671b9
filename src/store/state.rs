//! The whole-application state document.
//!
//! One `AppData` instance is authoritative for the lifetime of the process.
//! It serializes to the snapshot file as a single JSON document with one
//! top-level array per entity type plus a `lastSave` timestamp, which is also
//! the bootstrap wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    Achievement, Challenge, CheckIn, CommunityPost, Habit, HabitCompletion, JournalEntry,
    MoodEntry, PostReply, Reminder, SelfCareActivity, Theme, User, UserAchievement, UserChallenge,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppData {
    pub users: Vec<User>,
    pub checkins: Vec<CheckIn>,
    pub journals: Vec<JournalEntry>,
    pub habits: Vec<Habit>,
    pub habit_completions: Vec<HabitCompletion>,
    pub mood_entries: Vec<MoodEntry>,
    pub achievements: Vec<Achievement>,
    pub user_achievements: Vec<UserAchievement>,
    pub self_care_activities: Vec<SelfCareActivity>,
    pub challenges: Vec<Challenge>,
    pub user_challenges: Vec<UserChallenge>,
    pub reminders: Vec<Reminder>,
    pub community_posts: Vec<CommunityPost>,
    pub post_replies: Vec<PostReply>,
    pub themes: Vec<Theme>,
    pub last_save: DateTime<Utc>,
}

impl Default for AppData {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            checkins: Vec::new(),
            journals: Vec::new(),
            habits: Vec::new(),
            habit_completions: Vec::new(),
            mood_entries: Vec::new(),
            achievements: Vec::new(),
            user_achievements: Vec::new(),
            self_care_activities: Vec::new(),
            challenges: Vec::new(),
            user_challenges: Vec::new(),
            reminders: Vec::new(),
            community_posts: Vec::new(),
            post_replies: Vec::new(),
            themes: Vec::new(),
            last_save: Utc::now(),
        }
    }
}

impl AppData {
    /// Fresh state with the compiled-in catalogs, used when no snapshot
    /// exists or the snapshot fails to parse.
    pub fn seed() -> Self {
        Self {
            achievements: default_achievements(),
            challenges: default_challenges(),
            ..Self::default()
        }
    }

    pub fn user_by_id(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn user_by_id_mut(&mut self, id: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    pub fn achievement(&self, id: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }

    pub fn challenge(&self, id: &str) -> Option<&Challenge> {
        self.challenges.iter().find(|c| c.id == id)
    }

    pub fn post_mut(&mut self, id: &str) -> Option<&mut CommunityPost> {
        self.community_posts.iter_mut().find(|p| p.id == id)
    }
}

/// Built-in achievement catalog. Ids are referenced by the evaluator's
/// threshold checks and must stay stable across releases.
fn default_achievements() -> Vec<Achievement> {
    vec![
        Achievement {
            id: "first_checkin".to_string(),
            title: "Getting Started".to_string(),
            description: "Complete your first daily check-in".to_string(),
            icon: "\u{1F3AF}".to_string(),
            points: 10,
            category: "consistency".to_string(),
            color: "blue".to_string(),
        },
        Achievement {
            id: "streak_3".to_string(),
            title: "Three Day Streak".to_string(),
            description: "Check in for 3 consecutive days".to_string(),
            icon: "\u{26A1}".to_string(),
            points: 25,
            category: "consistency".to_string(),
            color: "green".to_string(),
        },
        Achievement {
            id: "streak_7".to_string(),
            title: "Weekly Warrior".to_string(),
            description: "Check in for 7 consecutive days".to_string(),
            icon: "\u{1F4C5}".to_string(),
            points: 50,
            category: "consistency".to_string(),
            color: "purple".to_string(),
        },
        Achievement {
            id: "first_journal".to_string(),
            title: "Reflective Soul".to_string(),
            description: "Write your first journal entry".to_string(),
            icon: "\u{1F4D6}".to_string(),
            points: 15,
            category: "awareness".to_string(),
            color: "amber".to_string(),
        },
        Achievement {
            id: "first_post".to_string(),
            title: "Storyteller".to_string(),
            description: "Share your first community post".to_string(),
            icon: "\u{1F4AC}".to_string(),
            points: 20,
            category: "community".to_string(),
            color: "pink".to_string(),
        },
    ]
}

/// Built-in challenge catalog.
fn default_challenges() -> Vec<Challenge> {
    vec![
        Challenge {
            id: "hydration_7".to_string(),
            title: "7-Day Hydration Challenge".to_string(),
            description: "Drink 8 glasses of water daily for a week".to_string(),
            category: "wellness".to_string(),
            duration: 7,
            points: 50,
            icon: "\u{1F4A7}".to_string(),
            color: "blue".to_string(),
            is_active: true,
        },
        Challenge {
            id: "gratitude_week".to_string(),
            title: "Gratitude Week".to_string(),
            description: "Share one thing you're grateful for each day".to_string(),
            category: "mindfulness".to_string(),
            duration: 7,
            points: 40,
            icon: "\u{1F64F}".to_string(),
            color: "green".to_string(),
            is_active: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_catalogs() {
        let data = AppData::seed();

        assert_eq!(data.achievements.len(), 5);
        assert_eq!(data.challenges.len(), 2);
        assert!(data.users.is_empty());

        // Threshold ids the evaluator depends on
        for id in [
            "first_checkin",
            "streak_3",
            "streak_7",
            "first_journal",
            "first_post",
        ] {
            assert!(data.achievement(id).is_some(), "missing catalog id {id}");
        }

        assert_eq!(data.achievement("streak_3").unwrap().points, 25);
        assert!(data.challenge("hydration_7").unwrap().is_active);
    }

    #[test]
    fn test_document_round_trips_with_camel_case_arrays() {
        let data = AppData::seed();
        let json = serde_json::to_value(&data).unwrap();

        assert!(json.get("habitCompletions").is_some());
        assert!(json.get("moodEntries").is_some());
        assert!(json.get("lastSave").is_some());

        let back: AppData = serde_json::from_value(json).unwrap();
        assert_eq!(back.achievements.len(), 5);
    }

    #[test]
    fn test_missing_arrays_default_to_empty() {
        // Older or hand-edited snapshots may omit arrays entirely
        let back: AppData =
            serde_json::from_str(r#"{"lastSave":"2026-01-01T00:00:00Z"}"#).unwrap();
        assert!(back.users.is_empty());
        assert!(back.themes.is_empty());
    }
}
