//! Read-side aggregate statistics over a 30-day trailing window.
//!
//! Pure functions over the state document; "now" is always passed in so the
//! window is deterministic under test. Every ratio guards the empty window
//! and reports 0 instead of dividing by zero.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::store::AppData;

/// Trailing window length for all aggregate views.
pub const WINDOW_DAYS: i64 = 30;

fn window_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(WINDOW_DAYS)
}

/// Convert absolute counts to integer percentages of `total`.
fn to_percentages(counts: HashMap<String, u32>, total: u32) -> HashMap<String, u32> {
    if total == 0 {
        return HashMap::new();
    }
    counts
        .into_iter()
        .map(|(k, n)| (k, ((n as f64 / total as f64) * 100.0).round() as u32))
        .collect()
}

// =============================================================================
// Check-ins
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInStats {
    pub total: u32,
    pub by_mood: HashMap<String, u32>,
    pub by_sleep: HashMap<String, u32>,
    pub by_food: HashMap<String, u32>,
    pub by_focus: HashMap<String, u32>,
    /// Caller's current check-in streak, echoed for the dashboard.
    pub streak: u32,
    /// Window coverage as an integer percentage of 30 days.
    pub consistency: u32,
}

pub fn check_in_stats(data: &AppData, user_id: &str, today: NaiveDate) -> CheckInStats {
    let start = window_start(today);
    let recent: Vec<_> = data
        .checkins
        .iter()
        .filter(|c| c.user_id == user_id && c.date >= start)
        .collect();

    let total = recent.len() as u32;
    let mut by_mood: HashMap<String, u32> = HashMap::new();
    let mut by_sleep: HashMap<String, u32> = HashMap::new();
    let mut by_food: HashMap<String, u32> = HashMap::new();
    let mut by_focus: HashMap<String, u32> = HashMap::new();

    for checkin in &recent {
        *by_mood.entry(checkin.mood.clone()).or_default() += 1;
        *by_sleep.entry(checkin.sleep.clone()).or_default() += 1;
        *by_food.entry(checkin.food.clone()).or_default() += 1;
        *by_focus.entry(checkin.focus.clone()).or_default() += 1;
    }

    let streak = data
        .user_by_id(user_id)
        .map(|u| u.streak.current)
        .unwrap_or(0);

    let consistency = if total > 0 {
        ((total as f64 / WINDOW_DAYS as f64) * 100.0).round() as u32
    } else {
        0
    };

    CheckInStats {
        total,
        by_mood: to_percentages(by_mood, total),
        by_sleep: to_percentages(by_sleep, total),
        by_food: to_percentages(by_food, total),
        by_focus: to_percentages(by_focus, total),
        streak,
        consistency,
    }
}

// =============================================================================
// Journals
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalStats {
    pub total_entries: u32,
    pub entries_by_mood: HashMap<String, u32>,
    pub total_words: u32,
    pub average_words: u32,
    /// Fractional coverage (entries / 30), rounded to two decimals.
    pub consistency: f64,
}

pub fn journal_stats(data: &AppData, user_id: &str, now: DateTime<Utc>) -> JournalStats {
    let start = now - Duration::days(WINDOW_DAYS);
    let recent: Vec<_> = data
        .journals
        .iter()
        .filter(|j| j.user_id == user_id && j.created_at >= start)
        .collect();

    let total = recent.len() as u32;
    let total_words: u32 = recent.iter().map(|j| j.word_count).sum();

    let mut by_mood: HashMap<String, u32> = HashMap::new();
    for entry in &recent {
        if !entry.mood.is_empty() {
            *by_mood.entry(entry.mood.clone()).or_default() += 1;
        }
    }

    let average_words = if total > 0 {
        (total_words as f64 / total as f64).round() as u32
    } else {
        0
    };

    let consistency = if total > 0 {
        ((total as f64 / WINDOW_DAYS as f64) * 100.0).round() / 100.0
    } else {
        0.0
    };

    JournalStats {
        total_entries: total,
        entries_by_mood: to_percentages(by_mood, total),
        total_words,
        average_words,
        consistency,
    }
}

// =============================================================================
// Moods
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodStats {
    pub total_entries: u32,
    pub mood_distribution: HashMap<String, u32>,
    pub average_intensity: u32,
    /// Trigger tags by absolute frequency, not percentage.
    pub common_triggers: HashMap<String, u32>,
    pub consistency: u32,
}

pub fn mood_stats(data: &AppData, user_id: &str, today: NaiveDate) -> MoodStats {
    let start = window_start(today);
    let recent: Vec<_> = data
        .mood_entries
        .iter()
        .filter(|m| m.user_id == user_id && m.date >= start)
        .collect();

    let total = recent.len() as u32;
    let mut distribution: HashMap<String, u32> = HashMap::new();
    let mut common_triggers: HashMap<String, u32> = HashMap::new();
    let mut intensity_sum = 0u32;

    for entry in &recent {
        *distribution.entry(entry.mood.clone()).or_default() += 1;
        intensity_sum += entry.intensity;
        for trigger in &entry.triggers {
            *common_triggers.entry(trigger.clone()).or_default() += 1;
        }
    }

    let average_intensity = if total > 0 {
        (intensity_sum as f64 / total as f64).round() as u32
    } else {
        0
    };

    MoodStats {
        total_entries: total,
        mood_distribution: to_percentages(distribution, total),
        average_intensity,
        common_triggers,
        consistency: ((total as f64 / WINDOW_DAYS as f64) * 100.0).round() as u32,
    }
}

// =============================================================================
// Habits
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitStats {
    pub total_habits: u32,
    pub active_habits: u32,
    pub total_completions: u32,
    pub today_completions: u32,
    pub completion_rate: u32,
    pub best_streak: u32,
}

pub fn habit_stats(data: &AppData, user_id: &str, today: NaiveDate) -> HabitStats {
    let habits: Vec<_> = data.habits.iter().filter(|h| h.user_id == user_id).collect();
    let completions: Vec<_> = data
        .habit_completions
        .iter()
        .filter(|hc| hc.user_id == user_id && hc.completed)
        .collect();

    let completion_rate = if habits.is_empty() {
        0
    } else {
        ((completions.len() as f64 / habits.len() as f64) * 100.0).round() as u32
    };

    HabitStats {
        total_habits: habits.len() as u32,
        active_habits: habits.iter().filter(|h| h.is_active).count() as u32,
        total_completions: completions.len() as u32,
        today_completions: completions.iter().filter(|hc| hc.date == today).count() as u32,
        completion_rate,
        best_streak: habits.iter().map(|h| h.longest_streak).max().unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{new_id, CheckIn, JournalEntry, MoodEntry};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn checkin(user_id: &str, date: NaiveDate, mood: &str, sleep: &str) -> CheckIn {
        CheckIn {
            id: new_id(),
            user_id: user_id.to_string(),
            date,
            sleep: sleep.to_string(),
            food: "balanced".to_string(),
            focus: "steady".to_string(),
            mood: mood.to_string(),
            notes: String::new(),
            tags: vec![],
            created_at: Utc::now(),
        }
    }

    fn mood_entry(user_id: &str, date: NaiveDate, mood: &str, intensity: u32, triggers: &[&str]) -> MoodEntry {
        MoodEntry {
            id: new_id(),
            user_id: user_id.to_string(),
            mood: mood.to_string(),
            intensity,
            notes: String::new(),
            triggers: triggers.iter().map(|s| s.to_string()).collect(),
            date,
            created_at: Utc::now(),
        }
    }

    fn journal(user_id: &str, created_at: DateTime<Utc>, mood: &str, word_count: u32) -> JournalEntry {
        JournalEntry {
            id: new_id(),
            user_id: user_id.to_string(),
            content: String::new(),
            mood: mood.to_string(),
            tags: vec![],
            prompt: String::new(),
            date: created_at.date_naive(),
            created_at,
            word_count,
        }
    }

    #[test]
    fn test_empty_window_yields_zeros() {
        let data = AppData::seed();
        let today = d(2026, 5, 1);

        let cs = check_in_stats(&data, "nobody", today);
        assert_eq!(cs.total, 0);
        assert_eq!(cs.consistency, 0);
        assert!(cs.by_mood.is_empty());

        let js = journal_stats(&data, "nobody", Utc::now());
        assert_eq!(js.average_words, 0);
        assert_eq!(js.consistency, 0.0);

        let ms = mood_stats(&data, "nobody", today);
        assert_eq!(ms.average_intensity, 0);
        assert_eq!(ms.consistency, 0);

        let hs = habit_stats(&data, "nobody", today);
        assert_eq!(hs.completion_rate, 0);
        assert_eq!(hs.best_streak, 0);
    }

    #[test]
    fn test_category_percentages_sum_within_rounding_drift() {
        let mut data = AppData::seed();
        let today = d(2026, 5, 20);
        let moods = ["calm", "calm", "heavy", "bright", "calm", "heavy", "bright"];
        for (i, mood) in moods.iter().enumerate() {
            data.checkins
                .push(checkin("u1", today - Duration::days(i as i64), mood, "good"));
        }

        let stats = check_in_stats(&data, "u1", today);
        assert_eq!(stats.total, 7);

        let sum: u32 = stats.by_mood.values().sum();
        // Integer rounding can drift a few points either side of 100
        assert!((97..=103).contains(&sum), "sum was {sum}");
        // A single-valued category is exactly 100
        assert_eq!(stats.by_sleep["good"], 100);
    }

    #[test]
    fn test_entries_outside_window_are_ignored() {
        let mut data = AppData::seed();
        let today = d(2026, 5, 20);
        data.checkins.push(checkin("u1", today, "calm", "good"));
        data.checkins
            .push(checkin("u1", today - Duration::days(45), "heavy", "poor"));

        let stats = check_in_stats(&data, "u1", today);
        assert_eq!(stats.total, 1);
        assert!(stats.by_mood.contains_key("calm"));
        assert!(!stats.by_mood.contains_key("heavy"));
    }

    #[test]
    fn test_consistency_is_window_coverage() {
        let mut data = AppData::seed();
        let today = d(2026, 5, 20);
        for i in 0..15 {
            data.checkins
                .push(checkin("u1", today - Duration::days(i), "calm", "good"));
        }

        let stats = check_in_stats(&data, "u1", today);
        assert_eq!(stats.consistency, 50);
    }

    #[test]
    fn test_journal_words_and_fractional_consistency() {
        let mut data = AppData::seed();
        let now = Utc::now();
        data.journals.push(journal("u1", now, "calm", 120));
        data.journals
            .push(journal("u1", now - Duration::days(2), "", 60));
        data.journals
            .push(journal("u1", now - Duration::days(40), "calm", 999));

        let stats = journal_stats(&data, "u1", now);
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.total_words, 180);
        assert_eq!(stats.average_words, 90);
        // 2 / 30 rounded to two decimals
        assert!((stats.consistency - 0.07).abs() < 1e-9);
        // Blank moods are not a distribution bucket
        assert_eq!(stats.entries_by_mood.len(), 1);
    }

    #[test]
    fn test_mood_triggers_are_absolute_counts() {
        let mut data = AppData::seed();
        let today = d(2026, 5, 20);
        data.mood_entries
            .push(mood_entry("u1", today, "anxious", 7, &["work", "sleep"]));
        data.mood_entries.push(mood_entry(
            "u1",
            today - Duration::days(1),
            "calm",
            4,
            &["work"],
        ));

        let stats = mood_stats(&data, "u1", today);
        assert_eq!(stats.common_triggers["work"], 2);
        assert_eq!(stats.common_triggers["sleep"], 1);
        // (7 + 4) / 2 rounds to 6
        assert_eq!(stats.average_intensity, 6);
        let dist_sum: u32 = stats.mood_distribution.values().sum();
        assert_eq!(dist_sum, 100);
    }
}
