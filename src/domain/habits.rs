//! Habit creation and completion toggling.
//!
//! Toggling is not append-only: a habit has at most one completion record per
//! date, flipped in place. Because a toggle can clear an arbitrary past day,
//! the habit streak is recomputed from scratch over all completed records on
//! every toggle, unlike the user's incremental check-in streak.

use chrono::{NaiveDate, Utc};

use super::streak;
use crate::models::{new_id, Habit, HabitCompletion};
use crate::store::AppData;
use crate::types::{HearthError, Result};

#[derive(Debug, Clone)]
pub struct NewHabit {
    pub name: String,
    pub emoji: String,
    pub category: String,
    pub frequency: String,
    pub reminder_time: Option<String>,
}

pub fn create(data: &mut AppData, user_id: &str, input: NewHabit) -> Habit {
    let habit = Habit {
        id: new_id(),
        user_id: user_id.to_string(),
        name: input.name,
        emoji: input.emoji,
        category: input.category,
        frequency: input.frequency,
        reminder_time: input.reminder_time,
        current_streak: 0,
        longest_streak: 0,
        total_completions: 0,
        is_active: true,
        created_at: Utc::now(),
    };
    data.habits.push(habit.clone());
    habit
}

/// Toggle a habit's completion for `date`.
///
/// Returns the updated habit and the final completed flag for that date.
pub fn toggle_completion(
    data: &mut AppData,
    user_id: &str,
    habit_id: &str,
    date: NaiveDate,
) -> Result<(Habit, bool)> {
    if !data
        .habits
        .iter()
        .any(|h| h.id == habit_id && h.user_id == user_id)
    {
        return Err(HearthError::NotFound("Habit not found".to_string()));
    }

    let completed_now = match data
        .habit_completions
        .iter_mut()
        .find(|hc| hc.habit_id == habit_id && hc.date == date)
    {
        Some(existing) => {
            existing.completed = !existing.completed;
            existing.completed
        }
        None => {
            data.habit_completions.push(HabitCompletion {
                id: new_id(),
                habit_id: habit_id.to_string(),
                user_id: user_id.to_string(),
                date,
                completed: true,
                created_at: Utc::now(),
            });
            true
        }
    };

    // Recompute the streak over every completed day this habit still has
    let completed_dates: Vec<NaiveDate> = data
        .habit_completions
        .iter()
        .filter(|hc| hc.habit_id == habit_id && hc.completed)
        .map(|hc| hc.date)
        .collect();
    let completed_total = completed_dates.len() as u32;
    let run = streak::consecutive_run(&completed_dates);

    let habit = data
        .habits
        .iter_mut()
        .find(|h| h.id == habit_id)
        .expect("habit existence checked above");
    habit.total_completions = completed_total;
    habit.current_streak = run;
    if run > habit.longest_streak {
        habit.longest_streak = run;
    }
    let habit = habit.clone();

    // Lifetime counter spans all of the user's habits
    let user_completed = data
        .habit_completions
        .iter()
        .filter(|hc| hc.user_id == user_id && hc.completed)
        .count() as u32;
    if let Some(user) = data.user_by_id_mut(user_id) {
        user.stats.total_habits_completed = user_completed;
    }

    Ok((habit, completed_now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Streak, User, UserSettings, UserStats};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn seeded() -> (AppData, String, String) {
        let mut data = AppData::seed();
        let user = User {
            id: new_id(),
            email: "briar@example.com".to_string(),
            username: "briar".to_string(),
            name: "Briar".to_string(),
            password_hash: String::new(),
            avatar: None,
            bio: String::new(),
            streak: Streak::default(),
            stats: UserStats::default(),
            settings: UserSettings::default(),
            created_at: Utc::now(),
            last_active: Utc::now(),
        };
        let user_id = user.id.clone();
        data.users.push(user);

        let habit = create(
            &mut data,
            &user_id,
            NewHabit {
                name: "Morning stretch".to_string(),
                emoji: "\u{2728}".to_string(),
                category: "health".to_string(),
                frequency: "daily".to_string(),
                reminder_time: None,
            },
        );
        (data, user_id, habit.id)
    }

    #[test]
    fn test_unknown_habit_is_not_found() {
        let (mut data, user_id, _) = seeded();
        let err =
            toggle_completion(&mut data, &user_id, "missing", d(2026, 7, 1)).unwrap_err();
        assert!(matches!(err, HearthError::NotFound(_)));
    }

    #[test]
    fn test_double_toggle_round_trips() {
        let (mut data, user_id, habit_id) = seeded();
        let date = d(2026, 7, 1);

        let (habit, completed) =
            toggle_completion(&mut data, &user_id, &habit_id, date).unwrap();
        assert!(completed);
        assert_eq!(habit.total_completions, 1);

        let (habit, completed) =
            toggle_completion(&mut data, &user_id, &habit_id, date).unwrap();
        assert!(!completed);
        assert_eq!(habit.total_completions, 0);
        assert_eq!(habit.current_streak, 0);
        assert_eq!(
            data.user_by_id(&user_id).unwrap().stats.total_habits_completed,
            0
        );
        // The record stays, flipped off, rather than being deleted
        assert_eq!(data.habit_completions.len(), 1);
    }

    #[test]
    fn test_streak_recomputes_over_completed_days() {
        let (mut data, user_id, habit_id) = seeded();

        for day in [1, 2, 3] {
            toggle_completion(&mut data, &user_id, &habit_id, d(2026, 7, day)).unwrap();
        }
        let habit = data.habits[0].clone();
        assert_eq!(habit.current_streak, 3);
        assert_eq!(habit.longest_streak, 3);

        // Untoggling the middle day breaks the run; longest stays
        let (habit, _) =
            toggle_completion(&mut data, &user_id, &habit_id, d(2026, 7, 2)).unwrap();
        assert_eq!(habit.current_streak, 1);
        assert_eq!(habit.longest_streak, 3);
        assert_eq!(habit.total_completions, 2);
    }

    #[test]
    fn test_completions_count_across_users_habits_only() {
        let (mut data, user_id, habit_id) = seeded();
        let second = create(
            &mut data,
            &user_id,
            NewHabit {
                name: "Read".to_string(),
                emoji: "\u{1F4DA}".to_string(),
                category: "growth".to_string(),
                frequency: "daily".to_string(),
                reminder_time: None,
            },
        );

        toggle_completion(&mut data, &user_id, &habit_id, d(2026, 7, 1)).unwrap();
        toggle_completion(&mut data, &user_id, &second.id, d(2026, 7, 1)).unwrap();

        assert_eq!(
            data.user_by_id(&user_id).unwrap().stats.total_habits_completed,
            2
        );
    }
}
