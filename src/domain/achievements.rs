//! Achievement evaluation.
//!
//! Grants are idempotent per (user, achievement) pair. Callers invoke
//! [`try_grant`] synchronously right after the stat they watch crosses its
//! threshold; thresholds use exact equality (a streak recomputed past 3
//! without ever being exactly 3 earns nothing).

use chrono::Utc;

use crate::models::{new_id, UserAchievement};
use crate::store::AppData;

/// Grant an achievement to a user if they do not already hold it.
///
/// Unknown achievement ids and repeat grants are no-ops returning `None`.
/// On a real grant the user's points and achievement count move with it.
pub fn try_grant(data: &mut AppData, user_id: &str, achievement_id: &str) -> Option<UserAchievement> {
    let points = data.achievement(achievement_id)?.points;

    let already_granted = data
        .user_achievements
        .iter()
        .any(|ua| ua.user_id == user_id && ua.achievement_id == achievement_id);
    if already_granted {
        return None;
    }

    let grant = UserAchievement {
        id: new_id(),
        user_id: user_id.to_string(),
        achievement_id: achievement_id.to_string(),
        unlocked_at: Utc::now(),
        progress: 100,
        is_unlocked: true,
    };
    data.user_achievements.push(grant.clone());

    if let Some(user) = data.user_by_id_mut(user_id) {
        user.stats.total_points += points;
        user.stats.achievements += 1;
    }

    Some(grant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Streak, User, UserSettings, UserStats};

    fn seeded_with_user() -> (AppData, String) {
        let mut data = AppData::seed();
        let user = User {
            id: new_id(),
            email: "ash@example.com".to_string(),
            username: "ash".to_string(),
            name: "Ash".to_string(),
            password_hash: String::new(),
            avatar: None,
            bio: String::new(),
            streak: Streak::default(),
            stats: UserStats::default(),
            settings: UserSettings::default(),
            created_at: Utc::now(),
            last_active: Utc::now(),
        };
        let id = user.id.clone();
        data.users.push(user);
        (data, id)
    }

    #[test]
    fn test_grant_awards_points_once() {
        let (mut data, user_id) = seeded_with_user();

        let grant = try_grant(&mut data, &user_id, "streak_3");
        assert!(grant.is_some());

        let user = data.user_by_id(&user_id).unwrap();
        assert_eq!(user.stats.total_points, 25);
        assert_eq!(user.stats.achievements, 1);
        assert_eq!(data.user_achievements.len(), 1);
    }

    #[test]
    fn test_repeat_grant_is_noop() {
        let (mut data, user_id) = seeded_with_user();

        assert!(try_grant(&mut data, &user_id, "first_checkin").is_some());
        assert!(try_grant(&mut data, &user_id, "first_checkin").is_none());

        let user = data.user_by_id(&user_id).unwrap();
        assert_eq!(user.stats.total_points, 10);
        assert_eq!(user.stats.achievements, 1);
        assert_eq!(data.user_achievements.len(), 1);
    }

    #[test]
    fn test_unknown_achievement_is_noop() {
        let (mut data, user_id) = seeded_with_user();

        assert!(try_grant(&mut data, &user_id, "no_such_badge").is_none());
        assert!(data.user_achievements.is_empty());
        assert_eq!(data.user_by_id(&user_id).unwrap().stats.total_points, 0);
    }

    #[test]
    fn test_points_accumulate_across_distinct_grants() {
        let (mut data, user_id) = seeded_with_user();

        try_grant(&mut data, &user_id, "first_checkin");
        try_grant(&mut data, &user_id, "streak_3");
        try_grant(&mut data, &user_id, "first_journal");

        let user = data.user_by_id(&user_id).unwrap();
        assert_eq!(user.stats.total_points, 10 + 25 + 15);
        assert_eq!(user.stats.achievements, 3);
    }

    #[test]
    fn test_grants_are_per_user() {
        let (mut data, user_a) = seeded_with_user();
        let mut other = data.users[0].clone();
        other.id = new_id();
        other.username = "rowan".to_string();
        let user_b = other.id.clone();
        data.users.push(other);

        try_grant(&mut data, &user_a, "first_post");
        try_grant(&mut data, &user_b, "first_post");

        assert_eq!(data.user_achievements.len(), 2);
        assert_eq!(data.user_by_id(&user_b).unwrap().stats.total_points, 20);
    }
}
