//! Challenge membership.

use chrono::Utc;

use crate::models::{new_id, UserChallenge};
use crate::store::AppData;
use crate::types::{HearthError, Result};

/// Join a challenge. A user can hold at most one membership per challenge.
pub fn join(data: &mut AppData, user_id: &str, challenge_id: &str) -> Result<UserChallenge> {
    if data.challenge(challenge_id).is_none() {
        return Err(HearthError::NotFound("Challenge not found".to_string()));
    }

    let already_joined = data
        .user_challenges
        .iter()
        .any(|uc| uc.user_id == user_id && uc.challenge_id == challenge_id);
    if already_joined {
        return Err(HearthError::Conflict(
            "Already joined this challenge".to_string(),
        ));
    }

    let membership = UserChallenge {
        id: new_id(),
        user_id: user_id.to_string(),
        challenge_id: challenge_id.to_string(),
        joined_at: Utc::now(),
        progress: 0,
        is_completed: false,
        streak: 0,
        check_ins: Vec::new(),
    };
    data.user_challenges.push(membership.clone());

    Ok(membership)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_then_rejoin_conflicts() {
        let mut data = AppData::seed();

        let membership = join(&mut data, "u1", "hydration_7").unwrap();
        assert_eq!(membership.progress, 0);
        assert!(!membership.is_completed);

        let err = join(&mut data, "u1", "hydration_7").unwrap_err();
        assert!(matches!(err, HearthError::Conflict(_)));
        assert_eq!(data.user_challenges.len(), 1);
    }

    #[test]
    fn test_unknown_challenge_is_404() {
        let mut data = AppData::seed();
        let err = join(&mut data, "u1", "marathon_42").unwrap_err();
        assert!(matches!(err, HearthError::NotFound(_)));
    }

    #[test]
    fn test_different_users_can_join_same_challenge() {
        let mut data = AppData::seed();
        join(&mut data, "u1", "gratitude_week").unwrap();
        join(&mut data, "u2", "gratitude_week").unwrap();
        assert_eq!(data.user_challenges.len(), 2);
    }
}
