//! Community posts, likes, and replies.

use chrono::Utc;

use super::achievements;
use crate::models::{new_id, CommunityPost, PostReply};
use crate::store::AppData;
use crate::types::{HearthError, Result};

/// Create a post. `author_name` is already resolved by the caller (pseudonym
/// when anonymous, display name otherwise).
pub fn create_post(
    data: &mut AppData,
    user_id: &str,
    content: String,
    is_anonymous: bool,
    author_name: String,
) -> CommunityPost {
    let now = Utc::now();
    let post = CommunityPost {
        id: new_id(),
        user_id: user_id.to_string(),
        content,
        author_name,
        is_anonymous,
        likes: Vec::new(),
        reply_count: 0,
        created_at: now,
        updated_at: now,
    };
    data.community_posts.push(post.clone());

    let user_posts = data
        .community_posts
        .iter()
        .filter(|p| p.user_id == user_id)
        .count();
    if user_posts == 1 {
        achievements::try_grant(data, user_id, "first_post");
    }

    post
}

/// Toggle the caller's membership in a post's like set.
///
/// Returns the caller's final liked flag and the post's like count.
pub fn toggle_like(data: &mut AppData, user_id: &str, post_id: &str) -> Result<(bool, usize)> {
    let post = data
        .post_mut(post_id)
        .ok_or_else(|| HearthError::NotFound("Post not found".to_string()))?;

    let liked = if post.likes.iter().any(|id| id == user_id) {
        post.likes.retain(|id| id != user_id);
        false
    } else {
        post.likes.push(user_id.to_string());
        true
    };
    post.updated_at = Utc::now();

    Ok((liked, post.likes.len()))
}

pub fn add_reply(
    data: &mut AppData,
    user_id: &str,
    post_id: &str,
    content: String,
    is_anonymous: bool,
    author_name: String,
) -> Result<PostReply> {
    let post = data
        .post_mut(post_id)
        .ok_or_else(|| HearthError::NotFound("Post not found".to_string()))?;
    post.reply_count += 1;
    post.updated_at = Utc::now();

    let reply = PostReply {
        id: new_id(),
        post_id: post_id.to_string(),
        user_id: user_id.to_string(),
        content,
        author_name,
        is_anonymous,
        created_at: Utc::now(),
    };
    data.post_replies.push(reply.clone());

    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Streak, User, UserSettings, UserStats};

    fn seeded_with_user(username: &str) -> (AppData, String) {
        let mut data = AppData::seed();
        let id = push_user(&mut data, username);
        (data, id)
    }

    fn push_user(data: &mut AppData, username: &str) -> String {
        let user = User {
            id: new_id(),
            email: format!("{username}@example.com"),
            username: username.to_string(),
            name: username.to_string(),
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
        id
    }

    #[test]
    fn test_first_post_grants_storyteller() {
        let (mut data, user_id) = seeded_with_user("moss");

        create_post(
            &mut data,
            &user_id,
            "small wins today".to_string(),
            true,
            "Quiet Oak".to_string(),
        );
        create_post(
            &mut data,
            &user_id,
            "another one".to_string(),
            true,
            "Calm River".to_string(),
        );

        let user = data.user_by_id(&user_id).unwrap();
        assert_eq!(user.stats.total_points, 20);
        assert_eq!(data.user_achievements.len(), 1);
    }

    #[test]
    fn test_like_unlike_round_trips() {
        let (mut data, author) = seeded_with_user("moss");
        let liker = push_user(&mut data, "fern");
        let post = create_post(
            &mut data,
            &author,
            "hello".to_string(),
            false,
            "Moss".to_string(),
        );

        let (liked, count) = toggle_like(&mut data, &liker, &post.id).unwrap();
        assert!(liked);
        assert_eq!(count, 1);

        let (liked, count) = toggle_like(&mut data, &liker, &post.id).unwrap();
        assert!(!liked);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_likes_are_per_user() {
        let (mut data, author) = seeded_with_user("moss");
        let other = push_user(&mut data, "fern");
        let post = create_post(
            &mut data,
            &author,
            "hello".to_string(),
            false,
            "Moss".to_string(),
        );

        toggle_like(&mut data, &author, &post.id).unwrap();
        let (_, count) = toggle_like(&mut data, &other, &post.id).unwrap();
        assert_eq!(count, 2);

        // Double-like by the same user removes only their own like
        let (liked, count) = toggle_like(&mut data, &author, &post.id).unwrap();
        assert!(!liked);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_reply_bumps_count_and_unknown_post_is_404() {
        let (mut data, user_id) = seeded_with_user("moss");
        let post = create_post(
            &mut data,
            &user_id,
            "anyone else tired?".to_string(),
            true,
            "Gentle Stone".to_string(),
        );

        add_reply(
            &mut data,
            &user_id,
            &post.id,
            "every day".to_string(),
            true,
            "Brave Wind".to_string(),
        )
        .unwrap();

        assert_eq!(data.post_mut(&post.id).unwrap().reply_count, 1);

        let err = add_reply(
            &mut data,
            &user_id,
            "missing",
            "hello?".to_string(),
            true,
            "Kind Light".to_string(),
        )
        .unwrap_err();
        assert!(matches!(err, HearthError::NotFound(_)));
    }
}
