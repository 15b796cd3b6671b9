//! Journal entry creation.

use chrono::{DateTime, Utc};

use super::achievements;
use crate::models::{new_id, JournalEntry};
use crate::store::AppData;
use crate::types::{HearthError, Result};

#[derive(Debug, Clone)]
pub struct NewJournalEntry {
    pub content: String,
    pub mood: String,
    pub tags: Vec<String>,
    pub prompt: String,
}

/// Append a journal entry, stamping the word count at write time.
pub fn create(
    data: &mut AppData,
    user_id: &str,
    input: NewJournalEntry,
    now: DateTime<Utc>,
) -> Result<JournalEntry> {
    let word_count = input.content.split_whitespace().count() as u32;

    let entry = JournalEntry {
        id: new_id(),
        user_id: user_id.to_string(),
        content: input.content,
        mood: input.mood,
        tags: input.tags,
        prompt: input.prompt,
        date: now.date_naive(),
        created_at: now,
        word_count,
    };
    data.journals.push(entry.clone());

    let total = {
        let user = data
            .user_by_id_mut(user_id)
            .ok_or_else(|| HearthError::Auth("User not found".to_string()))?;
        user.stats.total_journal_entries += 1;
        user.stats.total_journal_entries
    };

    if total == 1 {
        achievements::try_grant(data, user_id, "first_journal");
    }

    Ok(entry)
}
