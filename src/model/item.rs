// File: ./src/model/item.rs
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Identifier of a single entry. Stored as a bare JSON number.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TodoId(pub i64);

impl TodoId {
    /// Creation-time id: the current millisecond timestamp, bumped past the
    /// largest taken id so two items created in the same millisecond never
    /// collide. Falls back to the nearest free value below `now` once the
    /// largest id is `i64::MAX`.
    pub fn fresh(taken: &HashSet<TodoId>) -> Self {
        let now = Utc::now().timestamp_millis();
        let candidate = match taken.iter().max() {
            Some(TodoId(max)) if *max >= now => max.checked_add(1),
            _ => Some(now),
        };
        if let Some(id) = candidate {
            return TodoId(id);
        }
        (i64::MIN..=now)
            .rev()
            .map(TodoId)
            .find(|id| !taken.contains(id))
            .unwrap_or(TodoId(i64::MIN))
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: TodoId,
    pub content: String,
    #[serde(default)]
    pub completed: bool,
}

impl TodoItem {
    /// Builds an item from raw user input. Returns `None` when the input is blank.
    pub fn new(id: TodoId, content: &str) -> Option<Self> {
        let content = normalize_content(content)?;
        Some(Self {
            id,
            content,
            completed: false,
        })
    }
}

/// Trims user input; blank input has no valid content.
pub fn normalize_content(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
