use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ids::{CommentID, ThreadID};
use crate::tree::ThreadEntry;

/// Moderation state of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CommentState {
    #[default]
    Visible,
    Deleted,
    Spam,
    Pending,
}

/// A single comment as handed over by whatever loads threads.
///
/// Timestamps and score are optional: imported or partially migrated rows
/// may lack them, and sorting strategies decide how to treat that.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Comment {
    pub id: CommentID,
    pub thread_id: ThreadID,
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent_id: Option<CommentID>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub author: Option<String>,
    pub body: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub created_at: Option<DateTime<Utc>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub updated_at: Option<DateTime<Utc>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub score: Option<i64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub state: CommentState,
}

impl Comment {
    /// New top-level comment stamped with the current time.
    pub fn new(thread_id: ThreadID, body: impl Into<String>) -> Self {
        Self {
            id: CommentID::new(),
            thread_id,
            parent_id: None,
            author: None,
            body: body.into(),
            created_at: Some(Utc::now()),
            updated_at: None,
            score: None,
            state: CommentState::Visible,
        }
    }

    pub fn with_id(mut self, id: CommentID) -> Self {
        self.id = id;
        self
    }

    pub fn reply_to(mut self, parent: CommentID) -> Self {
        self.parent_id = Some(parent);
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_created_at(mut self, created_at: Option<DateTime<Utc>>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_updated_at(mut self, updated_at: Option<DateTime<Utc>>) -> Self {
        self.updated_at = updated_at;
        self
    }

    pub fn with_score(mut self, score: Option<i64>) -> Self {
        self.score = score;
        self
    }

    pub fn with_state(mut self, state: CommentState) -> Self {
        self.state = state;
        self
    }

    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

impl ThreadEntry for Comment {
    type Id = CommentID;

    fn entry_id(&self) -> CommentID {
        self.id
    }

    fn parent_entry_id(&self) -> Option<CommentID> {
        self.parent_id
    }
}
