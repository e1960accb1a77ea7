//! Capability implementations for the concrete comment model

use chrono::{DateTime, Utc};
use colloquy_model::Comment;

use super::traits::{HasCreatedAt, HasScore, HasUpdatedAt, SortableComment};

impl SortableComment for Comment {
    fn sort_label(&self) -> String {
        self.id.to_string()
    }
}

impl HasCreatedAt for Comment {
    #[inline]
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl HasUpdatedAt for Comment {
    #[inline]
    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl HasScore for Comment {
    #[inline]
    fn score(&self) -> Option<i64> {
        self.score
    }
}
