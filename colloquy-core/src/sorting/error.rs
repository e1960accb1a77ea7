use colloquy_model::InvalidDirectionError;
use thiserror::Error;

use super::traits::SortableComment;

/// A strategy could not order two comments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComparisonError {
    #[error("comment {comment} has no {attribute}")]
    MissingAttribute {
        attribute: &'static str,
        comment: String,
    },
}

impl ComparisonError {
    pub fn missing<C: SortableComment + ?Sized>(
        attribute: &'static str,
        comment: &C,
    ) -> Self {
        ComparisonError::MissingAttribute {
            attribute,
            comment: comment.sort_label(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    #[error(transparent)]
    Comparison(#[from] ComparisonError),

    #[error(transparent)]
    InvalidDirection(#[from] InvalidDirectionError),

    #[error("comment tree is deeper than the configured limit of {limit} levels")]
    DepthExceeded { limit: usize },

    #[error("no sorter registered under alias {0:?}")]
    UnknownSorter(String),
}

pub type Result<T> = std::result::Result<T, SortError>;
