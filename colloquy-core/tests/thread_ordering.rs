//! End-to-end: assemble a thread from stored rows, sort it, flatten it.

use chrono::{TimeZone, Utc};
use colloquy_core::{SortingRegistry, thread::assemble_tree, DATE_ASC};
use colloquy_model::{Comment, CommentID, ThreadID};
use uuid::Uuid;

fn id(n: u128) -> CommentID {
    CommentID::from(Uuid::from_u128(n))
}

fn row(n: u128, parent: Option<u128>, hour: u32, score: i64) -> Comment {
    let mut comment = Comment::new(ThreadID::new("post-9"), format!("c{n}"))
        .with_id(id(n))
        .with_created_at(Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).single())
        .with_score(Some(score));
    if let Some(parent) = parent {
        comment = comment.reply_to(id(parent));
    }
    comment
}

fn rows() -> Vec<Comment> {
    vec![
        row(1, None, 8, 3),
        row(2, Some(1), 9, 0),
        row(3, None, 10, 7),
        row(4, Some(1), 11, 5),
        row(5, Some(3), 12, 1),
        row(6, Some(2), 13, 2),
    ]
}

fn display(tree: colloquy_model::CommentTree<Comment>) -> Vec<(usize, String)> {
    tree.flatten()
        .into_iter()
        .map(|entry| (entry.depth, entry.comment.body))
        .collect()
}

#[test]
fn newest_first_by_default() {
    let registry = SortingRegistry::<Comment>::builtin();
    let tree = registry.sort_tree(None, assemble_tree(rows())).unwrap();

    assert_eq!(
        display(tree),
        vec![
            (0, "c3".to_string()),
            (1, "c5".to_string()),
            (0, "c1".to_string()),
            (1, "c4".to_string()),
            (1, "c2".to_string()),
            (2, "c6".to_string()),
        ]
    );
}

#[test]
fn oldest_first_on_request() {
    let registry = SortingRegistry::<Comment>::builtin();
    let tree = registry.sort_tree(Some(DATE_ASC), assemble_tree(rows())).unwrap();

    let order: Vec<_> = display(tree).into_iter().map(|(_, body)| body).collect();
    assert_eq!(order, vec!["c1", "c2", "c6", "c4", "c3", "c5"]);
}

#[test]
fn top_rated_thread() {
    let registry = SortingRegistry::<Comment>::builtin();
    let tree = registry.sort_tree(Some("score_desc"), assemble_tree(rows())).unwrap();

    let order: Vec<_> = display(tree).into_iter().map(|(_, body)| body).collect();
    assert_eq!(order, vec!["c3", "c5", "c1", "c4", "c2", "c6"]);
}
