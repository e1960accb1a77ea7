use std::collections::HashMap;
use std::collections::hash_map::Entry;

use colloquy_model::{CommentNode, CommentTree, ThreadEntry};
use tracing::{debug, warn};

/// Builds a tree from comments that reference their parent by id.
///
/// Siblings keep their input order. Every input entry ends up in the tree
/// exactly once:
/// - entries without a parent, or whose parent is themselves, are roots
/// - entries whose parent is not in the input are promoted to roots
/// - a parent cycle is cut at its member that comes first in input order,
///   which becomes a root; replies hanging off the cycle keep their parent
///
/// When ids repeat, replies attach to the first entry carrying the id.
pub fn assemble_tree<C: ThreadEntry>(entries: Vec<C>) -> CommentTree<C> {
    let len = entries.len();
    let links = ThreadLinks::resolve(&entries);

    // Reverse pre-order builds every child before its parent.
    let mut slots: Vec<Option<C>> = entries.into_iter().map(Some).collect();
    let mut built: Vec<Option<CommentNode<C>>> = (0..len).map(|_| None).collect();
    for &idx in links.preorder.iter().rev() {
        let Some(comment) = slots[idx].take() else {
            continue;
        };
        let kids = links.children[idx]
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[idx] = Some(CommentNode::with_children(comment, kids));
    }

    let roots: Vec<_> = links
        .roots
        .into_iter()
        .filter_map(|idx| built[idx].take())
        .collect();
    debug!(comments = len, roots = roots.len(), "assembled comment tree");
    CommentTree::new(roots)
}

/// Depth of the tree [`assemble_tree`] would build from `entries`, without
/// building it. Roots are at depth 1; an empty thread has depth 0.
///
/// Lets callers holding untrusted input refuse absurdly deep threads before
/// any recursive work happens on them.
pub fn thread_depth<C: ThreadEntry>(entries: &[C]) -> usize {
    let links = ThreadLinks::resolve(entries);
    let mut depth = vec![0usize; entries.len()];
    let mut deepest = 0;
    // Pre-order puts every parent ahead of its children.
    for &idx in &links.preorder {
        depth[idx] = match links.parent[idx] {
            Some(p) => depth[p] + 1,
            None => 1,
        };
        deepest = deepest.max(depth[idx]);
    }
    deepest
}

/// Parent/child links between input positions, with every oddity already
/// resolved so the links form a forest.
struct ThreadLinks {
    parent: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
    preorder: Vec<usize>,
}

impl ThreadLinks {
    fn resolve<C: ThreadEntry>(entries: &[C]) -> Self {
        let len = entries.len();

        let mut position: HashMap<C::Id, usize> = HashMap::with_capacity(len);
        for (idx, entry) in entries.iter().enumerate() {
            match position.entry(entry.entry_id()) {
                Entry::Vacant(slot) => {
                    slot.insert(idx);
                }
                Entry::Occupied(_) => {
                    warn!(id = ?entry.entry_id(), "duplicate comment id in thread");
                }
            }
        }

        let mut parent: Vec<Option<usize>> = Vec::with_capacity(len);
        for (idx, entry) in entries.iter().enumerate() {
            let resolved = match entry.parent_entry_id() {
                None => None,
                Some(parent_id) => match position.get(&parent_id) {
                    Some(&p) if p == idx => None,
                    Some(&p) => Some(p),
                    None => {
                        warn!(
                            id = ?entry.entry_id(),
                            parent = ?parent_id,
                            "parent comment missing, promoting reply to top level"
                        );
                        None
                    }
                },
            };
            parent.push(resolved);
        }

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); len];
        for (idx, p) in parent.iter().enumerate() {
            if let Some(p) = *p {
                children[p].push(idx);
            }
        }

        let mut visited = vec![false; len];
        let mut preorder = Vec::with_capacity(len);
        let mut roots = Vec::new();

        for idx in 0..len {
            if parent[idx].is_none() {
                roots.push(idx);
                visit(idx, &children, &mut visited, &mut preorder);
            }
        }

        // Whatever is still unvisited sits on, or hangs below, a parent cycle.
        let mut on_path = vec![false; len];
        for idx in 0..len {
            if visited[idx] {
                continue;
            }
            let cut = cycle_entry_point(idx, &parent, &mut on_path);
            if let Some(p) = parent[cut].take() {
                children[p].retain(|&child| child != cut);
            }
            warn!(
                id = ?entries[cut].entry_id(),
                "reply cycle detected, promoting comment to top level"
            );
            roots.push(cut);
            visit(cut, &children, &mut visited, &mut preorder);
        }
        roots.sort_unstable();

        Self {
            parent,
            children,
            roots,
            preorder,
        }
    }
}

/// Follows parent links up from an unvisited `start` until a position
/// repeats, then returns the lowest position on that cycle.
///
/// Unvisited positions always have an unvisited parent, so the walk can only
/// end on a cycle. `on_path` is scratch space and is left cleared.
fn cycle_entry_point(start: usize, parent: &[Option<usize>], on_path: &mut [bool]) -> usize {
    let mut path = Vec::new();
    let mut current = start;
    while !on_path[current] {
        on_path[current] = true;
        path.push(current);
        match parent[current] {
            Some(p) => current = p,
            None => break,
        }
    }

    let cut = match path.iter().position(|&idx| idx == current) {
        Some(from) => path[from..].iter().copied().min().unwrap_or(current),
        None => current,
    };
    for idx in path {
        on_path[idx] = false;
    }
    cut
}

fn visit(start: usize, children: &[Vec<usize>], visited: &mut [bool], preorder: &mut Vec<usize>) {
    let mut stack = vec![start];
    while let Some(idx) = stack.pop() {
        if visited[idx] {
            continue;
        }
        visited[idx] = true;
        preorder.push(idx);
        stack.extend(children[idx].iter().rev().copied());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        parent: Option<u32>,
    }

    impl ThreadEntry for Row {
        type Id = u32;

        fn entry_id(&self) -> u32 {
            self.id
        }

        fn parent_entry_id(&self) -> Option<u32> {
            self.parent
        }
    }

    fn e(id: u32, parent: Option<u32>) -> Row {
        Row { id, parent }
    }

    fn shape(tree: &CommentTree<Row>) -> Vec<(usize, u32)> {
        tree.walk().into_iter().map(|(depth, entry)| (depth, entry.id)).collect()
    }

    #[test]
    fn nests_replies_in_input_order() {
        let tree = assemble_tree(vec![
            e(1, None),
            e(2, Some(1)),
            e(3, None),
            e(4, Some(2)),
            e(5, Some(1)),
        ]);
        assert_eq!(shape(&tree), vec![(0, 1), (1, 2), (2, 4), (1, 5), (0, 3)]);
    }

    #[test]
    fn replies_may_precede_parents() {
        let tree = assemble_tree(vec![e(2, Some(1)), e(1, None)]);
        assert_eq!(shape(&tree), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn orphans_become_roots() {
        let tree = assemble_tree(vec![e(1, None), e(2, Some(99)), e(3, Some(2))]);
        assert_eq!(shape(&tree), vec![(0, 1), (0, 2), (1, 3)]);
    }

    #[test]
    fn self_parent_is_a_root() {
        let tree = assemble_tree(vec![e(7, Some(7))]);
        assert_eq!(shape(&tree), vec![(0, 7)]);
    }

    #[test]
    fn cycles_are_broken_without_losing_comments() {
        let tree = assemble_tree(vec![e(1, None), e(2, Some(3)), e(3, Some(2)), e(4, Some(3))]);
        assert_eq!(tree.node_count(), 4);
        assert_eq!(shape(&tree), vec![(0, 1), (0, 2), (1, 3), (2, 4)]);
    }

    #[test]
    fn reply_listed_before_its_cycle_keeps_its_parent() {
        let tree = assemble_tree(vec![e(4, Some(3)), e(2, Some(3)), e(3, Some(2))]);
        assert_eq!(tree.node_count(), 3);
        assert_eq!(shape(&tree), vec![(0, 2), (1, 3), (2, 4)]);
    }

    #[test]
    fn long_tail_into_cycle_is_cut_at_the_cycle() {
        // 1 -> 2 -> 3 -> 4 -> 5 -> 4
        let tree = assemble_tree(vec![
            e(1, Some(2)),
            e(2, Some(3)),
            e(3, Some(4)),
            e(4, Some(5)),
            e(5, Some(4)),
        ]);
        assert_eq!(
            shape(&tree),
            vec![(0, 4), (1, 3), (2, 2), (3, 1), (1, 5)]
        );
    }

    #[test]
    fn depth_matches_the_assembled_tree() {
        let rows = vec![
            e(1, None),
            e(2, Some(1)),
            e(3, Some(2)),
            e(4, Some(99)),
            e(5, Some(6)),
            e(6, Some(5)),
        ];
        assert_eq!(thread_depth(&rows), 3);
        assert_eq!(thread_depth(&rows), assemble_tree(rows).max_depth());
        assert_eq!(thread_depth::<Row>(&[]), 0);
    }

    #[test]
    fn duplicate_ids_are_kept() {
        let tree = assemble_tree(vec![e(1, None), e(1, None), e(2, Some(1))]);
        assert_eq!(tree.node_count(), 3);
        assert_eq!(shape(&tree), vec![(0, 1), (1, 2), (0, 1)]);
    }

    #[test]
    fn empty_input() {
        assert!(assemble_tree(Vec::<Row>::new()).is_empty());
    }
}
