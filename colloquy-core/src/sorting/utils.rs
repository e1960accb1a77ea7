//! Utility functions for sorting operations
//!
//! Sorting happens in two steps: a fallible, stable sort computes the target
//! permutation as a list of indices without touching the items, then the
//! permutation is applied in place. A comparison failure in the first step
//! therefore leaves the items exactly as they were.

use std::cmp::Ordering;

/// Stable, fallible sort of `items` expressed as a permutation.
///
/// Returns `order` such that `order[k]` is the index of the item that
/// belongs at position `k`. Bottom-up merge sort; ties keep input order and
/// the first comparison error aborts the sort.
pub fn try_sorted_indices<T, E, F>(items: &[T], mut compare: F) -> Result<Vec<usize>, E>
where
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    let len = items.len();
    let mut order: Vec<usize> = (0..len).collect();
    if len < 2 {
        return Ok(order);
    }

    let mut buffer = vec![0usize; len];
    let mut width = 1;
    while width < len {
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            merge_runs(
                &order[start..mid],
                &order[mid..end],
                &mut buffer[start..end],
                items,
                &mut compare,
            )?;
            start = end;
        }
        std::mem::swap(&mut order, &mut buffer);
        width *= 2;
    }

    Ok(order)
}

fn merge_runs<T, E, F>(
    left: &[usize],
    right: &[usize],
    out: &mut [usize],
    items: &[T],
    compare: &mut F,
) -> Result<(), E>
where
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    let (mut i, mut j) = (0, 0);
    for slot in out.iter_mut() {
        let take_right = if i == left.len() {
            true
        } else if j == right.len() {
            false
        } else {
            // Right wins only when strictly smaller; equal keys stay stable.
            compare(&items[left[i]], &items[right[j]])? == Ordering::Greater
        };

        if take_right {
            *slot = right[j];
            j += 1;
        } else {
            *slot = left[i];
            i += 1;
        }
    }
    Ok(())
}

/// Reorder items in-place based on the given permutation
///
/// `order[k]` names the original index of the element that should end up at
/// position `k`. Follows permutation cycles with swaps, so no `Clone` bound
/// and no extra copy of the items is needed.
pub fn apply_permutation<T>(items: &mut [T], mut order: Vec<usize>) {
    debug_assert_eq!(
        items.len(),
        order.len(),
        "Permutation length must match items length"
    );

    for start in 0..order.len() {
        if order[start] == start {
            continue;
        }
        let mut current = start;
        loop {
            let next = order[current];
            order[current] = current;
            if next == start {
                break;
            }
            items.swap(current, next);
            current = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infallible(a: &i32, b: &i32) -> Result<Ordering, ()> {
        Ok(a.cmp(b))
    }

    #[test]
    fn test_apply_permutation() {
        let mut items = vec!["a", "b", "c", "d"];
        let order = vec![3, 1, 0, 2]; // d, b, a, c

        apply_permutation(&mut items, order);

        assert_eq!(items, vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn test_apply_permutation_long_cycle() {
        let mut items = vec![0, 10, 20, 30, 40];
        apply_permutation(&mut items, vec![1, 2, 3, 4, 0]);
        assert_eq!(items, vec![10, 20, 30, 40, 0]);
    }

    #[test]
    fn test_sorted_indices_orders_values() {
        let items = vec![5, 3, 9, 1, 7, 2];
        let order = try_sorted_indices(&items, infallible).unwrap();
        let sorted: Vec<_> = order.iter().map(|&i| items[i]).collect();
        assert_eq!(sorted, vec![1, 2, 3, 5, 7, 9]);
    }

    #[test]
    fn test_sorted_indices_is_stable() {
        let items = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd'), (1, 'e')];
        let order =
            try_sorted_indices(&items, |a, b| Ok::<_, ()>(a.0.cmp(&b.0))).unwrap();
        let tags: Vec<_> = order.iter().map(|&i| items[i].1).collect();
        assert_eq!(tags, vec!['b', 'd', 'a', 'c', 'e']);
    }

    #[test]
    fn test_sorted_indices_stops_on_error() {
        let items = vec![3, 2, -1, 1];
        let mut calls = 0;
        let result = try_sorted_indices(&items, |a, b| {
            calls += 1;
            if *a < 0 || *b < 0 {
                Err("negative")
            } else {
                Ok(a.cmp(b))
            }
        });
        assert_eq!(result, Err("negative"));
        assert!(calls <= 3);
    }

    #[test]
    fn test_sorted_indices_trivial_inputs() {
        assert!(try_sorted_indices(&Vec::<i32>::new(), infallible).unwrap().is_empty());
        assert_eq!(try_sorted_indices(&[42], infallible).unwrap(), vec![0]);
    }
}
