//! Offset pagination and presentation shuffling.

use rand::seq::SliceRandom;

/// Slice `items[skip..skip + limit]`, clamped to the available length.
///
/// Out-of-range offsets return fewer or zero items, never an error.
pub fn paginate<T>(items: Vec<T>, skip: usize, limit: usize) -> Vec<T> {
    items.into_iter().skip(skip).take(limit).collect()
}

/// Uniform random permutation (Fisher-Yates).
///
/// Applied to cache-sourced result sets before returning: repeated
/// identical filters against a stable store would otherwise always
/// come back in the same order. Live pages returned directly keep
/// their live order and must not pass through here (Search's live
/// page is the one fixed exception).
pub fn shuffle<T>(mut items: Vec<T>) -> Vec<T> {
    items.shuffle(&mut rand::rng());
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_basic() {
        let items: Vec<u32> = (0..20).collect();
        assert_eq!(paginate(items, 10, 5), vec![10, 11, 12, 13, 14]);
    }

    #[test]
    fn test_paginate_clamps_past_end() {
        let items: Vec<u32> = (0..5).collect();
        assert_eq!(paginate(items.clone(), 3, 10), vec![3, 4]);
        assert!(paginate(items, 100, 10).is_empty());
    }

    #[test]
    fn test_paginate_zero_limit() {
        let items: Vec<u32> = (0..5).collect();
        assert!(paginate(items, 0, 0).is_empty());
    }

    #[test]
    fn test_shuffle_preserves_elements() {
        let items: Vec<u32> = (0..50).collect();
        let mut shuffled = shuffle(items.clone());
        shuffled.sort_unstable();
        assert_eq!(shuffled, items);
    }
}
