//! A bounded, deduplicating most-recently-used list of workout snapshots.

use crate::workout::Workout;
use std::collections::VecDeque;

/// Fixed-capacity MRU sequence. Front is the most recently touched element,
/// back the least. No two elements are ever structurally equal, and the
/// length never exceeds `max`.
#[derive(Debug, Clone)]
pub struct RecentsQueue {
    max: usize,
    elements: VecDeque<Workout>,
}

impl RecentsQueue {
    /// Creates an empty queue with the given capacity.
    pub fn new(max: usize) -> Self {
        Self {
            max,
            elements: VecDeque::with_capacity(max),
        }
    }

    /// Rebuilds a queue from a persisted ordered list, most-recent first.
    /// Clips off extras if the stored list is longer than `max`.
    pub fn from_snapshot(max: usize, items: Vec<Workout>) -> Self {
        let mut queue = Self::new(max);
        queue.elements.extend(items.into_iter().take(max));
        queue
    }

    /// Renders the queue to the ordered list `from_snapshot` accepts.
    pub fn to_snapshot(&self) -> Vec<Workout> {
        self.elements.iter().cloned().collect()
    }

    /// Promotes `workout` to the front of the queue.
    ///
    /// Any element structurally equal to `workout` is removed first, then the
    /// back element is evicted if the queue is still at capacity, then
    /// `workout` is inserted at the front. Checking capacity after the
    /// dedup-removal means enqueueing a duplicate never evicts an unrelated
    /// element.
    pub fn enqueue(&mut self, workout: Workout) {
        if self.max == 0 {
            return;
        }
        self.elements.retain(|e| *e != workout);
        if self.elements.len() >= self.max {
            self.elements.pop_back();
        }
        self.elements.push_front(workout);
    }

    /// Structural-equality membership test.
    pub fn contains(&self, workout: &Workout) -> bool {
        self.elements.contains(workout)
    }

    /// Read-only view of the sequence, most-recent first.
    pub fn data(&self) -> &VecDeque<Workout> {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn max(&self) -> usize {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workout(name: &str) -> Workout {
        Workout {
            name: name.to_string(),
            rounds: Vec::new(),
        }
    }

    #[test]
    fn enqueue_puts_newest_first() {
        let mut queue = RecentsQueue::new(3);
        queue.enqueue(workout("a"));
        queue.enqueue(workout("b"));
        queue.enqueue(workout("c"));
        assert_eq!(
            queue.to_snapshot(),
            vec![workout("c"), workout("b"), workout("a")]
        );
        assert_eq!(queue.data().front(), Some(&workout("c")));
    }

    #[test]
    fn duplicate_is_promoted_without_evicting_others() {
        let mut queue = RecentsQueue::new(2);
        queue.enqueue(workout("a"));
        queue.enqueue(workout("b"));
        queue.enqueue(workout("a"));
        assert_eq!(queue.to_snapshot(), vec![workout("a"), workout("b")]);
    }

    #[test]
    fn capacity_evicts_the_back() {
        let mut queue = RecentsQueue::new(1);
        queue.enqueue(workout("a"));
        queue.enqueue(workout("b"));
        assert_eq!(queue.to_snapshot(), vec![workout("b")]);
    }

    #[test]
    fn never_exceeds_max_and_never_holds_duplicates() {
        let mut queue = RecentsQueue::new(3);
        for name in ["a", "b", "a", "c", "d", "b", "d", "a"] {
            queue.enqueue(workout(name));
            assert!(queue.len() <= 3);
            let snapshot = queue.to_snapshot();
            for (idx, element) in snapshot.iter().enumerate() {
                assert!(!snapshot[idx + 1..].contains(element));
            }
        }
        assert_eq!(
            queue.to_snapshot(),
            vec![workout("a"), workout("d"), workout("b")]
        );
    }

    #[test]
    fn re_enqueue_of_front_keeps_relative_order() {
        let mut queue = RecentsQueue::new(4);
        queue.enqueue(workout("a"));
        queue.enqueue(workout("b"));
        queue.enqueue(workout("c"));
        queue.enqueue(workout("c"));
        assert_eq!(
            queue.to_snapshot(),
            vec![workout("c"), workout("b"), workout("a")]
        );
    }

    #[test]
    fn contains_uses_structural_equality() {
        let mut queue = RecentsQueue::new(2);
        queue.enqueue(workout("a"));
        assert!(queue.contains(&workout("a")));
        assert!(!queue.contains(&workout("b")));
    }

    #[test]
    fn snapshot_round_trip() {
        let items = vec![workout("a"), workout("b")];
        let queue = RecentsQueue::from_snapshot(4, items.clone());
        assert_eq!(queue.to_snapshot(), items);
    }

    #[test]
    fn snapshot_truncates_to_max_on_load() {
        let items = vec![workout("a"), workout("b"), workout("c")];
        let queue = RecentsQueue::from_snapshot(2, items);
        assert_eq!(queue.to_snapshot(), vec![workout("a"), workout("b")]);
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let mut queue = RecentsQueue::new(0);
        queue.enqueue(workout("a"));
        assert!(queue.is_empty());
    }
}
