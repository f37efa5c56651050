use std::collections::VecDeque;

pub const ACTION_HISTORY_CAP: usize = 50;
pub const EPISODE_SUMMARY_CAP: usize = 20;

/// Newest-first list that drops its oldest entry once it grows past `cap`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedHistory<T> {
    entries: VecDeque<T>,
    cap: usize,
}

impl<T> BoundedHistory<T> {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap + 1),
            cap,
        }
    }

    pub fn push_front(&mut self, entry: T) {
        self.entries.push_front(entry);
        if self.entries.len() > self.cap {
            self.entries.pop_back();
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    fn cap(&self) -> usize {
        self.cap
    }

    pub fn newest(&self) -> Option<&T> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_entry_is_first() {
        let mut history = BoundedHistory::new(3);
        history.push_front(1);
        history.push_front(2);
        assert_eq!(history.newest(), Some(&2));
        assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec![2, 1]);
    }

    #[test]
    fn evicts_oldest_past_cap() {
        let mut history = BoundedHistory::new(ACTION_HISTORY_CAP);
        for step in 0..(ACTION_HISTORY_CAP + 7) {
            history.push_front(step);
            assert!(history.len() <= ACTION_HISTORY_CAP);
        }
        assert_eq!(history.len(), ACTION_HISTORY_CAP);
        assert_eq!(history.newest(), Some(&(ACTION_HISTORY_CAP + 6)));
        assert_eq!(history.iter().last(), Some(&7));
    }

    #[test]
    fn clear_empties_fully() {
        let mut history = BoundedHistory::new(EPISODE_SUMMARY_CAP);
        for episode in 0..5 {
            history.push_front(episode);
        }
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.cap(), EPISODE_SUMMARY_CAP);
    }
}
