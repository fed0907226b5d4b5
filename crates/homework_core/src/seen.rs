use std::collections::{HashSet, VecDeque};

/// Insertion-ordered set of already-notified error texts with a fixed capacity.
///
/// Inserting past capacity evicts the oldest entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenErrors {
    capacity: usize,
    order: VecDeque<String>,
    members: HashSet<String>,
}

impl SeenErrors {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity),
            members: HashSet::with_capacity(capacity),
        }
    }

    pub fn contains(&self, text: &str) -> bool {
        self.members.contains(text)
    }

    /// Returns `true` when the text was not present before.
    pub fn insert(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.members.contains(&text) {
            return false;
        }
        if self.order.len() == self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.members.remove(&oldest);
            }
        }
        self.members.insert(text.clone());
        self.order.push_back(text);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
