//! Event log
//!
//! Bounded, append-only record of human-readable events. Oldest entries fall
//! off once the capacity is reached.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Default number of entries kept
pub const DEFAULT_LOG_CAPACITY: usize = 60;

/// Categories for message filtering/coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageCategory {
    Combat,
    Item,
    System,
    Warning,
}

/// A message in the event log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMessage {
    pub text: String,
    pub category: MessageCategory,
}

/// Ring buffer of game messages, oldest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    entries: VecDeque<GameMessage>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

impl EventLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_LOG_CAPACITY)),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, text: impl Into<String>, category: MessageCategory) {
        self.entries.push_back(GameMessage {
            text: text.into(),
            category,
        });
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameMessage> {
        self.entries.iter()
    }

    /// The newest `n` entries, oldest first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &GameMessage> {
        self.entries.iter().skip(self.entries.len().saturating_sub(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_drops_oldest() {
        let mut log = EventLog::with_capacity(3);
        for i in 0..5 {
            log.push(format!("line {}", i), MessageCategory::System);
        }
        assert_eq!(log.len(), 3);
        let texts: Vec<_> = log.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_recent() {
        let mut log = EventLog::default();
        log.push("a", MessageCategory::Combat);
        log.push("b", MessageCategory::Item);
        let recent: Vec<_> = log.recent(1).map(|m| m.text.as_str()).collect();
        assert_eq!(recent, vec!["b"]);
        assert_eq!(log.recent(10).count(), 2);
        assert_eq!(log.capacity(), DEFAULT_LOG_CAPACITY);
    }
}
