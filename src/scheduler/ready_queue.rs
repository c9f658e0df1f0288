/*!
 * Ready Queue
 * Strict priority scheduling with FIFO order inside each level
 */

use crate::core::errors::ProcessError;
use crate::core::types::{Pid, Priority};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One FIFO queue per priority level; level 0 is the lowest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadyQueue {
    levels: Vec<VecDeque<Pid>>,
}

impl ReadyQueue {
    pub fn new(levels: usize) -> Self {
        Self {
            levels: vec![VecDeque::new(); levels],
        }
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Append `pid` to the tail of `priority`'s level
    pub fn insert(&mut self, pid: Pid, priority: Priority) -> Result<(), ProcessError> {
        let max = self.levels.len().saturating_sub(1) as Priority;
        let level = self
            .levels
            .get_mut(priority as usize)
            .ok_or(ProcessError::InvalidPriority { priority, max })?;

        debug_assert!(!level.contains(&pid), "process {} queued twice", pid);
        level.push_back(pid);
        debug!("Process {} queued at priority {}", pid, priority);
        Ok(())
    }

    /// Remove `pid` from `priority`'s level; it must be queued there
    pub fn remove(&mut self, pid: Pid, priority: Priority) {
        let position = self
            .levels
            .get(priority as usize)
            .and_then(|level| level.iter().position(|&p| p == pid));
        debug_assert!(
            position.is_some(),
            "process {} not queued at priority {}",
            pid,
            priority
        );
        if let Some(position) = position {
            self.levels[priority as usize].remove(position);
        }
    }

    /// Head of the highest non-empty level
    pub fn running(&self) -> Option<Pid> {
        self.levels
            .iter()
            .rev()
            .find_map(|level| level.front().copied())
    }

    /// Move the head of the highest non-empty level to its tail
    pub fn rotate_current_level(&mut self) {
        if let Some(level) = self.levels.iter_mut().rev().find(|l| !l.is_empty()) {
            level.rotate_left(1);
            debug!("Ready queue rotated, new head {:?}", level.front());
        }
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.levels.iter().any(|level| level.contains(&pid))
    }

    /// Level currently holding `pid`
    pub fn level_of(&self, pid: Pid) -> Option<Priority> {
        self.levels
            .iter()
            .position(|level| level.contains(&pid))
            .map(|index| index as Priority)
    }

    pub fn level(&self, priority: Priority) -> Option<&VecDeque<Pid>> {
        self.levels.get(priority as usize)
    }

    pub fn len(&self) -> usize {
        self.levels.iter().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(VecDeque::is_empty)
    }

    /// Highest priority first, FIFO within a level
    pub fn iter(&self) -> impl Iterator<Item = Pid> + '_ {
        self.levels.iter().rev().flat_map(|level| level.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_priority() {
        let mut queue = ReadyQueue::new(3);
        queue.insert(0, 0).unwrap();
        assert_eq!(queue.running(), Some(0));

        queue.insert(1, 1).unwrap();
        queue.insert(2, 2).unwrap();
        queue.insert(3, 2).unwrap();
        assert_eq!(queue.running(), Some(2));

        queue.remove(2, 2);
        assert_eq!(queue.running(), Some(3));
    }

    #[test]
    fn test_invalid_priority() {
        let mut queue = ReadyQueue::new(3);
        assert_eq!(
            queue.insert(1, 3),
            Err(ProcessError::InvalidPriority {
                priority: 3,
                max: 2
            })
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_rotate_only_highest_level() {
        let mut queue = ReadyQueue::new(3);
        queue.insert(0, 0).unwrap();
        queue.insert(5, 0).unwrap();
        queue.insert(1, 1).unwrap();
        queue.insert(2, 1).unwrap();
        queue.insert(3, 1).unwrap();

        queue.rotate_current_level();
        assert_eq!(queue.running(), Some(2));
        assert_eq!(queue.iter().collect::<Vec<_>>(), vec![2, 3, 1, 0, 5]);
    }

    #[test]
    fn test_rotate_single_process() {
        let mut queue = ReadyQueue::new(3);
        queue.insert(0, 0).unwrap();
        queue.rotate_current_level();
        assert_eq!(queue.running(), Some(0));
    }

    #[test]
    fn test_empty_queue() {
        let mut queue = ReadyQueue::new(3);
        assert_eq!(queue.running(), None);
        queue.rotate_current_level();
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_level_of() {
        let mut queue = ReadyQueue::new(3);
        queue.insert(4, 2).unwrap();
        assert_eq!(queue.level_of(4), Some(2));
        assert!(queue.contains(4));
        assert_eq!(queue.level_of(9), None);
    }
}
