/*!
 * Resource Types
 * Resource control block: inventory, free units and waiters
 */

use crate::core::types::{Pid, ResourceId, Units};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A blocked request waiting on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitEntry {
    pub pid: Pid,
    pub units: Units,
}

/// Resource control block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Resource {
    pub id: ResourceId,
    inventory: Units,
    free: Units,
    waiting: VecDeque<WaitEntry>,
}

impl Resource {
    pub fn new(id: ResourceId, inventory: Units) -> Self {
        Self {
            id,
            inventory,
            free: inventory,
            waiting: VecDeque::new(),
        }
    }

    #[inline]
    pub fn inventory(&self) -> Units {
        self.inventory
    }

    #[inline]
    pub fn free_units(&self) -> Units {
        self.free
    }

    /// Caller checks `units <= free_units()` first
    pub fn allocate(&mut self, units: Units) {
        debug_assert!(units <= self.free, "allocating more than free");
        self.free -= units;
    }

    pub fn release(&mut self, units: Units) {
        debug_assert!(self.free + units <= self.inventory, "freeing past inventory");
        self.free += units;
    }

    pub fn enqueue(&mut self, pid: Pid, units: Units) {
        debug_assert!(units <= self.inventory, "request exceeds inventory");
        self.waiting.push_back(WaitEntry { pid, units });
    }

    pub fn dequeue(&mut self) -> Option<WaitEntry> {
        self.waiting.pop_front()
    }

    pub fn peek(&self) -> Option<&WaitEntry> {
        self.waiting.front()
    }

    /// Drop the `(pid, units)` entry; it must be queued
    pub fn remove_waiter(&mut self, pid: Pid, units: Units) {
        let entry = WaitEntry { pid, units };
        let position = self.waiting.iter().position(|&e| e == entry);
        debug_assert!(position.is_some(), "process {} is not waiting", pid);
        if let Some(position) = position {
            self.waiting.remove(position);
        }
    }

    pub fn waiting(&self) -> impl Iterator<Item = &WaitEntry> {
        self.waiting.iter()
    }

    pub fn wait_len(&self) -> usize {
        self.waiting.len()
    }
}
