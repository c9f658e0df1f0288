/*!
 * Process Types
 * Process control block and scheduling state
 */

use crate::core::types::{Pid, Priority, ResourceId, Units};
use serde::{Deserialize, Serialize};

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ProcessState {
    /// Process is in the ready queue
    Ready,
    /// Process waits in the wait queue of `resource` for `units`
    Blocked { resource: ResourceId, units: Units },
}

/// Units of one resource held by a process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldResource {
    pub resource: ResourceId,
    pub units: Units,
}

/// Process control block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Process {
    pub pid: Pid,
    pub priority: Priority,
    pub state: ProcessState,
    /// None only for the root process
    pub parent: Option<Pid>,
    /// Children in creation order
    children: Vec<Pid>,
    /// Held units in acquisition order, never zero
    held: Vec<HeldResource>,
}

impl Process {
    pub fn new(pid: Pid, priority: Priority, parent: Option<Pid>) -> Self {
        Self {
            pid,
            priority,
            state: ProcessState::Ready,
            parent,
            children: Vec::new(),
            held: Vec::new(),
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.state == ProcessState::Ready
    }

    #[inline]
    pub fn is_blocked(&self) -> bool {
        !self.is_ready()
    }

    /// The `(resource, units)` request this process waits on
    pub fn blocked_on(&self) -> Option<(ResourceId, Units)> {
        match self.state {
            ProcessState::Ready => None,
            ProcessState::Blocked { resource, units } => Some((resource, units)),
        }
    }

    pub fn block_on(&mut self, resource: ResourceId, units: Units) {
        self.state = ProcessState::Blocked { resource, units };
    }

    pub fn wake(&mut self) {
        self.state = ProcessState::Ready;
    }

    pub fn children(&self) -> &[Pid] {
        &self.children
    }

    pub fn has_child(&self, child: Pid) -> bool {
        self.children.contains(&child)
    }

    pub(super) fn push_child(&mut self, child: Pid) {
        self.children.push(child);
    }

    pub(super) fn drop_child(&mut self, child: Pid) {
        let position = self.children.iter().position(|&c| c == child);
        debug_assert!(
            position.is_some(),
            "process {} is not a child of {}",
            child,
            self.pid
        );
        if let Some(position) = position {
            self.children.remove(position);
        }
    }

    pub fn held(&self) -> &[HeldResource] {
        &self.held
    }

    /// Units of `resource` held by this process (0 if none)
    pub fn held_units(&self, resource: ResourceId) -> Units {
        self.held
            .iter()
            .find(|h| h.resource == resource)
            .map(|h| h.units)
            .unwrap_or(0)
    }

    pub fn add_held(&mut self, resource: ResourceId, units: Units) {
        if units == 0 {
            return;
        }
        match self.held.iter_mut().find(|h| h.resource == resource) {
            Some(entry) => entry.units += units,
            None => self.held.push(HeldResource { resource, units }),
        }
    }

    pub fn remove_held(&mut self, resource: ResourceId, units: Units) {
        let Some(position) = self.held.iter().position(|h| h.resource == resource) else {
            debug_assert!(units == 0, "process {} holds no units of {}", self.pid, resource);
            return;
        };

        let entry = &mut self.held[position];
        debug_assert!(entry.units >= units, "releasing more than held");
        entry.units = entry.units.saturating_sub(units);
        if entry.units == 0 {
            self.held.remove(position);
        }
    }
}
