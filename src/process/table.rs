/*!
 * Process Table
 * Fixed-capacity slot array of process records with hierarchy links
 */

use super::types::Process;
use crate::core::types::Pid;
use log::debug;

/// Slot array indexed by pid; an empty slot is `None`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessTable {
    slots: Vec<Option<Process>>,
}

impl ProcessTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Lowest free slot, or None if the table is full
    pub fn allocate_slot(&self) -> Option<Pid> {
        self.slots
            .iter()
            .position(Option::is_none)
            .map(|index| index as Pid)
    }

    #[inline]
    pub fn in_range(&self, pid: Pid) -> bool {
        (pid as usize) < self.slots.len()
    }

    pub fn exists(&self, pid: Pid) -> bool {
        self.get(pid).is_some()
    }

    pub fn get(&self, pid: Pid) -> Option<&Process> {
        self.slots.get(pid as usize).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, pid: Pid) -> Option<&mut Process> {
        self.slots.get_mut(pid as usize).and_then(Option::as_mut)
    }

    /// Store a record in the slot named by its pid
    pub fn insert(&mut self, process: Process) {
        let index = process.pid as usize;
        debug_assert!(self.slots[index].is_none(), "slot {} is occupied", index);
        debug!("Process {} stored in slot table", process.pid);
        self.slots[index] = Some(process);
    }

    /// Empty a slot, returning its record
    pub fn remove(&mut self, pid: Pid) -> Option<Process> {
        self.slots.get_mut(pid as usize).and_then(Option::take)
    }

    pub fn add_child(&mut self, parent: Pid, child: Pid) {
        if let Some(process) = self.get_mut(parent) {
            process.push_child(child);
        } else {
            debug_assert!(false, "parent {} does not exist", parent);
        }
    }

    /// Caller guarantees `child` is a member of `parent`'s children
    pub fn remove_child(&mut self, parent: Pid, child: Pid) {
        if let Some(process) = self.get_mut(parent) {
            process.drop_child(child);
        } else {
            debug_assert!(false, "parent {} does not exist", parent);
        }
    }

    /// True if `ancestor` is found walking parent links up from `candidate`
    ///
    /// A process is not its own descendant.
    pub fn is_descendant(&self, ancestor: Pid, candidate: Pid) -> bool {
        let mut current = self.get(candidate).and_then(|p| p.parent);
        while let Some(pid) = current {
            if pid == ancestor {
                return true;
            }
            current = self.get(pid).and_then(|p| p.parent);
        }
        false
    }

    /// `root` and all of its descendants, children before parents
    ///
    /// Collected up front so the caller can empty slots while walking the list.
    pub fn subtree_post_order(&self, root: Pid) -> Vec<Pid> {
        let mut order = Vec::new();
        // (pid, children already expanded)
        let mut stack = vec![(root, false)];

        while let Some((pid, expanded)) = stack.pop() {
            if expanded {
                order.push(pid);
                continue;
            }
            let Some(process) = self.get(pid) else {
                continue;
            };
            stack.push((pid, true));
            // Reversed so the first child is visited first
            for &child in process.children().iter().rev() {
                stack.push((child, false));
            }
        }

        order
    }

    /// Occupied records in slot order
    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.slots.iter().filter_map(Option::as_ref)
    }
}
