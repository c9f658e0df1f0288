/*!
 * Kernel Operations
 * Create, destroy, request, release and timeout
 */

use super::Kernel;
use crate::core::errors::{ProcessError, ResourceError};
use crate::core::types::{KernelResult, Pid, Priority, ResourceId, Units, ROOT_PID};
use crate::process::Process;
use tracing::{debug, info, instrument};

impl Kernel {
    /// Create a child of the running process at `priority`
    ///
    /// Returns the pid of the new process.
    #[instrument(level = "debug", skip(self))]
    pub fn create_process(&mut self, priority: Priority) -> KernelResult<Pid> {
        let max = (self.config.priority_levels - 1) as Priority;
        if priority == 0 || priority > max {
            return Err(ProcessError::InvalidPriority { priority, max }.into());
        }

        let pid = self
            .processes
            .allocate_slot()
            .ok_or(ProcessError::ProcessTableFull(self.processes.capacity()))?;
        let parent = self.running();

        self.ready.insert(pid, priority)?;
        self.processes
            .insert(Process::new(pid, priority, Some(parent)));
        self.processes.add_child(parent, pid);

        info!(pid, parent, priority, "Process created");
        Ok(pid)
    }

    /// Destroy `target` and all of its descendants
    ///
    /// The running process may destroy itself or any of its descendants.
    /// Returns the number of destroyed processes.
    #[instrument(level = "debug", skip(self))]
    pub fn destroy_process(&mut self, target: Pid) -> KernelResult<usize> {
        if !self.processes.in_range(target) {
            return Err(ProcessError::InvalidProcessIndex(target).into());
        }
        if target == ROOT_PID {
            return Err(ProcessError::CannotDestroyRoot.into());
        }
        if !self.processes.exists(target) {
            return Err(ProcessError::ProcessNotFound(target).into());
        }

        let running = self.running();
        if running != target && !self.processes.is_descendant(running, target) {
            return Err(ProcessError::NotSelfOrDescendant { running, target }.into());
        }

        let doomed = self.processes.subtree_post_order(target);
        for &pid in &doomed {
            self.destroy_one(pid);
        }

        info!(target, destroyed = doomed.len(), "Process tree destroyed");
        Ok(doomed.len())
    }

    /// Tear down a single process whose children are already gone
    fn destroy_one(&mut self, pid: Pid) {
        let Some(process) = self.processes.remove(pid) else {
            return;
        };
        debug_assert!(process.children().is_empty(), "children destroyed first");

        if let Some(parent) = process.parent {
            self.processes.remove_child(parent, pid);
        }

        match process.blocked_on() {
            None => self.ready.remove(pid, process.priority),
            Some((resource, units)) => self.resources.remove_from_wait(resource, pid, units),
        }

        // State is re-read per process: a release here may wake a sibling
        // that is destroyed later in the same call.
        for held in process.held() {
            self.free_and_wake(held.resource, held.units);
        }

        debug!(pid, "Process destroyed");
    }

    /// Request `units` of `resource` on behalf of `pid`
    ///
    /// Grants immediately when enough units are free, otherwise blocks the
    /// process on the resource's wait queue. Returns the running process.
    #[instrument(level = "debug", skip(self))]
    pub fn request_resource(
        &mut self,
        pid: Pid,
        resource: ResourceId,
        units: Units,
    ) -> KernelResult<Pid> {
        if pid == ROOT_PID {
            return Err(ResourceError::RootCannotRequestResources.into());
        }
        let process = self.lookup(pid)?;
        if process.is_blocked() {
            return Err(ProcessError::ProcessBlocked(pid).into());
        }
        if !self.resources.is_valid(resource) {
            return Err(ResourceError::InvalidResourceIndex(resource).into());
        }

        let held = process.held_units(resource);
        let inventory = self.resources.total_units(resource);
        if held.saturating_add(units) > inventory {
            return Err(ResourceError::RequestExceedsInventory {
                resource,
                requested: units,
                held,
                inventory,
            }
            .into());
        }

        let priority = process.priority;
        if units <= self.resources.free_units(resource) {
            self.resources.allocate(resource, units);
            if let Some(process) = self.processes.get_mut(pid) {
                process.add_held(resource, units);
            }
            debug!(pid, resource, units, "Request granted");
        } else {
            self.ready.remove(pid, priority);
            if let Some(process) = self.processes.get_mut(pid) {
                process.block_on(resource, units);
            }
            self.resources.enqueue_wait(resource, pid, units);
            debug!(pid, resource, units, "Process blocked");
        }

        Ok(self.running())
    }

    /// Release `units` of `resource` held by `pid`
    ///
    /// Freed units are handed to the head of the wait queue for as long as
    /// the head request fits. Returns the running process.
    #[instrument(level = "debug", skip(self))]
    pub fn release_resource(
        &mut self,
        pid: Pid,
        resource: ResourceId,
        units: Units,
    ) -> KernelResult<Pid> {
        let process = self.lookup(pid)?;
        if !self.resources.is_valid(resource) {
            return Err(ResourceError::InvalidResourceIndex(resource).into());
        }

        let held = process.held_units(resource);
        if units > held {
            return Err(ResourceError::ReleaseExceedsHeld {
                resource,
                requested: units,
                held,
            }
            .into());
        }

        if let Some(process) = self.processes.get_mut(pid) {
            process.remove_held(resource, units);
        }
        self.free_and_wake(resource, units);

        debug!(pid, resource, units, "Units released");
        Ok(self.running())
    }

    /// Rotate the highest non-empty ready level. Returns the running process.
    #[instrument(level = "debug", skip(self))]
    pub fn timeout(&mut self) -> Pid {
        self.ready.rotate_current_level();
        self.running()
    }

    fn lookup(&self, pid: Pid) -> KernelResult<&Process> {
        if !self.processes.in_range(pid) {
            return Err(ProcessError::InvalidProcessIndex(pid).into());
        }
        self.processes
            .get(pid)
            .ok_or_else(|| ProcessError::ProcessNotFound(pid).into())
    }

    /// Return units to `resource` and serve its wait queue from the head
    ///
    /// Stops at the first request that does not fit, even if a later one would.
    fn free_and_wake(&mut self, resource: ResourceId, units: Units) {
        self.resources.free(resource, units);

        while self.resources.free_units(resource) > 0 {
            let Some(head) = self.resources.peek_wait_head(resource) else {
                break;
            };
            if head.units > self.resources.free_units(resource) {
                break;
            }

            self.resources.dequeue_wait_head(resource);
            self.resources.allocate(resource, head.units);

            let Some(waiter) = self.processes.get_mut(head.pid) else {
                debug_assert!(false, "waiting process {} does not exist", head.pid);
                continue;
            };
            waiter.add_held(resource, head.units);
            waiter.wake();
            let priority = waiter.priority;

            let queued = self.ready.insert(head.pid, priority);
            debug_assert!(queued.is_ok(), "woken process has a valid priority");
            debug!(pid = head.pid, resource, units = head.units, "Process woken");
        }
    }
}
