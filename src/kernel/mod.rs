/*!
 * Kernel Module
 * Process and resource manager owning the process table, resource table
 * and ready queue
 */

mod builder;
mod invariants;
mod operations;
mod snapshot;

pub use builder::KernelBuilder;
pub use snapshot::KernelSnapshot;

use crate::core::config::KernelConfig;
use crate::core::types::{KernelResult, Pid, ResourceId, ROOT_PID, ROOT_PRIORITY};
use crate::process::{Process, ProcessTable};
use crate::resource::{Resource, ResourceTable};
use crate::scheduler::ReadyQueue;
use tracing::info;

/// The simulated kernel
///
/// Every operation validates all of its preconditions before the first
/// mutation, so a returned error leaves the kernel untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kernel {
    config: KernelConfig,
    processes: ProcessTable,
    resources: ResourceTable,
    ready: ReadyQueue,
}

impl Kernel {
    /// Create an initialized kernel from a validated configuration
    pub fn new(config: KernelConfig) -> KernelResult<Self> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: KernelConfig) -> Self {
        let mut kernel = Self {
            processes: ProcessTable::new(config.max_processes),
            resources: ResourceTable::new(&config.resources),
            ready: ReadyQueue::new(config.priority_levels),
            config,
        };
        kernel.init();
        kernel
    }

    /// Create a new kernel builder
    pub fn builder() -> KernelBuilder {
        KernelBuilder::new()
    }

    /// Wipe all state and seed the root process
    ///
    /// Returns the running process, which is always the root.
    pub fn init(&mut self) -> Pid {
        self.processes = ProcessTable::new(self.config.max_processes);
        self.resources = ResourceTable::new(&self.config.resources);
        self.ready = ReadyQueue::new(self.config.priority_levels);

        self.processes
            .insert(Process::new(ROOT_PID, ROOT_PRIORITY, None));
        let seeded = self.ready.insert(ROOT_PID, ROOT_PRIORITY);
        debug_assert!(seeded.is_ok(), "root level always exists");

        info!(
            max_processes = self.config.max_processes,
            resources = ?self.config.resources,
            priority_levels = self.config.priority_levels,
            "Kernel initialized"
        );
        ROOT_PID
    }

    /// Head of the highest non-empty ready level
    ///
    /// The root can neither block nor be destroyed, so the ready queue is
    /// never empty.
    pub fn running(&self) -> Pid {
        let running = self.ready.running();
        debug_assert!(running.is_some(), "ready queue is never empty");
        running.unwrap_or(ROOT_PID)
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.processes.get(pid)
    }

    pub fn resource(&self, rid: ResourceId) -> Option<&Resource> {
        self.resources.get(rid)
    }

    pub fn processes(&self) -> &ProcessTable {
        &self.processes
    }

    pub fn resources(&self) -> &ResourceTable {
        &self.resources
    }

    pub fn ready_queue(&self) -> &ReadyQueue {
        &self.ready
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::from_config(KernelConfig::default())
    }
}
