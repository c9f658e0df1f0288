/*!
 * Process and Resource Manager Kernel Library
 * Simulated process table, resource table and priority ready queue
 */

pub mod core;
pub mod kernel;
pub mod monitoring;
pub mod process;
pub mod resource;
pub mod scheduler;
pub mod shell;

// Re-exports
pub use crate::core::{
    KernelConfig, KernelError, KernelResult, Pid, Priority, ProcessError, ResourceError,
    ResourceId, Units, ROOT_PID,
};
pub use kernel::{Kernel, KernelBuilder, KernelSnapshot};
pub use monitoring::init_tracing;
pub use process::{Process, ProcessState, ProcessTable};
pub use resource::{Resource, ResourceTable, WaitEntry};
pub use scheduler::ReadyQueue;
pub use shell::{Command, Outcome, Shell};
