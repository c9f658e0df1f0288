/*!
 * Core Types
 * Common types used across the kernel
 */

/// Process ID type (the slot index in the process table)
pub type Pid = u32;

/// Resource ID type (the index in the resource table)
pub type ResourceId = u32;

/// Count of resource units
pub type Units = u32;

/// Priority level (0 is lowest and reserved for the root process)
pub type Priority = u8;

/// Slot of the root process seeded by `init`
pub const ROOT_PID: Pid = 0;

/// Priority of the root process
pub const ROOT_PRIORITY: Priority = 0;

/// Common result type for kernel operations
pub type KernelResult<T> = Result<T, super::errors::KernelError>;
