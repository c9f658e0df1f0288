/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::{Pid, Priority, ResourceId, Units};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Process-related errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ProcessError {
    #[error("Invalid priority {priority}: must be between 1 and {max}")]
    #[diagnostic(
        code(process::invalid_priority),
        help("Priority 0 is reserved for the root process.")
    )]
    InvalidPriority { priority: Priority, max: Priority },

    #[error("Process table full: all {0} slots are in use")]
    #[diagnostic(
        code(process::table_full),
        help("Destroy unused processes before creating new ones.")
    )]
    ProcessTableFull(usize),

    #[error("Invalid process index {0}")]
    #[diagnostic(
        code(process::invalid_index),
        help("Process indices are slot numbers below the configured maximum.")
    )]
    InvalidProcessIndex(Pid),

    #[error("Process {0} not found")]
    #[diagnostic(
        code(process::not_found),
        help("The slot is empty. The process may have been destroyed.")
    )]
    ProcessNotFound(Pid),

    #[error("Process {target} is neither process {running} nor one of its descendants")]
    #[diagnostic(
        code(process::not_self_or_descendant),
        help("The running process may only destroy itself or its descendants.")
    )]
    NotSelfOrDescendant { running: Pid, target: Pid },

    #[error("Cannot destroy the root process")]
    #[diagnostic(code(process::cannot_destroy_root))]
    CannotDestroyRoot,

    #[error("Process {0} is blocked")]
    #[diagnostic(
        code(process::blocked),
        help("A blocked process cannot issue requests until it is woken up.")
    )]
    ProcessBlocked(Pid),
}

/// Resource-related errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ResourceError {
    #[error("The root process cannot request resources")]
    #[diagnostic(
        code(resource::root_request),
        help("Create a child process and request from it instead.")
    )]
    RootCannotRequestResources,

    #[error("Invalid resource index {0}")]
    #[diagnostic(
        code(resource::invalid_index),
        help("Resource indices are fixed when the kernel is initialized.")
    )]
    InvalidResourceIndex(ResourceId),

    #[error("Request for {requested} units of resource {resource} with {held} held exceeds inventory {inventory}")]
    #[diagnostic(
        code(resource::exceeds_inventory),
        help("A process can never hold more units than the resource provides.")
    )]
    RequestExceedsInventory {
        resource: ResourceId,
        requested: Units,
        held: Units,
        inventory: Units,
    },

    #[error("Cannot release {requested} units of resource {resource}: only {held} held")]
    #[diagnostic(code(resource::exceeds_held))]
    ReleaseExceedsHeld {
        resource: ResourceId,
        requested: Units,
        held: Units,
    },
}

/// Unified kernel error type with miette diagnostics
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum KernelError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Resource(#[from] ResourceError),

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(kernel::configuration_error),
        help("Invalid configuration. Review configuration parameters.")
    )]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err: KernelError = ProcessError::CannotDestroyRoot.into();
        assert_eq!(err.to_string(), "Cannot destroy the root process");

        let err: KernelError = ResourceError::ReleaseExceedsHeld {
            resource: 2,
            requested: 3,
            held: 1,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Cannot release 3 units of resource 2: only 1 held"
        );
    }

    #[test]
    fn test_error_serialization() {
        let err: KernelError = ProcessError::ProcessNotFound(7).into();
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("process_not_found"));

        let back: KernelError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }
}
