/*!
 * System Limits and Constants
 *
 * Defaults for the simulated kernel. Every value can be overridden at
 * runtime through `KernelConfig`.
 */

// =============================================================================
// PROCESS LIMITS
// =============================================================================

/// Number of process slots in the process table
pub const DEFAULT_MAX_PROCESSES: usize = 16;

/// Number of ready queue levels (0 = root only, 1..N = user processes)
pub const DEFAULT_PRIORITY_LEVELS: usize = 3;

/// Upper bound accepted for the number of priority levels
/// Priorities are stored as `u8`
pub const MAX_PRIORITY_LEVELS: usize = u8::MAX as usize + 1;

// =============================================================================
// RESOURCE LIMITS
// =============================================================================

/// Inventory of each resource type, indexed by resource id
pub const DEFAULT_RESOURCE_INVENTORY: [u32; 4] = [1, 1, 2, 3];

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Overrides `max_processes`
pub const ENV_MAX_PROCESSES: &str = "KERNEL_MAX_PROCESSES";

/// Overrides resource inventories, comma separated (e.g. `1,1,2,3`)
pub const ENV_RESOURCES: &str = "KERNEL_RESOURCES";

/// Overrides `priority_levels`
pub const ENV_PRIORITY_LEVELS: &str = "KERNEL_PRIORITY_LEVELS";

/// Switches tracing output to JSON
pub const ENV_TRACE_JSON: &str = "KERNEL_TRACE_JSON";
