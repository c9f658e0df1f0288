/*!
 * Process Module
 * Process records and the fixed-capacity process table
 */

pub mod table;
pub mod types;

// Re-export for convenience
pub use table::ProcessTable;
pub use types::{HeldResource, Process, ProcessState};
