/*!
 * Resource Module
 * Finite-inventory resource ledgers with FIFO wait queues
 */

pub mod table;
pub mod types;

// Re-export for convenience
pub use table::ResourceTable;
pub use types::{Resource, WaitEntry};
