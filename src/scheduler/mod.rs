/*!
 * Scheduler Module
 * Priority-segregated ready queue that selects the running process
 */

pub mod ready_queue;

// Re-export public API
pub use ready_queue::ReadyQueue;
