/*!
 * Kernel Builder
 * Builder pattern for Kernel construction
 */

use super::Kernel;
use crate::core::config::KernelConfig;
use crate::core::types::{KernelResult, Units};

/// Builder for Kernel
#[derive(Debug, Clone, Default)]
pub struct KernelBuilder {
    config: KernelConfig,
}

impl KernelBuilder {
    /// Create a builder starting from the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: KernelConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the number of process slots
    pub fn with_max_processes(mut self, max_processes: usize) -> Self {
        self.config.max_processes = max_processes;
        self
    }

    /// Set the resource inventories, one entry per resource
    pub fn with_resources(mut self, inventories: impl Into<Vec<Units>>) -> Self {
        self.config.resources = inventories.into();
        self
    }

    /// Set the number of ready queue levels
    pub fn with_priority_levels(mut self, levels: usize) -> Self {
        self.config.priority_levels = levels;
        self
    }

    /// Build the Kernel
    pub fn build(self) -> KernelResult<Kernel> {
        Kernel::new(self.config)
    }
}
