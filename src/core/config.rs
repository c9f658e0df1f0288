/*!
 * Kernel Configuration
 * Table sizes fixed at initialization, with environment overrides
 */

use super::errors::KernelError;
use super::limits::{
    DEFAULT_MAX_PROCESSES, DEFAULT_PRIORITY_LEVELS, DEFAULT_RESOURCE_INVENTORY,
    ENV_MAX_PROCESSES, ENV_PRIORITY_LEVELS, ENV_RESOURCES, MAX_PRIORITY_LEVELS,
};
use super::types::{KernelResult, Units};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Static shape of the simulated kernel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct KernelConfig {
    /// Number of process slots
    pub max_processes: usize,
    /// Inventory of each resource, indexed by resource id
    pub resources: Vec<Units>,
    /// Number of ready queue levels
    pub priority_levels: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            max_processes: DEFAULT_MAX_PROCESSES,
            resources: DEFAULT_RESOURCE_INVENTORY.to_vec(),
            priority_levels: DEFAULT_PRIORITY_LEVELS,
        }
    }
}

impl KernelConfig {
    /// Default configuration overlaid with environment variables
    ///
    /// Environment variables:
    /// - KERNEL_MAX_PROCESSES: number of process slots
    /// - KERNEL_RESOURCES: comma separated inventories (e.g. `1,1,2,3`)
    /// - KERNEL_PRIORITY_LEVELS: number of ready queue levels
    pub fn from_env() -> KernelResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an injectable variable source
    pub fn from_lookup<F>(lookup: F) -> KernelResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_MAX_PROCESSES) {
            config.max_processes = parse_value(ENV_MAX_PROCESSES, &value)?;
        }
        if let Some(value) = lookup(ENV_RESOURCES) {
            config.resources = value
                .split(',')
                .map(|part| parse_value(ENV_RESOURCES, part))
                .collect::<KernelResult<Vec<Units>>>()?;
        }
        if let Some(value) = lookup(ENV_PRIORITY_LEVELS) {
            config.priority_levels = parse_value(ENV_PRIORITY_LEVELS, &value)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the kernel cannot be initialized with
    pub fn validate(&self) -> KernelResult<()> {
        if self.max_processes == 0 {
            return Err(KernelError::InvalidConfig(
                "max_processes must be at least 1".to_string(),
            ));
        }
        if self.priority_levels < 2 || self.priority_levels > MAX_PRIORITY_LEVELS {
            return Err(KernelError::InvalidConfig(format!(
                "priority_levels must be between 2 and {}, got {}",
                MAX_PRIORITY_LEVELS, self.priority_levels
            )));
        }
        if self.resources.is_empty() {
            return Err(KernelError::InvalidConfig(
                "at least one resource is required".to_string(),
            ));
        }
        if let Some(index) = self.resources.iter().position(|&units| units == 0) {
            return Err(KernelError::InvalidConfig(format!(
                "resource {} has an empty inventory",
                index
            )));
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> KernelResult<T> {
    value.trim().parse().map_err(|_| {
        KernelError::InvalidConfig(format!("{}: cannot parse '{}'", key, value.trim()))
    })
}
