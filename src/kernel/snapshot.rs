/*!
 * Kernel Snapshot
 * Read-only enumeration of processes, resources and the ready queue
 */

use super::Kernel;
use crate::core::types::Pid;
use crate::process::{Process, ProcessState};
use crate::resource::Resource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Point-in-time copy of the kernel tables for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct KernelSnapshot {
    pub running: Pid,
    /// Live processes in slot order
    pub processes: Vec<Process>,
    pub resources: Vec<Resource>,
    /// Ready queue levels, index = priority
    pub ready: Vec<Vec<Pid>>,
}

impl KernelSnapshot {
    /// Ready processes, highest priority first and FIFO within a level
    pub fn ready_order(&self) -> Vec<Pid> {
        self.ready.iter().rev().flatten().copied().collect()
    }
}

impl Kernel {
    pub fn snapshot(&self) -> KernelSnapshot {
        let ready: Vec<Vec<Pid>> = (0..self.ready.level_count())
            .map(|priority| {
                self.ready
                    .level(priority as u8)
                    .map(|level| level.iter().copied().collect())
                    .unwrap_or_default()
            })
            .collect();

        KernelSnapshot {
            running: self.running(),
            processes: self.processes.iter().cloned().collect(),
            resources: self.resources.iter().cloned().collect(),
            ready,
        }
    }
}

impl fmt::Display for KernelSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "running: {}", self.running)?;

        for process in &self.processes {
            let state = match process.state {
                ProcessState::Ready => "ready".to_string(),
                ProcessState::Blocked { resource, units } => {
                    format!("blocked on {} x{}", resource, units)
                }
            };
            let held: Vec<String> = process
                .held()
                .iter()
                .map(|h| format!("{}:{}", h.resource, h.units))
                .collect();
            writeln!(
                f,
                "process {}: priority {}, {}, children {:?}, held [{}]",
                process.pid,
                process.priority,
                state,
                process.children(),
                held.join(", ")
            )?;
        }

        for resource in &self.resources {
            let waiting: Vec<String> = resource
                .waiting()
                .map(|w| format!("{}:{}", w.pid, w.units))
                .collect();
            writeln!(
                f,
                "resource {}: {}/{} free, waiting [{}]",
                resource.id,
                resource.free_units(),
                resource.inventory(),
                waiting.join(", ")
            )?;
        }

        let levels: Vec<String> = self
            .ready
            .iter()
            .enumerate()
            .rev()
            .map(|(priority, level)| format!("{}: {:?}", priority, level))
            .collect();
        write!(f, "ready: {}", levels.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_contents() {
        let mut kernel = Kernel::default();
        let a = kernel.create_process(1).unwrap();
        let b = kernel.create_process(2).unwrap();
        kernel.request_resource(b, 2, 1).unwrap();

        let snapshot = kernel.snapshot();
        assert_eq!(snapshot.running, b);
        assert_eq!(snapshot.processes.len(), 3);
        assert_eq!(snapshot.resources[2].free_units(), 1);
        assert_eq!(snapshot.ready, vec![vec![0], vec![a], vec![b]]);
        assert_eq!(snapshot.ready_order(), vec![b, a, 0]);
    }

    #[test]
    fn test_snapshot_display() {
        let mut kernel = Kernel::default();
        kernel.create_process(1).unwrap();
        let text = kernel.snapshot().to_string();

        assert!(text.starts_with("running: 1"));
        assert!(text.contains("process 0: priority 0, ready, children [1], held []"));
        assert!(text.contains("resource 3: 3/3 free, waiting []"));
        assert!(text.ends_with("ready: 2: [] | 1: [1] | 0: [0]"));
    }

    #[test]
    fn test_snapshot_json_roundtrip() {
        let mut kernel = Kernel::default();
        let pid = kernel.create_process(1).unwrap();
        kernel.request_resource(pid, 0, 1).unwrap();

        let snapshot = kernel.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: KernelSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
