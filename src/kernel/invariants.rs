/*!
 * Kernel Invariants
 * Consistency checks across the process table, resource table and ready queue
 */

use super::Kernel;
use crate::core::types::{Units, ROOT_PID};
use crate::resource::WaitEntry;

impl Kernel {
    /// Verify the cross-table invariants, describing the first violation
    ///
    /// - free units plus units held by live processes equal each inventory
    /// - a Ready process sits in exactly the ready level of its priority
    /// - a Blocked process sits in exactly one wait queue, with its request
    /// - every non-root process has a live parent listing it as a child
    pub fn check_invariants(&self) -> Result<(), String> {
        if !self.processes.exists(ROOT_PID) {
            return Err("root process missing".to_string());
        }

        for resource in self.resources.iter() {
            let held: Units = self
                .processes
                .iter()
                .map(|p| p.held_units(resource.id))
                .sum();
            if resource.free_units() + held != resource.inventory() {
                return Err(format!(
                    "resource {}: free {} + held {} != inventory {}",
                    resource.id,
                    resource.free_units(),
                    held,
                    resource.inventory()
                ));
            }
            for entry in resource.waiting() {
                if !self.processes.exists(entry.pid) {
                    return Err(format!(
                        "resource {}: dead process {} waiting",
                        resource.id, entry.pid
                    ));
                }
            }
        }

        for process in self.processes.iter() {
            let pid = process.pid;
            let waits: Vec<_> = self
                .resources
                .iter()
                .flat_map(|r| r.waiting().map(move |e| (r.id, *e)))
                .filter(|(_, e)| e.pid == pid)
                .collect();

            match process.blocked_on() {
                None => {
                    if self.ready.level_of(pid) != Some(process.priority) {
                        return Err(format!(
                            "process {} is ready but not queued at priority {}",
                            pid, process.priority
                        ));
                    }
                    if !waits.is_empty() {
                        return Err(format!("process {} is ready but waiting", pid));
                    }
                }
                Some((resource, units)) => {
                    if self.ready.contains(pid) {
                        return Err(format!("process {} is blocked but queued", pid));
                    }
                    if waits != [(resource, WaitEntry { pid, units })] {
                        return Err(format!(
                            "process {} blocked on resource {} has waits {:?}",
                            pid, resource, waits
                        ));
                    }
                }
            }

            match process.parent {
                None if pid != ROOT_PID => {
                    return Err(format!("process {} has no parent", pid));
                }
                Some(parent) => {
                    let linked = self
                        .processes
                        .get(parent)
                        .map(|p| p.has_child(pid))
                        .unwrap_or(false);
                    if !linked {
                        return Err(format!(
                            "process {} not a child of its parent {}",
                            pid, parent
                        ));
                    }
                }
                None => {}
            }

            for &child in process.children() {
                if self.processes.get(child).and_then(|c| c.parent) != Some(pid) {
                    return Err(format!("child {} of {} has another parent", child, pid));
                }
            }
        }

        let queued = self.ready.len();
        let ready = self.processes.iter().filter(|p| p.is_ready()).count();
        if queued != ready {
            return Err(format!("{} queued but {} ready processes", queued, ready));
        }

        Ok(())
    }
}
