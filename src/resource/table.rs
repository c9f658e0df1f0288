/*!
 * Resource Table
 * Fixed array of resource control blocks
 */

use super::types::{Resource, WaitEntry};
use crate::core::types::{Pid, ResourceId, Units};
use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTable {
    resources: Vec<Resource>,
}

impl ResourceTable {
    /// One resource per inventory entry, all units free
    pub fn new(inventories: &[Units]) -> Self {
        Self {
            resources: inventories
                .iter()
                .enumerate()
                .map(|(id, &inventory)| Resource::new(id as ResourceId, inventory))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn is_valid(&self, rid: ResourceId) -> bool {
        (rid as usize) < self.resources.len()
    }

    pub fn get(&self, rid: ResourceId) -> Option<&Resource> {
        self.resources.get(rid as usize)
    }

    // The helpers below take a resource id the caller has validated.

    fn ledger(&mut self, rid: ResourceId) -> &mut Resource {
        &mut self.resources[rid as usize]
    }

    pub fn allocate(&mut self, rid: ResourceId, units: Units) {
        self.ledger(rid).allocate(units);
        debug!("Resource {}: {} units allocated", rid, units);
    }

    pub fn free(&mut self, rid: ResourceId, units: Units) {
        self.ledger(rid).release(units);
        debug!("Resource {}: {} units freed", rid, units);
    }

    pub fn enqueue_wait(&mut self, rid: ResourceId, pid: Pid, units: Units) {
        self.ledger(rid).enqueue(pid, units);
    }

    pub fn dequeue_wait_head(&mut self, rid: ResourceId) -> Option<WaitEntry> {
        self.ledger(rid).dequeue()
    }

    pub fn remove_from_wait(&mut self, rid: ResourceId, pid: Pid, units: Units) {
        self.ledger(rid).remove_waiter(pid, units);
    }

    pub fn peek_wait_head(&self, rid: ResourceId) -> Option<WaitEntry> {
        self.get(rid).and_then(|r| r.peek().copied())
    }

    pub fn free_units(&self, rid: ResourceId) -> Units {
        self.get(rid).map(Resource::free_units).unwrap_or(0)
    }

    pub fn total_units(&self, rid: ResourceId) -> Units {
        self.get(rid).map(Resource::inventory).unwrap_or(0)
    }

    pub fn wait_list_size(&self, rid: ResourceId) -> usize {
        self.get(rid).map(Resource::wait_len).unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_and_free() {
        let mut table = ResourceTable::new(&[1, 1, 2, 3]);
        assert_eq!(table.len(), 4);
        assert_eq!(table.total_units(3), 3);
        assert_eq!(table.free_units(3), 3);

        table.allocate(3, 2);
        assert_eq!(table.free_units(3), 1);
        assert_eq!(table.total_units(3), 3);

        table.free(3, 2);
        assert_eq!(table.free_units(3), 3);
    }

    #[test]
    fn test_wait_queue_fifo() {
        let mut table = ResourceTable::new(&[2]);
        table.enqueue_wait(0, 1, 2);
        table.enqueue_wait(0, 2, 1);
        table.enqueue_wait(0, 3, 1);
        assert_eq!(table.wait_list_size(0), 3);
        assert_eq!(table.peek_wait_head(0), Some(WaitEntry { pid: 1, units: 2 }));

        table.remove_from_wait(0, 2, 1);
        assert_eq!(table.dequeue_wait_head(0), Some(WaitEntry { pid: 1, units: 2 }));
        assert_eq!(table.dequeue_wait_head(0), Some(WaitEntry { pid: 3, units: 1 }));
        assert_eq!(table.dequeue_wait_head(0), None);
    }

    #[test]
    fn test_invalid_index() {
        let table = ResourceTable::new(&[1]);
        assert!(table.is_valid(0));
        assert!(!table.is_valid(1));
        assert!(table.get(4).is_none());
    }
}
