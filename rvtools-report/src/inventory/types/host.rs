//! Physical host records and the insertion-ordered host map

use std::collections::HashMap;

use serde::{Serialize, Serializer};

use super::VirtualMachine;

/// A physical host, from the host sheet or synthesized from a VM reference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostRecord {
    pub name: String,
    pub datacenter: String,
    pub cluster: String,
    pub physical_cpu_count: u32,
    /// Physical memory in GB, rounded to 2 decimals
    pub physical_memory_gb: f64,
    pub vms_on: Vec<VirtualMachine>,
    pub vms_off: Vec<VirtualMachine>,
}

impl HostRecord {
    /// Create a host with no capacity figures and no VMs
    pub fn new(
        name: impl Into<String>,
        datacenter: impl Into<String>,
        cluster: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            datacenter: datacenter.into(),
            cluster: cluster.into(),
            physical_cpu_count: 0,
            physical_memory_gb: 0.0,
            vms_on: Vec::new(),
            vms_off: Vec::new(),
        }
    }

    /// vCPUs allocated to running VMs
    pub fn vcpu_on(&self) -> u64 {
        self.vms_on.iter().map(|vm| vm.vcpu_count as u64).sum()
    }
}

/// Host records keyed by name, iterated in insertion order
///
/// Re-inserting an existing name replaces the record in place and keeps its
/// original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostMap {
    hosts: Vec<HostRecord>,
    index: HashMap<String, usize>,
}

impl HostMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, host: HostRecord) {
        match self.index.get(&host.name) {
            Some(&idx) => self.hosts[idx] = host,
            None => {
                self.index.insert(host.name.clone(), self.hosts.len());
                self.hosts.push(host);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&HostRecord> {
        self.index.get(name).map(|&idx| &self.hosts[idx])
    }

    /// Get the host with this name, inserting the record built by `create` first if missing
    pub fn get_or_insert_with<F>(&mut self, name: &str, create: F) -> &mut HostRecord
    where
        F: FnOnce() -> HostRecord,
    {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                let idx = self.hosts.len();
                self.index.insert(name.to_string(), idx);
                self.hosts.push(create());
                idx
            }
        };
        &mut self.hosts[idx]
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HostRecord> {
        self.hosts.iter()
    }
}

impl<'a> IntoIterator for &'a HostMap {
    type Item = &'a HostRecord;
    type IntoIter = std::slice::Iter<'a, HostRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.hosts.iter()
    }
}

impl Serialize for HostMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.hosts.iter())
    }
}
