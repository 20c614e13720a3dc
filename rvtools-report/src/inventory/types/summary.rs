//! Aggregate results over sets of virtual machines

use serde::Serialize;

use super::{HostMap, OsFamily, VirtualMachine};

/// VM counts per OS family
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OsCounts {
    pub windows: usize,
    pub linux: usize,
    pub other: usize,
}

impl OsCounts {
    pub fn get(&self, family: OsFamily) -> usize {
        match family {
            OsFamily::Windows => self.windows,
            OsFamily::Linux => self.linux,
            OsFamily::Other => self.other,
        }
    }
}

/// VM records partitioned by OS family
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OsPartition {
    pub windows: Vec<VirtualMachine>,
    pub linux: Vec<VirtualMachine>,
    pub other: Vec<VirtualMachine>,
}

impl OsPartition {
    pub fn push(&mut self, family: OsFamily, vm: VirtualMachine) {
        match family {
            OsFamily::Windows => self.windows.push(vm),
            OsFamily::Linux => self.linux.push(vm),
            OsFamily::Other => self.other.push(vm),
        }
    }
}

/// Rollup of counts and resource totals over a list of VMs
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateSummary {
    pub count: usize,
    pub total_vcpu: u64,
    /// Summed memory in GB, rounded to 3 decimals
    pub total_vram_gb: f64,
    pub total_disk_used_gb: f64,
    pub total_disk_provisioned_gb: f64,
    pub os_counts: OsCounts,
    pub os_vms: OsPartition,
}

/// On/off summaries for one datacenter (`N/D` when the VM has none)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatacenterSummary {
    pub name: String,
    pub on: AggregateSummary,
    pub off: AggregateSummary,
}

/// Everything computed from one workbook, handed to the report assembler
#[derive(Debug, Clone, Serialize)]
pub struct InventoryReport {
    /// Sheet names found in the workbook
    pub sheet_names: Vec<String>,
    /// All VMs in row order
    pub vms: Vec<VirtualMachine>,
    pub vms_on: Vec<VirtualMachine>,
    pub vms_off: Vec<VirtualMachine>,
    pub summary_on: AggregateSummary,
    pub summary_off: AggregateSummary,
    pub summary_total: AggregateSummary,
    pub hosts: HostMap,
    /// Per-datacenter summaries in first-seen order
    pub datacenters: Vec<DatacenterSummary>,
}
