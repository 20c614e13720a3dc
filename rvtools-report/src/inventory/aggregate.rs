//! Rollups over VM lists: totals, OS family split, datacenter grouping

use std::collections::HashMap;

use super::types::{AggregateSummary, DatacenterSummary, OsFamily, VirtualMachine};
use super::units::round_to;

/// Datacenter key for VMs without a datacenter
pub const UNKNOWN_DATACENTER: &str = "N/D";

/// Summarize a list of VMs
///
/// vCPUs are summed as integers; memory is summed in MB, converted to GB and
/// rounded to 3 decimals; disk figures are already GB and are rounded to 3
/// decimals after summing.
pub fn summarize(vms: &[VirtualMachine]) -> AggregateSummary {
    let mut summary = AggregateSummary {
        count: vms.len(),
        ..Default::default()
    };

    let mut memory_mb = 0.0;
    let mut disk_used = 0.0;
    let mut disk_provisioned = 0.0;

    for vm in vms {
        summary.total_vcpu += vm.vcpu_count as u64;
        memory_mb += vm.memory_mb;
        disk_used += vm.disk_used_gb;
        disk_provisioned += vm.disk_provisioned_gb;

        let family = vm.os_family();
        match family {
            OsFamily::Windows => summary.os_counts.windows += 1,
            OsFamily::Linux => summary.os_counts.linux += 1,
            OsFamily::Other => summary.os_counts.other += 1,
        }
        summary.os_vms.push(family, vm.clone());
    }

    summary.total_vram_gb = round_to(memory_mb / 1024.0, 3);
    summary.total_disk_used_gb = round_to(disk_used, 3);
    summary.total_disk_provisioned_gb = round_to(disk_provisioned, 3);
    summary
}

/// Combine the on and off summaries field by field
///
/// Nothing is recomputed from records: each float total is the sum of the two
/// inputs rounded back to 3 decimals. OS partitions are concatenated, on first.
pub fn summarize_total(on: &AggregateSummary, off: &AggregateSummary) -> AggregateSummary {
    let mut total = AggregateSummary {
        count: on.count + off.count,
        total_vcpu: on.total_vcpu + off.total_vcpu,
        total_vram_gb: round_to(on.total_vram_gb + off.total_vram_gb, 3),
        total_disk_used_gb: round_to(on.total_disk_used_gb + off.total_disk_used_gb, 3),
        total_disk_provisioned_gb: round_to(
            on.total_disk_provisioned_gb + off.total_disk_provisioned_gb,
            3,
        ),
        ..Default::default()
    };
    total.os_counts.windows = on.os_counts.windows + off.os_counts.windows;
    total.os_counts.linux = on.os_counts.linux + off.os_counts.linux;
    total.os_counts.other = on.os_counts.other + off.os_counts.other;

    for part in [&on.os_vms, &off.os_vms] {
        total.os_vms.windows.extend(part.windows.iter().cloned());
        total.os_vms.linux.extend(part.linux.iter().cloned());
        total.os_vms.other.extend(part.other.iter().cloned());
    }
    total
}

/// Split VMs into (powered on, everything else), keeping row order
pub fn split_by_power(vms: &[VirtualMachine]) -> (Vec<VirtualMachine>, Vec<VirtualMachine>) {
    vms.iter().cloned().partition(|vm| vm.is_on())
}

/// Datacenter key for a VM
pub fn datacenter_key(vm: &VirtualMachine) -> &str {
    if vm.datacenter.is_empty() {
        UNKNOWN_DATACENTER
    } else {
        &vm.datacenter
    }
}

/// Per-datacenter on/off summaries, in order of first appearance
pub fn group_by_datacenter(vms: &[VirtualMachine]) -> Vec<DatacenterSummary> {
    let mut order: Vec<(String, Vec<VirtualMachine>, Vec<VirtualMachine>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for vm in vms {
        let key = datacenter_key(vm);
        let idx = match index.get(key) {
            Some(&idx) => idx,
            None => {
                index.insert(key.to_string(), order.len());
                order.push((key.to_string(), Vec::new(), Vec::new()));
                order.len() - 1
            }
        };
        let (_, on, off) = &mut order[idx];
        if vm.is_on() {
            on.push(vm.clone());
        } else {
            off.push(vm.clone());
        }
    }

    order
        .into_iter()
        .map(|(name, on, off)| DatacenterSummary {
            name,
            on: summarize(&on),
            off: summarize(&off),
        })
        .collect()
}
