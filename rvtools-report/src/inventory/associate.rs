//! Attach VMs to their hosts

use super::types::{HostMap, HostRecord, VirtualMachine};

/// Assign every VM to its host, in row order
///
/// Takes the host map by value and returns it once every VM is placed. Hosts
/// missing from the host sheet are synthesized with the VM's datacenter and
/// cluster and zero capacity. An empty host datacenter is
/// back-filled from the first VM that has one; a set datacenter is never
/// overwritten.
pub fn associate_vms(mut hosts: HostMap, vms: &[VirtualMachine]) -> HostMap {
    let mut synthesized = 0usize;

    for vm in vms {
        if !hosts.contains(&vm.host) {
            synthesized += 1;
        }
        let host = hosts.get_or_insert_with(&vm.host, || {
            HostRecord::new(vm.host.as_str(), vm.datacenter.as_str(), vm.cluster.as_str())
        });

        if host.datacenter.is_empty() && !vm.datacenter.is_empty() {
            host.datacenter = vm.datacenter.clone();
        }

        if vm.is_on() {
            host.vms_on.push(vm.clone());
        } else {
            host.vms_off.push(vm.clone());
        }
    }

    if synthesized > 0 {
        log::info!("Synthesized {} hosts missing from the host sheet", synthesized);
    }
    hosts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::types::PowerState;

    fn vm(name: &str, host: &str, dc: &str, state: PowerState) -> VirtualMachine {
        let mut vm = VirtualMachine::new(name);
        vm.host = host.to_string();
        vm.datacenter = dc.to_string();
        vm.cluster = "C1".to_string();
        vm.power_state = state;
        vm
    }

    #[test]
    fn test_unknown_host_is_synthesized() {
        let vms = vec![vm("vm01", "esx09", "DC2", PowerState::PoweredOn)];
        let hosts = associate_vms(HostMap::new(), &vms);

        let host = hosts.get("esx09").unwrap();
        assert_eq!(host.datacenter, "DC2");
        assert_eq!(host.cluster, "C1");
        assert_eq!(host.physical_cpu_count, 0);
        assert_eq!(host.physical_memory_gb, 0.0);
        assert_eq!(host.vms_on.len(), 1);
    }

    #[test]
    fn test_vms_split_by_power_state() {
        let vms = vec![
            vm("a", "esx01", "DC1", PowerState::PoweredOn),
            vm("b", "esx01", "DC1", PowerState::PoweredOff),
            vm("c", "esx01", "DC1", PowerState::Suspended),
        ];
        let hosts = associate_vms(HostMap::new(), &vms);
        let host = hosts.get("esx01").unwrap();
        assert_eq!(host.vms_on.len(), 1);
        // Suspended VMs share the off bucket
        let off: Vec<_> = host.vms_off.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(off, vec!["b", "c"]);
    }

    #[test]
    fn test_datacenter_backfill_first_non_empty_wins() {
        let mut sheet_hosts = HostMap::new();
        sheet_hosts.insert(HostRecord::new("esx01", "", "C1"));
        sheet_hosts.insert(HostRecord::new("esx02", "DC-A", "C1"));

        let vms = vec![
            vm("a", "esx01", "", PowerState::PoweredOn),
            vm("b", "esx01", "DC1", PowerState::PoweredOn),
            vm("c", "esx01", "DC2", PowerState::PoweredOn),
            vm("d", "esx02", "DC-B", PowerState::PoweredOn),
        ];
        let hosts = associate_vms(sheet_hosts, &vms);

        assert_eq!(hosts.get("esx01").unwrap().datacenter, "DC1");
        assert_eq!(hosts.get("esx02").unwrap().datacenter, "DC-A");
    }

    #[test]
    fn test_host_sheet_capacity_kept_and_order_preserved() {
        let mut sheet_hosts = HostMap::new();
        let mut esx01 = HostRecord::new("esx01", "DC1", "C1");
        esx01.physical_cpu_count = 2;
        sheet_hosts.insert(esx01);

        let vms = vec![
            vm("a", "esx05", "DC1", PowerState::PoweredOn),
            vm("b", "esx01", "DC1", PowerState::PoweredOff),
            vm("c", "", "DC1", PowerState::PoweredOff),
        ];
        let hosts = associate_vms(sheet_hosts, &vms);

        let names: Vec<_> = hosts.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["esx01", "esx05", ""]);
        assert_eq!(hosts.get("esx01").unwrap().physical_cpu_count, 2);
        assert_eq!(hosts.get("esx01").unwrap().vms_off.len(), 1);
    }
}
