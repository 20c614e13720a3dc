//! Turn sheet rows into VM and host records

use calamine::Data;

use super::columns::{Column, HostColumns, VmColumns};
use super::excel::{SheetTable, cell_count, cell_float, cell_string, get_cell};
use super::types::{HostMap, HostRecord, PowerState, VirtualMachine};
use super::units::{disk_to_gb, host_memory_to_gb, round_to};

fn index(column: &Option<Column>) -> Option<usize> {
    column.as_ref().map(|c| c.index)
}

fn header(column: &Option<Column>) -> Option<&str> {
    column.as_ref().map(|c| c.header.as_str())
}

/// Extract one VM record per inventory row with a non-empty name
pub fn extract_vms(sheet: &SheetTable) -> Vec<VirtualMachine> {
    let columns = VmColumns::resolve(&sheet.headers);
    let vms: Vec<VirtualMachine> = sheet
        .rows
        .iter()
        .filter_map(|row| extract_vm(row, &columns))
        .collect();

    let skipped = sheet.rows.len() - vms.len();
    if skipped > 0 {
        log::debug!("Skipped {} inventory rows without a VM name", skipped);
    }
    log::info!("Extracted {} VMs from sheet '{}'", vms.len(), sheet.name);
    vms
}

/// Extract a single VM, `None` when the name cell is blank
pub fn extract_vm(row: &[Data], columns: &VmColumns) -> Option<VirtualMachine> {
    let text = |column: &Option<Column>| cell_string(get_cell(row, index(column)));
    let number = |column: &Option<Column>| cell_float(get_cell(row, index(column)));

    let name = text(&columns.name);
    if name.is_empty() {
        return None;
    }

    let power_state = match &columns.power_state {
        Some(_) => PowerState::parse(&text(&columns.power_state)),
        None => PowerState::PoweredOff,
    };
    let cpus = cell_count(get_cell(row, index(&columns.cpus)));
    let disk_provisioned = disk_to_gb(
        number(&columns.disk_provisioned),
        header(&columns.disk_provisioned),
    );
    let disk_used = disk_to_gb(number(&columns.disk_used), header(&columns.disk_used));

    Some(VirtualMachine {
        name,
        power_state,
        host: text(&columns.host),
        datacenter: text(&columns.datacenter),
        cluster: text(&columns.cluster),
        cpu_count: cpus,
        vcpu_count: cpus,
        memory_mb: number(&columns.memory),
        disk_used_gb: round_to(disk_used, 3),
        disk_provisioned_gb: round_to(disk_provisioned, 3),
        operating_system: text(&columns.os),
    })
}

/// Extract host capacity stubs from the host sheet
///
/// Rows without a host name are skipped. A repeated host name replaces the
/// earlier row.
pub fn extract_hosts(sheet: &SheetTable) -> HostMap {
    let columns = HostColumns::resolve(&sheet.headers);
    let mut hosts = HostMap::new();
    for row in &sheet.rows {
        if let Some(host) = extract_host(row, &columns) {
            hosts.insert(host);
        }
    }
    log::info!("Extracted {} hosts from sheet '{}'", hosts.len(), sheet.name);
    hosts
}

pub fn extract_host(row: &[Data], columns: &HostColumns) -> Option<HostRecord> {
    let text = |column: &Option<Column>| cell_string(get_cell(row, index(column)));

    let name = text(&columns.name);
    if name.is_empty() {
        return None;
    }

    let mut host = HostRecord::new(name, text(&columns.datacenter), text(&columns.cluster));
    host.physical_cpu_count = cell_count(get_cell(row, index(&columns.cpus)));
    let memory = cell_float(get_cell(row, index(&columns.memory)));
    host.physical_memory_gb = round_to(host_memory_to_gb(memory), 2);
    Some(host)
}
