//! RVTools inventory analysis
//!
//! Reads the vInfo/vHost sheets of an RVTools export and computes utilization
//! rollups: by power state, by OS family, by datacenter and by host. The
//! pipeline is pure once the sheets are loaded, and each call owns all of its
//! state.

pub mod aggregate;
pub mod associate;
pub mod columns;
pub mod excel;
pub mod extract;
pub mod types;
pub mod units;
mod error;

use std::path::Path;

pub use aggregate::{group_by_datacenter, split_by_power, summarize, summarize_total};
pub use associate::associate_vms;
pub use error::InventoryError;
pub use excel::{InventoryTables, read_inventory_tables};
pub use types::*;

/// Run the full analysis over already-loaded sheets
pub fn analyze(tables: InventoryTables) -> InventoryReport {
    let vms = extract::extract_vms(&tables.inventory);
    let sheet_hosts = match &tables.hosts {
        Some(sheet) => extract::extract_hosts(sheet),
        None => HostMap::new(),
    };
    let hosts = associate_vms(sheet_hosts, &vms);

    let (vms_on, vms_off) = split_by_power(&vms);
    let summary_on = summarize(&vms_on);
    let summary_off = summarize(&vms_off);
    let summary_total = summarize_total(&summary_on, &summary_off);
    let datacenters = group_by_datacenter(&vms);

    log::info!(
        "Analyzed {} VMs ({} on, {} off) across {} hosts and {} datacenters",
        summary_total.count,
        summary_on.count,
        summary_off.count,
        hosts.len(),
        datacenters.len()
    );

    InventoryReport {
        sheet_names: tables.sheet_names,
        vms,
        vms_on,
        vms_off,
        summary_on,
        summary_off,
        summary_total,
        hosts,
        datacenters,
    }
}

/// Read an RVTools workbook from disk and analyze it
pub fn parse_inventory<P: AsRef<Path>>(path: P) -> Result<InventoryReport, InventoryError> {
    let tables = read_inventory_tables(path)?;
    Ok(analyze(tables))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::excel::SheetTable;
    use calamine::Data;
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;

    fn s(value: &str) -> Data {
        Data::String(value.to_string())
    }

    fn f(value: f64) -> Data {
        Data::Float(value)
    }

    fn tables() -> InventoryTables {
        let inventory = SheetTable::from_rows(
            "vInfo",
            vec![
                vec![
                    s("VM"), s("Powerstate"), s("Host"), s("Datacenter"), s("Cluster"),
                    s("CPUs"), s("Memory"), s("Provisioned MiB"), s("In Use MiB"), s("OS"),
                ],
                vec![s("web01"), s("poweredOn"), s("esx01"), s("DC1"), s("C1"), f(4.0), f(8192.0), f(102400.0), f(51200.0), s("Microsoft Windows Server 2019")],
                vec![s("db01"), s("poweredOn"), s("esx02"), s("DC1"), s("C1"), f(8.0), f(32768.0), f(512000.0), f(256000.0), s("Ubuntu Linux (64-bit)")],
                vec![s(""), s("poweredOn"), s("esx02"), s("DC1"), s("C1"), f(64.0), f(65536.0), f(0.0), f(0.0), s("")],
                vec![s("old01"), s("poweredOff"), s("esx03"), s("DC2"), s("C2"), f(2.0), f(2048.0), f(40960.0), f(0.0), s("FreeBSD")],
                vec![s("tmp01"), s("suspended"), s("esx01"), s(""), s("C1"), f(1.0), f(1024.0), f(10240.0), f(1024.0), s("")],
            ],
        );
        let hosts = SheetTable::from_rows(
            "vHost",
            vec![
                vec![s("Host"), s("Datacenter"), s("Cluster"), s("# CPU"), s("# Memory")],
                vec![s("esx01"), s(""), s("C1"), f(2.0), f(524288.0)],
                vec![s("esx02"), s("DC1"), s("C1"), f(2.0), f(768.0)],
            ],
        );
        InventoryTables {
            sheet_names: vec!["vInfo".to_string(), "vHost".to_string()],
            inventory,
            hosts: Some(hosts),
        }
    }

    #[test]
    fn test_analyze_pipeline() {
        let report = analyze(tables());

        assert_eq!(report.vms.len(), 4);
        assert_eq!(report.summary_on.count, 2);
        assert_eq!(report.summary_off.count, 2);
        assert_eq!(report.summary_total.count, 4);
        assert_eq!(report.summary_on.total_vcpu, 12);
        assert_eq!(report.summary_on.total_vram_gb, 40.0);
        assert_eq!(report.summary_on.total_disk_provisioned_gb, 600.0);
        assert_eq!(report.summary_on.total_disk_used_gb, 300.0);

        // The nameless row contributes nowhere
        assert!(report.hosts.iter().all(|h| h.vms_on.len() + h.vms_off.len() <= 2));
        assert_eq!(report.hosts.get("esx02").unwrap().vms_on.len(), 1);
    }

    #[test]
    fn test_analyze_hosts() {
        let report = analyze(tables());
        let names: Vec<_> = report.hosts.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["esx01", "esx02", "esx03"]);

        let esx01 = report.hosts.get("esx01").unwrap();
        assert_eq!(esx01.datacenter, "DC1");
        assert_eq!(esx01.physical_memory_gb, 512.0);
        assert_eq!(esx01.vms_on.len(), 1);
        assert_eq!(esx01.vms_off.len(), 1);

        let esx02 = report.hosts.get("esx02").unwrap();
        assert_eq!(esx02.physical_memory_gb, 768.0);

        let esx03 = report.hosts.get("esx03").unwrap();
        assert_eq!(esx03.physical_cpu_count, 0);
        assert_eq!(esx03.datacenter, "DC2");
    }

    #[test]
    fn test_analyze_datacenters() {
        let report = analyze(tables());
        let names: Vec<_> = report.datacenters.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["DC1", "DC2", "N/D"]);
        assert_eq!(report.datacenters[0].on.count, 2);
        assert_eq!(report.datacenters[2].off.count, 1);
    }

    #[test]
    fn test_analyze_without_host_sheet() {
        let mut tables = tables();
        tables.hosts = None;
        let report = analyze(tables);
        assert_eq!(report.hosts.len(), 3);
        assert!(report.hosts.iter().all(|h| h.physical_cpu_count == 0));
    }

    #[test]
    fn test_parse_inventory_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rvtools.xlsx");
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("vInfo").unwrap();
        for (col, header) in ["VM", "Powerstate", "Host", "CPUs", "Memory", "Disk GB"].iter().enumerate() {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        sheet.write_string(1, 0, "vm01").unwrap();
        sheet.write_string(1, 1, "poweredOn").unwrap();
        sheet.write_string(1, 2, "esx01").unwrap();
        sheet.write_number(1, 3, 2.0).unwrap();
        sheet.write_number(1, 4, 2048.0).unwrap();
        sheet.write_number(1, 5, 15000.0).unwrap();
        workbook.save(&path).unwrap();

        let report = parse_inventory(&path).unwrap();
        assert_eq!(report.sheet_names, vec!["vInfo".to_string()]);
        assert_eq!(report.vms[0].disk_provisioned_gb, 14.648);
        assert_eq!(report.summary_on.total_vram_gb, 2.0);
        assert_eq!(report.hosts.get("esx01").unwrap().vms_on.len(), 1);
    }
}
