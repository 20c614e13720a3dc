//! Render an `InventoryReport` as one self-contained HTML page

use std::collections::HashMap;

use askama::Template;

use super::format::or_unknown;
use crate::config::Settings;
use crate::inventory::{
    AggregateSummary, DatacenterSummary, HostRecord, InventoryReport, OsFamily, VirtualMachine,
};

/// Presentation inputs that are not part of the analysis
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub report_id: String,
    /// Original workbook file name
    pub filename: String,
    /// Custom title; the file name is shown when empty
    pub title: String,
    /// Already formatted generation date
    pub generated_at: String,
    pub settings: Settings,
}

/// Template filters, `{{ value|fmt_gb }}` and `{{ value|fmt_int }}`
mod filters {
    use crate::report::format;

    /// Anything the report shows as a number
    pub trait Number {
        fn as_f64(&self) -> f64;
    }

    impl Number for f64 {
        fn as_f64(&self) -> f64 {
            *self
        }
    }

    impl Number for u32 {
        fn as_f64(&self) -> f64 {
            *self as f64
        }
    }

    impl Number for u64 {
        fn as_f64(&self) -> f64 {
            *self as f64
        }
    }

    impl Number for usize {
        fn as_f64(&self) -> f64 {
            *self as f64
        }
    }

    impl<T: Number + ?Sized> Number for &T {
        fn as_f64(&self) -> f64 {
            (**self).as_f64()
        }
    }

    pub fn fmt_int<T: Number>(value: T, _: &dyn askama::Values) -> askama::Result<String> {
        Ok(format::fmt_int(value.as_f64()))
    }

    pub fn fmt_gb<T: Number>(value: T, _: &dyn askama::Values) -> askama::Result<String> {
        Ok(format::fmt_gb(value.as_f64()))
    }
}

pub struct SummaryCard<'a> {
    pub label: &'static str,
    pub summary: &'a AggregateSummary,
}

pub struct OsRow {
    pub label: &'static str,
    pub on: usize,
    pub off: usize,
    pub total: usize,
}

pub struct HostRow<'a> {
    pub name: &'a str,
    pub datacenter: &'a str,
    pub cluster: &'a str,
    pub cpu_count: u32,
    pub memory_gb: f64,
    pub vms_on: usize,
    pub vms_off: usize,
    pub vcpu_on: u64,
}

impl<'a> From<&'a HostRecord> for HostRow<'a> {
    fn from(host: &'a HostRecord) -> Self {
        Self {
            name: or_unknown(&host.name),
            datacenter: or_unknown(&host.datacenter),
            cluster: &host.cluster,
            cpu_count: host.physical_cpu_count,
            memory_gb: host.physical_memory_gb,
            vms_on: host.vms_on.len(),
            vms_off: host.vms_off.len(),
            vcpu_on: host.vcpu_on(),
        }
    }
}

pub struct VmRow<'a> {
    pub name: &'a str,
    pub os: &'a str,
    pub vcpu: u32,
    pub memory_gb: f64,
    pub disk_used_gb: f64,
    pub disk_provisioned_gb: f64,
}

impl<'a> From<&'a VirtualMachine> for VmRow<'a> {
    fn from(vm: &'a VirtualMachine) -> Self {
        Self {
            name: &vm.name,
            os: &vm.operating_system,
            vcpu: vm.vcpu_count,
            memory_gb: vm.memory_mb / 1024.0,
            disk_used_gb: vm.disk_used_gb,
            disk_provisioned_gb: vm.disk_provisioned_gb,
        }
    }
}

/// VMs of one host inside a datacenter group
pub struct HostGroup<'a> {
    pub host: String,
    pub vms: Vec<VmRow<'a>>,
}

/// VMs of one datacenter, split by host
pub struct DatacenterGroup<'a> {
    pub datacenter: String,
    pub hosts: Vec<HostGroup<'a>>,
}

pub struct VmSection<'a> {
    pub id: &'static str,
    pub title: &'static str,
    pub count: usize,
    pub groups: Vec<DatacenterGroup<'a>>,
}

impl<'a> VmSection<'a> {
    fn new(id: &'static str, title: &'static str, vms: &'a [VirtualMachine]) -> Self {
        Self {
            id,
            title,
            count: vms.len(),
            groups: group_by_datacenter_and_host(vms),
        }
    }
}

/// VMs grouped by datacenter then host, both in order of first appearance
pub fn group_by_datacenter_and_host(vms: &[VirtualMachine]) -> Vec<DatacenterGroup<'_>> {
    let mut groups: Vec<DatacenterGroup<'_>> = Vec::new();
    let mut dc_index: HashMap<String, usize> = HashMap::new();

    for vm in vms {
        let dc = or_unknown(&vm.datacenter).to_string();
        let dc_idx = *dc_index.entry(dc.clone()).or_insert_with(|| {
            groups.push(DatacenterGroup {
                datacenter: dc,
                hosts: Vec::new(),
            });
            groups.len() - 1
        });

        let hosts = &mut groups[dc_idx].hosts;
        let host = or_unknown(&vm.host);
        match hosts.iter_mut().find(|group| group.host == host) {
            Some(group) => group.vms.push(VmRow::from(vm)),
            None => hosts.push(HostGroup {
                host: host.to_string(),
                vms: vec![VmRow::from(vm)],
            }),
        }
    }
    groups
}

/// The report page
#[derive(Template)]
#[template(path = "report.html")]
pub struct ReportView<'a> {
    pub title: &'a str,
    pub options: &'a RenderOptions,
    pub settings: &'a Settings,
    pub cards: Vec<SummaryCard<'a>>,
    pub os_rows: Vec<OsRow>,
    pub datacenters: &'a [DatacenterSummary],
    pub hosts: Vec<HostRow<'a>>,
    pub vm_sections: Vec<VmSection<'a>>,
}

impl<'a> ReportView<'a> {
    pub fn new(report: &'a InventoryReport, options: &'a RenderOptions) -> Self {
        let title = if options.title.is_empty() {
            options.filename.as_str()
        } else {
            options.title.as_str()
        };

        let os_rows = [OsFamily::Windows, OsFamily::Linux, OsFamily::Other]
            .into_iter()
            .map(|family| OsRow {
                label: family.label(),
                on: report.summary_on.os_counts.get(family),
                off: report.summary_off.os_counts.get(family),
                total: report.summary_total.os_counts.get(family),
            })
            .collect();

        Self {
            title,
            options,
            settings: &options.settings,
            cards: vec![
                SummaryCard {
                    label: "Powered on",
                    summary: &report.summary_on,
                },
                SummaryCard {
                    label: "Powered off",
                    summary: &report.summary_off,
                },
                SummaryCard {
                    label: "Total",
                    summary: &report.summary_total,
                },
            ],
            os_rows,
            datacenters: &report.datacenters,
            hosts: report.hosts.iter().map(HostRow::from).collect(),
            vm_sections: vec![
                VmSection::new("vms-on", "Powered-on VMs", &report.vms_on),
                VmSection::new("vms-off", "Powered-off VMs", &report.vms_off),
            ],
        }
    }
}

/// Render the full report page
pub fn render_report(
    report: &InventoryReport,
    options: &RenderOptions,
) -> Result<String, askama::Error> {
    ReportView::new(report, options).render()
}
