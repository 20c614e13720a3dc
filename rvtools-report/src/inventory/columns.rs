//! Column discovery across RVTools export variants
//!
//! Different RVTools versions (and hand-edited exports) label the same data
//! differently. Each logical field carries an ordered alias list; the first
//! alias present in the sheet header wins. Matching ignores case and
//! surrounding whitespace, nothing fuzzier.

use std::collections::HashMap;

/// Accepted inventory sheet names, in priority order
pub const INVENTORY_SHEETS: &[&str] = &["vInfo", "vinfo", "VMInfo"];

/// Accepted host sheet names, in priority order
pub const HOST_SHEETS: &[&str] = &["vHost", "vhost", "HostInfo"];

/// Header aliases for the inventory sheet
pub mod vm {
    pub const NAME: &[&str] = &["VM", "Name", "VM Name"];
    pub const POWER_STATE: &[&str] = &["Powerstate", "Power State", "State"];
    pub const HOST: &[&str] = &["Host", "ESX Host", "ESXi Host"];
    pub const DATACENTER: &[&str] = &["Datacenter", "DC"];
    pub const CLUSTER: &[&str] = &["Cluster"];
    pub const CPUS: &[&str] = &["CPUs", "CPU", "vCPUs", "Num CPUs"];
    pub const MEMORY: &[&str] = &["Memory", "Memory MB", "RAM MB", "Memory (MB)", "Memory MiB"];
    pub const DISK_PROVISIONED: &[&str] = &[
        "Provisioned MiB",
        "Disk MiB",
        "Disk GB",
        "Total disk (GB)",
        "Provisioned MB",
        "Disk (GB)",
    ];
    pub const DISK_USED: &[&str] = &[
        "In Use MiB",
        "In Use MB",
        "Used Space MB",
        "Used disk (MB)",
        "Disk usage (MB)",
    ];
    pub const OS: &[&str] = &[
        "OS according to the VMware Tools",
        "OS",
        "Guest OS",
        "OS according to the configuration file",
    ];
}

/// Header aliases for the host sheet
pub mod host {
    pub const NAME: &[&str] = &["Host", "Name"];
    pub const DATACENTER: &[&str] = &["Datacenter", "DC"];
    pub const CLUSTER: &[&str] = &["Cluster"];
    pub const CPUS: &[&str] = &["# CPU", "CPUs", "Num CPUs", "CPU"];
    pub const MEMORY: &[&str] = &["# Memory", "Memory GB", "Memory MB", "RAM"];
}

/// Logical inventory fields and their aliases, in display order
pub const VM_FIELDS: &[(&str, &[&str])] = &[
    ("name", vm::NAME),
    ("power state", vm::POWER_STATE),
    ("host", vm::HOST),
    ("datacenter", vm::DATACENTER),
    ("cluster", vm::CLUSTER),
    ("cpus", vm::CPUS),
    ("memory", vm::MEMORY),
    ("disk provisioned", vm::DISK_PROVISIONED),
    ("disk used", vm::DISK_USED),
    ("os", vm::OS),
];

/// Logical host sheet fields and their aliases
pub const HOST_FIELDS: &[(&str, &[&str])] = &[
    ("name", host::NAME),
    ("datacenter", host::DATACENTER),
    ("cluster", host::CLUSTER),
    ("cpus", host::CPUS),
    ("memory", host::MEMORY),
];

/// A header that matched one of the aliases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Position in the header row
    pub index: usize,
    /// Header text as it appears in the sheet (trimmed)
    pub header: String,
}

fn normalize(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Case/whitespace-insensitive lookup over one header row
///
/// When two headers normalize to the same key the leftmost one is kept.
#[derive(Debug, Clone)]
pub struct HeaderIndex {
    lookup: HashMap<String, Column>,
}

impl HeaderIndex {
    pub fn new<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut lookup = HashMap::new();
        for (index, header) in headers.iter().enumerate() {
            let header = header.as_ref();
            lookup.entry(normalize(header)).or_insert_with(|| Column {
                index,
                header: header.trim().to_string(),
            });
        }
        Self { lookup }
    }

    /// Find the first candidate (in priority order) present in the header row
    pub fn find(&self, candidates: &[&str]) -> Option<Column> {
        candidates
            .iter()
            .find_map(|candidate| self.lookup.get(&normalize(candidate)))
            .cloned()
    }
}

/// Resolve one logical field against a header row, returning the matched header
pub fn resolve<S: AsRef<str>>(headers: &[S], candidates: &[&str]) -> Option<String> {
    HeaderIndex::new(headers).find(candidates).map(|c| c.header)
}

/// Resolve every field of a table like [`VM_FIELDS`] against one header row
pub fn resolve_fields<S: AsRef<str>>(
    headers: &[S],
    fields: &[(&'static str, &[&str])],
) -> Vec<(&'static str, Option<String>)> {
    fields
        .iter()
        .map(|(field, aliases)| (*field, resolve(headers, aliases)))
        .collect()
}

/// Resolved inventory columns, `None` where no alias matched
#[derive(Debug, Clone, Default)]
pub struct VmColumns {
    pub name: Option<Column>,
    pub power_state: Option<Column>,
    pub host: Option<Column>,
    pub datacenter: Option<Column>,
    pub cluster: Option<Column>,
    pub cpus: Option<Column>,
    pub memory: Option<Column>,
    pub disk_provisioned: Option<Column>,
    pub disk_used: Option<Column>,
    pub os: Option<Column>,
}

impl VmColumns {
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Self {
        let index = HeaderIndex::new(headers);
        let columns = Self {
            name: index.find(vm::NAME),
            power_state: index.find(vm::POWER_STATE),
            host: index.find(vm::HOST),
            datacenter: index.find(vm::DATACENTER),
            cluster: index.find(vm::CLUSTER),
            cpus: index.find(vm::CPUS),
            memory: index.find(vm::MEMORY),
            disk_provisioned: index.find(vm::DISK_PROVISIONED),
            disk_used: index.find(vm::DISK_USED),
            os: index.find(vm::OS),
        };
        columns.log_resolution("inventory");
        columns
    }

    fn log_resolution(&self, sheet: &str) {
        let fields = [
            ("name", &self.name),
            ("power state", &self.power_state),
            ("host", &self.host),
            ("datacenter", &self.datacenter),
            ("cluster", &self.cluster),
            ("cpus", &self.cpus),
            ("memory", &self.memory),
            ("disk provisioned", &self.disk_provisioned),
            ("disk used", &self.disk_used),
            ("os", &self.os),
        ];
        for (field, column) in fields {
            match column {
                Some(c) => log::debug!("{} sheet: {} -> '{}' (col {})", sheet, field, c.header, c.index),
                None => log::warn!("{} sheet: no column found for {}", sheet, field),
            }
        }
    }
}

/// Resolved host sheet columns
#[derive(Debug, Clone, Default)]
pub struct HostColumns {
    pub name: Option<Column>,
    pub datacenter: Option<Column>,
    pub cluster: Option<Column>,
    pub cpus: Option<Column>,
    pub memory: Option<Column>,
}

impl HostColumns {
    pub fn resolve<S: AsRef<str>>(headers: &[S]) -> Self {
        let index = HeaderIndex::new(headers);
        let columns = Self {
            name: index.find(host::NAME),
            datacenter: index.find(host::DATACENTER),
            cluster: index.find(host::CLUSTER),
            cpus: index.find(host::CPUS),
            memory: index.find(host::MEMORY),
        };
        if columns.name.is_none() {
            log::warn!("host sheet: no host name column, host capacity will be ignored");
        }
        columns
    }
}
