//! Virtual machine records extracted from the inventory sheet

use serde::Serialize;

/// Power state of a virtual machine
///
/// The raw cell is lower-cased and matched verbatim. Only `poweredon` counts
/// as running; `suspended` is kept distinct here but is bucketed with the
/// powered-off machines everywhere a VM is split into on/off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerState {
    PoweredOn,
    #[default]
    PoweredOff,
    Suspended,
}

impl PowerState {
    /// Parse a raw power state cell (`poweredOn`, `poweredOff`, `suspended`)
    pub fn parse(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "poweredon" => PowerState::PoweredOn,
            "suspended" => PowerState::Suspended,
            _ => PowerState::PoweredOff,
        }
    }

    /// Whether this VM lands in the powered-on bucket
    pub fn is_on(&self) -> bool {
        matches!(self, PowerState::PoweredOn)
    }
}

impl std::fmt::Display for PowerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PowerState::PoweredOn => write!(f, "poweredOn"),
            PowerState::PoweredOff => write!(f, "poweredOff"),
            PowerState::Suspended => write!(f, "suspended"),
        }
    }
}

/// Coarse guest operating system family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OsFamily {
    Windows,
    Linux,
    Other,
}

/// Substrings that mark a guest OS as Linux (checked after "windows")
const LINUX_MARKERS: &[&str] = &[
    "linux", "ubuntu", "debian", "centos", "red hat", "suse", "photon",
];

impl OsFamily {
    /// Classify a free-text OS description, first match wins
    pub fn classify(os: &str) -> Self {
        let os = os.to_lowercase();
        if os.contains("windows") {
            OsFamily::Windows
        } else if LINUX_MARKERS.iter().any(|marker| os.contains(marker)) {
            OsFamily::Linux
        } else {
            OsFamily::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OsFamily::Windows => "Windows",
            OsFamily::Linux => "Linux",
            OsFamily::Other => "Other",
        }
    }
}

/// One inventory row with a non-empty name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VirtualMachine {
    pub name: String,
    pub power_state: PowerState,
    /// Host name, may be empty
    pub host: String,
    /// Datacenter name, may be empty
    pub datacenter: String,
    /// Cluster name, carried through but never aggregated
    pub cluster: String,
    pub cpu_count: u32,
    /// Same source column as `cpu_count`
    pub vcpu_count: u32,
    /// Configured memory, kept in MB
    pub memory_mb: f64,
    /// Storage in use, GB rounded to 3 decimals
    pub disk_used_gb: f64,
    /// Storage provisioned, GB rounded to 3 decimals
    pub disk_provisioned_gb: f64,
    pub operating_system: String,
}

impl VirtualMachine {
    /// Create a powered-off VM with the given name and every other field empty
    #[cfg(test)]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            power_state: PowerState::default(),
            host: String::new(),
            datacenter: String::new(),
            cluster: String::new(),
            cpu_count: 0,
            vcpu_count: 0,
            memory_mb: 0.0,
            disk_used_gb: 0.0,
            disk_provisioned_gb: 0.0,
            operating_system: String::new(),
        }
    }

    pub fn is_on(&self) -> bool {
        self.power_state.is_on()
    }

    pub fn os_family(&self) -> OsFamily {
        OsFamily::classify(&self.operating_system)
    }
}
