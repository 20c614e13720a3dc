//! Command handlers

pub mod analyze;
pub mod cleanup;
pub mod history;
pub mod settings;

use colored::*;

use crate::inventory::{AggregateSummary, InventoryReport};
use crate::report::{fmt_gb, fmt_int};

fn summary_line(label: &str, summary: &AggregateSummary) -> String {
    format!(
        "{:<12} {:>7} VMs {:>8} vCPU {:>10} GB vRAM {:>12} GB used {:>12} GB provisioned",
        label,
        fmt_int(summary.count as f64),
        fmt_int(summary.total_vcpu as f64),
        fmt_gb(summary.total_vram_gb),
        fmt_gb(summary.total_disk_used_gb),
        fmt_gb(summary.total_disk_provisioned_gb),
    )
}

/// Print the headline numbers of an analysis
pub(crate) fn print_summary(report: &InventoryReport) {
    println!("{}", "Summary".bold());
    println!("  {}", summary_line("Powered on", &report.summary_on).green());
    println!("  {}", summary_line("Powered off", &report.summary_off).yellow());
    println!("  {}", summary_line("Total", &report.summary_total));

    let os = &report.summary_total.os_counts;
    println!(
        "  OS families: {} windows, {} linux, {} other",
        os.windows, os.linux, os.other
    );

    println!();
    println!("{}", "Datacenters".bold());
    for dc in &report.datacenters {
        println!(
            "  {:<20} {:>6} on {:>6} off",
            dc.name.cyan(),
            dc.on.count,
            dc.off.count
        );
    }
    if report.hosts.is_empty() {
        println!("  no hosts");
    } else {
        println!("  {} hosts", report.hosts.len());
    }
}
