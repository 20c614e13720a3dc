//! `cleanup` command: one-off or periodic retention sweep

use std::time::Duration;

use anyhow::Result;

use crate::cli::CleanupArgs;
use crate::config::AppConfig;
use crate::storage::{ReportStore, retention_cutoff, sweep_expired};

pub async fn handle_cleanup_command(args: CleanupArgs, config: &AppConfig) -> Result<()> {
    let store = ReportStore::open(config)?;

    if !args.watch {
        let removed = sweep_expired(&store, retention_cutoff(config.retention_days))?;
        println!("Removed {} expired folders", removed);
        return Ok(());
    }

    let period = Duration::from_secs(args.interval_hours.max(1) * 3600);
    let mut ticker = tokio::time::interval(period);
    log::info!(
        "Sweeping every {}h, keeping {} days of reports",
        args.interval_hours.max(1),
        config.retention_days
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let store = store.clone();
                let cutoff = retention_cutoff(config.retention_days);
                match tokio::task::spawn_blocking(move || sweep_expired(&store, cutoff)).await {
                    Ok(Ok(_)) => {}
                    Ok(Err(e)) => log::error!("Retention sweep failed: {:#}", e),
                    Err(e) => log::error!("Retention sweep task panicked: {}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("Stopping retention sweep");
                break;
            }
        }
    }
    Ok(())
}
