//! Command-line interface

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "rvtools-report")]
#[command(about = "Turn RVTools exports into static HTML utilization reports", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory for uploads, reports and settings (overrides RVTOOLS_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a workbook, store it and write an HTML report
    Analyze(AnalyzeArgs),
    /// Analyze a workbook and print the summary without storing anything
    Inspect(InspectArgs),
    /// List stored reports, newest first
    History,
    /// Show where a stored report lives, or print its HTML
    Show {
        /// Report id
        id: String,
        /// Print the HTML to stdout
        #[arg(long)]
        print: bool,
    },
    /// Copy the original workbook of a report
    Download {
        /// Report id
        id: String,
        /// Destination file or directory (defaults to the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Permanently delete a report and its upload
    Delete {
        /// Report id
        id: String,
    },
    /// Show or change report branding
    Settings {
        #[command(subcommand)]
        action: SettingsCommands,
    },
    /// Remove uploads and reports older than the retention period
    Cleanup(CleanupArgs),
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// RVTools export (.xlsx)
    pub file: PathBuf,
    /// Custom report title
    #[arg(short, long, default_value = "")]
    pub title: String,
    /// Custom report date, YYYY-MM-DDTHH:MM
    #[arg(short, long)]
    pub date: Option<String>,
    /// Also write the full analysis as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// RVTools export (.xlsx)
    pub file: PathBuf,
    /// Print the full analysis as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
    /// Show which sheet header each field was read from
    #[arg(long)]
    pub columns: bool,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Print the current settings
    Show,
    /// Update one or more settings
    Set {
        #[arg(long)]
        company_name: Option<String>,
        /// Colour as #rrggbb; anything else is ignored
        #[arg(long)]
        primary_color: Option<String>,
        /// Colour as #rrggbb; anything else is ignored
        #[arg(long)]
        accent_color: Option<String>,
        /// PNG logo to show in report headers
        #[arg(long, conflicts_with = "delete_logo")]
        logo: Option<PathBuf>,
        /// Remove the custom logo
        #[arg(long)]
        delete_logo: bool,
    },
}

#[derive(Args, Debug)]
pub struct CleanupArgs {
    /// Keep running and sweep on an interval
    #[arg(long)]
    pub watch: bool,
    /// Hours between sweeps in watch mode
    #[arg(long, default_value_t = 12)]
    pub interval_hours: u64,
}

/// Dispatch a parsed command
pub async fn run(command: Commands, config: &AppConfig) -> Result<()> {
    match command {
        Commands::Analyze(args) => commands::analyze::handle_analyze_command(args, config),
        Commands::Inspect(args) => commands::analyze::handle_inspect_command(args),
        Commands::History => commands::history::handle_history_command(config),
        Commands::Show { id, print } => commands::history::handle_show_command(&id, print, config),
        Commands::Download { id, output } => {
            commands::history::handle_download_command(&id, output, config)
        }
        Commands::Delete { id } => commands::history::handle_delete_command(&id, config),
        Commands::Settings { action } => commands::settings::handle_settings_command(action, config),
        Commands::Cleanup(args) => commands::cleanup::handle_cleanup_command(args, config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "rvtools-report",
            "--data-dir",
            "/tmp/rv",
            "analyze",
            "export.xlsx",
            "--title",
            "Q3",
            "--date",
            "2026-09-30T18:45",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/rv")));
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.file, PathBuf::from("export.xlsx"));
                assert_eq!(args.title, "Q3");
                assert_eq!(args.date.as_deref(), Some("2026-09-30T18:45"));
                assert!(args.json.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_cleanup_defaults() {
        let cli = Cli::try_parse_from(["rvtools-report", "cleanup"]).unwrap();
        match cli.command {
            Commands::Cleanup(args) => {
                assert!(!args.watch);
                assert_eq!(args.interval_hours, 12);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_inspect_columns() {
        let cli = Cli::try_parse_from(["rvtools-report", "inspect", "export.xlsx", "--columns"]).unwrap();
        match cli.command {
            Commands::Inspect(args) => {
                assert!(args.columns);
                assert!(!args.json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_logo_conflicts_with_delete() {
        let result = Cli::try_parse_from([
            "rvtools-report",
            "settings",
            "set",
            "--logo",
            "logo.png",
            "--delete-logo",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["rvtools-report", "history", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::History));
    }
}
