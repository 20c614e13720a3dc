//! Static HTML report generation

mod format;
mod html;

pub use format::{fmt_gb, fmt_int};
pub use html::{RenderOptions, render_report};

/// Date format shown in reports and stored as a custom report date
pub const REPORT_DATE_FORMAT: &str = "%d/%m/%Y %H:%M";
