//! System overview command.

use serde::Serialize;
use tabled::Tabled;

use storestat_core::error::AppError;
use storestat_service::{RequestContext, UsageReportService};

use crate::output::{self, OutputFormat};

/// Chart slice display row
#[derive(Debug, Serialize, Tabled)]
struct SliceRow {
    /// Slice label
    #[tabled(rename = "Type")]
    label: String,
    /// Formatted size
    #[tabled(rename = "Storage")]
    storage: String,
}

/// Execute the system overview
pub async fn execute(
    reports: &UsageReportService,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let overview = reports.system_overview(ctx).await?;

    match format {
        OutputFormat::Json => output::print_json(&overview),
        OutputFormat::Table => {
            output::print_heading("Disk Usage : System");
            output::print_kv("Total disk usage", &overview.total.display);
            output::print_kv("All courses", &overview.all_courses.display);
            output::print_kv("All users", &overview.all_users.display);
            output::print_kv(
                "Generated",
                &overview.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            );
            println!();

            println!("{}", overview.chart.title);
            let rows: Vec<SliceRow> = overview
                .chart
                .slices
                .iter()
                .map(|s| SliceRow {
                    label: s.label.clone(),
                    storage: s.formatted.clone(),
                })
                .collect();
            output::print_table(&rows);
        }
    }

    Ok(())
}
