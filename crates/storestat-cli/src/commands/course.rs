//! Course report command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use storestat_core::error::AppError;
use storestat_core::types::{CategoryId, CourseId};
use storestat_service::{RequestContext, UsageReportService};

use crate::output::{self, OutputFormat};

/// Arguments for the course report
#[derive(Debug, Args)]
pub struct CourseArgs {
    /// Course ID
    #[arg(long)]
    pub id: CourseId,
    /// Category the course was reached from
    #[arg(long)]
    pub category: Option<CategoryId>,
    /// Page number, starting at 1
    #[arg(long)]
    pub page: Option<u64>,
    /// Files per page
    #[arg(long)]
    pub per_page: Option<u64>,
}

/// File display row
#[derive(Debug, Serialize, Tabled)]
struct FileRow {
    /// File name
    #[tabled(rename = "File")]
    file: String,
    /// Size
    #[tabled(rename = "Size")]
    size: String,
    /// Course or module file
    #[tabled(rename = "Type")]
    kind: String,
    /// Owning component
    #[tabled(rename = "Component")]
    component: String,
    /// File area
    #[tabled(rename = "File Area")]
    filearea: String,
    /// Activity link
    #[tabled(rename = "Activity")]
    activity: String,
}

/// Execute the course report
pub async fn execute(
    args: &CourseArgs,
    reports: &UsageReportService,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    if args.id.is_unset() {
        return Err(AppError::validation("Course ID must be a positive number"));
    }

    let page = reports.page_request(args.page, args.per_page);
    let report = reports.course_report(ctx, args.category, args.id, page).await?;

    match format {
        OutputFormat::Json => output::print_json(&report),
        OutputFormat::Table => {
            output::print_heading(&report.heading);
            output::print_kv("Course", &report.course_name);
            output::print_kv("Course page", &report.course_url);
            output::print_kv("Total disk usage", &report.total.display);
            println!();

            let rows: Vec<FileRow> = report
                .files
                .items
                .iter()
                .map(|line| FileRow {
                    file: line.filename.clone(),
                    size: line.size.display.clone(),
                    kind: line.origin.to_string(),
                    component: line.component.clone(),
                    filearea: line.filearea.clone(),
                    activity: line.activity_url.clone().unwrap_or_default(),
                })
                .collect();
            output::print_table(&rows);
            output::print_page_footer(&report.files);
        }
    }

    Ok(())
}
