//! Category report command.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use storestat_core::error::AppError;
use storestat_core::types::{CategoryId, UsageScope};
use storestat_service::{RequestContext, UsageReportService};

use crate::output::{self, OutputFormat};

/// Arguments for the category report
#[derive(Debug, Args)]
pub struct CategoryArgs {
    /// Category ID (omit for every course)
    #[arg(long)]
    pub id: Option<CategoryId>,
    /// Page number, starting at 1
    #[arg(long)]
    pub page: Option<u64>,
    /// Courses per page
    #[arg(long)]
    pub per_page: Option<u64>,
}

/// Course subtotal display row
#[derive(Debug, Serialize, Tabled)]
struct CourseRow {
    /// Course ID
    #[tabled(rename = "ID")]
    id: String,
    /// Course name
    #[tabled(rename = "Course")]
    course: String,
    /// Size
    #[tabled(rename = "Size")]
    size: String,
    /// Drill-down command
    #[tabled(rename = "Details")]
    details: String,
}

/// Execute the category report
pub async fn execute(
    args: &CategoryArgs,
    reports: &UsageReportService,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let page = reports.page_request(args.page, args.per_page);
    let report = reports.category_report(ctx, args.id, page).await?;

    match format {
        OutputFormat::Json => output::print_json(&report),
        OutputFormat::Table => {
            output::print_heading(&report.heading);
            output::print_kv("Total disk usage", &report.total.display);
            if let Some(count) = report.course_count {
                output::print_kv("Courses", &count.to_string());
            }
            println!();

            let rows: Vec<CourseRow> = report
                .courses
                .items
                .iter()
                .map(|line| CourseRow {
                    id: line.course_id.to_string(),
                    course: line.course_name.clone(),
                    size: line.size.display.clone(),
                    details: drilldown_command(&line.drilldown),
                })
                .collect();
            output::print_table(&rows);
            output::print_page_footer(&report.courses);
        }
    }

    Ok(())
}

/// Command line that opens the course report for a drill-down scope.
fn drilldown_command(scope: &UsageScope) -> String {
    match scope {
        UsageScope::Course {
            category_id: Some(category_id),
            course_id,
        } => format!("storestat course --id {course_id} --category {category_id}"),
        UsageScope::Course {
            category_id: None,
            course_id,
        } => format!("storestat course --id {course_id}"),
        UsageScope::Category { category_id } => format!("storestat category --id {category_id}"),
        UsageScope::System => "storestat system".to_string(),
    }
}
