//! Category picker command.

use serde::Serialize;
use tabled::Tabled;

use storestat_core::error::AppError;
use storestat_service::{RequestContext, UsageReportService};

use crate::output::{self, OutputFormat};

/// Category display row
#[derive(Debug, Serialize, Tabled)]
struct CategoryRow {
    /// Category ID
    #[tabled(rename = "ID")]
    id: i64,
    /// Full category name
    #[tabled(rename = "Category")]
    name: String,
    /// Nesting depth
    #[tabled(rename = "Depth")]
    depth: usize,
}

/// Execute the category listing
pub async fn execute(
    reports: &UsageReportService,
    ctx: &RequestContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let rows: Vec<CategoryRow> = reports
        .list_categories(ctx)
        .await?
        .into_iter()
        .map(|option| CategoryRow {
            id: option.id.get(),
            name: option.name,
            depth: option.depth,
        })
        .collect();

    output::print_list(&rows, format);
    Ok(())
}
