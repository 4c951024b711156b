//! Report views handed to the presentation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use storestat_core::types::{CategoryId, CourseId, FileId, PageResponse, UsageScope};
use storestat_entity::size::{format_size_labeled, megabytes};
use storestat_entity::{FileOrigin, SizeUnit};

/// Page title prefix of every usage report.
pub const REPORT_TITLE: &str = "Disk Usage";

/// A byte count together with its display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageFigure {
    /// Raw byte count.
    pub bytes: i64,
    /// Unit the figure is displayed in.
    pub unit: SizeUnit,
    /// Formatted value with unit label, e.g. `"12 MB"`.
    pub display: String,
}

impl UsageFigure {
    /// Format `bytes` in `unit`.
    pub fn new(bytes: i64, unit: SizeUnit) -> Self {
        Self {
            bytes,
            unit,
            display: format_size_labeled(bytes, unit),
        }
    }

    /// Format `bytes` in whole megabytes.
    pub fn mb(bytes: i64) -> Self {
        Self::new(bytes, SizeUnit::Mb)
    }

    /// Format `bytes` in gigabytes.
    pub fn gb(bytes: i64) -> Self {
        Self::new(bytes, SizeUnit::Gb)
    }
}

/// One slice of the storage pie chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSlice {
    /// Slice label.
    pub label: String,
    /// Slice value in whole megabytes.
    pub value: i64,
    /// Formatted value shown on the slice.
    pub formatted: String,
}

impl ChartSlice {
    /// Slice for a byte count, valued in megabytes.
    pub fn megabytes(label: &str, bytes: i64) -> Self {
        let value = megabytes(bytes);
        Self {
            label: label.to_string(),
            value,
            formatted: format!("{value} MB"),
        }
    }
}

/// Pie chart comparing course storage with personal user storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageChart {
    /// Chart title.
    pub title: String,
    /// Slices in display order.
    pub slices: Vec<ChartSlice>,
    /// Slices as a charting data table, see [`UsageChart::data_table`].
    pub data: Value,
}

impl UsageChart {
    /// Chart titled `title` over `slices`.
    pub fn new(title: &str, slices: Vec<ChartSlice>) -> Self {
        let data = Self::data_table(&slices);
        Self {
            title: title.to_string(),
            slices,
            data,
        }
    }

    /// Chart rows as a charting data table: a header row followed by one
    /// `[label, {"v": value, "f": formatted}]` row per slice.
    pub fn data_table(slices: &[ChartSlice]) -> Value {
        let mut rows = vec![json!(["Type", "Storage"])];
        rows.extend(
            slices
                .iter()
                .map(|s| json!([s.label, { "v": s.value, "f": s.formatted }])),
        );
        Value::Array(rows)
    }
}

/// Site-wide storage overview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemOverview {
    /// When the overview was generated.
    pub generated_at: DateTime<Utc>,
    /// Every stored file, in gigabytes.
    pub total: UsageFigure,
    /// Files of all courses and their activities.
    pub all_courses: UsageFigure,
    /// Personal user files.
    pub all_users: UsageFigure,
    /// Course versus user storage.
    pub chart: UsageChart,
}

/// Id and name of the category a report covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// Category id.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
}

/// One course of a category report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseUsageLine {
    /// Course id.
    pub course_id: CourseId,
    /// Course full name.
    pub course_name: String,
    /// Course and activity files.
    pub size: UsageFigure,
    /// Scope of the course drill-down report.
    pub drilldown: UsageScope,
}

/// Usage of a category subtree, or of every course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryReport {
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Report heading.
    pub heading: String,
    /// Covered category, `None` for the whole system.
    pub category: Option<CategorySummary>,
    /// Courses in the category subtree; `None` for the whole system.
    pub course_count: Option<u64>,
    /// Total of the covered courses.
    pub total: UsageFigure,
    /// Courses, largest first.
    pub courses: PageResponse<CourseUsageLine>,
}

/// One file of a course report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileLine {
    /// File id.
    pub file_id: FileId,
    /// File name.
    pub filename: String,
    /// File size.
    pub size: UsageFigure,
    /// Whether the file hangs off the course or an activity.
    pub origin: FileOrigin,
    /// Owning component.
    pub component: String,
    /// File area within the component.
    pub filearea: String,
    /// Download link.
    pub file_url: String,
    /// Link to the owning activity, for activity files.
    pub activity_url: Option<String>,
}

/// Files of a single course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseReport {
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Report heading of the category the course was reached from.
    pub heading: String,
    /// Category the course was reached from.
    pub category_id: Option<CategoryId>,
    /// Course id.
    pub course_id: CourseId,
    /// Course full name.
    pub course_name: String,
    /// Link to the course page.
    pub course_url: String,
    /// Course and activity files.
    pub total: UsageFigure,
    /// Files, largest first.
    pub files: PageResponse<FileLine>,
}

/// Entry of the category picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    /// Category id.
    pub id: CategoryId,
    /// Names from the top level down, joined with `" / "`.
    pub name: String,
    /// Nesting depth, zero for top-level categories.
    pub depth: usize,
}

/// Heading of a report for `category`, or for the whole system.
pub fn heading(category: Option<&CategorySummary>) -> String {
    match category {
        Some(category) => format!("{REPORT_TITLE} : {}", category.name),
        None => format!("{REPORT_TITLE} : System"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_figures() {
        assert_eq!(UsageFigure::mb(3 * 1_048_576).display, "3 MB");
        assert_eq!(UsageFigure::gb(1_073_741_824).display, "1.00 GB");
    }

    #[test]
    fn test_chart_data_table() {
        let chart = UsageChart::new(
            "Storage Usage",
            vec![
                ChartSlice::megabytes("All Course", 5 * 1_048_576),
                ChartSlice::megabytes("All Users", 0),
            ],
        );
        assert_eq!(
            chart.data,
            json!([
                ["Type", "Storage"],
                ["All Course", {"v": 5, "f": "5 MB"}],
                ["All Users", {"v": 0, "f": "0 MB"}]
            ])
        );
    }

    #[test]
    fn test_heading() {
        assert_eq!(heading(None), "Disk Usage : System");
        let physics = CategorySummary {
            id: CategoryId::new(7),
            name: "Physics".to_string(),
        };
        assert_eq!(heading(Some(&physics)), "Disk Usage : Physics");
    }
}
