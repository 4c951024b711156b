//! Usage report views: system overview, category report, course report.

pub mod links;
pub mod service;
pub mod view;

pub use links::LinkBuilder;
pub use service::UsageReportService;
pub use view::{
    CategoryOption, CategoryReport, CategorySummary, ChartSlice, CourseReport, CourseUsageLine,
    FileLine, SystemOverview, UsageChart, UsageFigure,
};
