//! Integration tests for the usage report views.

mod helpers;

use helpers::*;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::json;
use storestat_core::config::ReportConfig;
use storestat_core::error::ErrorKind;
use storestat_core::result::AppResult;
use storestat_core::types::{CategoryId, CourseId, PageRequest, UsageScope};
use storestat_database::{CategoryTree, MemoryCatalog};
use storestat_entity::{Category, Course, FileOrigin};
use storestat_service::{LinkBuilder, UsageAggregator, UsageReportService};

#[tokio::test]
async fn test_system_overview() {
    let app = TestApp::new();

    let overview = app.reports.system_overview(&admin()).await.unwrap();

    assert_eq!(overview.total.bytes, 187 * MB);
    assert_eq!(overview.total.display, "0.18 GB");
    assert_eq!(overview.all_courses.display, "80 MB");
    assert_eq!(overview.all_users.display, "6 MB");
    let series = json!([
        ["Type", "Storage"],
        ["All Course", {"v": 80, "f": "80 MB"}],
        ["All Users", {"v": 6, "f": "6 MB"}]
    ]);
    assert_eq!(overview.chart.data, series);

    let serialized = serde_json::to_value(&overview).unwrap();
    assert_eq!(serialized["chart"]["data"], series);
    assert_eq!(serialized["chart"]["title"], "Storage Usage");
}

#[tokio::test]
async fn test_system_overview_is_admin_only() {
    let app = TestApp::new();

    let err = app
        .reports
        .system_overview(&manager(&[SCIENCE]))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
}

#[tokio::test]
async fn test_system_category_report() {
    let app = TestApp::new();

    let report = app
        .reports
        .category_report(&admin(), None, PageRequest::default())
        .await
        .unwrap();

    assert_eq!(report.heading, "Disk Usage : System");
    assert!(report.category.is_none());
    assert_eq!(report.course_count, None);
    assert_eq!(report.total.display, "80 MB");
    assert_eq!(report.courses.total_items, 3);

    let first = &report.courses.items[0];
    assert_eq!(first.course_name, "Biology");
    assert_eq!(first.size.display, "49 MB");
    assert_eq!(
        first.drilldown,
        UsageScope::Course {
            category_id: None,
            course_id: BIOLOGY
        }
    );
}

#[tokio::test]
async fn test_category_report_pages() {
    let app = TestApp::new();
    let page = app.reports.page_request(Some(2), Some(2));

    let report = app
        .reports
        .category_report(&admin(), None, page)
        .await
        .unwrap();

    assert_eq!(report.courses.total_items, 3);
    assert_eq!(report.courses.total_pages, 2);
    assert!(!report.courses.has_next);
    assert!(report.courses.has_previous);
    assert_eq!(report.courses.items.len(), 1);
    assert_eq!(report.courses.items[0].course_id, PAINTING);
}

#[tokio::test]
async fn test_category_report_for_category() {
    let app = TestApp::new();

    let report = app
        .reports
        .category_report(&admin(), Some(SCIENCE), PageRequest::default())
        .await
        .unwrap();

    assert_eq!(report.heading, "Disk Usage : Science");
    assert_eq!(report.course_count, Some(3));
    assert_eq!(report.total.display, "66 MB");
    assert_eq!(report.courses.total_items, 2);
    assert_eq!(
        report.courses.items[1].drilldown,
        UsageScope::Course {
            category_id: Some(SCIENCE),
            course_id: MECHANICS
        }
    );
}

#[tokio::test]
async fn test_empty_category_report() {
    let app = TestApp::new();

    let report = app
        .reports
        .category_report(&admin(), Some(EMPTY), PageRequest::default())
        .await
        .unwrap();

    assert_eq!(report.heading, "Disk Usage : Empty");
    assert_eq!(report.course_count, Some(0));
    assert_eq!(report.total.display, "0 MB");
    assert!(report.courses.items.is_empty());
    assert_eq!(report.courses.total_pages, 1);
}

#[tokio::test]
async fn test_manager_lands_on_last_granted_category() {
    let app = TestApp::new();

    let report = app
        .reports
        .category_report(&manager(&[ARTS, PHYSICS]), None, PageRequest::default())
        .await
        .unwrap();

    assert_eq!(report.heading, "Disk Usage : Physics");
    assert_eq!(report.total.display, "17 MB");
}

#[tokio::test]
async fn test_manager_without_categories_cannot_view() {
    let app = TestApp::new();

    let err = app
        .reports
        .category_report(&manager(&[]), None, PageRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
}

#[tokio::test]
async fn test_category_report_errors() {
    let app = TestApp::new();

    let missing = app
        .reports
        .category_report(&admin(), Some(CategoryId::new(777)), PageRequest::default())
        .await
        .unwrap_err();
    assert_eq!(missing.kind, ErrorKind::NotFound);

    let outside = app
        .reports
        .category_report(&manager(&[PHYSICS]), Some(SCIENCE), PageRequest::default())
        .await
        .unwrap_err();
    assert_eq!(outside.kind, ErrorKind::Authorization);
}

#[tokio::test]
async fn test_course_report() {
    let app = TestApp::new();

    let report = app
        .reports
        .course_report(&admin(), Some(SCIENCE), BIOLOGY, PageRequest::default())
        .await
        .unwrap();

    assert_eq!(report.heading, "Disk Usage : Science");
    assert_eq!(report.course_name, "Biology");
    assert_eq!(report.course_url, format!("{WWWROOT}/course/view.php?id=10"));
    assert_eq!(report.total.display, "49 MB");
    assert_eq!(report.files.total_items, 5);

    let lecture = &report.files.items[0];
    assert_eq!(lecture.filename, "lecture.mp4");
    assert_eq!(lecture.origin, FileOrigin::Module);
    assert!(lecture.file_url.starts_with(&format!("{WWWROOT}/pluginfile.php/")));
    assert!(lecture.file_url.ends_with("/mod_resource/content/0/lecture.mp4"));
    assert_eq!(
        lecture.activity_url.as_deref(),
        Some("https://lms.example.edu/mod/resource/view.php?id=100")
    );

    let syllabus = &report.files.items[1];
    assert_eq!(syllabus.origin, FileOrigin::Course);
    assert_eq!(syllabus.component, "course");
    assert_eq!(syllabus.size.display, "3 MB");
    assert!(syllabus.activity_url.is_none());
}

#[tokio::test]
async fn test_course_report_without_category() {
    let app = TestApp::new();

    let report = app
        .reports
        .course_report(&admin(), None, PAINTING, PageRequest::new(1, 1))
        .await
        .unwrap();

    assert_eq!(report.heading, "Disk Usage : System");
    assert_eq!(report.category_id, None);
    assert_eq!(report.files.total_items, 2);
    assert_eq!(report.files.items.len(), 1);
    assert!(report.files.has_next);
}

#[tokio::test]
async fn test_course_report_errors() {
    let app = TestApp::new();

    let missing = app
        .reports
        .course_report(&admin(), None, CourseId::new(12345), PageRequest::default())
        .await
        .unwrap_err();
    assert_eq!(missing.kind, ErrorKind::NotFound);

    let outside = app
        .reports
        .course_report(&manager(&[ARTS]), None, BIOLOGY, PageRequest::default())
        .await
        .unwrap_err();
    assert_eq!(outside.kind, ErrorKind::Authorization);
}

#[tokio::test]
async fn test_category_picker() {
    let app = TestApp::new();

    let all = app.reports.list_categories(&admin()).await.unwrap();
    assert_eq!(all.len(), 5);
    let physics = all.iter().find(|c| c.id == PHYSICS).unwrap();
    assert_eq!(physics.name, "Science / Physics");
    assert_eq!(physics.depth, 1);

    let arts_only = app
        .reports
        .list_categories(&manager(&[ARTS]))
        .await
        .unwrap();
    let names: Vec<&str> = arts_only.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Arts", "Arts / Archive"]);
}

#[test]
fn test_page_request_bounds() {
    let app = TestApp::new();

    let default = app.reports.page_request(None, None);
    assert_eq!(default, PageRequest::new(1, 10));

    let clamped = app.reports.page_request(Some(0), Some(5000));
    assert_eq!(clamped.page, 1);
    assert_eq!(clamped.page_size, 100);
}

/// Category tree that counts course lookups.
#[derive(Debug)]
struct CountingTree {
    inner: Arc<MemoryCatalog>,
    course_lookups: AtomicUsize,
}

#[async_trait]
impl CategoryTree for CountingTree {
    async fn find_category(&self, id: CategoryId) -> AppResult<Option<Category>> {
        self.inner.find_category(id).await
    }

    async fn find_course(&self, id: CourseId) -> AppResult<Option<Course>> {
        self.course_lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.find_course(id).await
    }

    async fn category_courses(&self, id: CategoryId) -> AppResult<Vec<Course>> {
        self.inner.category_courses(id).await
    }

    async fn count_category_courses(&self, id: CategoryId) -> AppResult<u64> {
        self.inner.count_category_courses(id).await
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.inner.list_categories().await
    }
}

#[tokio::test]
async fn test_course_report_loads_course_once() {
    let catalog = Arc::new(fixture());
    let tree = Arc::new(CountingTree {
        inner: catalog.clone(),
        course_lookups: AtomicUsize::new(0),
    });
    let aggregator = Arc::new(UsageAggregator::new(catalog, tree.clone(), "user"));
    let reports = UsageReportService::new(
        aggregator,
        tree.clone(),
        LinkBuilder::new(WWWROOT),
        ReportConfig::default(),
    );

    let report = reports
        .course_report(&manager(&[SCIENCE]), Some(SCIENCE), BIOLOGY, PageRequest::default())
        .await
        .unwrap();

    assert_eq!(report.total.display, "49 MB");
    assert_eq!(report.files.total_items, 5);
    assert_eq!(tree.course_lookups.load(Ordering::SeqCst), 1);
}
