//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use storestat_core::config::ReportConfig;
use storestat_core::types::{CategoryId, CourseId, CourseModuleId, ModuleId, UserId};
use storestat_database::MemoryCatalog;
use storestat_entity::ContextLevel;
use storestat_entity::file::DIRECTORY_MARKER;
use storestat_service::{LinkBuilder, RequestContext, UsageAggregator, UsageReportService};

/// One megabyte.
pub const MB: i64 = 1_048_576;

pub const SCIENCE: CategoryId = CategoryId::new(1);
pub const PHYSICS: CategoryId = CategoryId::new(2);
pub const ARTS: CategoryId = CategoryId::new(3);
pub const EMPTY: CategoryId = CategoryId::new(4);
pub const ARCHIVE: CategoryId = CategoryId::new(5);

pub const BIOLOGY: CourseId = CourseId::new(10);
pub const MECHANICS: CourseId = CourseId::new(20);
pub const OPTICS: CourseId = CourseId::new(30);
pub const PAINTING: CourseId = CourseId::new(40);
pub const DELETED_COURSE: CourseId = CourseId::new(999);

pub const WWWROOT: &str = "https://lms.example.edu";

/// Test application wired over an in-memory catalog.
///
/// Fixture, sizes in MB:
///
/// ```text
/// Science (1)                         Biology (10)   49 = 3 + 1 + 40 + 3 + 2
/// Science (1) / Physics (2)           Mechanics (20) 17 = 5 + 12
///                                     Optics (30)     0
/// Arts (3)                            Painting (40)  14 = 7 + 7
/// Arts (3) / Archive (5)              -
/// Empty (4)                           -
/// personal user files                                 6
/// files of deleted courses/modules                  101
/// ```
pub struct TestApp {
    /// Backing fixture data.
    pub catalog: Arc<MemoryCatalog>,
    /// Aggregator under test.
    pub aggregator: Arc<UsageAggregator>,
    /// Report service under test.
    pub reports: UsageReportService,
}

impl TestApp {
    /// Create a new test application over the standard fixture.
    pub fn new() -> Self {
        Self::with_catalog(fixture())
    }

    /// Create a test application over a custom catalog.
    pub fn with_catalog(catalog: MemoryCatalog) -> Self {
        let catalog = Arc::new(catalog);
        let aggregator = Arc::new(UsageAggregator::new(
            catalog.clone(),
            catalog.clone(),
            "user",
        ));
        let reports = UsageReportService::new(
            aggregator.clone(),
            catalog.clone(),
            LinkBuilder::new(WWWROOT),
            ReportConfig::default(),
        );

        Self {
            catalog,
            aggregator,
            reports,
        }
    }
}

/// A site administrator.
pub fn admin() -> RequestContext {
    RequestContext::site_admin(UserId::new(2), "admin")
}

/// A manager holding the report capability in the given categories.
pub fn manager(categories: &[CategoryId]) -> RequestContext {
    RequestContext::restricted(UserId::new(7), "manager", categories.to_vec())
}

/// Build the standard fixture.
pub fn fixture() -> MemoryCatalog {
    let mut catalog = MemoryCatalog::new();
    catalog
        .add_category(SCIENCE, "Science", None)
        .add_category(PHYSICS, "Physics", Some(SCIENCE))
        .add_category(ARTS, "Arts", None)
        .add_category(EMPTY, "Empty", None)
        .add_category(ARCHIVE, "Archive", Some(ARTS))
        .add_course(BIOLOGY, "Biology", SCIENCE)
        .add_course(MECHANICS, "Mechanics", PHYSICS)
        .add_course(OPTICS, "Optics", PHYSICS)
        .add_course(PAINTING, "Painting", ARTS)
        .add_module_type(ModuleId::new(1), "resource")
        .add_module_type(ModuleId::new(2), "assign")
        .add_module_type(ModuleId::new(3), "folder")
        .add_course_module(CourseModuleId::new(100), BIOLOGY, ModuleId::new(1))
        .add_course_module(CourseModuleId::new(101), BIOLOGY, ModuleId::new(2))
        .add_course_module(CourseModuleId::new(200), MECHANICS, ModuleId::new(3))
        .add_course_module(CourseModuleId::new(400), PAINTING, ModuleId::new(1));

    catalog.attach_course_file(BIOLOGY, "syllabus.pdf", 3 * MB);
    catalog.attach_course_file(BIOLOGY, DIRECTORY_MARKER, 0);
    catalog.attach_course_file(BIOLOGY, "cover.png", MB);
    catalog.attach_module_file(CourseModuleId::new(100), "lecture.mp4", 40 * MB);
    catalog.attach_module_file(CourseModuleId::new(100), "slides.pdf", 3 * MB);
    catalog.attach_module_file(CourseModuleId::new(101), "essay.docx", 2 * MB);

    catalog.attach_course_file(MECHANICS, "handbook.pdf", 5 * MB);
    catalog.attach_module_file(CourseModuleId::new(200), "lab.zip", 12 * MB);
    catalog.attach_module_file(CourseModuleId::new(200), DIRECTORY_MARKER, 0);

    catalog.attach_course_file(PAINTING, "banner.jpg", 7 * MB);
    catalog.attach_module_file(CourseModuleId::new(400), "gallery.zip", 7 * MB);

    catalog.attach_user_file(UserId::new(5), "photo.jpg", 6 * MB);
    catalog.attach_user_file(UserId::new(6), DIRECTORY_MARKER, 0);

    catalog.attach(
        ContextLevel::Module,
        9999,
        "mod_resource",
        "content",
        "orphan.bin",
        100 * MB,
    );
    catalog.attach_course_file(DELETED_COURSE, "stale.pdf", MB);

    catalog
}
