//! In-memory catalog implementing both collaborator traits.
//!
//! Holds the same tables the PostgreSQL repositories read and answers every
//! query with the same semantics (inner joins, directory-marker exclusion,
//! union before sort and slice). Used by tests and for offline runs against
//! fixture data.

use std::collections::BTreeMap;

use async_trait::async_trait;

use storestat_core::result::AppResult;
use storestat_core::types::{
    CategoryId, ContextId, CountedRows, CourseFilter, CourseId, CourseModuleId, FileId, ModuleId,
    UserId,
};
use storestat_entity::{
    Category, ContextLevel, ContextRecord, Course, CourseFileRow, CourseModule, CourseUsageRow,
    FileRecord, ModuleType,
};

use crate::source::{CategoryTree, UsageSource};

/// Fixture tables of the learning platform, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    categories: Vec<Category>,
    courses: Vec<Course>,
    modules: Vec<ModuleType>,
    course_modules: Vec<CourseModule>,
    contexts: Vec<ContextRecord>,
    files: Vec<FileRecord>,
    last_id: i64,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    /// Add a category under `parent` (`None` for top level).
    pub fn add_category(
        &mut self,
        id: CategoryId,
        name: &str,
        parent: Option<CategoryId>,
    ) -> &mut Self {
        let parent_path = parent
            .and_then(|p| self.categories.iter().find(|c| c.id == p))
            .map(|c| c.path.clone())
            .unwrap_or_default();

        self.categories.push(Category {
            id,
            name: name.to_string(),
            parent: parent.unwrap_or(CategoryId::new(0)),
            path: format!("{parent_path}/{id}"),
        });
        self
    }

    /// Add a course to `category`.
    pub fn add_course(&mut self, id: CourseId, fullname: &str, category: CategoryId) -> &mut Self {
        self.courses.push(Course {
            id,
            fullname: fullname.to_string(),
            shortname: fullname.to_lowercase().replace(' ', "-"),
            category,
        });
        self
    }

    /// Register a module type such as `resource` or `assign`.
    pub fn add_module_type(&mut self, id: ModuleId, name: &str) -> &mut Self {
        self.modules.push(ModuleType {
            id,
            name: name.to_string(),
        });
        self
    }

    /// Place an activity of type `module` in `course`.
    pub fn add_course_module(
        &mut self,
        id: CourseModuleId,
        course: CourseId,
        module: ModuleId,
    ) -> &mut Self {
        self.course_modules.push(CourseModule { id, course, module });
        self
    }

    /// Insert a raw context row.
    pub fn add_context(&mut self, context: ContextRecord) -> &mut Self {
        self.last_id = self.last_id.max(context.id.get());
        self.contexts.push(context);
        self
    }

    /// Insert a raw file row.
    pub fn add_file(&mut self, file: FileRecord) -> &mut Self {
        self.last_id = self.last_id.max(file.id.get());
        self.files.push(file);
        self
    }

    /// Context of `instance` at `level`, created on first use.
    pub fn context_for(&mut self, level: ContextLevel, instance: i64) -> ContextId {
        if let Some(ctx) = self
            .contexts
            .iter()
            .find(|c| c.contextlevel == level && c.instanceid == instance)
        {
            return ctx.id;
        }

        let id = ContextId::new(self.next_id());
        self.contexts.push(ContextRecord::new(id, level, instance));
        id
    }

    /// Store a file in the context of `instance` at `level`.
    pub fn attach(
        &mut self,
        level: ContextLevel,
        instance: i64,
        component: &str,
        filearea: &str,
        filename: &str,
        filesize: i64,
    ) -> FileId {
        let contextid = self.context_for(level, instance);
        let id = FileId::new(self.next_id());
        self.files.push(FileRecord {
            id,
            contextid,
            component: component.to_string(),
            filearea: filearea.to_string(),
            itemid: 0,
            filepath: "/".to_string(),
            filename: filename.to_string(),
            filesize,
        });
        id
    }

    /// Store a file attached directly to a course.
    pub fn attach_course_file(&mut self, course: CourseId, filename: &str, filesize: i64) -> FileId {
        self.attach(
            ContextLevel::Course,
            course.get(),
            "course",
            "overviewfiles",
            filename,
            filesize,
        )
    }

    /// Store a file attached to an activity.
    pub fn attach_module_file(
        &mut self,
        course_module: CourseModuleId,
        filename: &str,
        filesize: i64,
    ) -> FileId {
        let component = self
            .course_modules
            .iter()
            .find(|cm| cm.id == course_module)
            .and_then(|cm| self.module_type(cm.module))
            .map(|m| format!("mod_{}", m.name))
            .unwrap_or_else(|| "mod_unknown".to_string());

        self.attach(
            ContextLevel::Module,
            course_module.get(),
            &component,
            "content",
            filename,
            filesize,
        )
    }

    /// Store a personal file in a user's private area.
    pub fn attach_user_file(&mut self, user: UserId, filename: &str, filesize: i64) -> FileId {
        self.attach(
            ContextLevel::User,
            user.get(),
            "user",
            "private",
            filename,
            filesize,
        )
    }

    fn module_type(&self, id: ModuleId) -> Option<&ModuleType> {
        self.modules.iter().find(|m| m.id == id)
    }

    fn context(&self, id: ContextId) -> Option<&ContextRecord> {
        self.contexts.iter().find(|c| c.id == id)
    }

    fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    fn course_module(&self, id: CourseModuleId) -> Option<&CourseModule> {
        self.course_modules.iter().find(|cm| cm.id == id)
    }

    /// Files in course contexts of existing, filtered courses.
    fn course_level_files<'a>(
        &'a self,
        filter: &'a CourseFilter,
    ) -> impl Iterator<Item = (&'a FileRecord, &'a Course)> + 'a {
        self.files.iter().filter_map(move |f| {
            let ctx = self.context(f.contextid)?;
            if ctx.contextlevel != ContextLevel::Course {
                return None;
            }
            let course = self.course(CourseId::new(ctx.instanceid))?;
            filter.includes(course.id).then_some((f, course))
        })
    }

    /// Files in module contexts of existing activities of filtered courses.
    fn module_level_files<'a>(
        &'a self,
        filter: &'a CourseFilter,
    ) -> impl Iterator<Item = (&'a FileRecord, &'a CourseModule)> + 'a {
        self.files.iter().filter_map(move |f| {
            let ctx = self.context(f.contextid)?;
            if ctx.contextlevel != ContextLevel::Module {
                return None;
            }
            let cm = self.course_module(CourseModuleId::new(ctx.instanceid))?;
            filter.includes(cm.course).then_some((f, cm))
        })
    }

    fn listing_row(
        &self,
        file: &FileRecord,
        course_id: CourseId,
        course_module: Option<&CourseModule>,
    ) -> CourseFileRow {
        CourseFileRow {
            file_id: file.id,
            course_id,
            context_id: file.contextid,
            component: file.component.clone(),
            filearea: file.filearea.clone(),
            itemid: file.itemid,
            filepath: file.filepath.clone(),
            filename: file.filename.clone(),
            filesize: file.filesize,
            course_module_id: course_module.map(|cm| cm.id),
            module_name: course_module
                .and_then(|cm| self.module_type(cm.module))
                .map(|m| m.name.clone()),
        }
    }
}

#[async_trait]
impl UsageSource for MemoryCatalog {
    async fn course_files_bytes(&self, filter: &CourseFilter) -> AppResult<i64> {
        Ok(self.course_level_files(filter).map(|(f, _)| f.filesize).sum())
    }

    async fn module_files_bytes(&self, filter: &CourseFilter) -> AppResult<i64> {
        Ok(self.module_level_files(filter).map(|(f, _)| f.filesize).sum())
    }

    async fn file_listing(
        &self,
        filter: &CourseFilter,
        offset: u64,
        limit: u64,
    ) -> AppResult<CountedRows<CourseFileRow>> {
        let course_rows = self
            .course_level_files(filter)
            .filter(|(f, _)| !f.is_directory())
            .map(|(f, course)| self.listing_row(f, course.id, None));
        let module_rows = self
            .module_level_files(filter)
            .filter(|(f, _)| !f.is_directory())
            .map(|(f, cm)| self.listing_row(f, cm.course, Some(cm)));

        let mut all: Vec<CourseFileRow> = course_rows.chain(module_rows).collect();
        all.sort_by(|a, b| {
            b.filesize
                .cmp(&a.filesize)
                .then_with(|| a.file_id.cmp(&b.file_id))
        });

        Ok(CountedRows::slice(all, offset, limit))
    }

    async fn course_breakdown(
        &self,
        filter: &CourseFilter,
        offset: u64,
        limit: u64,
    ) -> AppResult<CountedRows<CourseUsageRow>> {
        let mut sums: BTreeMap<CourseId, i64> = BTreeMap::new();
        for (file, course) in self.course_level_files(filter) {
            *sums.entry(course.id).or_default() += file.filesize;
        }
        for (file, cm) in self.module_level_files(filter) {
            *sums.entry(cm.course).or_default() += file.filesize;
        }

        let mut rows: Vec<CourseUsageRow> = sums
            .into_iter()
            .filter_map(|(course_id, size_bytes)| {
                self.course(course_id).map(|course| CourseUsageRow {
                    course_id,
                    course_name: course.fullname.clone(),
                    size_bytes,
                })
            })
            .collect();
        rows.sort_by(|a, b| {
            b.size_bytes
                .cmp(&a.size_bytes)
                .then_with(|| a.course_id.cmp(&b.course_id))
        });

        Ok(CountedRows::slice(rows, offset, limit))
    }

    async fn total_bytes(&self) -> AppResult<i64> {
        Ok(self.files.iter().map(|f| f.filesize).sum())
    }

    async fn component_bytes(&self, component: &str) -> AppResult<i64> {
        Ok(self
            .files
            .iter()
            .filter(|f| f.component == component)
            .map(|f| f.filesize)
            .sum())
    }
}

#[async_trait]
impl CategoryTree for MemoryCatalog {
    async fn find_category(&self, id: CategoryId) -> AppResult<Option<Category>> {
        Ok(self.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_course(&self, id: CourseId) -> AppResult<Option<Course>> {
        Ok(self.course(id).cloned())
    }

    async fn category_courses(&self, id: CategoryId) -> AppResult<Vec<Course>> {
        Ok(self
            .courses
            .iter()
            .filter(|course| {
                self.categories
                    .iter()
                    .find(|c| c.id == course.category)
                    .is_some_and(|c| c.is_within(id))
            })
            .cloned()
            .collect())
    }

    async fn count_category_courses(&self, id: CategoryId) -> AppResult<u64> {
        Ok(self.category_courses(id).await?.len() as u64)
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        Ok(self.categories.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use storestat_entity::file::DIRECTORY_MARKER;

    const MB: i64 = 1_048_576;

    /// Science (1) > Physics (2); one course in each, plus a user file.
    fn fixture() -> MemoryCatalog {
        let mut catalog = MemoryCatalog::new();
        catalog
            .add_category(CategoryId::new(1), "Science", None)
            .add_category(CategoryId::new(2), "Physics", Some(CategoryId::new(1)))
            .add_course(CourseId::new(10), "Biology 101", CategoryId::new(1))
            .add_course(CourseId::new(20), "Mechanics", CategoryId::new(2))
            .add_module_type(ModuleId::new(1), "resource")
            .add_course_module(CourseModuleId::new(100), CourseId::new(10), ModuleId::new(1))
            .add_course_module(CourseModuleId::new(200), CourseId::new(20), ModuleId::new(1));

        catalog.attach_course_file(CourseId::new(10), "syllabus.pdf", 2 * MB);
        catalog.attach_course_file(CourseId::new(10), DIRECTORY_MARKER, 0);
        catalog.attach_module_file(CourseModuleId::new(100), "lecture.mp4", 50 * MB);
        catalog.attach_module_file(CourseModuleId::new(200), "notes.pdf", 3 * MB);
        catalog.attach_user_file(UserId::new(5), "photo.jpg", MB);
        catalog
    }

    #[test]
    fn test_category_paths_follow_parents() {
        let catalog = fixture();
        assert_eq!(catalog.categories[0].path, "/1");
        assert_eq!(catalog.categories[1].path, "/1/2");
    }

    #[test]
    fn test_context_reused_per_instance() {
        let mut catalog = fixture();
        let first = catalog.context_for(ContextLevel::Course, 10);
        let second = catalog.context_for(ContextLevel::Course, 10);
        assert_eq!(first, second);
    }

    #[test]
    fn test_module_file_component_uses_module_name() {
        let catalog = fixture();
        assert!(catalog.files.iter().any(|f| f.component == "mod_resource"));
    }

    #[tokio::test]
    async fn test_level_sums() {
        let catalog = fixture();
        let biology = CourseFilter::course(CourseId::new(10));

        assert_eq!(catalog.course_files_bytes(&biology).await.unwrap(), 2 * MB);
        assert_eq!(catalog.module_files_bytes(&biology).await.unwrap(), 50 * MB);
        assert_eq!(
            catalog.module_files_bytes(&CourseFilter::All).await.unwrap(),
            53 * MB
        );
        assert_eq!(catalog.total_bytes().await.unwrap(), 56 * MB);
        assert_eq!(catalog.component_bytes("user").await.unwrap(), MB);
    }

    #[tokio::test]
    async fn test_listing_union_sorted_without_markers() {
        let catalog = fixture();
        let listing = catalog
            .file_listing(&CourseFilter::course(CourseId::new(10)), 0, 10)
            .await
            .unwrap();

        assert_eq!(listing.total, 2);
        let names: Vec<&str> = listing.rows.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, vec!["lecture.mp4", "syllabus.pdf"]);
        assert_eq!(listing.rows[0].module_name.as_deref(), Some("resource"));
        assert_eq!(listing.rows[1].course_module_id, None);
    }

    #[tokio::test]
    async fn test_breakdown_groups_by_course() {
        let catalog = fixture();
        let breakdown = catalog
            .course_breakdown(&CourseFilter::All, 0, 10)
            .await
            .unwrap();

        assert_eq!(breakdown.total, 2);
        assert_eq!(breakdown.rows[0].course_name, "Biology 101");
        assert_eq!(breakdown.rows[0].size_bytes, 52 * MB);
        assert_eq!(breakdown.rows[1].size_bytes, 3 * MB);
    }

    #[tokio::test]
    async fn test_category_courses_are_recursive() {
        let catalog = fixture();

        let science = catalog.category_courses(CategoryId::new(1)).await.unwrap();
        assert_eq!(science.len(), 2);

        let physics = catalog.category_courses(CategoryId::new(2)).await.unwrap();
        assert_eq!(physics.len(), 1);
        assert_eq!(physics[0].id, CourseId::new(20));

        assert_eq!(
            catalog.count_category_courses(CategoryId::new(99)).await.unwrap(),
            0
        );
    }
}
