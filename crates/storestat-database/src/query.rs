//! SQL text for the usage and category queries.
//!
//! Table names carry the platform's configurable prefix, so statements are
//! assembled at runtime. Only the prefix (validated at config load) and
//! fixed fragments are spliced in; every value is a bound parameter.

use storestat_core::types::sorting::{SortField, order_by};

/// Resolves platform table names against a prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tables {
    prefix: String,
}

impl Tables {
    /// Create a resolver for the given prefix (e.g. `mdl_`).
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Prefixed name of `table`.
    pub fn name(&self, table: &str) -> String {
        format!("{}{}", self.prefix, table)
    }
}

/// Statements behind [`UsageSource`](crate::source::UsageSource).
///
/// Parameter layout shared by the course and module branches: the context
/// level of the branch, then (when `restricted`) the course id array. The
/// unions bind the course level as `$1`, the module level as `$2`, and the
/// course id array as `$3`. Paged statements append `LIMIT` and `OFFSET`
/// as the next two parameters.
#[derive(Debug, Clone)]
pub struct UsageQueries {
    tables: Tables,
}

impl UsageQueries {
    /// Create the statement set for a table prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            tables: Tables::new(prefix),
        }
    }

    /// Sum of course-level file sizes. `$1` level, `$2` course ids.
    pub fn course_files_sum(&self, restricted: bool) -> String {
        let mut sql = format!(
            "SELECT COALESCE(SUM(f.filesize), 0)::BIGINT \
             FROM {files} f \
             JOIN {context} ctx ON ctx.id = f.contextid \
             JOIN {course} c ON c.id = ctx.instanceid \
             WHERE ctx.contextlevel = $1",
            files = self.tables.name("files"),
            context = self.tables.name("context"),
            course = self.tables.name("course"),
        );
        if restricted {
            sql.push_str(" AND c.id = ANY($2)");
        }
        sql
    }

    /// Sum of module-level file sizes. `$1` level, `$2` course ids.
    pub fn module_files_sum(&self, restricted: bool) -> String {
        let mut sql = format!(
            "SELECT COALESCE(SUM(f.filesize), 0)::BIGINT \
             FROM {files} f \
             JOIN {context} ctx ON ctx.id = f.contextid \
             JOIN {course_modules} cm ON cm.id = ctx.instanceid \
             WHERE ctx.contextlevel = $1",
            files = self.tables.name("files"),
            context = self.tables.name("context"),
            course_modules = self.tables.name("course_modules"),
        );
        if restricted {
            sql.push_str(" AND cm.course = ANY($2)");
        }
        sql
    }

    /// Union of course-level and module-level file rows.
    fn file_union(&self, restricted: bool) -> String {
        let course_filter = if restricted { " AND c.id = ANY($3)" } else { "" };
        let module_filter = if restricted {
            " AND cm.course = ANY($3)"
        } else {
            ""
        };

        format!(
            "SELECT f.id AS file_id, c.id AS course_id, f.contextid AS context_id, \
                    f.component, f.filearea, f.itemid, f.filepath, f.filename, f.filesize, \
                    NULL::BIGINT AS course_module_id, NULL::TEXT AS module_name \
             FROM {files} f \
             JOIN {context} ctx ON ctx.id = f.contextid \
             JOIN {course} c ON c.id = ctx.instanceid \
             WHERE ctx.contextlevel = $1 AND f.filename <> '.'{course_filter} \
             UNION ALL \
             SELECT f.id AS file_id, cm.course AS course_id, f.contextid AS context_id, \
                    f.component, f.filearea, f.itemid, f.filepath, f.filename, f.filesize, \
                    cm.id AS course_module_id, m.name::TEXT AS module_name \
             FROM {files} f \
             JOIN {context} ctx ON ctx.id = f.contextid \
             JOIN {course_modules} cm ON cm.id = ctx.instanceid \
             LEFT JOIN {modules} m ON m.id = cm.module \
             WHERE ctx.contextlevel = $2 AND f.filename <> '.'{module_filter}",
            files = self.tables.name("files"),
            context = self.tables.name("context"),
            course = self.tables.name("course"),
            course_modules = self.tables.name("course_modules"),
            modules = self.tables.name("modules"),
        )
    }

    /// Row count of the whole file union.
    pub fn file_listing_count(&self, restricted: bool) -> String {
        format!(
            "SELECT COUNT(*) FROM ({}) un",
            self.file_union(restricted)
        )
    }

    /// One page of the file union, largest first.
    pub fn file_listing_page(&self, restricted: bool) -> String {
        let (limit, offset) = paging_params(restricted, 3);
        format!(
            "SELECT un.* FROM ({union}) un ORDER BY {order} LIMIT ${limit} OFFSET ${offset}",
            union = self.file_union(restricted),
            order = order_by(&[SortField::desc("un.filesize"), SortField::asc("un.file_id")]),
        )
    }

    /// Union of per-course subtotals from both branches.
    ///
    /// `UNION ALL` keeps a course's course-level and module-level subtotals
    /// apart even when they happen to be equal.
    fn subtotal_union(&self, restricted: bool) -> String {
        let course_filter = if restricted { " AND c.id = ANY($3)" } else { "" };
        let module_filter = if restricted {
            " AND cm.course = ANY($3)"
        } else {
            ""
        };

        format!(
            "SELECT c.id AS course_id, SUM(f.filesize) AS size_bytes \
             FROM {files} f \
             JOIN {context} ctx ON ctx.id = f.contextid \
             JOIN {course} c ON c.id = ctx.instanceid \
             WHERE ctx.contextlevel = $1{course_filter} \
             GROUP BY c.id \
             UNION ALL \
             SELECT cm.course AS course_id, SUM(f.filesize) AS size_bytes \
             FROM {files} f \
             JOIN {context} ctx ON ctx.id = f.contextid \
             JOIN {course_modules} cm ON cm.id = ctx.instanceid \
             WHERE ctx.contextlevel = $2{module_filter} \
             GROUP BY cm.course",
            files = self.tables.name("files"),
            context = self.tables.name("context"),
            course = self.tables.name("course"),
            course_modules = self.tables.name("course_modules"),
        )
    }

    /// Number of courses contributing to the breakdown.
    pub fn course_breakdown_count(&self, restricted: bool) -> String {
        format!(
            "SELECT COUNT(DISTINCT un.course_id) FROM ({union}) un \
             JOIN {course} c ON c.id = un.course_id",
            union = self.subtotal_union(restricted),
            course = self.tables.name("course"),
        )
    }

    /// One page of per-course totals, largest first.
    pub fn course_breakdown_page(&self, restricted: bool) -> String {
        let (limit, offset) = paging_params(restricted, 3);
        format!(
            "SELECT c.id AS course_id, c.fullname AS course_name, \
                    SUM(un.size_bytes)::BIGINT AS size_bytes \
             FROM ({union}) un \
             JOIN {course} c ON c.id = un.course_id \
             GROUP BY c.id, c.fullname \
             ORDER BY {order} LIMIT ${limit} OFFSET ${offset}",
            union = self.subtotal_union(restricted),
            course = self.tables.name("course"),
            order = order_by(&[SortField::desc("size_bytes"), SortField::asc("c.id")]),
        )
    }

    /// Sum of every stored file.
    pub fn total_bytes(&self) -> String {
        format!(
            "SELECT COALESCE(SUM(filesize), 0)::BIGINT FROM {files}",
            files = self.tables.name("files"),
        )
    }

    /// Sum of files owned by the component bound as `$1`.
    pub fn component_bytes(&self) -> String {
        format!(
            "SELECT COALESCE(SUM(filesize), 0)::BIGINT FROM {files} WHERE component = $1",
            files = self.tables.name("files"),
        )
    }
}

/// Statements behind [`CategoryTree`](crate::source::CategoryTree).
#[derive(Debug, Clone)]
pub struct CategoryQueries {
    tables: Tables,
}

impl CategoryQueries {
    /// Create the statement set for a table prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            tables: Tables::new(prefix),
        }
    }

    /// Category by id (`$1`).
    pub fn find_category(&self) -> String {
        format!(
            "SELECT id, name, parent, path FROM {categories} WHERE id = $1",
            categories = self.tables.name("course_categories"),
        )
    }

    /// Every category in display order.
    pub fn list_categories(&self) -> String {
        format!(
            "SELECT id, name, parent, path FROM {categories} ORDER BY sortorder ASC, id ASC",
            categories = self.tables.name("course_categories"),
        )
    }

    /// Course by id (`$1`).
    pub fn find_course(&self) -> String {
        format!(
            "SELECT id, fullname, shortname, category FROM {course} WHERE id = $1",
            course = self.tables.name("course"),
        )
    }

    /// `FROM`/`WHERE` shared by the recursive course queries.
    ///
    /// `$1` is the category id, `$2` the descendant path pattern.
    fn category_courses_from(&self) -> String {
        format!(
            "FROM {course} c \
             JOIN {categories} cc ON cc.id = c.category \
             WHERE cc.id = $1 OR cc.path LIKE $2",
            course = self.tables.name("course"),
            categories = self.tables.name("course_categories"),
        )
    }

    /// Courses of a category and its descendants.
    pub fn category_courses(&self) -> String {
        format!(
            "SELECT c.id, c.fullname, c.shortname, c.category {from} \
             ORDER BY c.sortorder ASC, c.id ASC",
            from = self.category_courses_from(),
        )
    }

    /// Number of courses of a category and its descendants.
    pub fn count_category_courses(&self) -> String {
        format!("SELECT COUNT(*) {}", self.category_courses_from())
    }
}

/// Placeholder numbers for `LIMIT` and `OFFSET` following the filter params.
fn paging_params(restricted: bool, filter_param: usize) -> (usize, usize) {
    let limit = if restricted {
        filter_param + 1
    } else {
        filter_param
    };
    (limit, limit + 1)
}
