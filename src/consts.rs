/// Standard date format used throughout the codebase: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) const PROJECTS_TABLE: &str = "projects";
pub(crate) const TOOLS_TABLE: &str = "tools";
pub(crate) const EMPLOYEES_TABLE: &str = "employees";

/// Placeholder for missing text fields in tables and CSV
pub(crate) const EMPTY_CELL: &str = "-";
