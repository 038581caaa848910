//! List views for projects, tools, and employees

use chrono::{DateTime, Utc};
use comfy_table::{Cell, Color};
use serde::Serialize;
use std::cmp::Ordering;

use crate::cli::SortOrder;
use crate::core::{Employee, EmployeeStatus, Project, ProjectStatus, Tool, ToolStatus};
use crate::output::format::{
    NumberFormat, create_styled_table, format_amount, header_cell, right_cell, styled_cell,
    text_or_dash,
};
use crate::utils::display_date;

#[derive(Debug, Clone, Copy)]
pub(crate) struct ListOptions {
    pub(crate) use_color: bool,
    pub(crate) compact: bool,
    pub(crate) number_format: NumberFormat,
}

/// Sort key for `created_at`: the instant when it parses as RFC 3339
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum CreatedKey<'a> {
    Instant(DateTime<Utc>),
    Raw(&'a str),
}

fn created_key(project: &Project) -> Option<CreatedKey<'_>> {
    let raw = project.created_at.as_deref()?;
    Some(match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => CreatedKey::Instant(dt.with_timezone(&Utc)),
        Err(_) => CreatedKey::Raw(raw),
    })
}

/// Order projects by creation time.
///
/// Timestamps compare as instants. Unparseable ones follow all parseable ones
/// in text order, and rows without a timestamp go last.
pub(crate) fn sort_projects(projects: &mut [Project], order: SortOrder) {
    projects.sort_by(|a, b| match (created_key(a), created_key(b)) {
        (Some(CreatedKey::Instant(x)), Some(CreatedKey::Instant(y))) => match order {
            SortOrder::Asc => x.cmp(&y),
            SortOrder::Desc => y.cmp(&x),
        },
        (Some(CreatedKey::Raw(x)), Some(CreatedKey::Raw(y))) => match order {
            SortOrder::Asc => x.cmp(y),
            SortOrder::Desc => y.cmp(x),
        },
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

fn project_status_color(status: &ProjectStatus) -> Option<Color> {
    match status {
        ProjectStatus::InProgress => Some(Color::Blue),
        ProjectStatus::Completed => Some(Color::Green),
        ProjectStatus::OnHold => Some(Color::DarkYellow),
        _ => None,
    }
}

fn tool_status_color(status: &ToolStatus) -> Option<Color> {
    match status {
        ToolStatus::Available => Some(Color::Green),
        ToolStatus::InUse => Some(Color::DarkYellow),
        _ => None,
    }
}

fn employee_status_color(status: &EmployeeStatus) -> Option<Color> {
    match status {
        EmployeeStatus::Active => Some(Color::Green),
        _ => None,
    }
}

fn status_cell(raw: &str, color: Option<Color>, use_color: bool) -> Cell {
    let color = if use_color { color } else { None };
    styled_cell(text_or_dash(Some(raw)), color, false)
}

fn budget_text(budget: Option<f64>, nf: NumberFormat) -> String {
    budget.map_or_else(|| text_or_dash(None).to_string(), |b| format_amount(b, nf))
}

pub(crate) fn print_projects_table(projects: &[Project], options: ListOptions) {
    let c = options.use_color;
    let nf = options.number_format;
    let mut table = create_styled_table();

    if options.compact {
        table.set_header(vec![
            header_cell("Project", c),
            header_cell("Status", c),
            header_cell("Budget", c),
        ]);
    } else {
        table.set_header(vec![
            header_cell("Project", c),
            header_cell("Location", c),
            header_cell("Client", c),
            header_cell("Status", c),
            header_cell("Budget", c),
            header_cell("Team", c),
            header_cell("Created", c),
        ]);
    }

    for p in projects {
        let name = styled_cell(text_or_dash(p.name.as_deref()), None, true);
        let status = status_cell(p.status.as_str(), project_status_color(&p.status), c);
        let budget = right_cell(&budget_text(p.budget, nf), None, false);
        if options.compact {
            table.add_row(vec![name, status, budget]);
        } else {
            let created = p.created_at.as_deref().map(display_date);
            table.add_row(vec![
                name,
                Cell::new(text_or_dash(p.location.as_deref())),
                Cell::new(text_or_dash(p.client.as_deref())),
                status,
                budget,
                Cell::new(text_or_dash(p.assigned_team.as_deref())),
                Cell::new(text_or_dash(created.as_deref())),
            ]);
        }
    }

    println!("\n  Projects\n");
    println!("{table}");
}

pub(crate) fn print_tools_table(tools: &[Tool], options: ListOptions) {
    let c = options.use_color;
    let mut table = create_styled_table();

    if options.compact {
        table.set_header(vec![header_cell("Tool", c), header_cell("Status", c)]);
    } else {
        table.set_header(vec![
            header_cell("Tool", c),
            header_cell("Type", c),
            header_cell("Category", c),
            header_cell("Status", c),
        ]);
    }

    for t in tools {
        let name = styled_cell(text_or_dash(t.name.as_deref()), None, true);
        let status = status_cell(t.status.as_str(), tool_status_color(&t.status), c);
        if options.compact {
            table.add_row(vec![name, status]);
        } else {
            table.add_row(vec![
                name,
                Cell::new(text_or_dash(t.kind.as_deref())),
                Cell::new(text_or_dash(t.category.as_deref())),
                status,
            ]);
        }
    }

    println!("\n  Tools\n");
    println!("{table}");
}

pub(crate) fn print_employees_table(employees: &[Employee], options: ListOptions) {
    let c = options.use_color;
    let mut table = create_styled_table();

    if options.compact {
        table.set_header(vec![header_cell("Employee", c), header_cell("Status", c)]);
    } else {
        table.set_header(vec![
            header_cell("Employee", c),
            header_cell("Role", c),
            header_cell("Status", c),
            header_cell("Email", c),
        ]);
    }

    for e in employees {
        let name = styled_cell(text_or_dash(e.name.as_deref()), None, true);
        let status = status_cell(e.status.as_str(), employee_status_color(&e.status), c);
        if options.compact {
            table.add_row(vec![name, status]);
        } else {
            table.add_row(vec![
                name,
                Cell::new(text_or_dash(e.role.as_deref())),
                status,
                Cell::new(text_or_dash(e.email.as_deref())),
            ]);
        }
    }

    println!("\n  Employees\n");
    println!("{table}");
}

/// Rows as a pretty-printed JSON array, in storage column names
pub(crate) fn output_records_json<T: Serialize>(rows: &[T]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(name: &str, created_at: Option<&str>) -> Project {
        Project {
            name: Some(name.to_string()),
            created_at: created_at.map(str::to_string),
            ..Default::default()
        }
    }

    fn names(projects: &[Project]) -> Vec<&str> {
        projects.iter().filter_map(|p| p.name.as_deref()).collect()
    }

    #[test]
    fn sort_projects_newest_first_by_default() {
        let mut projects = vec![
            project("old", Some("2025-01-01T00:00:00+00:00")),
            project("undated", None),
            project("new", Some("2025-06-01T00:00:00+00:00")),
        ];
        sort_projects(&mut projects, SortOrder::default());
        assert_eq!(names(&projects), ["new", "old", "undated"]);
    }

    #[test]
    fn sort_projects_ascending() {
        let mut projects = vec![
            project("new", Some("2025-06-01T00:00:00+00:00")),
            project("old", Some("2025-01-01T00:00:00+00:00")),
        ];
        sort_projects(&mut projects, SortOrder::Asc);
        assert_eq!(names(&projects), ["old", "new"]);
    }

    #[test]
    fn sort_projects_compares_instants_across_offsets() {
        let mut projects = vec![
            // 05:00 UTC
            project("older", Some("2025-01-01T10:00:00+05:00")),
            project("newer", Some("2025-01-01T06:00:00+00:00")),
        ];
        sort_projects(&mut projects, SortOrder::Desc);
        assert_eq!(names(&projects), ["newer", "older"]);
        sort_projects(&mut projects, SortOrder::Asc);
        assert_eq!(names(&projects), ["older", "newer"]);
    }

    #[test]
    fn sort_projects_puts_unparseable_after_timestamps() {
        let mut projects = vec![
            project("undated", None),
            project("garbled", Some("yesterday")),
            project("dated", Some("2025-01-01T00:00:00Z")),
        ];
        sort_projects(&mut projects, SortOrder::Desc);
        assert_eq!(names(&projects), ["dated", "garbled", "undated"]);
        sort_projects(&mut projects, SortOrder::Asc);
        assert_eq!(names(&projects), ["dated", "garbled", "undated"]);
    }

    #[test]
    fn budget_text_uses_dash_when_missing() {
        let nf = NumberFormat::default();
        assert_eq!(budget_text(None, nf), "-");
        assert_eq!(budget_text(Some(125_000.0), nf), "$125,000");
    }

    #[test]
    fn records_json_uses_storage_names() {
        let tool = Tool {
            kind: Some("power".to_string()),
            status: ToolStatus::Available,
            ..Default::default()
        };
        let json = output_records_json(&[tool]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["type"], "power");
        assert_eq!(value[0]["status"], "available");
    }

    #[test]
    fn status_colors_follow_state() {
        assert_eq!(project_status_color(&ProjectStatus::Completed), Some(Color::Green));
        assert_eq!(project_status_color(&ProjectStatus::Planning), None);
        assert_eq!(tool_status_color(&ToolStatus::InUse), Some(Color::DarkYellow));
        assert_eq!(
            employee_status_color(&EmployeeStatus::Other("leave".to_string())),
            None
        );
    }
}
