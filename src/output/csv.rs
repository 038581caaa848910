use std::fmt::Write;

use crate::core::{Employee, Project, Tool};
use crate::utils::display_date;

pub(super) fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn opt(value: Option<&str>) -> String {
    csv_escape(value.unwrap_or(""))
}

fn write_row(out: &mut String, fields: &[String]) {
    let _ = writeln!(out, "{}", fields.join(","));
}

pub(crate) fn output_projects_csv(projects: &[Project]) -> String {
    let mut out = String::from(
        "id,name,location,client,status,budget,start_date,end_date,assigned_team,progress,created_at\n",
    );
    for p in projects {
        write_row(
            &mut out,
            &[
                csv_escape(&p.id.to_string()),
                opt(p.name.as_deref()),
                opt(p.location.as_deref()),
                opt(p.client.as_deref()),
                csv_escape(p.status.as_str()),
                p.budget.map(|b| format!("{b:.2}")).unwrap_or_default(),
                opt(p.start_date.as_deref()),
                opt(p.end_date.as_deref()),
                opt(p.assigned_team.as_deref()),
                p.progress.map(|v| v.to_string()).unwrap_or_default(),
                csv_escape(&p.created_at.as_deref().map(display_date).unwrap_or_default()),
            ],
        );
    }
    out
}

pub(crate) fn output_tools_csv(tools: &[Tool]) -> String {
    let mut out = String::from("id,name,type,category,status\n");
    for t in tools {
        write_row(
            &mut out,
            &[
                csv_escape(&t.id.to_string()),
                opt(t.name.as_deref()),
                opt(t.kind.as_deref()),
                opt(t.category.as_deref()),
                csv_escape(t.status.as_str()),
            ],
        );
    }
    out
}

pub(crate) fn output_employees_csv(employees: &[Employee]) -> String {
    let mut out = String::from("id,name,role,status,email\n");
    for e in employees {
        write_row(
            &mut out,
            &[
                csv_escape(&e.id.to_string()),
                opt(e.name.as_deref()),
                opt(e.role.as_deref()),
                csv_escape(e.status.as_str()),
                opt(e.email.as_deref()),
            ],
        );
    }
    out
}
