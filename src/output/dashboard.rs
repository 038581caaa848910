use comfy_table::Color;
use std::fmt::Write;

use crate::core::DashboardStats;
use crate::output::csv::csv_escape;
use crate::output::format::{
    NumberFormat, create_styled_table, format_amount, format_compact_amount, format_count,
    format_percent, header_cell, right_cell, styled_cell,
};

#[derive(Debug, Clone, Copy)]
pub(crate) struct DashboardOptions {
    pub(crate) use_color: bool,
    pub(crate) compact: bool,
    pub(crate) number_format: NumberFormat,
}

struct Metric {
    label: &'static str,
    value: String,
    color: Color,
}

fn headline_metrics(stats: &DashboardStats, nf: NumberFormat) -> [Metric; 4] {
    [
        Metric {
            label: "Active Projects",
            value: format_count(stats.active_projects, nf),
            color: Color::Blue,
        },
        Metric {
            label: "Total Tools",
            value: format_count(stats.total_tools, nf),
            color: Color::DarkYellow,
        },
        Metric {
            label: "Active Employees",
            value: format_count(stats.active_employees, nf),
            color: Color::Green,
        },
        Metric {
            label: "Active Budgets",
            value: format_amount(stats.monthly_expenses, nf),
            color: Color::Magenta,
        },
    ]
}

/// One-line summary, used for `--compact`
pub(crate) fn format_dashboard_line(stats: &DashboardStats, nf: NumberFormat) -> String {
    [
        format!("Projects: {} active", format_count(stats.active_projects, nf)),
        format!(
            "Tools: {}/{} in use",
            format_count(stats.tools_in_use, nf),
            format_count(stats.total_tools, nf)
        ),
        format!("Employees: {} active", format_count(stats.active_employees, nf)),
        format!("Budgets: {}", format_compact_amount(stats.monthly_expenses, nf)),
    ]
    .join(" | ")
}

pub(crate) fn print_dashboard(stats: &DashboardStats, options: DashboardOptions) {
    let nf = options.number_format;
    if options.compact {
        println!("{}", format_dashboard_line(stats, nf));
        return;
    }
    let c = options.use_color;
    let tint = |color: Color| if c { Some(color) } else { None };

    let mut overview = create_styled_table();
    overview.set_header(vec![header_cell("Metric", c), header_cell("Value", c)]);
    for metric in headline_metrics(stats, nf) {
        overview.add_row(vec![
            styled_cell(metric.label, None, false),
            right_cell(&metric.value, tint(metric.color), true),
        ]);
    }

    let mut projects = create_styled_table();
    projects.set_header(vec![header_cell("Project Status", c), header_cell("Count", c)]);
    projects.add_row(vec![
        styled_cell("Active", None, false),
        right_cell(&format_count(stats.active_projects, nf), tint(Color::Blue), true),
    ]);
    projects.add_row(vec![
        styled_cell("Completed", None, false),
        right_cell(&format_count(stats.completed_projects, nf), tint(Color::Green), true),
    ]);
    projects.add_row(vec![
        styled_cell("Completion", None, false),
        right_cell(&format_percent(stats.project_completion_rate(), nf), None, false),
    ]);

    let mut tools = create_styled_table();
    tools.set_header(vec![header_cell("Tool Status", c), header_cell("Count", c)]);
    tools.add_row(vec![
        styled_cell("Available", None, false),
        right_cell(&format_count(stats.tools_available, nf), tint(Color::Green), true),
    ]);
    tools.add_row(vec![
        styled_cell("In Use", None, false),
        right_cell(&format_count(stats.tools_in_use, nf), tint(Color::DarkYellow), true),
    ]);
    tools.add_row(vec![
        styled_cell("Utilization", None, false),
        right_cell(&format_percent(stats.tool_utilization(), nf), None, false),
    ]);

    println!("\n  Dashboard Overview\n");
    println!("{overview}");
    println!("{projects}");
    println!("{tools}");
}

pub(crate) fn output_dashboard_json(stats: &DashboardStats) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(stats)
}

pub(crate) fn output_dashboard_csv(stats: &DashboardStats) -> String {
    let rows: [(&str, String); 7] = [
        ("active_projects", stats.active_projects.to_string()),
        ("completed_projects", stats.completed_projects.to_string()),
        ("total_tools", stats.total_tools.to_string()),
        ("tools_in_use", stats.tools_in_use.to_string()),
        ("tools_available", stats.tools_available.to_string()),
        ("active_employees", stats.active_employees.to_string()),
        ("monthly_expenses", format!("{:.2}", stats.monthly_expenses)),
    ];
    let mut out = String::from("metric,value\n");
    for (metric, value) in rows {
        let _ = writeln!(out, "{},{}", csv_escape(metric), value);
    }
    out
}
