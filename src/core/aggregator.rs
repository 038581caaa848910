//! Dashboard aggregation
//!
//! Turns a snapshot of projects, tools, and employees into `DashboardStats`.
//! Pure: no I/O, inputs are only borrowed.

use crate::core::types::{
    DashboardStats, Employee, EmployeeStatus, Project, ProjectStatus, Tool, ToolStatus,
};

/// Compute dashboard statistics from complete record sets
pub(crate) fn compute_stats(
    projects: &[Project],
    tools: &[Tool],
    employees: &[Employee],
) -> DashboardStats {
    let in_progress = || {
        projects
            .iter()
            .filter(|p| p.status == ProjectStatus::InProgress)
    };

    let active_projects = in_progress().count();
    let completed_projects = projects
        .iter()
        .filter(|p| p.status == ProjectStatus::Completed)
        .count();
    let monthly_expenses: f64 = in_progress().map(|p| p.budget.unwrap_or(0.0)).sum();

    let total_tools = tools.len();
    let tools_in_use = tools.iter().filter(|t| t.status == ToolStatus::InUse).count();
    let tools_available = tools
        .iter()
        .filter(|t| t.status == ToolStatus::Available)
        .count();

    let active_employees = employees
        .iter()
        .filter(|e| e.status == EmployeeStatus::Active)
        .count();

    DashboardStats {
        active_projects,
        completed_projects,
        total_tools,
        tools_in_use,
        tools_available,
        active_employees,
        monthly_expenses,
    }
}
