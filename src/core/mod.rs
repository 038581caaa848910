//! Core module - typed records and the dashboard aggregation

mod aggregator;
pub(crate) mod decode;
mod types;

pub(crate) use aggregator::compute_stats;
#[cfg(test)]
pub(crate) use types::RecordId;
pub(crate) use types::{
    DashboardStats, Employee, EmployeeStatus, Project, ProjectStatus, Snapshot, Tool, ToolStatus,
};
