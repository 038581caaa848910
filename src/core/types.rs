//! Typed records fetched from the store and the summary derived from them

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::core::decode;

/// Primary key of a stored row (serial integer or uuid text)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub(crate) enum RecordId {
    Int(i64),
    Text(String),
}

impl Default for RecordId {
    fn default() -> Self {
        RecordId::Int(0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum ProjectStatus {
    Planning,
    InProgress,
    OnHold,
    Completed,
    /// Any other stored value, kept verbatim
    Other(String),
    /// Column missing or null
    #[default]
    Unset,
}

impl ProjectStatus {
    pub(crate) fn as_str(&self) -> &str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::InProgress => "in-progress",
            ProjectStatus::OnHold => "on-hold",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Other(raw) => raw,
            ProjectStatus::Unset => "",
        }
    }
}

impl From<String> for ProjectStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "planning" => ProjectStatus::Planning,
            "in-progress" => ProjectStatus::InProgress,
            "on-hold" => ProjectStatus::OnHold,
            "completed" => ProjectStatus::Completed,
            _ => ProjectStatus::Other(raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum ToolStatus {
    Available,
    InUse,
    Other(String),
    #[default]
    Unset,
}

impl ToolStatus {
    pub(crate) fn as_str(&self) -> &str {
        match self {
            ToolStatus::Available => "available",
            ToolStatus::InUse => "in-use",
            ToolStatus::Other(raw) => raw,
            ToolStatus::Unset => "",
        }
    }
}

impl From<String> for ToolStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "available" => ToolStatus::Available,
            "in-use" => ToolStatus::InUse,
            _ => ToolStatus::Other(raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) enum EmployeeStatus {
    Active,
    Other(String),
    #[default]
    Unset,
}

impl EmployeeStatus {
    pub(crate) fn as_str(&self) -> &str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::Other(raw) => raw,
            EmployeeStatus::Unset => "",
        }
    }
}

impl From<String> for EmployeeStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "active" => EmployeeStatus::Active,
            _ => EmployeeStatus::Other(raw),
        }
    }
}

macro_rules! serialize_as_str {
    ($($ty:ty),*) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    match self.as_str() {
                        "" => serializer.serialize_none(),
                        s => serializer.serialize_str(s),
                    }
                }
            }
        )*
    };
}

serialize_as_str!(ProjectStatus, ToolStatus, EmployeeStatus);

/// A row of the `projects` table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Project {
    pub(crate) id: RecordId,
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) location: Option<String>,
    #[serde(default)]
    pub(crate) client: Option<String>,
    #[serde(default)]
    pub(crate) start_date: Option<String>,
    #[serde(default)]
    pub(crate) end_date: Option<String>,
    #[serde(default, deserialize_with = "decode::lenient_number")]
    pub(crate) budget: Option<f64>,
    #[serde(default, deserialize_with = "decode::status")]
    pub(crate) status: ProjectStatus,
    #[serde(default)]
    pub(crate) assigned_team: Option<String>,
    #[serde(default)]
    pub(crate) description: Option<String>,
    #[serde(default, deserialize_with = "decode::lenient_number")]
    pub(crate) progress: Option<f64>,
    #[serde(default)]
    pub(crate) created_at: Option<String>,
}

/// A row of the `tools` table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Tool {
    pub(crate) id: RecordId,
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default, rename = "type")]
    pub(crate) kind: Option<String>,
    #[serde(default)]
    pub(crate) category: Option<String>,
    #[serde(default, deserialize_with = "decode::status")]
    pub(crate) status: ToolStatus,
}

/// A row of the `employees` table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Employee {
    pub(crate) id: RecordId,
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) role: Option<String>,
    #[serde(default, deserialize_with = "decode::status")]
    pub(crate) status: EmployeeStatus,
    #[serde(default)]
    pub(crate) email: Option<String>,
}

/// Immutable view of the three record sets taken for one dashboard load
#[derive(Debug, Default, Clone)]
pub(crate) struct Snapshot {
    pub(crate) projects: Vec<Project>,
    pub(crate) tools: Vec<Tool>,
    pub(crate) employees: Vec<Employee>,
}

/// Summary statistics shown on the dashboard
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DashboardStats {
    pub(crate) active_projects: usize,
    pub(crate) completed_projects: usize,
    pub(crate) total_tools: usize,
    pub(crate) tools_in_use: usize,
    pub(crate) tools_available: usize,
    pub(crate) active_employees: usize,
    /// Sum of budgets of in-progress projects (committed, not incurred)
    pub(crate) monthly_expenses: f64,
}

impl DashboardStats {
    /// Share of tools currently in use, in percent
    pub(crate) fn tool_utilization(&self) -> f64 {
        percent(self.tools_in_use, self.total_tools)
    }

    /// Completed projects as a share of active plus completed, in percent
    pub(crate) fn project_completion_rate(&self) -> f64 {
        percent(
            self.completed_projects,
            self.active_projects + self.completed_projects,
        )
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
