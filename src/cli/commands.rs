//! CLI subcommand definitions

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::form::ProjectForm;

/// Main CLI commands
#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Show summary statistics (default)
    Dashboard,
    /// List projects, or add a new one
    Projects {
        #[command(subcommand)]
        command: Option<ProjectCommands>,
    },
    /// List tools
    Tools,
    /// List employees
    Employees,
}

#[derive(Subcommand)]
pub(crate) enum ProjectCommands {
    /// Create a project from flags and/or a saved form
    Add(AddProjectArgs),
}

/// Status choices offered by the new-project form
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub(crate) enum FormStatus {
    Planning,
    InProgress,
    OnHold,
    Completed,
}

impl FormStatus {
    fn as_str(self) -> &'static str {
        match self {
            FormStatus::Planning => "planning",
            FormStatus::InProgress => "in-progress",
            FormStatus::OnHold => "on-hold",
            FormStatus::Completed => "completed",
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct AddProjectArgs {
    /// JSON file with display-convention fields (startDate, assignedTeam, ...)
    #[arg(long, value_name = "FILE")]
    pub(crate) form: Option<PathBuf>,

    /// Project name
    #[arg(long)]
    pub(crate) name: Option<String>,

    #[arg(long)]
    pub(crate) location: Option<String>,

    #[arg(long)]
    pub(crate) client: Option<String>,

    /// Start date (YYYYMMDD or YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub(crate) start_date: Option<String>,

    /// End date (YYYYMMDD or YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub(crate) end_date: Option<String>,

    #[arg(long)]
    pub(crate) budget: Option<String>,

    /// Initial status (default: planning)
    #[arg(long, value_enum)]
    pub(crate) status: Option<FormStatus>,

    /// Team assigned to the project, e.g. "Team A"
    #[arg(long, value_name = "TEAM")]
    pub(crate) assigned_team: Option<String>,

    #[arg(long)]
    pub(crate) description: Option<String>,

    /// Project image to validate (JPG, PNG, or WebP, at most 10MB)
    #[arg(long, value_name = "PATH")]
    pub(crate) image: Option<PathBuf>,
}

impl AddProjectArgs {
    /// Overlay flags onto a base form; flags win over values from `--form`
    pub(crate) fn apply_to(&self, mut form: ProjectForm) -> ProjectForm {
        let overrides = [
            (&self.name, &mut form.name),
            (&self.location, &mut form.location),
            (&self.client, &mut form.client),
            (&self.start_date, &mut form.start_date),
            (&self.end_date, &mut form.end_date),
            (&self.budget, &mut form.budget),
            (&self.assigned_team, &mut form.assigned_team),
            (&self.description, &mut form.description),
        ];
        for (flag, field) in overrides {
            if let Some(value) = flag {
                *field = value.clone();
            }
        }
        if let Some(status) = self.status {
            form.status = status.as_str().to_string();
        }
        form
    }
}
