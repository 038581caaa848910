use crate::cli::{AddProjectArgs, Cli, Commands, OutputFormat, ProjectCommands};
use crate::consts::{EMPLOYEES_TABLE, PROJECTS_TABLE, TOOLS_TABLE};
use crate::core::{Employee, Project, Tool, compute_stats};
use crate::error::AppError;
use crate::form::{ImageDescriptor, ProjectForm, validate_image};
use crate::output::{
    DashboardOptions, ListOptions, NumberFormat, output_dashboard_csv, output_dashboard_json,
    output_employees_csv, output_projects_csv, output_records_json, output_tools_csv,
    print_dashboard, print_employees_table, print_projects_table, print_tools_table,
    sort_projects,
};
use crate::store::{RecordStore, fetch_records, load_snapshot, open_store};

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) store: &'a dyn RecordStore,
    pub(crate) number_format: NumberFormat,
}

impl CommandContext<'_> {
    fn list_options(&self) -> ListOptions {
        ListOptions {
            use_color: self.cli.use_color(),
            compact: self.cli.compact,
            number_format: self.number_format,
        }
    }
}

fn handle_dashboard(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let snapshot = load_snapshot(ctx.store)?;
    let stats = compute_stats(&snapshot.projects, &snapshot.tools, &snapshot.employees);
    tracing::debug!(?stats, "dashboard computed");

    match ctx.cli.output_format() {
        OutputFormat::Json => println!("{}", output_dashboard_json(&stats)?),
        OutputFormat::Csv => print!("{}", output_dashboard_csv(&stats)),
        OutputFormat::Table => print_dashboard(
            &stats,
            DashboardOptions {
                use_color: ctx.cli.use_color(),
                compact: ctx.cli.compact,
                number_format: ctx.number_format,
            },
        ),
    }
    Ok(())
}

fn handle_projects(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let mut projects = fetch_records::<Project>(ctx.store, PROJECTS_TABLE)?;
    sort_projects(&mut projects, ctx.cli.sort_order());

    match ctx.cli.output_format() {
        OutputFormat::Json => println!("{}", output_records_json(&projects)?),
        OutputFormat::Csv => print!("{}", output_projects_csv(&projects)),
        OutputFormat::Table if projects.is_empty() => println!("No projects found."),
        OutputFormat::Table => print_projects_table(&projects, ctx.list_options()),
    }
    Ok(())
}

fn handle_tools(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let tools = fetch_records::<Tool>(ctx.store, TOOLS_TABLE)?;

    match ctx.cli.output_format() {
        OutputFormat::Json => println!("{}", output_records_json(&tools)?),
        OutputFormat::Csv => print!("{}", output_tools_csv(&tools)),
        OutputFormat::Table if tools.is_empty() => println!("No tools found."),
        OutputFormat::Table => print_tools_table(&tools, ctx.list_options()),
    }
    Ok(())
}

fn handle_employees(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let employees = fetch_records::<Employee>(ctx.store, EMPLOYEES_TABLE)?;

    match ctx.cli.output_format() {
        OutputFormat::Json => println!("{}", output_records_json(&employees)?),
        OutputFormat::Csv => print!("{}", output_employees_csv(&employees)),
        OutputFormat::Table if employees.is_empty() => println!("No employees found."),
        OutputFormat::Table => print_employees_table(&employees, ctx.list_options()),
    }
    Ok(())
}

/// Build the form from `--form` and flags, validate it, and insert it.
///
/// The image attachment, when given, is checked before anything is written.
fn handle_add_project(ctx: &CommandContext<'_>, args: &AddProjectArgs) -> Result<(), AppError> {
    let base = match &args.form {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| AppError::Io {
                path: path.display().to_string(),
                source,
            })?;
            ProjectForm::from_json(&text)?
        }
        None => ProjectForm::default(),
    };
    let form = args.apply_to(base).validated()?;

    if let Some(path) = &args.image {
        let image = ImageDescriptor::from_path(path)?;
        if let Err(rejection) = validate_image(&image) {
            tracing::warn!(
                path = %path.display(),
                mime = %image.mime_type,
                size = image.size,
                reason = %rejection,
                "image rejected"
            );
            return Err(rejection.into());
        }
    }

    let record = form.to_storage_record();
    ctx.store.insert(PROJECTS_TABLE, &record)?;
    tracing::debug!(store = ctx.store.name(), name = %form.name, "project inserted");

    if ctx.cli.output_format() == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("Project \"{}\" created.", form.name);
    }
    Ok(())
}

/// Dispatch the parsed command line to its handler
pub(crate) fn run(cli: &Cli) -> Result<(), AppError> {
    let number_format = NumberFormat::from_locale(cli.locale.as_deref())?;
    let store = open_store(&cli.store_settings())?;
    let ctx = CommandContext {
        cli,
        store: store.as_ref(),
        number_format,
    };

    match &cli.command {
        None | Some(Commands::Dashboard) => handle_dashboard(&ctx),
        Some(Commands::Projects { command: None }) => handle_projects(&ctx),
        Some(Commands::Projects {
            command: Some(ProjectCommands::Add(args)),
        }) => handle_add_project(&ctx, args),
        Some(Commands::Tools) => handle_tools(&ctx),
        Some(Commands::Employees) => handle_employees(&ctx),
    }
}
