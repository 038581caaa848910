mod csv;
mod dashboard;
mod format;
mod records;

pub(crate) use csv::{output_employees_csv, output_projects_csv, output_tools_csv};
pub(crate) use dashboard::{
    DashboardOptions, output_dashboard_csv, output_dashboard_json, print_dashboard,
};
pub(crate) use format::NumberFormat;
pub(crate) use records::{
    ListOptions, output_records_json, print_employees_table, print_projects_table,
    print_tools_table, sort_projects,
};
