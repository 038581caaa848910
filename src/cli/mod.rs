pub(crate) mod args;
pub(crate) mod commands;

pub(crate) use args::{Cli, OutputFormat, SortOrder};
pub(crate) use commands::{AddProjectArgs, Commands, ProjectCommands};
