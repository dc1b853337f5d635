use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the xqs binary.
#[derive(Parser, Debug)]
#[command(
    name = "xqs",
    version,
    about = "Static variable and namespace scope resolution for XQuery syntax trees"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List the variables in scope at a labelled node, nearest first.
    Variables(QueryArgs),

    /// List the namespace prefixes in scope at a labelled node, nearest first.
    Namespaces(QueryArgs),

    /// List the labelled nodes of a tree document.
    Labels(LabelsArgs),
}

#[derive(Args, Debug, PartialEq, Eq)]
pub struct QueryArgs {
    /// Tree document (JSON).
    pub tree: PathBuf,

    /// Label of the node to resolve at.
    #[arg(long)]
    pub at: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, PartialEq, Eq)]
pub struct LabelsArgs {
    /// Tree document (JSON).
    pub tree: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One aligned line per entry.
    Text,
    /// A pretty-printed JSON array.
    Json,
}
