use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use xqs_scope::{in_scope_namespaces, in_scope_variables};
use xqs_syntax::{LoadedTree, TreeDocument};

use super::args::{CliArgs, Command, LabelsArgs, QueryArgs};
use super::reporter::{Reporter, render_labels, render_namespaces, render_variables};

/// Execute one command and return what should be printed to stdout.
pub fn run(args: &CliArgs) -> Result<String> {
    match &args.command {
        Command::Variables(query) => variables(query),
        Command::Namespaces(query) => namespaces(query),
        Command::Labels(labels) => list_labels(labels),
    }
}

fn load(path: &Path) -> Result<LoadedTree> {
    let tree = TreeDocument::from_path(path)
        .and_then(TreeDocument::load)
        .with_context(|| format!("failed to load tree document {}", path.display()))?;
    info!(
        path = %path.display(),
        nodes = tree.arena.len(),
        labels = tree.labels.len(),
        "loaded tree document"
    );
    Ok(tree)
}

fn variables(query: &QueryArgs) -> Result<String> {
    let tree = load(&query.tree)?;
    let start = tree
        .node(&query.at)
        .with_context(|| format!("no node to resolve at in {}", query.tree.display()))?;
    let reporter = Reporter::new(&tree);
    let entries: Vec<_> = in_scope_variables(&tree.arena, start)
        .map(|binding| reporter.variable(binding))
        .collect();
    render_variables(&entries, query.format).context("failed to render variables")
}

fn namespaces(query: &QueryArgs) -> Result<String> {
    let tree = load(&query.tree)?;
    let start = tree
        .node(&query.at)
        .with_context(|| format!("no node to resolve at in {}", query.tree.display()))?;
    let reporter = Reporter::new(&tree);
    let entries: Vec<_> = in_scope_namespaces(&tree.arena, start)
        .map(|decl| reporter.namespace(decl))
        .collect();
    render_namespaces(&entries, query.format).context("failed to render namespaces")
}

fn list_labels(args: &LabelsArgs) -> Result<String> {
    let tree = load(&args.tree)?;
    let entries = Reporter::new(&tree).labels();
    render_labels(&entries, args.format).context("failed to render labels")
}
