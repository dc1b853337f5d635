//! Opt-in logging for the `xqs` binary.
//!
//! Nothing is installed unless `XQS_LOG` (or `RUST_LOG`) holds a filter.
//! `XQS_LOG_FORMAT` picks the layer: `text` when unset or unrecognised,
//! `tree` for `tracing-tree` indentation, `json` for one object per event.
//!
//! Useful targets:
//! - `xqs::cli::driver` logs the loaded file with its sizes at `info`
//! - `xqs_syntax::document` logs the same counts at `debug`
//! - `xqs_scope::variables` and `xqs_scope::namespaces` log the start node at
//!   `debug` and every visited level that yields something at `trace`
//!
//! ```bash
//! XQS_LOG=xqs_scope::variables=trace xqs variables query.json --at ret
//! XQS_LOG=debug XQS_LOG_FORMAT=json xqs namespaces query.json --at call 2>log.ndjson
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Standard flat text lines (default).
    Text,
    /// Hierarchical indented tree via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    /// Parse a format name; unknown names fall back to `Text`.
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("XQS_LOG_FORMAT").unwrap_or_default())
    }
}

/// Build an `EnvFilter` from `XQS_LOG`, falling back to `RUST_LOG`.
fn build_filter() -> EnvFilter {
    if let Ok(val) = std::env::var("XQS_LOG") {
        EnvFilter::builder().parse_lossy(val)
    } else {
        EnvFilter::from_default_env()
    }
}

/// Initialise the global tracing subscriber.
///
/// Does nothing when neither `XQS_LOG` nor `RUST_LOG` is set. All output
/// goes to stderr so it never mixes with resolver output on stdout.
pub fn init_tracing() {
    let has_xqs_log = std::env::var("XQS_LOG").is_ok();
    let has_rust_log = std::env::var("RUST_LOG").is_ok();
    if !has_xqs_log && !has_rust_log {
        return;
    }

    let filter = build_filter();

    match LogFormat::from_env() {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_targets(true);

            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);

            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
