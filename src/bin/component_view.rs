//! Command-line front end for the component resolver.
//!
//! Usage:
//!   component-view classify core/lib/feed/addon/components/update/header.js
//!   component-view resolve core/lib/feed/addon/components/update/header.js --json
//!   git diff --name-only | component-view open
//!   component-view test-url core/lib/feed/addon/components/update/header.js --kind unit
//!
//! Paths may be repository-relative or absolute under the workspace root.
//! Session messages go to stderr through `env_logger`; results go to stdout.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use component_view::runner::TEST_URL_ENV;
use component_view::{
    Component, ComponentResolver, ComponentView, DEFAULT_TEST_URL, LogChannel, TestKind, classify,
    find_workspace_root, relative_filepath, split_path_list, test_runner_url,
};
use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "component-view")]
#[command(about = "Find every template, script, style and test file of a component")]
struct Cli {
    /// Workspace root; defaults to COMPONENT_VIEW_ROOT or the enclosing monorepo.
    #[arg(long, global = true)]
    root: Option<PathBuf>,
    /// Log resolver activity at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the taxonomy of each path, one JSON object per line.
    Classify {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Resolve the component a path belongs to.
    Resolve {
        path: String,
        /// Emit JSON instead of a tree.
        #[arg(long)]
        json: bool,
    },
    /// Open the components of a list of files (arguments, --from, or stdin).
    Open {
        paths: Vec<String>,
        /// Read newline-separated paths from this file.
        #[arg(long)]
        from: Option<PathBuf>,
        /// Emit JSON instead of a tree.
        #[arg(long)]
        json: bool,
    },
    /// Print the browser test-runner URL for a component.
    TestUrl {
        path: String,
        #[arg(long, value_parser = ["unit", "integration", "acceptance"])]
        kind: Option<String>,
        /// Runner base URL (or set COMPONENT_VIEW_TEST_URL).
        #[arg(long)]
        base: Option<String>,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match &cli.command {
        Command::Classify { paths } => {
            let root = cli.root.clone().or_else(|| find_workspace_root().ok());
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for raw in paths {
                let file = classify(&to_relative(root.as_deref(), raw));
                writeln!(out, "{}", serde_json::to_string(&file)?)?;
            }
        }
        Command::Resolve { path, json } => {
            let root = workspace_root(&cli)?;
            let resolver = ComponentResolver::new(&root);
            let component = resolver.resolve_path(&to_relative(Some(root.as_path()), path))?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&component)?);
            } else {
                print_tree(&mut io::stdout().lock(), &component)?;
            }
        }
        Command::Open { paths, from, json } => {
            let root = workspace_root(&cli)?;
            let requested = open_file_list(paths, from.as_deref())?;
            let relative: Vec<String> = requested
                .iter()
                .map(|raw| to_relative(Some(root.as_path()), raw))
                .collect();

            let mut view = ComponentView::new(ComponentResolver::new(&root), LogChannel);
            let report = view.seed(&relative)?;
            if !report.rejected.is_empty() {
                log::warn!("skipped {} non-component file(s)", report.rejected.len());
            }

            let components = view.components();
            if *json {
                println!("{}", serde_json::to_string_pretty(&components)?);
            } else {
                let stdout = io::stdout();
                let mut out = stdout.lock();
                for component in components {
                    print_tree(&mut out, component)?;
                }
            }
        }
        Command::TestUrl { path, kind, base } => {
            let kind = kind.as_deref().and_then(TestKind::from_segment);
            let base = base
                .clone()
                .or_else(|| env_non_empty(TEST_URL_ENV))
                .unwrap_or_else(|| DEFAULT_TEST_URL.to_string());
            let file = classify(path);
            let url = test_runner_url(&base, &file.component_name, kind);
            log::info!("Running test: {url}");
            println!("{url}");
        }
    }

    Ok(())
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn workspace_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.root {
        Some(root) => fs::canonicalize(root)
            .with_context(|| format!("resolving workspace root {}", root.display())),
        None => find_workspace_root(),
    }
}

fn to_relative(root: Option<&Path>, raw: &str) -> String {
    match root {
        Some(root) if Path::new(raw).is_absolute() => {
            relative_filepath(&root.to_string_lossy(), raw)
        }
        _ => raw.to_string(),
    }
}

fn open_file_list(paths: &[String], from: Option<&Path>) -> Result<Vec<String>> {
    if !paths.is_empty() {
        return Ok(paths.to_vec());
    }
    let mut buf = String::new();
    match from {
        Some(path) => {
            buf = fs::read_to_string(path)
                .with_context(|| format!("reading open file list {}", path.display()))?;
        }
        None => {
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading open file list from stdin")?;
        }
    }
    Ok(split_path_list(&buf))
}

fn print_tree(out: &mut impl Write, component: &Component) -> Result<()> {
    writeln!(out, "{}", component.callable_name())?;
    for platform in component.platforms.values() {
        writeln!(out, "  {}", platform.name)?;
        for file in &platform.files {
            writeln!(
                out,
                "    {:<24} {}",
                file.specialized_name(),
                file.relative_filepath
            )?;
        }
    }
    Ok(())
}

fn env_non_empty(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}
