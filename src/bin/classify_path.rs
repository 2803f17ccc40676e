//! Emits the taxonomy of one repository-relative path as JSON.
//!
//! Editor integrations call this for every file switch, so it does no
//! filesystem access and takes no flags beyond the path.

use anyhow::Result;
use component_view::classify;
use std::env;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let path = parse_cli_path();
    let file = classify(&path);
    println!("{}", serde_json::to_string(&file)?);
    Ok(())
}

fn parse_cli_path() -> String {
    let mut args = env::args().skip(1);
    let Some(first) = args.next() else {
        usage_and_exit();
    };
    if matches!(first.as_str(), "-h" | "--help") {
        usage_and_exit();
    }
    if args.next().is_some() {
        usage_and_exit();
    }
    first
}

fn usage_and_exit() -> ! {
    eprintln!("Usage: classify-path <RELATIVE_PATH>");
    std::process::exit(1);
}
