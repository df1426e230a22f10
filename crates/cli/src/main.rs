use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use argumentative::{FlagSchema, Flags};
use tracing_subscriber::{EnvFilter, fmt};

const NAME: &str = "argcheck";
const ABOUT: &str = "Parse an argument list against a JSON flag schema";

/// Exit status for argument lists the schema rejects.
const USAGE_EXIT_CODE: i32 = 2;

fn main() -> Result<()> {
    let argv: Vec<String> = std::env::args().collect();
    let (own, forwarded) = split_forwarded(&argv);

    let mut flags = Flags::new();
    // Takes effect once tracing is installed, after our own flags are parsed;
    // events from parsing argcheck's own arguments are not logged.
    let verbose = flags.add_bool("verbose", Some('v'), "Log every parser decision");
    let pretty = flags.add_bool("pretty", Some('p'), "Pretty-print the JSON result");
    let help = flags.add_bool("help", Some('h'), "Show usage (of the schema, if given)");
    let schema_path = flags.add_positional("schema", true, "", "Path to the JSON flag schema");

    if let Err(err) = flags.parse(own) {
        if help.get() {
            flags.print_usage(NAME, ABOUT, None)?;
            return Ok(());
        }
        flags.write_usage(io::stderr().lock(), NAME, ABOUT, Some(&err))?;
        std::process::exit(USAGE_EXIT_CODE);
    }

    init_tracing(verbose.get());

    let path = PathBuf::from(schema_path.get());
    let schema = FlagSchema::from_file(&path)
        .with_context(|| format!("failed to load schema: {}", path.display()))?;
    let (target, bindings) = schema
        .build()
        .with_context(|| format!("invalid schema: {}", path.display()))?;

    if help.get() {
        target.print_usage(&schema.name, &schema.description, None)?;
        return Ok(());
    }

    let mut args = Vec::with_capacity(forwarded.len() + 1);
    args.push(schema.name.clone());
    args.extend(forwarded.iter().cloned());

    tracing::debug!(schema = %schema.name, count = forwarded.len(), "parsing forwarded arguments");
    if let Err(err) = target.parse(args.as_slice()) {
        tracing::debug!(error = %err, "argument list rejected");
        target.write_usage(
            io::stderr().lock(),
            &schema.name,
            &schema.description,
            Some(&err),
        )?;
        std::process::exit(USAGE_EXIT_CODE);
    }

    let snapshot = bindings.snapshot();
    let json = if pretty.get() {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{json}");

    Ok(())
}

/// Split argv at the first `--`: what comes before is ours, what follows is
/// checked against the schema.
fn split_forwarded(argv: &[String]) -> (&[String], &[String]) {
    match argv.iter().position(|a| a == "--") {
        Some(idx) => (&argv[..idx], &argv[idx + 1..]),
        None => (argv, &[]),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}
