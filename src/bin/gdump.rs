//! Command-line interface for graph-dump
//!
//! Dumps a JSON or YAML document the same way the library dumps in-memory
//! values, which makes it handy for checking options and formats.
//!
//! Usage:
//!   gdump `<path>` [--label `<label>`] [--format text|json|yaml] [--no-fields]
//!         [--max-depth `<n>`] [--config `<file>`] [--log] [-v...]
//!
//! With `--log` the dump goes through a log sink at the configured
//! `sink.level` instead of stdout; raise `-v` far enough to see it.

use clap::{value_parser, Arg, ArgAction, Command};
use graph_dump::{
    add_listener, clear_listeners, dump_as, dump_with, Describe, DiagnosticSink, DumpError, Loader,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is neither JSON nor YAML: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Dump(#[from] DumpError),
}

/// A parsed input document.
enum Document {
    Json(serde_json::Value),
    Yaml(serde_yaml::Value),
}

impl Document {
    fn value(&self) -> &dyn Describe {
        match self {
            Document::Json(value) => value,
            Document::Yaml(value) => value,
        }
    }
}

fn main() {
    let matches = Command::new("gdump")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render a JSON or YAML document as a graph dump")
        .arg(
            Arg::new("path")
                .help("Path to the document to dump")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("label")
                .long("label")
                .short('l')
                .help("Label of the root node")
                .default_value("document"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (text, json, yaml)")
                .default_value("text"),
        )
        .arg(
            Arg::new("no-fields")
                .long("no-fields")
                .help("Show composites as headers only")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .short('d')
                .help("Deepest level whose children are expanded")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("log")
                .long("log")
                .help("Write the dump to the log at the configured sink.level")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .help("Increase log verbosity (-v, -vv, -vvv)")
                .action(ArgAction::Count),
        )
        .get_matches();

    init_logging(matches.get_count("verbose"));

    let path = matches
        .get_one::<String>("path")
        .map(PathBuf::from)
        .unwrap_or_default();
    let label = matches
        .get_one::<String>("label")
        .map(String::as_str)
        .unwrap_or("document");
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    let settings = Settings {
        config: matches.get_one::<String>("config").map(PathBuf::from),
        no_fields: matches.get_flag("no-fields"),
        max_depth: matches.get_one::<u64>("max-depth").copied(),
        to_log: matches.get_flag("log"),
    };

    match run(&path, label, format, &settings) {
        Ok(output) => print!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

struct Settings {
    config: Option<PathBuf>,
    no_fields: bool,
    max_depth: Option<u64>,
    to_log: bool,
}

fn run(path: &Path, label: &str, format: &str, settings: &Settings) -> Result<String, CliError> {
    let mut loader = Loader::new();
    if let Some(config) = &settings.config {
        loader = loader.with_file(config);
    }
    loader = loader.with_env();
    if settings.no_fields {
        loader = loader.set_override("no_fields", true)?;
    }
    if let Some(depth) = settings.max_depth {
        loader = loader.set_override("max_depth", depth)?;
    }
    let config = loader.build()?;
    let options = config.to_options()?;
    log::debug!("dump options: {options:?}");

    let document = read_document(path)?;
    let value = document.value();
    if !settings.to_log {
        return Ok(dump_as(value, label, &options, format)?);
    }

    let sink = Arc::new(config.sink.log_sink());
    if format == "text" {
        clear_listeners();
        add_listener(sink);
        dump_with(value, label, &options)?;
    } else {
        sink.write(&dump_as(value, label, &options, format)?);
    }
    Ok(String::new())
}

fn read_document(path: &Path) -> Result<Document, CliError> {
    let source = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_error = |message: String| CliError::Parse {
        path: path.to_path_buf(),
        message,
    };

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&source)
            .map(Document::Json)
            .map_err(|e| parse_error(e.to_string())),
        Some("yaml" | "yml") => serde_yaml::from_str(&source)
            .map(Document::Yaml)
            .map_err(|e| parse_error(e.to_string())),
        _ => {
            log::info!("unknown extension, trying JSON then YAML");
            serde_json::from_str(&source)
                .map(Document::Json)
                .or_else(|_| serde_yaml::from_str(&source).map(Document::Yaml))
                .map_err(|e| parse_error(e.to_string()))
        }
    }
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false)
        .init();
}
