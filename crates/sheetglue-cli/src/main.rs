//! sheetglue CLI - exercises the Range/Value adapters and the environment probe

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sheetglue::env::{Environment, ProbeOptions};
use sheetglue::prelude::*;
use sheetglue::{render_type_tag, render_value, render_value_debug};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sheetglue")]
#[command(
    author,
    version,
    about = "Render spreadsheet ranges and values, and report the runtime environment"
)]
struct Cli {
    /// Increase log verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path component marking a development checkout
    #[arg(long, global = true)]
    marker: Option<String>,

    /// Position of the marker counted from the end of the path
    #[arg(long, global = true)]
    depth: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a range from coordinates and print it
    Range {
        /// Start column (0-based)
        #[arg(default_value_t = 0)]
        start_col: u32,

        /// Start row (0-based)
        #[arg(default_value_t = 0)]
        start_row: u32,

        /// End column (default: start column)
        end_col: Option<u32>,

        /// End row (default: start row)
        end_row: Option<u32>,
    },

    /// Parse an A1-style range and print its coordinates
    ParseRange {
        /// Range text, e.g. "B3:D5"
        text: String,
    },

    /// Build a value and print its rendering
    Value {
        /// Kind of value to build
        #[arg(value_enum)]
        kind: KindArg,

        /// Textual payload (not needed for `empty`)
        text: Option<String>,

        /// Number format code, e.g. "#,##0.00" or "yyyy-mm-dd"
        #[arg(short, long, conflicts_with = "builtin")]
        format: Option<String>,

        /// Built-in number format ID
        #[arg(short, long)]
        builtin: Option<u32>,

        /// Print the diagnostic `TYPE:plain` form instead
        #[arg(short, long)]
        debug: bool,
    },

    /// Report whether the module runs from a development checkout
    Probe {
        /// Classify this path instead of the running executable
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// List every value type tag with its short name
    Tags,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Empty,
    Bool,
    Int,
    Float,
    String,
    Error,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut options = ProbeOptions::from_env();
    if let Some(marker) = cli.marker {
        options.marker = marker;
    }
    if let Some(depth) = cli.depth {
        options.depth = depth;
    }
    let environment = sheetglue::init(&options);
    tracing::debug!(
        dev_checkout = environment.dev_checkout(),
        "starting {}",
        sheetglue::program_name()
    );

    match cli.command {
        Commands::Range {
            start_col,
            start_row,
            end_col,
            end_row,
        } => show_range(start_col, start_row, end_col, end_row),
        Commands::ParseRange { text } => parse_range(&text),
        Commands::Value {
            kind,
            text,
            format,
            builtin,
            debug,
        } => show_value(kind, text.as_deref(), format, builtin, debug),
        Commands::Probe { path } => probe(&options, path),
        Commands::Tags => {
            list_tags();
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "sheetglue=warn",
        1 => "sheetglue=debug",
        _ => "sheetglue=trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn show_range(
    start_col: u32,
    start_row: u32,
    end_col: Option<u32>,
    end_row: Option<u32>,
) -> Result<()> {
    let range = Range::new(start_col, start_row, end_col, end_row)
        .context("Failed to build range")?;

    println!("{}", range);
    println!("{:?}", range.tuple());
    Ok(())
}

fn parse_range(text: &str) -> Result<()> {
    let range = Range::parse(text).with_context(|| format!("Failed to parse '{}'", text))?;

    println!("{}", range);
    println!("{:?}", range.tuple());
    Ok(())
}

fn build_value(kind: KindArg, text: Option<&str>) -> Result<Value> {
    if let KindArg::Empty = kind {
        return Ok(Value::empty());
    }

    let text = match text {
        Some(t) => t,
        None => bail!("A textual payload is required for this kind of value"),
    };

    let value = match kind {
        KindArg::Empty => Value::empty(),
        KindArg::Bool => match text.to_ascii_lowercase().as_str() {
            "true" | "1" => Value::bool(true),
            "false" | "0" => Value::bool(false),
            _ => bail!("'{}' is not a boolean", text),
        },
        KindArg::Int => Value::int(
            text.parse()
                .with_context(|| format!("'{}' is not an integer", text))?,
        ),
        KindArg::Float => Value::float(
            text.parse()
                .with_context(|| format!("'{}' is not a number", text))?,
        ),
        KindArg::String => Value::string(text),
        KindArg::Error => match CellError::from_str(text) {
            Some(e) => Value::error(e),
            None => bail!("'{}' is not an error value", text),
        },
    };
    Ok(value)
}

fn show_value(
    kind: KindArg,
    text: Option<&str>,
    format: Option<String>,
    builtin: Option<u32>,
    debug: bool,
) -> Result<()> {
    let mut value = build_value(kind, text)?;
    if let Some(code) = format {
        value = value.with_format(NumberFormat::from_string(code));
    } else if let Some(id) = builtin {
        value = value.with_format(NumberFormat::from_id(id));
    }

    if debug {
        println!("{}", render_value_debug(&value));
    } else {
        println!("{}", render_value(&value));
    }
    Ok(())
}

fn probe(options: &ProbeOptions, path: Option<PathBuf>) -> Result<()> {
    let environment = match path {
        Some(path) => {
            let path = path.canonicalize().unwrap_or(path);
            Environment::detect(options, Some(path))
        }
        None => sheetglue::environment().clone(),
    };

    match environment.module_path() {
        Some(path) => println!("Module: {}", path.display()),
        None => println!("Module: unknown"),
    }

    if environment.dev_checkout() {
        println!("Running from a development checkout");
    } else {
        println!("Running from an installed location");
    }
    let program_name = match environment.program_name() {
        Some(name) => name.to_string(),
        None => sheetglue::program_name(),
    };
    println!("Program name: {}", program_name);
    Ok(())
}

fn list_tags() {
    for tag in ValueType::ALL {
        println!("{}\t{}\t{}", tag.code(), tag.value_name(), render_type_tag(tag));
    }
}
