//! colexpr CLI - render expression documents as dialect SQL
//!
//! Usage:
//!   colexpr render <doc.json> [--dialect <dialect>] [--alias]
//!   colexpr describe <doc.json>
//!   colexpr phrases [--dialect <dialect>]
//!
//! Examples:
//!   colexpr render total.json --dialect oracle
//!   cat total.json | colexpr render - --alias
//!   colexpr phrases --dialect sqlserver

use clap::{Parser, Subcommand};
use colexpr::config::Settings;
use colexpr::document::parse_document;
use colexpr::sql::{validate_dialect, ColumnExpr, Context, Phrase, PhraseTable, SqlDialect};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "colexpr")]
#[command(about = "colexpr - typed column expressions compiled to multi-dialect SQL")]
#[command(version)]
struct Cli {
    /// Path to a colexpr.toml (defaults to the usual search locations)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level regardless of the configured level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an expression document as SQL
    Render {
        /// Path to the JSON document, or `-` for stdin
        file: PathBuf,

        /// Dialect to render for (overrides the configured base)
        #[arg(short, long)]
        dialect: Option<String>,

        /// Emit `AS alias` for aliased expressions
        #[arg(short, long)]
        alias: bool,
    },

    /// Print the metadata of an expression document as JSON
    Describe {
        /// Path to the JSON document, or `-` for stdin
        file: PathBuf,
    },

    /// List the phrase templates of a dialect
    Phrases {
        /// Dialect to list (overrides the configured base)
        #[arg(short, long)]
        dialect: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let mut settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        settings.log.level.clone()
    };
    // held until exit so buffered records are flushed
    let _logger = match flexi_logger::Logger::try_with_str(&level)
        .and_then(|logger| logger.log_to_stderr().start())
    {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };

    match cli.command {
        Commands::Render {
            file,
            dialect,
            alias,
        } => {
            if let Some(name) = dialect {
                settings.dialect.base = name;
            }
            if alias {
                settings.render.alias = true;
            }
            cmd_render(&file, &settings)
        }
        Commands::Describe { file } => cmd_describe(&file),
        Commands::Phrases { dialect } => {
            if let Some(name) = dialect {
                settings.dialect.base = name;
            }
            cmd_phrases(&settings)
        }
    }
}

fn cmd_render(file: &Path, settings: &Settings) -> ExitCode {
    let Some(table) = build_dialect(settings) else {
        return ExitCode::FAILURE;
    };
    let Some(expr) = read_document(file) else {
        return ExitCode::FAILURE;
    };

    let ctx: Context = settings.render.context();
    log::debug!("rendering for {} with {:?}", table.name(), ctx);
    println!("{}", expr.to_sql_with(&table, ctx));
    ExitCode::SUCCESS
}

fn cmd_describe(file: &Path) -> ExitCode {
    let Some(expr) = read_document(file) else {
        return ExitCode::FAILURE;
    };

    match serde_json::to_string_pretty(&expr.describe()) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error serializing description: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_phrases(settings: &Settings) -> ExitCode {
    let Some(table) = build_dialect(settings) else {
        return ExitCode::FAILURE;
    };

    println!("Dialect: {}", table.name());
    println!();
    for phrase in Phrase::ALL {
        println!("  {:<22} {:?}", phrase.key(), table.sql_phrase(phrase));
    }
    ExitCode::SUCCESS
}

fn build_dialect(settings: &Settings) -> Option<PhraseTable> {
    let table = match settings.dialect() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Dialect error: {}", e);
            return None;
        }
    };
    if let Err(e) = validate_dialect(&table) {
        eprintln!("Dialect error: {}", e);
        return None;
    }
    Some(table)
}

fn read_document(file: &Path) -> Option<ColumnExpr> {
    let source = if file == Path::new("-") {
        io::read_to_string(io::stdin())
    } else {
        fs::read_to_string(file)
    };
    let source = match source {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", file.display(), e);
            return None;
        }
    };

    match parse_document(&source) {
        Ok(expr) => Some(expr),
        Err(e) => {
            eprintln!("Document error: {}", e);
            None
        }
    }
}
