// SPDX-License-Identifier: PMPL-1.0-or-later
//! i18n-checker CLI - charset/language/direction diagnostics for markup documents

use clap::{Parser, Subcommand, ValueEnum};
use i18n_checker::checker::Checker;
use i18n_checker::report::{generate_report, OutputFormat};
use i18n_checker::transport::Transport;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Internationalization checker for fetched markup documents
#[derive(Parser)]
#[command(name = "i18n-checker")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a document and print the full report
    Check {
        /// File holding the raw document bytes
        file: PathBuf,

        /// Content-Type header the document was served with
        #[arg(long)]
        content_type: Option<String>,

        /// Content-Language header the document was served with
        #[arg(long)]
        content_language: Option<String>,

        /// Accept-Language header of the original request
        #[arg(long)]
        accept_language: Option<String>,

        /// Accept-Charset header of the original request
        #[arg(long)]
        accept_charset: Option<String>,

        /// Original URL, for diagnostics only
        #[arg(long)]
        url: Option<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Dump the gathered facts as JSON, without the findings report
    Facts {
        /// File holding the raw document bytes
        file: PathBuf,

        /// Content-Type header the document was served with
        #[arg(long)]
        content_type: Option<String>,

        /// Content-Language header the document was served with
        #[arg(long)]
        content_language: Option<String>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("i18n_checker=debug")
    } else {
        EnvFilter::new("i18n_checker=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn build_transport(
    content_type: Option<String>,
    content_language: Option<String>,
    accept_language: Option<String>,
    accept_charset: Option<String>,
    url: Option<String>,
) -> Transport {
    Transport {
        url,
        content_type,
        content_language,
        accept_language,
        accept_charset,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            file,
            content_type,
            content_language,
            accept_language,
            accept_charset,
            url,
            format,
            output,
            verbose,
        } => {
            init_logging(verbose);
            let bytes = std::fs::read(&file)?;
            let transport = build_transport(
                content_type,
                content_language,
                accept_language,
                accept_charset,
                url,
            );
            let analysis = Checker::new(transport, bytes).check()?;
            let report = generate_report(&analysis, format.into());
            write_output(&report, output.as_deref())?;

            if analysis.findings.has_errors() {
                std::process::exit(1);
            }
        }

        Commands::Facts {
            file,
            content_type,
            content_language,
            verbose,
        } => {
            init_logging(verbose);
            let bytes = std::fs::read(&file)?;
            let transport = build_transport(content_type, content_language, None, None, None);
            let analysis = Checker::new(transport, bytes).check()?;
            println!("{}", serde_json::to_string_pretty(&analysis.facts)?);
        }
    }

    Ok(())
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&std::path::Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
