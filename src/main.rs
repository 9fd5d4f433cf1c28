mod config;

use std::path::PathBuf;

use amath::app::{self, Request, Response};
use amath::{SequenceKind, SequenceRequest};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use config::{OutputFormat, SequenceConfig};

#[derive(Parser)]
#[command(
    name = "amath",
    version,
    about = "Calculator, sequences and word problem solver"
)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Reject invalid numbers instead of treating them as 0 or NaN
    #[arg(long, global = true)]
    strict: bool,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a mathematical expression
    Eval {
        /// Expression, such as "2+3*4"
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },

    /// Generate an arithmetic sequence
    Arithmetic {
        /// First term
        #[arg(short = 'a', long, allow_hyphen_values = true)]
        first: Option<String>,

        /// Common difference
        #[arg(short = 'd', long, allow_hyphen_values = true)]
        step: Option<String>,

        /// Number of terms
        #[arg(short = 'n', long, allow_hyphen_values = true)]
        count: Option<String>,
    },

    /// Generate a geometric sequence
    Geometric {
        /// First term
        #[arg(short = 'a', long, allow_hyphen_values = true)]
        first: Option<String>,

        /// Common ratio
        #[arg(short = 'r', long, allow_hyphen_values = true)]
        ratio: Option<String>,

        /// Number of terms
        #[arg(short = 'n', long, allow_hyphen_values = true)]
        count: Option<String>,
    },

    /// Solve a word problem
    Solve {
        /// Problem text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}

/// Raw sequence parameters, as typed by the user
struct SequenceArgs {
    first: Option<String>,
    step: Option<String>,
    count: Option<String>,
}

impl SequenceArgs {
    fn into_request(
        self,
        kind: SequenceKind,
        defaults: &SequenceConfig,
        strict: bool,
    ) -> Result<Request> {
        let first = self.first.unwrap_or_else(|| defaults.first_term.clone());
        let step = self.step.unwrap_or_else(|| defaults.step.clone());
        let count = self.count.unwrap_or_else(|| defaults.count.clone());

        let parameters = if strict {
            SequenceRequest::parse_strict(&first, &step, &count)
                .with_context(|| format!("invalid {} sequence parameters", kind))?
        } else {
            SequenceRequest::coerce(&first, &step, &count)
        };
        parameters.check_limit(defaults.max_terms)?;

        Ok(Request::Sequence(kind, parameters))
    }
}

fn build_request(command: Commands, defaults: &SequenceConfig, strict: bool) -> Result<Request> {
    let request = match command {
        Commands::Eval { expression } => Request::Evaluate(expression),
        Commands::Arithmetic { first, step, count } => SequenceArgs { first, step, count }
            .into_request(SequenceKind::Arithmetic, defaults, strict)?,
        Commands::Geometric {
            first,
            ratio,
            count,
        } => SequenceArgs {
            first,
            step: ratio,
            count,
        }
        .into_request(SequenceKind::Geometric, defaults, strict)?,
        Commands::Solve { text } => Request::SolveWordProblem(text.join(" ")),
    };
    Ok(request)
}

fn print_response(response: &Response, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            let text = response.to_text();
            if !text.is_empty() {
                println!("{}", text);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response.to_json())?);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;
    let format = cli.format.unwrap_or(config.output.format);
    let strict = cli.strict || config.sequence.strict;

    let request = build_request(cli.command, &config.sequence, strict)?;
    match app::handle_with_limit(&request, config.sequence.max_terms) {
        Response::Rejected(err) => Err(err.into()),
        response => print_response(&response, format),
    }
}
