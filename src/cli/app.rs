//! CLI definitions and entry point

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use super::commands;
use archsec::output::OutputMode;

/// archsec - Security analysis for cloud architecture diagrams
#[derive(Parser, Debug)]
#[command(
    name = "archsec",
    version,
    about = "Security analysis for cloud architecture diagrams",
    long_about = "Validate, analyse and correct cloud architecture diagrams.\n\n\
                  Diagrams are @startdiagram/@enddiagram blocks of connection lines.\n\
                  Analysis asks a language model for risks grounded in compliance rules;\n\
                  verification asks it for a corrected diagram and reports the changes."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./archsec.toml, then ~/.config/archsec/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a diagram's format
    Validate {
        /// Diagram file, or - for stdin
        file: String,
    },

    /// Show structural changes between two diagrams
    Diff {
        /// Diagram before
        original: String,
        /// Diagram after
        corrected: String,
    },

    /// Analyse a diagram for security risks and propose a corrected one
    Analyze {
        /// Diagram file, or - for stdin
        file: String,

        /// Skip the corrected-diagram step
        #[arg(long)]
        no_verify: bool,
    },

    /// Propose a corrected diagram for a list of risks
    Verify {
        /// Diagram file, or - for stdin
        file: String,

        /// JSON file with the risks to address
        #[arg(short, long)]
        risks: PathBuf,
    },

    /// List supported cloud services
    Services,

    /// Look up compliance rules
    Rules {
        /// Rules for this service id
        #[arg(short, long, conflicts_with = "query")]
        service: Option<String>,

        /// Free-text search
        #[arg(short, long)]
        query: Option<String>,

        /// Maximum free-text results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Check the language model and rule store
    Health,

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = OutputMode::from_json_flag(cli.json);
    let config = cli.config.as_deref();

    match cli.command {
        Some(Command::Validate { file }) => commands::validate(&file, config, output_mode),
        Some(Command::Diff {
            original,
            corrected,
        }) => commands::diff(&original, &corrected, output_mode),
        Some(Command::Analyze { file, no_verify }) => {
            commands::analyze(&file, !no_verify, config, output_mode)
        },
        Some(Command::Verify { file, risks }) => {
            commands::verify(&file, &risks, config, output_mode)
        },
        Some(Command::Services) => commands::services(config, output_mode),
        Some(Command::Rules {
            service,
            query,
            limit,
        }) => commands::rules(service, query, limit, config, output_mode),
        Some(Command::Health) => commands::health(config, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": archsec::VERSION
                    })
                );
            } else {
                println!("archsec v{}", archsec::VERSION);
            }
            Ok(ExitCode::SUCCESS)
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": archsec::VERSION,
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("archsec v{}", archsec::VERSION);
                println!("\nRun 'archsec --help' for usage");
                println!("Run 'archsec validate <diagram>' to get started");
            }
            Ok(ExitCode::SUCCESS)
        },
    }
}
