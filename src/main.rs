use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use console::style;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clinsight::{
    ConfigLoader, DocumentAnalyzer, ExtractionEngine, InteractionChecker, Severity, scrub,
};

#[derive(Parser)]
#[command(name = "clinsight")]
#[command(version, about = "Clinical medication intelligence toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract structured medication data from free text
    Extract {
        #[arg(help = "Clinical free text, e.g. \"Take 50mg metformin every morning\"")]
        text: String,
    },

    /// Check a new medication against the current regimen
    Check {
        #[arg(help = "Newly-introduced medication name")]
        new_med: String,
        #[arg(
            help = "Current medications (comma-separated)",
            num_args = 0..,
            value_delimiter = ','
        )]
        current_meds: Vec<String>,
    },

    /// Replace PHI-shaped substrings with placeholder tokens
    Deidentify {
        #[arg(help = "Text to de-identify")]
        text: String,
    },

    /// Analyze a clinical document through the model cascade
    Analyze {
        #[arg(help = "Path to the document")]
        file: PathBuf,
        #[arg(long, default_value = "application/pdf", help = "Document MIME type")]
        mime_type: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// Write the default configuration to clinsight.toml
    Init {
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> clinsight::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Extract { text } => {
            let config = ConfigLoader::load()?;
            let engine = ExtractionEngine::from_config(&config)?;
            let rt = Runtime::new()?;
            let mention = rt.block_on(engine.extract(&text));
            println!("{}", serde_json::to_string_pretty(&mention)?);
        }
        Commands::Check {
            new_med,
            current_meds,
        } => {
            let config = ConfigLoader::load()?;
            let checker = InteractionChecker::from_config(&config)?;
            let rt = Runtime::new()?;
            let result = rt.block_on(checker.check(&new_med, &current_meds));

            if let (Some(warning), Some(severity)) = (&result.warning, result.severity) {
                let label = match severity {
                    Severity::High | Severity::Contraindicated => {
                        style(severity.as_str()).red().bold()
                    }
                    Severity::Medium => style(severity.as_str()).yellow().bold(),
                    Severity::Low => style(severity.as_str()).blue(),
                };
                eprintln!("{} {}", label, warning);
            }
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Deidentify { text } => {
            let clean_text = scrub(&text);
            let report = serde_json::json!({
                "original_length": text.len(),
                "clean_text": clean_text,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Analyze { file, mime_type } => {
            let config = ConfigLoader::load()?;
            let document = std::fs::read(&file)?;
            let analyzer = DocumentAnalyzer::from_config(&config)?;
            let rt = Runtime::new()?;
            let result = rt.block_on(analyzer.analyze(&document, &mime_type));
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { json } => ConfigLoader::show_config(json)?,
            ConfigAction::Init { force } => ConfigLoader::init_config(force)?,
        },
    }

    Ok(())
}
