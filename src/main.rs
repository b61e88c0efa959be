use std::fs;
use std::io::{self, Read};
use std::sync::Arc;

use archdiagram::error::ErrorCode;
use archdiagram::llm::{LlmChat, LlmClient};
use archdiagram::mermaid::{create_fallback_diagram, extract_diagram_code, sanitize_diagram};
use archdiagram::services::diagram::{DiagramConfig, DiagramGenerator, DiagramStatus};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Input { path: String, source: io::Error },
    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("generation failed: {0}")]
    Generation(String),
}

impl ErrorCode for CliError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Input { .. } => "E_INPUT",
            Self::Encode(_) => "E_ENCODE",
            Self::Generation(_) => "E_GENERATION",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "archdiagram", about = "Generate and repair Mermaid architecture diagrams")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pull the diagram source out of a model reply.
    Extract {
        #[arg(default_value = "-", help = "Input file path, or - for stdin")]
        input: String,
    },
    /// Repair Mermaid source so it renders.
    Sanitize {
        #[arg(default_value = "-", help = "Input file path, or - for stdin")]
        input: String,

        #[arg(long, help = "Extract from a fenced reply before sanitizing")]
        extract: bool,
    },
    /// Print the fallback diagram for a description.
    Fallback {
        #[arg(default_value = "-", help = "Description file path, or - for stdin")]
        input: String,
    },
    /// Ask the configured LLM for a diagram and print the JSON result.
    Generate {
        #[arg(default_value = "-", help = "Description file path, or - for stdin")]
        input: String,

        #[arg(long, help = "Provider focus: aws, gcp, azure or general")]
        platform: Option<String>,

        #[arg(long, env = "DIAGRAM_MAX_TOKENS")]
        max_tokens: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    if let Err(e) = dotenv {
        if !e.not_found() {
            tracing::warn!(error = %e, ".env could not be loaded");
        }
    }

    let outcome = run(Cli::parse()).await;
    if let Err(e) = &outcome {
        tracing::error!(error = %e, code = e.error_code(), "command failed");
    }
    outcome
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Extract { input } => {
            println!("{}", extract_diagram_code(&read_input(&input)?));
            Ok(())
        }
        Command::Sanitize { input, extract } => {
            let text = read_input(&input)?;
            let code = if extract { extract_diagram_code(&text) } else { text };
            println!("{}", sanitize_diagram(&code));
            Ok(())
        }
        Command::Fallback { input } => {
            print!("{}", create_fallback_diagram(&read_input(&input)?));
            Ok(())
        }
        Command::Generate { input, platform, max_tokens } => {
            run_generate(&read_input(&input)?, platform.as_deref(), max_tokens).await
        }
    }
}

async fn run_generate(description: &str, platform: Option<&str>, max_tokens: Option<u32>) -> Result<(), CliError> {
    let llm: Option<Arc<dyn LlmChat>> = match LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            let client: Arc<dyn LlmChat> = Arc::new(client);
            Some(client)
        }
        Err(e) => {
            tracing::warn!(error = %e, code = e.error_code(), "LLM client not configured; fallback only");
            None
        }
    };

    let mut config = DiagramConfig::from_env();
    if let Some(max_tokens) = max_tokens {
        config.max_tokens = max_tokens;
    }

    let result = DiagramGenerator::new(llm, config)
        .generate(description, platform)
        .await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    match (result.status, result.error) {
        (DiagramStatus::Error, Some(message)) => Err(CliError::Generation(message)),
        (DiagramStatus::Error, None) => Err(CliError::Generation("unknown error".into())),
        (DiagramStatus::Success, _) => Ok(()),
    }
}

fn read_input(path: &str) -> Result<String, CliError> {
    let mut text = String::new();
    let read = if path == "-" {
        io::stdin().read_to_string(&mut text).map(|_| ())
    } else {
        fs::read_to_string(path).map(|contents| text = contents)
    };
    read.map_err(|source| CliError::Input { path: path.to_string(), source })?;
    Ok(text)
}
