use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use llm_adapter::api::protocol::{ChatCompletionCreateParams, ErrorResponse};
use llm_adapter::config::{Config, OutputFormat};
use llm_adapter::{prepare_chat, AdapterRegistry, StopPolicy};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "llm-adapter",
    version,
    about = "Render OpenAI-style chat requests into model-family prompts"
)]
struct Cli {
    /// Config file (defaults to $LLM_ADAPTER_CONFIG or ./llm-adapter.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered adapters in resolution order
    Adapters,
    /// Show which adapter a model name resolves to
    Resolve {
        /// Model identifier as sent in a request's `model` field
        model: String,
    },
    /// Render a chat completion request into its prompt and stop sequences
    Render {
        /// JSON request body; `-` reads stdin
        #[arg(long, default_value = "-")]
        request: PathBuf,

        /// Override the request's `model`
        #[arg(long)]
        model: Option<String>,

        /// Output format
        #[arg(long, value_enum)]
        output: Option<OutputFormat>,

        /// Ignore adapter stop sequences when the request supplies its own
        #[arg(long)]
        caller_stop_only: bool,
    },
    /// Print a default config file
    InitConfig,
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if config.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_request(path: &Path) -> Result<ChatCompletionCreateParams> {
    let body = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read request from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file: {}", path.display()))?
    };
    serde_json::from_str(&body).context("Invalid chat completion request")
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };
    init_tracing(&config);

    let registry = AdapterRegistry::builtin()?;

    match cli.command {
        Commands::Adapters => {
            for (i, adapter) in registry.adapters().enumerate() {
                let marker = adapter.model_match().marker().unwrap_or("*");
                let stop = adapter
                    .stop_sequences()
                    .map(|s| format!("{:?}", s))
                    .unwrap_or_else(|| "backend default".to_string());
                println!("{:>2}. {:<8} marker: {:<8} stop: {}", i + 1, adapter.name(), marker, stop);
            }
        }

        Commands::Resolve { model } => {
            let adapter = registry.resolve(&model)?;
            println!("{} -> {}", model, adapter.name());
        }

        Commands::Render {
            request,
            model,
            output,
            caller_stop_only,
        } => {
            let mut params = read_request(&request)?;
            if let Some(model) = model {
                params.model = model;
            }
            let policy = if caller_stop_only {
                StopPolicy::CallerOnly
            } else {
                config.render.stop_policy
            };
            let output = output.unwrap_or(config.render.output);
            info!(model = %params.model, messages = params.messages.len(), "rendering request");

            match (prepare_chat(&registry, &params, policy), output) {
                (Ok(prepared), OutputFormat::Json) => {
                    println!("{}", serde_json::to_string_pretty(&prepared)?);
                }
                (Ok(prepared), OutputFormat::Text) => {
                    println!("adapter: {}", prepared.adapter);
                    match &prepared.stop {
                        Some(stop) => println!("stop: {:?}", stop),
                        None => println!("stop: backend default"),
                    }
                    println!("---");
                    println!("{}", prepared.prompt);
                }
                (Err(err), OutputFormat::Json) => {
                    println!("{}", serde_json::to_string_pretty(&ErrorResponse::from(&err))?);
                    return Err(err.into());
                }
                (Err(err), OutputFormat::Text) => return Err(err.into()),
            }
        }

        Commands::InitConfig => {
            print!("{}", Config::default_toml());
        }
    }

    Ok(())
}
