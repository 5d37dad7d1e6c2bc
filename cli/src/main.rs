//! CLI entrypoint for law-council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use council_application::ports::context_source::ContextSource;
use council_application::ports::conversation_store::{ConversationStore, NoConversationStore};
use council_application::{DeliberateUseCase, NoProgress, RetrieveContextUseCase};
use council_domain::Model;
use council_infrastructure::{
    ConfigLoader, FileConfig, JsonlConversationStore, LocalCorpusSource, MySqlContextSource,
    NotionSource, OpenRouterGateway,
};
use council_presentation::{ChatRepl, Cli, ConsoleFormatter, OutputFormat, ProgressReporter};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("{e}"))
            .context("Failed to load configuration")?
    };
    config.validate().context("Invalid configuration")?;

    info!("Starting law-council");

    // Roster: config first, CLI overrides on top
    let mut roster = config.council.to_roster();
    if !cli.model.is_empty() {
        roster.members = cli.model.iter().map(|s| s.parse().unwrap()).collect();
    }
    if let Some(chairman) = &cli.chairman {
        roster.chairman = chairman.parse().unwrap();
    }

    // === Dependency Injection ===
    let Some(api_key) = config.gateway.resolve_api_key() else {
        bail!(
            "No API key configured. Set OPENROUTER_API_KEY or [gateway] api_key in council.toml."
        );
    };
    let gateway = Arc::new(
        OpenRouterGateway::new(api_key, config.gateway.base_url.as_str(), config.gateway.timeout())
            .context("Failed to build the inference gateway")?,
    );

    let retrieval = build_retrieval(&config)?;
    let store = build_store(&config);

    let deliberate = DeliberateUseCase::new(retrieval, gateway, store, roster.clone());

    // Chat mode
    if cli.chat {
        let mut repl = ChatRepl::new(deliberate, roster).with_progress(!cli.quiet);
        if let Some(session) = cli.session {
            repl = repl.with_session(session);
        }
        repl.run().await?;
        return Ok(());
    }

    // Single question mode - question is required
    let question = match cli.question {
        Some(q) => q,
        None => bail!("Question is required. Use --chat for interactive mode."),
    };

    if !cli.quiet {
        println!();
        println!("+============================================================+");
        println!("|            law-council - Legal LLM Council                 |");
        println!("+============================================================+");
        println!();
        println!("Question: {}", question);
        println!(
            "Council: {}",
            roster
                .members
                .iter()
                .map(Model::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!();
    }

    let outcome = if cli.quiet {
        deliberate.run(&question, cli.session, &NoProgress).await?
    } else {
        let progress = ProgressReporter::new();
        deliberate.run(&question, cli.session, &progress).await?
    };

    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&question, &outcome),
        OutputFormat::Answer => ConsoleFormatter::format_answer_only(&outcome),
        OutputFormat::Json => ConsoleFormatter::format_json(&outcome),
    };

    println!("{}", output);

    Ok(())
}

/// Build the retrieval merge layer from the configured backends
fn build_retrieval(config: &FileConfig) -> Result<RetrieveContextUseCase> {
    let primary: Arc<dyn ContextSource> = match config.retrieval.backend.as_str() {
        "mysql" => Arc::new(MySqlContextSource::connect_lazy(
            &config.retrieval.mysql.to_params(),
        )),
        "local" => Arc::new(LocalCorpusSource::new(&config.retrieval.local.dir)),
        other => bail!("Unknown retrieval backend: {other}"),
    };

    let mut retrieval = RetrieveContextUseCase::new(primary, config.retrieval.max_chunks);

    let notion = &config.retrieval.notion;
    if notion.is_configured() {
        let source = NotionSource::new(notion.api_key.clone(), notion.timeout())
            .context("Failed to build the Notion client")?;
        retrieval = retrieval
            .with_supplementary(Arc::new(source))
            .with_supplementary_timeout(notion.timeout());
    } else if notion.enabled {
        warn!("Notion enabled but API key or database id not configured, skipping");
    }

    Ok(retrieval)
}

/// Build the conversation store, degrading to no persistence on failure
fn build_store(config: &FileConfig) -> Arc<dyn ConversationStore> {
    match JsonlConversationStore::new(&config.storage.data_dir) {
        Some(store) => Arc::new(store),
        None => {
            warn!("Conversation store unavailable, continuing without persistence");
            Arc::new(NoConversationStore)
        }
    }
}
