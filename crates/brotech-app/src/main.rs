mod cli;
mod render;
mod repl;

use std::sync::Arc;

use brotech_ai::{GeminiBackend, GeminiConfig};
use brotech_chat::{
    ChatEngine, ConversationState, CurrentRoute, EngineSettings, FileStore, KeyValueStore,
    MemoryStore,
};
use brotech_config::{BrotechConfig, StorageBackend};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

use render::TranscriptPrinter;

const FALLBACK_DIRECTIVE: &str = "brotech=info";

fn init_logging(directive: &str) {
    let directive: Directive = directive
        .parse()
        .or_else(|_| FALLBACK_DIRECTIVE.parse())
        .unwrap_or_else(|_| LevelFilter::INFO.into());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();
}

fn load_config(args: &cli::Args) -> brotech_common::Result<BrotechConfig> {
    let config = match &args.config {
        Some(path) => brotech_config::load_config_from(path)?,
        None => brotech_config::load_config()?,
    };
    Ok(config)
}

fn build_store(args: &cli::Args, config: &BrotechConfig) -> Arc<dyn KeyValueStore> {
    if args.memory || config.storage.backend == StorageBackend::Memory {
        return Arc::new(MemoryStore::new());
    }
    match config.storage.resolve_dir() {
        Some(dir) => {
            tracing::info!("Chat history stored in {}", dir.display());
            Arc::new(FileStore::new(dir))
        }
        None => {
            tracing::warn!("No cache directory available, history kept in memory");
            Arc::new(MemoryStore::new())
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env before anything reads the API key
    let _ = dotenvy::dotenv();

    let args = cli::parse();

    // Logging is configured from the file, so load it first and report
    // any failure once the subscriber is up.
    let loaded = load_config(&args);
    let directive = args
        .log_level
        .clone()
        .or_else(|| loaded.as_ref().ok().map(|c| c.logging.level.directive()))
        .unwrap_or_else(|| FALLBACK_DIRECTIVE.to_string());
    init_logging(&directive);

    tracing::info!("BroTech assistant v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        BrotechConfig::default()
    });
    tracing::info!("Config loaded (model: {})", config.chat.model);

    let api_key = config.chat.resolve_api_key().unwrap_or_else(|| {
        tracing::warn!(
            "No API key in ${} or $GEMINI_API_KEY; the assistant will be unavailable",
            config.chat.api_key_env
        );
        String::new()
    });
    let gemini = GeminiConfig::new(api_key)
        .with_max_tokens(config.chat.max_tokens)
        .with_temperature(config.chat.temperature);
    let backend = match GeminiBackend::new(gemini) {
        Ok(backend) => backend,
        Err(e) => {
            tracing::error!("Failed to build Gemini client: {e}");
            std::process::exit(1);
        }
    };

    let store = build_store(&args, &config);
    let route = CurrentRoute::new(args.route.clone());
    let printer = Arc::new(TranscriptPrinter::new(std::io::stdout()));
    let engine = Arc::new(
        ChatEngine::new(Arc::new(backend), store, Arc::new(route.clone()))
            .with_settings(EngineSettings::from_config(&config.chat))
            .with_listener(Box::new(move |state: &ConversationState| {
                printer.render(state)
            })),
    );

    engine.initialize();
    if !args.closed {
        engine.open().await;
    }

    if let Err(e) = repl::run(engine, route).await {
        tracing::error!("Input loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
