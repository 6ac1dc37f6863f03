//! Site-Lingo main entry point
//!
//! This is the command-line interface for the Site-Lingo translation harvester.

use anyhow::{bail, Context};
use clap::Parser;
use site_lingo::config::{load_config_with_hash, Config};
use site_lingo::crawler::{
    build_http_client, fetch_page, run_crawl, InitOutcome, InitRequest, Orchestrator,
};
use site_lingo::gateway::{GoogleTranslateGateway, Translator};
use site_lingo::output::{export_json, import_json, print_statistics, AggregateStatistics};
use site_lingo::page::HtmlDocument;
use site_lingo::storage::{open_storage, SqliteStorage, Storage};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Site-Lingo: a multi-page translation harvester
///
/// Site-Lingo loads the configured pages of a site one after another,
/// collects the elements marked for translation, machine-translates them into
/// the configured languages, and stores the result. Stored translations can
/// then be applied to any page.
#[derive(Parser, Debug)]
#[command(name = "site-lingo")]
#[command(version)]
#[command(about = "A multi-page translation harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Drop stored translation data before crawling
    #[arg(long)]
    fresh: bool,

    /// Collect only the given start page
    #[arg(long)]
    current_page_only: bool,

    /// Page path to start crawling at (defaults to the first configured page)
    #[arg(long, value_name = "PATH", conflicts_with = "apply")]
    start: Option<String>,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with_all = ["stats", "export", "import", "clear", "apply"])]
    dry_run: bool,

    /// Show statistics of the stored translation data and exit
    #[arg(long, conflicts_with_all = ["dry_run", "export", "import", "clear", "apply"])]
    stats: bool,

    /// Write the stored translation data to FILE as JSON and exit
    #[arg(long, value_name = "FILE", conflicts_with_all = ["import", "clear", "apply"])]
    export: Option<PathBuf>,

    /// Store translation data from a JSON FILE as finished and exit
    #[arg(long, value_name = "FILE", conflicts_with_all = ["clear", "apply"])]
    import: Option<PathBuf>,

    /// Drop stored translation data and exit
    #[arg(long, conflicts_with = "apply")]
    clear: bool,

    /// Rewrite a page into the language with this id
    #[arg(long, value_name = "LANG_ID", requires = "page")]
    apply: Option<u32>,

    /// Page path to rewrite
    #[arg(long, value_name = "PATH", requires = "apply")]
    page: Option<String>,

    /// Where to write the rewritten page (stdout by default)
    #[arg(long, value_name = "FILE", requires = "apply")]
    output: Option<PathBuf>,

    /// Google Translate API key (falls back to GOOGLE_TRANSLATE_API_KEY)
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.current_page_only {
        config.crawl.current_page_only = true;
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let mut storage = open_storage(Path::new(&config.storage.database_path))
        .with_context(|| format!("Failed to open {}", config.storage.database_path))?;

    if cli.stats {
        handle_stats(&config, &storage)?;
    } else if let Some(path) = &cli.export {
        handle_export(&storage, path)?;
    } else if let Some(path) = &cli.import {
        import_json(&mut storage, path, &config.session_fingerprint())?;
        println!("✓ Imported translation data from: {}", path.display());
    } else if cli.clear {
        storage.clear_snapshot()?;
        println!("✓ Stored translation data cleared");
    } else if let (Some(language_id), Some(page)) = (cli.apply, &cli.page) {
        handle_apply(config, storage, language_id, page, cli.output.as_deref()).await?;
    } else {
        if cli.fresh {
            tracing::info!("Starting fresh crawl (dropping stored data)");
            storage.clear_snapshot()?;
        }
        handle_crawl(config, storage, cli.api_key, cli.start.as_deref()).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_lingo=info,warn"),
            1 => EnvFilter::new("site_lingo=debug,info"),
            2 => EnvFilter::new("site_lingo=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Site-Lingo Dry Run ===\n");

    println!("Site: {}{}", config.crawl.protocol, config.crawl.host);
    println!("  Current page only: {}", config.crawl.current_page_only);
    println!("  Force re-crawl: {}", config.crawl.force);

    println!("\nPages ({}):", config.crawl.path_names.len());
    for path in &config.crawl.path_names {
        match config.url_for(path) {
            Ok(url) => println!("  - {}", url),
            Err(e) => println!("  - {} (invalid: {})", path, e),
        }
    }

    println!(
        "\nElement selector: {}",
        config.translate_options.element_selector
    );

    println!("\nLanguages ({}):", config.languages.len());
    for lang in &config.languages {
        println!("  - [{}] {} {}", lang.id, lang.code, lang.label);
    }

    println!("\nMachine translation:");
    if config.google_translate.enable {
        println!(
            "  Endpoint: {}{}",
            config.google_translate.proxy_prefix, config.google_translate.endpoint
        );
        match config.google_translate.max_concurrent_requests {
            0 => println!("  Concurrent requests: unbounded"),
            n => println!("  Concurrent requests: {}", n),
        }
    } else {
        println!("  Disabled (placeholders only)");
    }

    println!("\nStorage:");
    println!("  Database: {}", config.storage.database_path);
    println!("  Session: {}", config.session_fingerprint());

    println!("\n✓ Configuration is valid");
}

/// Handles the --stats mode: shows statistics of the stored data
fn handle_stats(config: &Config, storage: &SqliteStorage) -> anyhow::Result<()> {
    println!("Database: {}\n", config.storage.database_path);

    let Some(snapshot) = storage.load_snapshot()? else {
        println!("No translation data stored");
        return Ok(());
    };

    println!("Status: {}", snapshot.status);
    println!("Updated: {}", snapshot.updated_at.to_rfc3339());
    if snapshot.session != config.session_fingerprint() {
        println!("Note: collected with a different configuration");
    }
    println!();

    print_statistics(&AggregateStatistics::from_aggregate(&snapshot.pages));
    Ok(())
}

/// Handles the --export mode: writes stored data as JSON
fn handle_export(storage: &SqliteStorage, path: &Path) -> anyhow::Result<()> {
    let Some(snapshot) = storage.load_snapshot()? else {
        bail!("No translation data stored");
    };
    if !snapshot.status.is_complete() {
        tracing::warn!("Exporting data of an unfinished crawl");
    }

    export_json(&snapshot.pages, path)?;
    println!("✓ Translation data exported to: {}", path.display());
    Ok(())
}

/// Handles the --apply mode: rewrites one page and prints the result
async fn handle_apply(
    mut config: Config,
    storage: SqliteStorage,
    language_id: u32,
    page_path: &str,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    if !storage.load_snapshot()?.is_some_and(|s| s.is_ready()) {
        bail!("No finished translation data to apply; run a crawl or --import first");
    }
    // Applying never re-collects
    config.crawl.force = false;

    let client = build_http_client(&config.user_agent)?;
    let url = config.url_for(page_path)?;
    let html = fetch_page(&client, &url).await?;
    let mut page = HtmlDocument::new(url.as_str(), html);

    let mut orchestrator = Orchestrator::new(Arc::new(config), storage);
    let request = InitRequest::apply(language_id, page_path);

    match orchestrator.init(&request, &mut page).await {
        InitOutcome::Applied(result) => {
            for warning in &result.warnings {
                tracing::warn!("{}", warning);
            }
            for error in &result.errors {
                tracing::error!("{}", error);
            }
            eprintln!("{}", serde_json::to_string_pretty(&result)?);

            match output {
                Some(path) => {
                    std::fs::write(path, page.html())?;
                    println!("✓ Translated page written to: {}", path.display());
                }
                None => println!("{}", page.html()),
            }

            if !result.success {
                bail!("Translation applied with {} errors", result.errors.len());
            }
            Ok(())
        }
        other => bail!("Page was not translated: {}", describe(&other)),
    }
}

/// Handles the main crawl operation
async fn handle_crawl(
    config: Config,
    storage: SqliteStorage,
    api_key: Option<String>,
    start: Option<&str>,
) -> anyhow::Result<()> {
    tracing::info!(
        "Pages: {}, Languages: {}, Machine translation: {}",
        config.crawl.path_names.len(),
        config.languages.len(),
        if config.google_translate.enable { "on" } else { "off" }
    );

    let client = build_http_client(&config.user_agent)?;
    let config = Arc::new(config);
    let mut orchestrator = Orchestrator::new(Arc::clone(&config), storage);

    if config.google_translate.enable {
        let gateway = match api_key {
            Some(key) => GoogleTranslateGateway::new(key, &config.google_translate)?,
            None => GoogleTranslateGateway::from_env(&config.google_translate)?,
        };
        tracing::info!("Using {} for translations", gateway.provider_name());
        orchestrator = orchestrator.with_translator(Arc::new(gateway));
    }

    let outcome = run_crawl(&mut orchestrator, &client, start).await?;
    match outcome {
        InitOutcome::Collected(data) => {
            let stats = AggregateStatistics::from_aggregate(&data.translation_data);
            tracing::info!("Crawl completed successfully");
            print_statistics(&stats);
            Ok(())
        }
        InitOutcome::Stalled { path, missing } => {
            for m in &missing {
                tracing::error!(
                    "Missing element #{} ('{}') in language {}: {}",
                    m.element_index,
                    m.element_id,
                    m.language_id,
                    m.reason
                );
            }
            bail!(
                "Crawl stalled on {}: {} translations missing",
                path,
                missing.len()
            )
        }
        other => bail!("Crawl ended early: {}", describe(&other)),
    }
}

fn describe(outcome: &InitOutcome) -> String {
    match outcome {
        InitOutcome::Navigate { url } => format!("navigation to {}", url),
        InitOutcome::Idle { path } => format!("idle after {}", path),
        InitOutcome::Collected(data) => {
            format!("collected {} pages", data.translation_data.len())
        }
        InitOutcome::Applied(result) => format!("applied {} elements", result.applied),
        InitOutcome::NotApplied { message, .. } => message.clone(),
        InitOutcome::Stalled { path, missing } => {
            format!("stalled on {} ({} missing)", path, missing.len())
        }
        InitOutcome::Aborted { reason } => format!("aborted: {}", reason),
    }
}
