use anyhow::Result;
use clap::Parser;
use log::{error, info};
use strategy_builder::builder::StrategyBuilder;
use strategy_builder::canvas::palette::{print_component_help, Palette};
use strategy_builder::client::{HttpBackend, SubmitAction};
use strategy_builder::config::builder::BuilderConfig;
use strategy_builder::config::creator::run_builder;
use strategy_builder::config::load_config;
use strategy_builder::draft::load_draft;
use strategy_builder::logging::submission_audit::SubmissionAuditLogger;
use strategy_builder::notify::ConsoleNotifier;
use strategy_builder::ui::console::ConsoleRenderer;

#[derive(Parser, Debug)]
#[command(author, version, about = "Trading Strategy Builder", long_about = None)]
struct Args {
    /// Builder configuration (TOML)
    #[arg(short, long)]
    config: Option<String>,

    #[arg(short, long)]
    list_components: bool,

    /// Build a strategy interactively
    #[arg(long)]
    create: bool,

    /// Check a draft file and print its document
    #[arg(long, value_name = "DRAFT")]
    validate: Option<String>,

    /// Submit a draft file to the save endpoint
    #[arg(long, value_name = "DRAFT")]
    save: Option<String>,

    /// Submit a draft file to the deploy endpoint
    #[arg(long, value_name = "DRAFT", conflicts_with = "save")]
    deploy: Option<String>,

    #[arg(long)]
    backend_url: Option<String>,

    /// Strategy name for a new interactive session
    #[arg(long)]
    name: Option<String>,
}

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => BuilderConfig::default(),
    }
    .with_env_overrides();

    // ---------------------------------------------------------
    // Logging: console (env filter) + daily file
    // ---------------------------------------------------------
    let file_appender = tracing_appender::rolling::daily(&config.audit_dir, "application.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into())
                .add_directive("strategy_builder=info".parse()?),
        );

    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_target(false)
        .with_filter(tracing_subscriber::EnvFilter::new("info,strategy_builder=debug"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();

    if args.list_components {
        print_component_help(&Palette::default());
        return Ok(());
    }

    if let Some(path) = &args.validate {
        let strategy = load_draft(path)?;
        info!("Draft {} is valid", path);
        ConsoleRenderer::render_document(&strategy);
        return Ok(());
    }

    let backend_url = args.backend_url.clone().unwrap_or(config.backend_url.clone());
    let audit = match SubmissionAuditLogger::new(&config.audit_dir) {
        Ok(l) => Some(l),
        Err(e) => {
            error!("Failed to initialize Submission Audit Logger: {}", e);
            None
        }
    };

    let mut builder = StrategyBuilder::new(
        Box::new(HttpBackend::new(backend_url.clone())),
        args.name.clone().unwrap_or(config.strategy_name.clone()),
    )
    .with_properties(config.initial_properties())
    .with_audit(audit);
    let mut notifier = ConsoleNotifier;

    let submission = match (&args.save, &args.deploy) {
        (Some(path), _) => Some((SubmitAction::Save, path)),
        (_, Some(path)) => Some((SubmitAction::Deploy, path)),
        _ => None,
    };
    if let Some((action, path)) = submission {
        let strategy = load_draft(path)?;
        builder.load_strategy(&strategy)?;
        info!("Submitting draft {} to {} ({})", path, backend_url, action);
        if builder.submit(action, &mut notifier).await.is_err() {
            std::process::exit(1);
        }
        return Ok(());
    }

    if args.create {
        info!("Starting interactive builder (backend: {})", backend_url);
        if let Err(e) = run_builder(&mut builder, &mut notifier).await {
            error!("Error in strategy builder: {}", e);
            std::process::exit(1);
        }
        return Ok(());
    }

    Err(anyhow::anyhow!(
        "Nothing to do: use --create, --save, --deploy, --validate or --list-components"
    ))
}
