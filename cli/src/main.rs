//! CLI entrypoint for editsave
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use editsave_application::{
    ActionContext, DialogService, LazyObjectService, NoSaveEventLogger, ObjectService, SaveAction,
    SaveEventLogger, SaveServices,
};
use editsave_domain::{ObjectHandle, ObjectId};
use editsave_infrastructure::{
    ConfigLoader, EditSessionFactory, FileConfig, InMemoryObjectStore, JsonlSaveEventLogger,
    NavigationTracker, Severity, StoreCopyService, WorkspaceFile,
};
use editsave_presentation::{
    Cli, Command, ConsoleDialog, ConsoleFormatter, OutputConfig, PresetDialog, SaveReport,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered file logs are flushed
    let _log_guard = init_tracing(&cli);

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    check_config(&config)?;

    let Some(command) = cli.command.clone() else {
        bail!("No command given. Run `editsave --help` for usage.");
    };

    let output = OutputConfig {
        format: config.output.format,
        color: config.output.color,
    };
    output.apply_color();

    info!("Starting editsave");

    // === Dependency Injection ===
    let navigation = Arc::new(NavigationTracker::new());
    let store = Arc::new(open_store(&config, Arc::clone(&navigation))?);
    let policy = Arc::new(config.policy.to_policy());
    let copy = Arc::new(StoreCopyService::new(Arc::clone(&store), policy.clone()));

    let dialog: Arc<dyn DialogService> = match &command {
        Command::Create { yes: false, .. } => Arc::new(ConsoleDialog::new()),
        Command::Create {
            name: Some(name), ..
        } => Arc::new(PresetDialog::with_name(name.clone())),
        _ => Arc::new(PresetDialog::default()),
    };

    let events: Arc<dyn SaveEventLogger> = match &config.logging.events {
        Some(path) => match JsonlSaveEventLogger::new(path) {
            Some(logger) => {
                info!("Logging save events to {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoSaveEventLogger),
        },
        None => Arc::new(NoSaveEventLogger),
    };

    let lookup = Arc::clone(&store);
    let services = SaveServices::new(
        LazyObjectService::new(move || Arc::clone(&lookup) as Arc<dyn ObjectService>),
        dialog,
        copy,
        policy,
    )
    .with_event_logger(events);

    let factory = EditSessionFactory::new(Arc::clone(&store));
    let (label, object) = open_for_editing(&factory, command)?;

    let context = ActionContext::new(object);
    if !SaveAction::applies_to(Some(&context)) {
        bail!("Object is not being edited, nothing to save");
    }

    let saved = SaveAction::new(Arc::new(services), context)
        .with_behavior(config.save.to_behavior())
        .perform()
        .await?;

    if saved.is_some()
        && config.workspace.write_back
        && let Some(path) = &config.workspace.path
    {
        store.to_workspace().save(path)?;
        info!("Wrote workspace to {}", path.display());
    }

    if !cli.quiet {
        let report = SaveReport::new(label, saved.as_deref(), navigation.current());
        let format = output.effective_format(cli.output.map(Into::into));
        println!("{}", ConsoleFormatter::render(&report, format));
    }

    Ok(())
}

fn init_tracing(cli: &Cli) -> Option<WorkerGuard> {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let console = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(console);

    match &cli.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "editsave.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            registry
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            registry.init();
            None
        }
    }
}

/// Log every config issue; fail on errors.
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Error => error!("{}", issue.message),
            Severity::Warning => warn!("{}", issue.message),
        }
    }

    let errors = issues.iter().filter(|i| i.is_error()).count();
    if errors > 0 {
        bail!("Configuration has {} error(s)", errors);
    }
    Ok(())
}

fn open_store(
    config: &FileConfig,
    navigation: Arc<NavigationTracker>,
) -> Result<InMemoryObjectStore> {
    let mut store = InMemoryObjectStore::new(navigation).with_types(config.types.iter().cloned());

    if let Some(path) = &config.workspace.path {
        if path.exists() {
            store = store.with_workspace(WorkspaceFile::load(path)?);
        } else {
            info!("Workspace {} does not exist yet, starting empty", path.display());
        }
    }

    store.ensure_folder(&config.workspace.root, "My Items");
    Ok(store)
}

fn open_for_editing(
    factory: &EditSessionFactory,
    command: Command,
) -> Result<(&'static str, ObjectHandle)> {
    match command {
        Command::Create {
            type_key,
            parent,
            name,
            yes,
        } => {
            let parent: ObjectId = parent.parse().context("Invalid --parent")?;
            let object = factory.create(&type_key, &parent)?;
            // Interactive forms start from the object's title; presets carry it themselves.
            if let (Some(name), false) = (name, yes) {
                object.mutate(|model| model.name = name);
            }
            Ok(("create", object))
        }
        Command::Edit { id, name } => {
            let id: ObjectId = id.parse().context("Invalid --id")?;
            let object = factory.edit(&id)?;
            object.mutate(|model| model.name = name);
            Ok(("edit", object))
        }
    }
}
