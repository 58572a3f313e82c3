// src/lib.rs

pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fs;
pub mod graph;
pub mod logging;
pub mod progress;
pub mod report;
pub mod types;

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use crate::catalog::{filter_by_major, load_catalog, subjects, Catalog, Course};
use crate::cli::{CliArgs, Command, OutputFormat};
use crate::config::{load_or_default, ConfigFile};
use crate::engine::{CoreSession, Runtime, SessionEvent};
use crate::errors::CoursedagError;
use crate::fs::{FileSystem, RealFileSystem};
use crate::graph::LayoutOptions;
use crate::progress::{CompletionStore, FileStore, MemoryStore};
use crate::types::StorageMode;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading and CLI overrides
/// - catalog loading and major filtering
/// - the completed-set store
/// - the session runtime for the chosen subcommand
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let mut cfg = load_or_default(&config_path)?;
    apply_overrides(&mut cfg, &args);

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let all_courses = load_courses(fs.as_ref(), &cfg)?;
    let courses = filter_by_major(all_courses.clone(), cfg.catalog.major.as_deref());
    info!(
        loaded = all_courses.len(),
        kept = courses.len(),
        major = cfg.catalog.major.as_deref().unwrap_or("<all>"),
        "catalog ready"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.dry_run {
        let catalog = Catalog::new(courses);
        report::write_dry_run(&mut out, &cfg, &all_courses, &catalog)?;
        debug!("dry-run complete (nothing persisted)");
        return Ok(());
    }

    match args.command {
        Command::Majors => {
            report::write_majors(&mut out, &subjects(&all_courses))?;
        }
        Command::Cycles => {
            let catalog = Catalog::new(courses);
            report::write_cycles(&mut out, &catalog.prerequisite_cycles())?;
        }
        Command::Layout { format } => {
            let runtime = start_session(&cfg, fs, courses)?;
            let core = runtime.core();
            match format {
                OutputFormat::Json => {
                    report::write_layout_json(&mut out, core.layout(), core.catalog())?
                }
                OutputFormat::Text => report::write_layout_text(&mut out, core.layout())?,
            }
        }
        Command::Status { id } => {
            let runtime = start_session(&cfg, fs, courses)?;
            let core = runtime.core();
            match id {
                Some(id) => {
                    let course = core
                        .catalog()
                        .get(&id)
                        .ok_or_else(|| CoursedagError::UnknownCourse(id.clone()))?;
                    let status = graph::classify(course, core.completed());
                    report::write_course(&mut out, course, status, core.levels().level_of(&id))?;
                }
                None => report::write_statuses(&mut out, core)?,
            }
        }
        Command::Toggle { ids } => {
            let runtime = start_session(&cfg, fs, courses)?;
            for id in ids.iter().filter(|id| !runtime.core().catalog().contains(id)) {
                warn!(course = %id, "toggling a course outside the loaded catalog");
            }
            drop(out);
            let core = toggle_all(runtime, ids).await?;
            report::write_statuses(&mut io::stdout().lock(), &core)?;
        }
    }

    Ok(())
}

/// CLI flags win over config values.
fn apply_overrides(cfg: &mut ConfigFile, args: &CliArgs) {
    if let Some(ref catalog) = args.catalog {
        cfg.catalog.path = Some(catalog.clone());
    }
    if let Some(ref major) = args.major {
        let major = major.trim();
        cfg.catalog.major = (!major.is_empty()).then(|| major.to_string());
    }
    if let Some(ref progress) = args.progress {
        cfg.progress.path = progress.clone();
        cfg.progress.storage = StorageMode::File;
    }
}

fn load_courses(fs: &dyn FileSystem, cfg: &ConfigFile) -> Result<Vec<Course>> {
    let path = cfg.catalog.path.as_ref().ok_or_else(|| {
        CoursedagError::ConfigError(
            "no catalog file given; pass --catalog or set [catalog].path".to_string(),
        )
    })?;
    Ok(load_catalog(fs, path)?)
}

fn build_store(cfg: &ConfigFile, fs: Arc<dyn FileSystem>) -> Box<dyn CompletionStore> {
    match cfg.progress.storage {
        StorageMode::File => Box::new(FileStore::new(fs, cfg.progress.path.clone())),
        StorageMode::Memory => Box::new(MemoryStore::new()),
    }
}

/// Build the session: load courses, then hydrate the completed set.
fn start_session(
    cfg: &ConfigFile,
    fs: Arc<dyn FileSystem>,
    courses: Vec<Course>,
) -> Result<Runtime<Box<dyn CompletionStore>>> {
    let options = LayoutOptions::from_section(&cfg.layout)?;
    let mut runtime = Runtime::new(CoreSession::new(options), build_store(cfg, fs));
    runtime.handle(SessionEvent::CoursesLoaded(courses))?;
    runtime.hydrate()?;
    Ok(runtime)
}

/// Feed every toggle through the session event loop, printing one line per
/// notification as it arrives.
async fn toggle_all<S>(runtime: Runtime<S>, ids: Vec<String>) -> Result<CoreSession>
where
    S: CompletionStore + 'static,
{
    let mut notifications = runtime.subscribe();
    let (tx, rx) = mpsc::channel::<SessionEvent>(64);

    let session = tokio::spawn(runtime.run(rx));
    let printer = tokio::spawn(async move {
        loop {
            match notifications.recv().await {
                Ok(event) => {
                    if let Err(e) = report::write_toggle(&mut io::stdout().lock(), &event) {
                        warn!(error = %e, "failed to print toggle notification");
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "toggle printer fell behind");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    for id in ids {
        if tx.send(SessionEvent::ToggleRequested { id }).await.is_err() {
            // The session stopped early; its error is reported below.
            break;
        }
    }
    drop(tx);

    let core = session.await.context("session task panicked")??;
    printer.await.context("notification printer panicked")?;
    io::stdout().flush()?;
    Ok(core)
}
