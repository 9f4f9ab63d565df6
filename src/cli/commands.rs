//! CLI command implementations
//!
//! Each command loads the site configuration first. Relative content paths
//! are resolved against the directory holding the config file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::config::SiteConfig;
use crate::http_server::{HttpServer, SiteState};
use crate::observability::{self, Event};
use crate::schema::{CollectionKind, ContentLoader, SiteContent};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{write_json_line, write_response};

/// Run a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Init { config } => init(&config),
        Command::Check { config } => check(&config),
        Command::Serve { config, port } => serve(&config, port),
    }
}

/// Directory relative content paths are resolved against
fn base_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn load_config(config_path: &Path) -> CliResult<SiteConfig> {
    let config = SiteConfig::load(config_path)?;
    tracing::info!(
        event = Event::ConfigLoaded.as_str(),
        path = %config_path.display(),
        blog_enabled = config.blog.enabled,
        strict = config.content.strict,
    );
    Ok(config)
}

fn loader_for(config: &SiteConfig, config_path: &Path) -> ContentLoader {
    ContentLoader::new(config.content_dir(&base_dir(config_path))).with_strict(config.content.strict)
}

#[derive(Debug, Serialize)]
struct InitSummary {
    config: PathBuf,
    content_dir: PathBuf,
}

/// Write a default config and create one directory per collection.
///
/// Fails if the config file already exists.
pub fn init(config_path: &Path) -> CliResult<()> {
    if config_path.exists() {
        return Err(CliError::already_initialized(config_path.display()));
    }

    let config = SiteConfig::default();
    let content_dir = config.content_dir(&base_dir(config_path));
    for kind in CollectionKind::ALL {
        fs::create_dir_all(content_dir.join(kind.as_str()))?;
    }
    fs::write(config_path, config.to_pretty_json()?)?;

    write_response(&InitSummary {
        config: config_path.to_path_buf(),
        content_dir,
    })
}

#[derive(Debug, Serialize)]
struct CheckSummary {
    education: usize,
    experience: usize,
    posts: usize,
    resume: usize,
}

impl From<&SiteContent> for CheckSummary {
    fn from(content: &SiteContent) -> Self {
        Self {
            education: content.education.len(),
            experience: content.experience.len(),
            posts: content.posts.len(),
            resume: content.resume.len(),
        }
    }
}

/// Validate every content file.
///
/// Prints one JSON line per diagnostic. Any diagnostic makes the command
/// fail, whatever the configured strictness.
pub fn check(config_path: &Path) -> CliResult<()> {
    let config = load_config(config_path)?;
    let loader = loader_for(&config, config_path);

    let diagnostics = loader.check_all()?;
    if !diagnostics.is_empty() {
        let mut stdout = io::stdout();
        for diagnostic in &diagnostics {
            write_json_line(&mut stdout, diagnostic)?;
        }
        return Err(CliError::invalid_content(diagnostics.len()));
    }

    let content = loader.with_strict(true).load()?;
    write_response(&CheckSummary::from(&content))
}

/// Load content, then serve until the process is stopped.
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    observability::log_event(Event::BootStart);

    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }

    let content = loader_for(&config, config_path).load()?;
    let state = Arc::new(SiteState::new(config, content));
    let server = HttpServer::new(state);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime
        .block_on(server.start())
        .map_err(|e| CliError::serve_failed(e.to_string()))
}
