//! `serve` command: wires configuration, stores and the router together
//! and runs the HTTP server until shutdown.

use std::sync::Arc;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::auth::{SessionPolicy, StaticCredentials};
use crate::cli::args::ServeArgs;
use crate::config::{ConfigLoader, LoadWarning, SiteConfig, Validator};
use crate::content::{ContentService, DocumentStore, JsonFileStore};
use crate::error::{ConfigError, FolioError};
use crate::http::{self, AppState};
use crate::observability::{Event, EventEmitter, init_metrics};
use crate::uploads::UploadStore;

/// Start the content API.
///
/// # Errors
///
/// Returns a config error if the configuration is invalid, an I/O error
/// if the events file cannot be opened, or a server error if binding or
/// serving fails.
pub async fn run(args: &ServeArgs, cancel: CancellationToken) -> Result<(), FolioError> {
    let config = resolve_config(args)?;

    if let Some(port) = args.metrics_port {
        init_metrics(Some(port))?;
        info!(port, "Prometheus metrics endpoint started");
    }

    let store = JsonFileStore::new(&config.storage.content_path);
    if !store.exists().await {
        warn!(
            path = %store.path().display(),
            "content document not found; run `folio init` to create it"
        );
    }
    let content_location = store.location();

    let events = Arc::new(match args.events_file {
        Some(ref path) => EventEmitter::from_file(path)?,
        None => EventEmitter::noop(),
    });

    let state = AppState {
        content: Arc::new(ContentService::new(Arc::new(store))),
        uploads: Arc::new(UploadStore::new(
            &config.storage.uploads_dir,
            config.storage.uploads_url.clone(),
        )),
        credentials: Arc::new(StaticCredentials::new(
            config.admin.username.clone(),
            config.admin.password.clone(),
        )),
        session: SessionPolicy::new(config.session_ttl(), config.session.secure_cookie),
        events: Arc::clone(&events),
    };
    let router = http::build_router(state, config.server.max_upload_bytes);

    let (listener, bound_addr) = http::bind(&config.server.bind).await?;
    info!(%bound_addr, content = %content_location, "HTTP server listening");
    events.emit(Event::ServerStarted {
        timestamp: Utc::now(),
        bind: bound_addr.to_string(),
        content: content_location,
    });

    let result = http::serve(listener, router, cancel).await;

    events.emit(Event::ServerStopped {
        timestamp: Utc::now(),
        reason: match result {
            Ok(()) => "shutdown".to_string(),
            Err(ref e) => e.to_string(),
        },
    });
    info!("server stopped");
    result.map_err(Into::into)
}

/// Builds the effective configuration: defaults, then the config file,
/// then command-line and environment overrides. The merged result is
/// validated again since overrides can break it.
///
/// # Errors
///
/// Returns a config error if the file fails to load or the merged
/// configuration is invalid.
pub fn resolve_config(args: &ServeArgs) -> Result<SiteConfig, FolioError> {
    let mut warnings = Vec::new();
    let mut config = match args.config {
        Some(ref path) => {
            info!(config = %path.display(), "loading configuration");
            let loaded = ConfigLoader::default().load(path)?;
            warnings.extend(loaded.warnings.iter().map(ToString::to_string));
            loaded.config
        }
        None => SiteConfig::default(),
    };

    apply_overrides(&mut config, args);

    let result = Validator::new().validate(&config);
    if result.has_errors() {
        return Err(ConfigError::ValidationError {
            path: args.config.as_ref().map_or_else(
                || "<command line>".to_string(),
                |p| p.display().to_string(),
            ),
            errors: result.errors,
        }
        .into());
    }
    for issue in result.warnings {
        let warning = LoadWarning {
            message: issue.message,
            location: Some(issue.path),
        }
        .to_string();
        if !warnings.contains(&warning) {
            warnings.push(warning);
        }
    }

    for warning in &warnings {
        warn!("{warning}");
    }
    Ok(config)
}

/// Applies flag and environment values over the loaded configuration.
pub fn apply_overrides(config: &mut SiteConfig, args: &ServeArgs) {
    if let Some(ref bind) = args.bind {
        config.server.bind.clone_from(bind);
    }
    if let Some(ref content) = args.content {
        config.storage.content_path.clone_from(content);
    }
    if let Some(ref uploads) = args.uploads {
        config.storage.uploads_dir.clone_from(uploads);
    }
    if let Some(ref username) = args.admin_username {
        config.admin.username.clone_from(username);
    }
    if let Some(ref password) = args.admin_password {
        config.admin.password.clone_from(password);
    }
}
