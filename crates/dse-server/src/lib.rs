//! HTTP gateway for the DSE Survival Kit.
//!
//! Wraps the [`dse_api`] router with everything deployment-specific: the
//! health check, CORS, the request body limit, and request tracing. A single
//! [`ServerConfig`] covers local and hosted deployments.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::{
  Router,
  extract::DefaultBodyLimit,
  http::{HeaderValue, Method, header},
  routing::get,
};
use dse_core::store::StudyStore;
use serde::Deserialize;
use tokio::signal;
use tower_http::{
  cors::{AllowOrigin, Any, CorsLayer},
  trace::TraceLayer,
};

/// Body of `GET /`.
pub const HEALTH_MESSAGE: &str = "DSE Survival Kit API is Running!";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and the
/// environment. Every field has a default.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  /// SQLite file, or `:memory:` for a throwaway store.
  pub store_path:      PathBuf,
  pub pool_size:       u32,
  /// Largest accepted request body in bytes. Question images travel inline
  /// as base64, so this is generous.
  pub body_limit:      usize,
  pub allowed_origins: AllowedOrigins,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:            "0.0.0.0".to_string(),
      port:            3000,
      store_path:      PathBuf::from("dse.sqlite3"),
      pool_size:       dse_store_sqlite::DEFAULT_POOL_SIZE,
      body_limit:      50 * 1024 * 1024,
      allowed_origins: AllowedOrigins::Any,
    }
  }
}

/// Browser origins allowed to call the API.
///
/// Deserialises from `"*"`, a single origin, or a list of origins. A list
/// containing `"*"` allows any origin.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "OriginsRepr")]
pub enum AllowedOrigins {
  #[default]
  Any,
  List(Vec<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OriginsRepr {
  One(String),
  Many(Vec<String>),
}

impl From<OriginsRepr> for AllowedOrigins {
  fn from(repr: OriginsRepr) -> Self {
    let origins = match repr {
      OriginsRepr::One(origin) => vec![origin],
      OriginsRepr::Many(origins) => origins,
    };
    if origins.iter().any(|o| o.trim() == "*") {
      AllowedOrigins::Any
    } else {
      AllowedOrigins::List(origins.into_iter().map(|o| o.trim().to_string()).collect())
    }
  }
}

/// Load [`ServerConfig`] from the TOML file at `path` and the process
/// environment. See [`load_config_from`] for the layering.
pub fn load_config(path: &Path) -> anyhow::Result<ServerConfig> {
  load_config_from(path, std::env::vars().collect())
}

/// Load [`ServerConfig`] in three layers, later ones winning:
///
/// 1. the TOML file at `path`, if it exists;
/// 2. `DSE_*` variables from `env` (`DSE_ALLOWED_ORIGINS` is split on commas);
/// 3. a bare `PORT` from `env`, as set by hosting platforms.
pub fn load_config_from(
  path: &Path,
  env:  config::Map<String, String>,
) -> anyhow::Result<ServerConfig> {
  let port = env.get("PORT").cloned();

  let settings = config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(
      config::Environment::with_prefix("DSE")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("allowed_origins")
        .source(Some(env)),
    )
    .set_override_option("port", port)
    .context("failed to apply PORT override")?
    .build()
    .with_context(|| format!("failed to read config file {}", path.display()))?;

  settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application: `GET /` plus the API under `/api`.
pub fn router<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: StudyStore + 'static,
{
  Router::new()
    .route("/", get(health))
    .nest("/api", dse_api::api_router(store))
    .layer(DefaultBodyLimit::max(config.body_limit))
    .layer(cors_layer(&config.allowed_origins))
    .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str { HEALTH_MESSAGE }

fn cors_layer(origins: &AllowedOrigins) -> CorsLayer {
  let layer = CorsLayer::new()
    .allow_methods([
      Method::GET,
      Method::POST,
      Method::PUT,
      Method::DELETE,
      Method::OPTIONS,
    ])
    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

  match origins {
    AllowedOrigins::Any => layer.allow_origin(Any),
    AllowedOrigins::List(list) => {
      let values = list.iter().filter_map(|origin| {
        HeaderValue::from_str(origin)
          .inspect_err(|_| tracing::warn!(origin = %origin, "ignoring invalid CORS origin"))
          .ok()
      });
      layer.allow_origin(AllowOrigin::list(values))
    }
  }
}

// ─── Shutdown ─────────────────────────────────────────────────────────────────

/// Resolve on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = signal::ctrl_c().await {
      tracing::error!(error = %e, "failed to listen for Ctrl+C");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match signal::unix::signal(signal::unix::SignalKind::terminate()) {
      Ok(mut sigterm) => {
        sigterm.recv().await;
      }
      Err(e) => {
        tracing::error!(error = %e, "failed to listen for SIGTERM");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => tracing::info!("received Ctrl+C, draining requests"),
    _ = terminate => tracing::info!("received SIGTERM, draining requests"),
  }
}

// ─── Integration tests ────────────────────────────────────────────────────────
