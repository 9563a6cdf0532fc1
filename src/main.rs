use axum::{
    extract::State,
    middleware::from_fn,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use clap::Parser;
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod aries;
mod config;
mod error;
mod middleware;
mod models;
mod resolver;
mod solr;
#[cfg(test)]
mod test_support;

use config::Config;
use resolver::{Resolver, SiteLinks};
use solr::SolrClient;

#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    resolver: Arc<Resolver>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let solr = SolrClient::new(&config)?;
        let links = SiteLinks::new(&config.virgo_url)?;
        Ok(Self {
            config: Arc::new(config),
            resolver: Arc::new(Resolver::new(solr, links)),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aries_virgo=debug,axum=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("===> Aries Virgo service starting up <===");

    let config = Config::parse().validate()?;
    info!(
        solr_url = %config.solr_url,
        solr_core = %config.solr_core,
        virgo_url = %config.virgo_url,
        "Configuration loaded"
    );

    let state = AppState::new(config)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let app = app(state);

    info!("Start Aries Virgo v{} on {}", env!("CARGO_PKG_VERSION"), addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/favicon.ico", get(favicon))
        .route("/version", get(version))
        .route("/healthcheck", get(healthcheck))
        .nest("/api/aries", aries::routes())
        .layer(from_fn(middleware::log_request))
        .with_state(state)
}

async fn favicon() {}

async fn version() -> String {
    format!("Aries Virgo version {}", env!("CARGO_PKG_VERSION"))
}

/// Report service health and whether Solr answers a minimal query
async fn healthcheck(State(state): State<AppState>) -> impl IntoResponse {
    let solr_alive = match state.resolver.solr().ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Solr health check failed: {}", e);
            false
        }
    };

    let mut report = BTreeMap::new();
    report.insert("AriesVirgo", "true".to_string());
    report.insert("Virgo", solr_alive.to_string());
    Json(report)
}
