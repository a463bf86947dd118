//! gaugedir exporter
//!
//! Startup sequence:
//! - load config (strict YAML, path from argv[1] or `gaugedir.yaml`)
//! - baseline scan of the watched directory (fatal on enumeration error)
//! - notify watcher bridged into the synchronizer task
//! - axum exposition endpoint at the configured metrics path

use std::net::SocketAddr;
use std::path::PathBuf;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, EnvFilter};

use gaugedir_exporter::{app_state, config, router, watch};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg_path = std::env::args().nth(1).unwrap_or_else(|| "gaugedir.yaml".to_string());
    let cfg = config::load_from_file(&cfg_path).expect("config load failed");
    let listen: SocketAddr = cfg
        .exporter
        .listen
        .parse()
        .expect("exporter.listen must be a valid SocketAddr");
    let metrics_dir = PathBuf::from(&cfg.exporter.metrics_dir);

    let state = app_state::AppState::new(cfg).expect("state init failed");

    // Baseline: the exporter cannot start without a readable directory.
    let sync = watch::Synchronizer::new(state.store());
    let seen = sync.scan(&metrics_dir).expect("initial directory scan failed");
    tracing::info!(dir = %metrics_dir.display(), entries = seen, "initial scan complete");

    let (tx, rx) = mpsc::channel(1024);
    // Must stay alive for the process lifetime; dropping it stops the watch.
    let _watcher = watch::spawn_watcher(&metrics_dir, tx).expect("watcher init failed");
    let shutdown = CancellationToken::new();
    tokio::spawn(sync.run(rx, shutdown.clone()));

    let app = router::build_router(state);

    tracing::info!(%listen, dir = %metrics_dir.display(), "watching for metrics");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
