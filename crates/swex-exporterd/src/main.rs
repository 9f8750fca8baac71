use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use swex_api::{HttpApi, METRICS_PATH};
use swex_core::{Reconciler, Scheduler};
use swex_docker::DockerClient;
use swex_observe::init_logger;
use swex_prometheus::PrometheusGauges;

mod config;
use config::ExporterConfig;

fn main() -> anyhow::Result<()> {
    // 1) config + logger, before any runtime thread exists
    let cfg = ExporterConfig::from_env().context("invalid configuration")?;
    init_logger(&cfg.logger)?;
    info!(
        port = cfg.port,
        poll_interval_s = cfg.poll_interval.as_secs(),
        docker = %cfg.docker.endpoint,
        "logger initialized"
    );

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?
        .block_on(run(cfg))
}

async fn run(cfg: ExporterConfig) -> anyhow::Result<()> {
    // 2) orchestrator client + gauge store
    let docker = DockerClient::new(cfg.docker.clone()).context("failed to initialize docker client")?;
    let gauges = Arc::new(PrometheusGauges::new().context("failed to register gauges")?);

    // 3) scrape listener
    let listener = TcpListener::bind(cfg.listen_addr())
        .await
        .with_context(|| format!("failed to bind {}", cfg.listen_addr()))?;
    info!(addr = %listener.local_addr()?, path = METRICS_PATH, "serving metrics");

    // 4) poller
    let cancel = CancellationToken::new();
    let scheduler = Scheduler::new(Reconciler::new(Arc::new(docker), gauges.clone()), cfg.poll_interval);
    let poller = tokio::spawn(scheduler.run(cancel.clone()));
    tokio::spawn(cancel_on_signal(cancel.clone()));

    // 5) serve until cancelled
    let app = HttpApi::new(gauges).router();
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(cancel.clone().cancelled_owned())
        .await;

    cancel.cancel();
    let cycles = poller.await.context("poller task panicked")?;
    served.context("metrics server failed")?;

    info!(cycles, "exporter stopped");
    Ok(())
}

/// Cancel `cancel` on SIGINT or SIGTERM.
async fn cancel_on_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
        _ = cancel.cancelled() => return,
    }
    info!("shutdown requested");
    cancel.cancel();
}
