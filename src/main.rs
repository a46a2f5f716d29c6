use anyhow::Result;
use host_exporter::command::{CommandRunner, ProcessRunner};
use host_exporter::docker_repo::DockerRepo;
use host_exporter::hwmon_repo::HwmonRepo;
use host_exporter::sysinfo_repo::SysinfoRepo;
use host_exporter::{config, routes};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;

    let runner: Arc<dyn CommandRunner> =
        Arc::new(ProcessRunner::new(app_config.commands.timeout()));
    let docker_repo = Arc::new(DockerRepo::new(runner.clone(), &app_config.docker.binary));
    let hwmon_repo = Arc::new(HwmonRepo::new(
        runner,
        &app_config.hwmon.binary,
        app_config.hwmon.sensors.clone(),
    ));
    let sysinfo_repo = Arc::new(SysinfoRepo::new());

    let app = routes::app(docker_repo, hwmon_repo, sysinfo_repo);
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        "Listening on http://{} (command timeout {}ms)",
        addr,
        app_config.commands.timeout_ms
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("Received shutdown signal");
}
