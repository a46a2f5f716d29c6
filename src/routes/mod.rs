// HTTP routes: one OpenMetrics endpoint per resource

mod http;
mod metrics;

use axum::{Router, http::StatusCode, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::docker_repo::DockerRepo;
use crate::hwmon_repo::HwmonRepo;
use crate::sysinfo_repo::SysinfoRepo;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) docker_repo: Arc<DockerRepo>,
    pub(crate) hwmon_repo: Arc<HwmonRepo>,
    pub(crate) sysinfo_repo: Arc<SysinfoRepo>,
}

pub fn app(
    docker_repo: Arc<DockerRepo>,
    hwmon_repo: Arc<HwmonRepo>,
    sysinfo_repo: Arc<SysinfoRepo>,
) -> Router {
    let state = AppState {
        docker_repo,
        hwmon_repo,
        sysinfo_repo,
    };
    Router::new()
        .route("/docker", get(metrics::docker_handler)) // GET /docker
        .route("/hwmon", get(metrics::hwmon_handler)) // GET /hwmon
        .route("/sysinfo", get(metrics::sysinfo_handler)) // GET /sysinfo
        .route("/version", get(http::version_handler)) // GET /version
        .fallback(|| async { (StatusCode::NOT_FOUND, "Not found") })
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
