// GET /docker, /hwmon, /sysinfo: run one adapter, map its records to metric families.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::AppState;
use crate::error::AdapterError;
use crate::metrics::{InfoRecord, Labels, MetricDescriptor, OpenMetrics, Sample, Unit};
use crate::models::{Container, HostInfo, Temperature};

/// Adapter failure surfaced as 5xx; the body is the error text, never a metrics document.
pub(super) struct ScrapeError {
    endpoint: &'static str,
    error: AdapterError,
}

impl IntoResponse for ScrapeError {
    fn into_response(self) -> Response {
        tracing::error!(endpoint = self.endpoint, error = %self.error, "scrape failed");
        let status = if self.error.is_timeout() {
            StatusCode::GATEWAY_TIMEOUT
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, self.error.to_string()).into_response()
    }
}

fn scrape_error(endpoint: &'static str) -> impl FnOnce(AdapterError) -> ScrapeError {
    move |error| ScrapeError { endpoint, error }
}

pub(super) async fn docker_handler(
    State(state): State<AppState>,
) -> Result<OpenMetrics, ScrapeError> {
    let containers = state
        .docker_repo
        .list_containers()
        .await
        .map_err(scrape_error("docker"))?;
    Ok(docker_metrics(&containers))
}

pub(super) async fn hwmon_handler(
    State(state): State<AppState>,
) -> Result<OpenMetrics, ScrapeError> {
    let temperatures = state
        .hwmon_repo
        .get_temperatures()
        .await
        .map_err(scrape_error("hwmon"))?;
    Ok(hwmon_metrics(&temperatures))
}

pub(super) async fn sysinfo_handler(
    State(state): State<AppState>,
) -> Result<OpenMetrics, ScrapeError> {
    let host = state
        .sysinfo_repo
        .get_host_info()
        .await
        .map_err(scrape_error("sysinfo"))?;
    Ok(sysinfo_metrics(&host))
}

fn by_name(container: &Container) -> Labels {
    Labels::new().with("name", container.name.as_str())
}

fn docker_metrics(containers: &[Container]) -> OpenMetrics {
    let mut metrics = OpenMetrics::new("docker");
    metrics
        .add_gauge(
            &MetricDescriptor::new("cpu_load", "The load on the CPU by the container.")
                .with_unit(Unit::Ratio),
            containers.iter().map(|c| Sample::new(by_name(c), c.cpu_ratio)),
        )
        .add_gauge(
            &MetricDescriptor::new("memory_used", "The memory usage of the container.")
                .with_unit(Unit::Bytes),
            containers
                .iter()
                .map(|c| Sample::new(by_name(c), c.mem_usage_bytes as f64)),
        )
        .add_boolean(
            &MetricDescriptor::new("status_running", "Whether the container is running."),
            containers.iter().map(|c| Sample::new(by_name(c), c.is_running())),
        )
        .add_boolean(
            &MetricDescriptor::new("status_up", "Whether the container is up."),
            containers.iter().map(|c| Sample::new(by_name(c), c.is_up())),
        )
        .add_info(
            &MetricDescriptor::new("creation_time", "The creation time of the container."),
            containers
                .iter()
                .map(|c| InfoRecord::new(&c.name, "creation_time", c.created_at_iso())),
        )
        .add_info(
            &MetricDescriptor::new("image", "The name of the image for this container."),
            containers
                .iter()
                .map(|c| InfoRecord::new(&c.name, "image", &c.image)),
        )
        .add_info(
            &MetricDescriptor::new("status", "The status of the container."),
            containers
                .iter()
                .map(|c| InfoRecord::new(&c.name, "status", &c.status)),
        )
        .add_info(
            &MetricDescriptor::new("network", "The network of the container."),
            containers
                .iter()
                .map(|c| InfoRecord::new(&c.name, "network", &c.network)),
        );
    metrics
}

fn hwmon_metrics(temperatures: &[Temperature]) -> OpenMetrics {
    let mut metrics = OpenMetrics::new("hwmon");
    metrics.add_gauge(
        &MetricDescriptor::new("temperature", "The temperature reported by the sensor.")
            .with_unit(Unit::Celsius),
        temperatures.iter().map(|t| {
            Sample::new(
                Labels::new()
                    .with("name", t.name.as_str())
                    .with("device", t.device.as_str()),
                t.value,
            )
        }),
    );
    metrics
}

fn sysinfo_metrics(host: &HostInfo) -> OpenMetrics {
    let unlabelled = |value: f64| [Sample::new(Labels::new(), value)];
    let mut metrics = OpenMetrics::new("sysinfo");
    metrics
        .add_gauge(
            &MetricDescriptor::new("uptime", "Time since the host booted.")
                .with_unit(Unit::Seconds),
            unlabelled(host.uptime_secs as f64),
        )
        .add_gauge(
            &MetricDescriptor::new("cpus", "Number of logical CPUs."),
            unlabelled(host.cpu_count as f64),
        )
        .add_gauge(
            &MetricDescriptor::new("memory_total", "Total physical memory.")
                .with_unit(Unit::Bytes),
            unlabelled(host.memory_total_bytes as f64),
        )
        .add_gauge(
            &MetricDescriptor::new("memory_used", "Physical memory in use.")
                .with_unit(Unit::Bytes),
            unlabelled(host.memory_used_bytes as f64),
        )
        .add_gauge(
            &MetricDescriptor::new("swap_total", "Total swap space.").with_unit(Unit::Bytes),
            unlabelled(host.swap_total_bytes as f64),
        )
        .add_gauge(
            &MetricDescriptor::new("swap_used", "Swap space in use.").with_unit(Unit::Bytes),
            unlabelled(host.swap_used_bytes as f64),
        )
        .add_gauge(
            &MetricDescriptor::new("load1", "Load average over one minute."),
            unlabelled(host.load_one),
        )
        .add_gauge(
            &MetricDescriptor::new("load5", "Load average over five minutes."),
            unlabelled(host.load_five),
        )
        .add_gauge(
            &MetricDescriptor::new("load15", "Load average over fifteen minutes."),
            unlabelled(host.load_fifteen),
        )
        .add_info(
            &MetricDescriptor::new("os", "The operating system of the host."),
            [InfoRecord::new(&host.host_name, "os", &host.os_version)],
        )
        .add_info(
            &MetricDescriptor::new("kernel", "The kernel version of the host."),
            [InfoRecord::new(&host.host_name, "kernel", &host.kernel_version)],
        );
    metrics
}
