// Host identity and load via sysinfo. A fresh System per call; nothing is cached.

use crate::error::AdapterError;
use crate::models::HostInfo;
use sysinfo::System;
use tracing::instrument;

#[derive(Debug, Default)]
pub struct SysinfoRepo;

impl SysinfoRepo {
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip(self), fields(repo = "sysinfo", operation = "get_host_info"))]
    pub async fn get_host_info(&self) -> Result<HostInfo, AdapterError> {
        tokio::task::spawn_blocking(|| {
            let mut sys = System::new();
            sys.refresh_memory();
            sys.refresh_cpu_all();
            let load = System::load_average();

            HostInfo {
                host_name: System::host_name().unwrap_or_else(|| "unknown".into()),
                os_version: System::long_os_version().unwrap_or_else(|| "unknown".into()),
                kernel_version: System::kernel_version().unwrap_or_else(|| "unknown".into()),
                uptime_secs: System::uptime(),
                cpu_count: sys.cpus().len(),
                memory_total_bytes: sys.total_memory(),
                memory_used_bytes: sys.used_memory(),
                swap_total_bytes: sys.total_swap(),
                swap_used_bytes: sys.used_swap(),
                load_one: load.one,
                load_five: load.five,
                load_fifteen: load.fifteen,
            }
        })
        .await
        .map_err(|e| AdapterError::HostInfo(format!("sysinfo task join: {}", e)))
    }
}
