// Raw `docker ps` / `docker stats` JSON lines, and their normalization into Container.

use crate::error::AdapterError;
use crate::models::{Container, ContainerState, UnknownContainerState};
use crate::normalize::{docker_timestamp, mem_usage_bytes, percent_ratio};
use serde::Deserialize;

/// One line of `docker ps --format json`. Fields not exported are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PsLine {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Names")]
    pub names: String,
    #[serde(rename = "Networks", default)]
    pub networks: String,
    #[serde(rename = "Image")]
    pub image: String,
    #[serde(rename = "Command", default)]
    pub command: String,
    #[serde(rename = "CreatedAt")]
    pub created_at: String,
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Status", default)]
    pub status: String,
}

/// One line of `docker stats --format json`. `Container` is the join key against `PsLine::id`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsLine {
    #[serde(rename = "Container")]
    pub container: String,
    #[serde(rename = "CPUPerc")]
    pub cpu_perc: String,
    #[serde(rename = "MemUsage")]
    pub mem_usage: String,
}

/// Normalize a matched ps/stats pair. Any unit or format problem fails the whole pair.
pub fn normalize_container(ps: &PsLine, stats: &StatsLine) -> Result<Container, AdapterError> {
    let state: ContainerState = ps
        .state
        .parse()
        .map_err(|e: UnknownContainerState| {
            AdapterError::normalize("State", &ps.state, e.to_string())
        })?;

    Ok(Container {
        id: ps.id.clone(),
        name: ps.names.clone(),
        network: ps.networks.clone(),
        image: ps.image.clone(),
        command: ps.command.clone(),
        created_at: docker_timestamp("CreatedAt", &ps.created_at)?,
        state,
        cpu_ratio: percent_ratio("CPUPerc", &stats.cpu_perc)?,
        mem_usage_bytes: mem_usage_bytes("MemUsage", &stats.mem_usage)?,
        status: ps.status.clone(),
    })
}
