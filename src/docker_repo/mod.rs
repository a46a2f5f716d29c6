// Docker containers via the docker CLI: `ps` and `stats` joined by container id.

mod raw;

pub use raw::{PsLine, StatsLine, normalize_container};

use crate::command::{CommandRunner, CommandSpec, run_all};
use crate::error::AdapterError;
use crate::models::Container;
use crate::normalize::parse_json_lines;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct DockerRepo {
    runner: Arc<dyn CommandRunner>,
    ps: CommandSpec,
    stats: CommandSpec,
}

impl DockerRepo {
    pub fn new(runner: Arc<dyn CommandRunner>, binary: &str) -> Self {
        Self {
            runner,
            ps: CommandSpec::new(
                binary,
                ["ps", "--all", "--no-trunc", "--size", "--format", "json"],
            ),
            stats: CommandSpec::new(
                binary,
                ["stats", "--all", "--no-stream", "--no-trunc", "--format", "json"],
            ),
        }
    }

    /// Runs `ps` and `stats` concurrently, joins them by id and normalizes every pair.
    /// Containers missing from `stats` are dropped; any other problem fails the whole call.
    #[instrument(skip(self), fields(repo = "docker", operation = "list_containers"))]
    pub async fn list_containers(&self) -> Result<Vec<Container>, AdapterError> {
        let outputs = run_all(self.runner.as_ref(), &[self.ps.clone(), self.stats.clone()]).await?;
        let ps_lines: Vec<PsLine> = parse_json_lines("docker ps", &outputs[0])?;
        let stats_lines: Vec<StatsLine> = parse_json_lines("docker stats", &outputs[1])?;
        join_containers(&ps_lines, &stats_lines)
    }
}

/// Pair each `ps` line with its `stats` line, keeping `ps` order.
pub fn join_containers(
    ps_lines: &[PsLine],
    stats_lines: &[StatsLine],
) -> Result<Vec<Container>, AdapterError> {
    let by_id: HashMap<&str, &StatsLine> = stats_lines
        .iter()
        .map(|s| (s.container.as_str(), s))
        .collect();

    let mut containers = Vec::with_capacity(ps_lines.len());
    for ps in ps_lines {
        let Some(stats) = by_id.get(ps.id.as_str()) else {
            debug!(id = %ps.id, name = %ps.names, "no stats for container, skipping");
            continue;
        };
        containers.push(normalize_container(ps, stats)?);
    }
    Ok(containers)
}
