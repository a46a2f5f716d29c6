// Docker container models

use chrono::{DateTime, FixedOffset};
use std::fmt;
use std::str::FromStr;

/// Docker container state. The set is closed; anything else is rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    Created,
    Running,
    Restarting,
    Paused,
    Exited,
    Dead,
    Removing,
}

impl ContainerState {
    pub const fn as_str(self) -> &'static str {
        match self {
            ContainerState::Created => "created",
            ContainerState::Running => "running",
            ContainerState::Restarting => "restarting",
            ContainerState::Paused => "paused",
            ContainerState::Exited => "exited",
            ContainerState::Dead => "dead",
            ContainerState::Removing => "removing",
        }
    }

    pub const fn is_running(self) -> bool {
        matches!(self, ContainerState::Running)
    }

    /// Running, restarting and removing containers still hold their processes.
    pub const fn is_up(self) -> bool {
        match self {
            ContainerState::Running | ContainerState::Restarting | ContainerState::Removing => {
                true
            }
            ContainerState::Created
            | ContainerState::Paused
            | ContainerState::Exited
            | ContainerState::Dead => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown container state {0:?}")]
pub struct UnknownContainerState(pub String);

impl FromStr for ContainerState {
    type Err = UnknownContainerState;

    /// Parse from the Docker CLI state string (e.g. "running", "exited").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(ContainerState::Created),
            "running" => Ok(ContainerState::Running),
            "restarting" => Ok(ContainerState::Restarting),
            "paused" => Ok(ContainerState::Paused),
            "exited" => Ok(ContainerState::Exited),
            "dead" => Ok(ContainerState::Dead),
            "removing" => Ok(ContainerState::Removing),
            other => Err(UnknownContainerState(other.to_string())),
        }
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One container, joined from `docker ps` and `docker stats` and normalized to base units.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    pub id: String,
    pub name: String,
    pub network: String,
    pub image: String,
    pub command: String,
    pub created_at: DateTime<FixedOffset>,
    pub state: ContainerState,
    /// CPU load as a ratio; 1.0 is one full core, multi-core containers go above it.
    pub cpu_ratio: f64,
    pub mem_usage_bytes: u64,
    pub status: String,
}

impl Container {
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn is_up(&self) -> bool {
        self.state.is_up()
    }

    /// Creation time as ISO-8601 UTC with milliseconds, e.g. `2025-11-02T15:19:51.000Z`.
    pub fn created_at_iso(&self) -> String {
        self.created_at
            .to_utc()
            .format("%Y-%m-%dT%H:%M:%S%.3fZ")
            .to_string()
    }
}
