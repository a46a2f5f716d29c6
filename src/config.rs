use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub commands: CommandsConfig,
    #[serde(default)]
    pub docker: DockerConfig,
    #[serde(default)]
    pub hwmon: HwmonConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

fn default_port() -> u16 {
    8000
}

fn default_host() -> String {
    "0.0.0.0".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommandsConfig {
    /// Upper bound for a single external command; the scrape fails when it is hit.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl CommandsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_timeout_ms() -> u64 {
    10_000
}

#[derive(Debug, Clone, Deserialize)]
pub struct DockerConfig {
    #[serde(default = "default_docker_binary")]
    pub binary: String,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            binary: default_docker_binary(),
        }
    }
}

fn default_docker_binary() -> String {
    "docker".into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct HwmonConfig {
    #[serde(default = "default_sensors_binary")]
    pub binary: String,
    /// Explicit chip/feature mapping. Empty means report every temperature input found.
    #[serde(default)]
    pub sensors: Vec<SensorConfig>,
}

impl Default for HwmonConfig {
    fn default() -> Self {
        Self {
            binary: default_sensors_binary(),
            sensors: Vec::new(),
        }
    }
}

fn default_sensors_binary() -> String {
    "sensors".into()
}

/// Maps `sensors -j` path `chip.feature.input` to a named temperature.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SensorConfig {
    pub name: String,
    #[serde(default)]
    pub device: String,
    pub chip: String,
    pub feature: String,
    #[serde(default = "default_sensor_input")]
    pub input: String,
}

fn default_sensor_input() -> String {
    "temp1_input".into()
}

impl AppConfig {
    /// Reads `CONFIG_FILE` (default `config.toml`). A missing file means built-in defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        Self::load_from_path(&path)
    }

    pub fn load_from_path(path: &str) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(s) => Self::load_from_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("{} not found, using defaults", path);
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(anyhow::anyhow!("reading {}: {}", path, e)),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        anyhow::ensure!(
            self.commands.timeout_ms > 0,
            "commands.timeout_ms must be > 0, got {}",
            self.commands.timeout_ms
        );
        anyhow::ensure!(
            !self.docker.binary.is_empty(),
            "docker.binary must be non-empty"
        );
        anyhow::ensure!(
            !self.hwmon.binary.is_empty(),
            "hwmon.binary must be non-empty"
        );

        let mut names = HashSet::new();
        for (i, sensor) in self.hwmon.sensors.iter().enumerate() {
            anyhow::ensure!(
                !sensor.name.is_empty(),
                "hwmon.sensors[{}].name must be non-empty",
                i
            );
            anyhow::ensure!(
                !sensor.chip.is_empty() && !sensor.feature.is_empty() && !sensor.input.is_empty(),
                "hwmon.sensors[{}] ({}) needs chip, feature and input",
                i,
                sensor.name
            );
            anyhow::ensure!(
                names.insert(sensor.name.as_str()),
                "hwmon.sensors name {:?} is used more than once",
                sensor.name
            );
        }
        Ok(())
    }
}
