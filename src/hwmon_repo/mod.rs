// Temperatures via lm-sensors: `sensors -j` is one JSON document keyed by chip.

use crate::command::{CommandRunner, CommandSpec};
use crate::config::SensorConfig;
use crate::error::AdapterError;
use crate::models::Temperature;
use crate::normalize::parse_json_document;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, instrument};

/// `{"k10temp-pci-00c3": {"Adapter": "PCI adapter", "Tctl": {"temp1_input": 45.0}}}`
pub type SensorsDocument = Map<String, Value>;

pub struct HwmonRepo {
    runner: Arc<dyn CommandRunner>,
    command: CommandSpec,
    sensors: Vec<SensorConfig>,
}

impl HwmonRepo {
    /// With an empty `sensors` list every `tempN_input` reading is reported.
    pub fn new(runner: Arc<dyn CommandRunner>, binary: &str, sensors: Vec<SensorConfig>) -> Self {
        Self {
            runner,
            command: CommandSpec::new(binary, ["-j"]),
            sensors,
        }
    }

    #[instrument(skip(self), fields(repo = "hwmon", operation = "get_temperatures"))]
    pub async fn get_temperatures(&self) -> Result<Vec<Temperature>, AdapterError> {
        let output = self.runner.run(&self.command).await?;
        let document: SensorsDocument = parse_json_document("sensors", &output)?;
        if self.sensors.is_empty() {
            Ok(discover_temperatures(&document))
        } else {
            map_temperatures(&document, &self.sensors)
        }
    }
}

/// One reading per configured sensor, in config order. A missing reading is an error.
pub fn map_temperatures(
    document: &SensorsDocument,
    sensors: &[SensorConfig],
) -> Result<Vec<Temperature>, AdapterError> {
    sensors
        .iter()
        .map(|sensor| {
            let value = document
                .get(&sensor.chip)
                .and_then(|chip| chip.get(&sensor.feature))
                .and_then(|feature| feature.get(&sensor.input))
                .and_then(Value::as_f64)
                .ok_or_else(|| AdapterError::MissingReading {
                    chip: sensor.chip.clone(),
                    feature: sensor.feature.clone(),
                    input: sensor.input.clone(),
                })?;
            Ok(Temperature {
                name: sensor.name.clone(),
                device: sensor.device.clone(),
                value,
            })
        })
        .collect()
}

/// Every `tempN_input` under every chip; name is the feature label, device the chip id.
/// A feature with several inputs names each one `{feature}_tempN` so label sets stay unique.
pub fn discover_temperatures(document: &SensorsDocument) -> Vec<Temperature> {
    let mut temperatures = Vec::new();
    for (chip, features) in document {
        let Some(features) = features.as_object() else {
            continue;
        };
        for (feature, readings) in features {
            let Some(readings) = readings.as_object() else {
                continue;
            };
            let inputs: Vec<(&String, &Value)> = readings
                .iter()
                .filter(|(key, _)| is_temperature_input(key))
                .collect();
            let qualify = inputs.len() > 1;
            for (key, value) in inputs {
                let Some(value) = value.as_f64() else {
                    debug!(%chip, %feature, %key, "non-numeric reading, skipping");
                    continue;
                };
                let name = if qualify {
                    format!("{}_{}", feature, key.trim_end_matches("_input"))
                } else {
                    feature.clone()
                };
                temperatures.push(Temperature {
                    name,
                    device: chip.clone(),
                    value,
                });
            }
        }
    }
    temperatures
}

fn is_temperature_input(key: &str) -> bool {
    key.strip_prefix("temp")
        .and_then(|rest| rest.strip_suffix("_input"))
        .is_some_and(|index| !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_input_keys() {
        assert!(is_temperature_input("temp1_input"));
        assert!(is_temperature_input("temp12_input"));
        assert!(!is_temperature_input("temp1_max"));
        assert!(!is_temperature_input("fan1_input"));
        assert!(!is_temperature_input("temp_input"));
    }
}
