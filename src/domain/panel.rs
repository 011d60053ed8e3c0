// Panel options: the persisted sensor overlay configuration
use super::mapping::Mapping;
use super::sensor::Sensor;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelOptions {
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub force_image_refresh: bool,
    #[serde(default)]
    pub lock_sensors: bool,
    #[serde(default = "default_text_size")]
    pub sensors_text_size: f64,
    #[serde(default)]
    pub sensors: Vec<Sensor>,
    #[serde(default)]
    pub mappings: Vec<Mapping>,
}

fn default_text_size() -> f64 {
    10.0
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            image_url: String::new(),
            force_image_refresh: false,
            lock_sensors: false,
            sensors_text_size: default_text_size(),
            sensors: Vec::new(),
            mappings: Vec::new(),
        }
    }
}

// Every edit below returns a fresh value; `self` is never touched.
impl PanelOptions {
    pub fn with_sensor_added(&self, sensor: Sensor) -> Self {
        let mut sensors = Vec::with_capacity(self.sensors.len() + 1);
        sensors.extend(self.sensors.iter().cloned());
        sensors.push(sensor);
        Self {
            sensors,
            ..self.clone()
        }
    }

    /// `None` if `index` is out of range
    pub fn with_sensor_replaced(&self, index: usize, sensor: Sensor) -> Option<Self> {
        if index >= self.sensors.len() {
            return None;
        }

        let sensors = self
            .sensors
            .iter()
            .enumerate()
            .map(|(i, existing)| if i == index { sensor.clone() } else { existing.clone() })
            .collect();

        Some(Self {
            sensors,
            ..self.clone()
        })
    }

    /// `None` if `index` is out of range
    pub fn with_sensor_removed(&self, index: usize) -> Option<Self> {
        if index >= self.sensors.len() {
            return None;
        }

        let sensors = self
            .sensors
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, sensor)| sensor.clone())
            .collect();

        Some(Self {
            sensors,
            ..self.clone()
        })
    }

    pub fn with_mappings(&self, mappings: Vec<Mapping>) -> Self {
        Self {
            mappings,
            ..self.clone()
        }
    }
}
