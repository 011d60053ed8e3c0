// Sensor domain model
use serde::{Deserialize, Serialize};

/// Query id that switches resolution to the `tile` label lookup
pub const SENTINEL_QUERY_ID: &str = "app";

/// Label key matched against the query alias on the sentinel path
pub const TILE_LABEL: &str = "tile";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub alias: String,
}

impl QuerySpec {
    pub fn new(id: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            alias: alias.into(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.id == SENTINEL_QUERY_ID
    }

    /// Empty id matches any field
    pub fn matches_name(&self, field_name: &str) -> bool {
        self.id.is_empty() || self.id == field_name
    }
}

/// Percentage coordinates relative to the rendered image box.
/// Only built through `Position::new`, which clamps both axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPosition")]
pub struct Position {
    x: f64,
    y: f64,
}

#[derive(Deserialize)]
struct RawPosition {
    x: f64,
    y: f64,
}

impl From<RawPosition> for Position {
    fn from(raw: RawPosition) -> Self {
        Position::new(raw.x, raw.y)
    }
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: clamp_percent(x),
            y: clamp_percent(y),
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(50.0, 50.0)
    }
}

pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Static presentation of a sensor, before any mapping applies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SensorStyle {
    pub background_color: String,
    pub font_color: String,
    pub bold: bool,
    pub icon_name: String,
    pub value_blink: bool,
    pub background_blink: bool,
}

impl Default for SensorStyle {
    fn default() -> Self {
        Self {
            background_color: "#000".to_string(),
            font_color: "#FFF".to_string(),
            bold: false,
            icon_name: String::new(),
            value_blink: false,
            background_blink: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sensor {
    pub name: String,
    #[serde(default)]
    pub query: QuerySpec,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub mapping_ids: Vec<String>,
    #[serde(flatten)]
    pub style: SensorStyle,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub decimals: Option<u32>,
    #[serde(default)]
    pub link: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Default for Sensor {
    fn default() -> Self {
        Self {
            name: "Name".to_string(),
            query: QuerySpec::new("A", ""),
            position: Position::default(),
            mapping_ids: Vec::new(),
            style: SensorStyle::default(),
            unit: None,
            decimals: Some(2),
            link: String::new(),
            visible: true,
        }
    }
}

impl Sensor {
    pub fn with_position(&self, position: Position) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }
}
