// Mapping rules and the visual state they produce
use super::sensor::SensorStyle;
use serde::{Deserialize, Serialize};

/// Condition a resolved value must satisfy for a mapping to apply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MappingCondition {
    /// Inclusive on both ends; a missing bound is open
    Range {
        #[serde(default)]
        from: Option<f64>,
        #[serde(default)]
        to: Option<f64>,
    },
    Exact { value: f64 },
    Above { threshold: f64 },
    Below { threshold: f64 },
    /// Matches any resolved value
    Default,
}

impl MappingCondition {
    pub fn matches(&self, value: f64) -> bool {
        match self {
            MappingCondition::Default => true,
            _ if value.is_nan() => false,
            MappingCondition::Range { from, to } => {
                from.is_none_or(|from| value >= from) && to.is_none_or(|to| value <= to)
            }
            MappingCondition::Exact { value: expected } => {
                let tolerance = f64::EPSILON * expected.abs().max(value.abs()).max(1.0);
                (value - expected).abs() <= tolerance
            }
            MappingCondition::Above { threshold } => value > *threshold,
            MappingCondition::Below { threshold } => value < *threshold,
        }
    }
}

/// Overrides applied when a mapping matches; unset fields keep the static style
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingValues {
    #[serde(default)]
    pub background_color: Option<String>,
    #[serde(default)]
    pub font_color: Option<String>,
    #[serde(default)]
    pub icon_name: Option<String>,
    #[serde(default)]
    pub bold: Option<bool>,
    #[serde(default)]
    pub value_blink: Option<bool>,
    #[serde(default)]
    pub background_blink: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub condition: MappingCondition,
    #[serde(default)]
    pub values: MappingValues,
}

impl Mapping {
    pub fn new(id: impl Into<String>, condition: MappingCondition, values: MappingValues) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            condition,
            values,
        }
    }
}

/// Resolved presentation of a sensor after mapping evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualState {
    pub background_color: String,
    pub font_color: String,
    pub icon_name: String,
    pub bold: bool,
    pub value_blink: bool,
    pub background_blink: bool,
    pub matched_mapping: Option<String>,
}

impl VisualState {
    pub fn from_style(style: &SensorStyle) -> Self {
        Self {
            background_color: style.background_color.clone(),
            font_color: style.font_color.clone(),
            icon_name: style.icon_name.clone(),
            bold: style.bold,
            value_blink: style.value_blink,
            background_blink: style.background_blink,
            matched_mapping: None,
        }
    }

    pub fn with_mapping(self, mapping: &Mapping) -> Self {
        let values = &mapping.values;
        Self {
            background_color: values
                .background_color
                .clone()
                .unwrap_or(self.background_color),
            font_color: values.font_color.clone().unwrap_or(self.font_color),
            icon_name: values.icon_name.clone().unwrap_or(self.icon_name),
            bold: values.bold.unwrap_or(self.bold),
            value_blink: values.value_blink.unwrap_or(self.value_blink),
            background_blink: values.background_blink.unwrap_or(self.background_blink),
            matched_mapping: Some(mapping.id.clone()),
        }
    }
}
