// Sensor projector - Resolves every configured sensor against one data snapshot
use crate::application::mapping_evaluator::evaluate;
use crate::application::position_model::{to_pixels, PixelOffset};
use crate::application::value_reducer::{format_value, resolve_display, DisplayContext};
use crate::domain::frame::DataFrame;
use crate::domain::image::ImageBounds;
use crate::domain::mapping::VisualState;
use crate::domain::panel::PanelOptions;
use crate::domain::sensor::{Position, Sensor};
use crate::infrastructure::config::replace_variables;
use serde::Serialize;
use std::collections::HashMap;

/// Everything the renderer needs to paint one sensor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorView {
    pub index: usize,
    pub name: String,
    pub link: String,
    pub matched_field: Option<String>,
    pub value: Option<f64>,
    /// Empty when the value is unresolved
    pub value_text: String,
    pub visual: VisualState,
    pub position: Position,
    /// `None` until the image has been measured
    pub offset_px: Option<PixelOffset>,
    pub visible: bool,
}

pub fn project(
    options: &PanelOptions,
    series: &[DataFrame],
    vars: &HashMap<String, String>,
    context: &DisplayContext,
    bounds: ImageBounds,
) -> Vec<SensorView> {
    options
        .sensors
        .iter()
        .enumerate()
        .map(|(index, sensor)| project_sensor(index, sensor, options, series, vars, context, bounds))
        .collect()
}

fn project_sensor(
    index: usize,
    sensor: &Sensor,
    options: &PanelOptions,
    series: &[DataFrame],
    vars: &HashMap<String, String>,
    context: &DisplayContext,
    bounds: ImageBounds,
) -> SensorView {
    let display = resolve_display(series, &sensor.query, context);
    let value = display.as_ref().and_then(|display| display.numeric);
    let matched_field = display.as_ref().map(|display| display.field.clone());
    if value.is_none() {
        tracing::debug!(
            "Sensor {} unresolved for query id={:?} alias={:?}",
            index,
            sensor.query.id,
            sensor.query.alias
        );
    }

    let visual = evaluate(value, &options.mappings, &sensor.mapping_ids, &sensor.style);
    // The sensor's own unit/decimals win over the field's display config.
    let value_text = match (value, display) {
        (Some(v), _) if sensor.decimals.is_some() || sensor.unit.is_some() => {
            format_value(v, sensor.decimals, sensor.unit.as_deref())
        }
        (Some(_), Some(display)) => display.text,
        _ => String::new(),
    };

    SensorView {
        index,
        name: replace_variables(&sensor.name, vars),
        link: replace_variables(&sensor.link, vars),
        matched_field,
        value,
        value_text,
        visual,
        position: sensor.position,
        offset_px: to_pixels(sensor.position, bounds),
        visible: sensor.visible,
    }
}
