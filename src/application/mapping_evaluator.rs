// Mapping evaluator - First matching rule decides a sensor's visual state
use crate::domain::mapping::{Mapping, VisualState};
use crate::domain::sensor::SensorStyle;

/// Look up `mapping_ids` in order, silently dropping ids with no mapping
pub fn resolve_mappings<'a>(mappings: &'a [Mapping], mapping_ids: &[String]) -> Vec<&'a Mapping> {
    mapping_ids
        .iter()
        .filter_map(|id| mappings.iter().find(|mapping| &mapping.id == id))
        .collect()
}

pub fn evaluate(
    value: Option<f64>,
    mappings: &[Mapping],
    mapping_ids: &[String],
    style: &SensorStyle,
) -> VisualState {
    let base = VisualState::from_style(style);

    let Some(value) = value else {
        return base;
    };

    match resolve_mappings(mappings, mapping_ids)
        .into_iter()
        .find(|mapping| mapping.condition.matches(value))
    {
        Some(mapping) => {
            tracing::debug!("Mapping {} matched value {}", mapping.id, value);
            base.with_mapping(mapping)
        }
        None => base,
    }
}
