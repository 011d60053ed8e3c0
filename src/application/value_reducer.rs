// Value reducer - Collapses a matched field to the single value a sensor shows
use crate::application::query_matcher::match_series;
use crate::domain::frame::{DataFrame, Field, FieldKind};
use crate::domain::sensor::{QuerySpec, TILE_LABEL};
use serde::Deserialize;

/// Upper bound on fraction digits, same range as JavaScript's `toFixed`
pub const MAX_DECIMALS: u32 = 20;

/// Panel-wide display defaults, used when a field carries no config of its own
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DisplayContext {
    #[serde(default)]
    pub decimals: Option<u32>,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayValue {
    /// Name of the field the value was reduced from
    pub field: String,
    pub title: String,
    /// `None` when the reduced sample is missing
    pub numeric: Option<f64>,
    pub text: String,
}

impl DisplayValue {
    fn from_field(field: &Field, numeric: Option<f64>, context: &DisplayContext) -> Self {
        let decimals = field.config.decimals.or(context.decimals);
        let unit = field.config.unit.as_deref().or(context.unit.as_deref());
        let text = numeric
            .map(|value| format_value(value, decimals, unit))
            .unwrap_or_default();

        Self {
            field: field.name.clone(),
            title: field.display_title(),
            numeric,
            text,
        }
    }
}

pub fn resolve(series: &[DataFrame], query: &QuerySpec, context: &DisplayContext) -> Option<f64> {
    resolve_display(series, query, context).and_then(|display| display.numeric)
}

pub fn resolve_display(
    series: &[DataFrame],
    query: &QuerySpec,
    context: &DisplayContext,
) -> Option<DisplayValue> {
    let frame = match_series(series, query)?;

    if query.is_sentinel() {
        resolve_by_label(frame, query, context)
    } else {
        reduce_last(frame, context)
            .into_iter()
            .find(|display| !display.title.is_empty() && display.title.contains(query.alias.as_str()))
    }
}

fn resolve_by_label(frame: &DataFrame, query: &QuerySpec, context: &DisplayContext) -> Option<DisplayValue> {
    let field = frame.fields.iter().find(|field| {
        let label_match = query.alias.is_empty()
            || field.labels.is_none()
            || field.label(TILE_LABEL) == Some(query.alias.as_str());
        query.matches_name(&field.name) && label_match
    })?;

    // An unlabelled field can win the scan above but never yields a value.
    field.labels.as_ref()?;

    let last = field.values.last().copied().flatten()?;
    Some(DisplayValue::from_field(field, Some(last), context))
}

/// "last" reduction over every numeric field of a series, in field order
pub fn reduce_last(frame: &DataFrame, context: &DisplayContext) -> Vec<DisplayValue> {
    frame
        .fields
        .iter()
        .filter(|field| field.kind == FieldKind::Number)
        .map(|field| {
            let last = field.values.last().copied().flatten();
            DisplayValue::from_field(field, last, context)
        })
        .collect()
}

/// Format a value with fixed decimals (or up to 4, trimmed) and a unit suffix
pub fn format_value(value: f64, decimals: Option<u32>, unit: Option<&str>) -> String {
    let number = match decimals {
        Some(decimals) => format!("{:.*}", decimals.min(MAX_DECIMALS) as usize, value),
        None if value.is_finite() => {
            let fixed = format!("{:.4}", value);
            if fixed.contains('.') {
                fixed.trim_end_matches('0').trim_end_matches('.').to_string()
            } else {
                fixed
            }
        }
        None => value.to_string(),
    };

    match unit.map(str::trim) {
        None | Some("") => number,
        Some("%") | Some("percent") => format!("{}%", number),
        Some(unit) => format!("{} {}", number, unit),
    }
}
