// Query matcher - Locates the series and field a sensor query refers to
use crate::domain::frame::{DataFrame, Field};
use crate::domain::sensor::QuerySpec;

/// First field, across all series in order, whose name satisfies the query
pub fn match_field<'a>(series: &'a [DataFrame], query: &QuerySpec) -> Option<&'a Field> {
    series
        .iter()
        .flat_map(|frame| frame.fields.iter())
        .find(|field| query.matches_name(&field.name))
}

/// First series holding a field whose name satisfies the query
pub fn match_series<'a>(series: &'a [DataFrame], query: &QuerySpec) -> Option<&'a DataFrame> {
    series
        .iter()
        .find(|frame| match_field(std::slice::from_ref(*frame), query).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Vec<DataFrame> {
        vec![
            DataFrame::new(vec![Field::new("A", vec![1.0]), Field::new("B", vec![2.0])]),
            DataFrame::new(vec![Field::new("B", vec![3.0]), Field::new("C", vec![4.0])]),
        ]
    }

    #[test]
    fn test_first_field_by_name() {
        let series = snapshot();

        let field = match_field(&series, &QuerySpec::new("B", "")).unwrap();
        assert_eq!(field.values, vec![Some(2.0)]);

        let field = match_field(&series, &QuerySpec::new("C", "")).unwrap();
        assert_eq!(field.values, vec![Some(4.0)]);
    }

    #[test]
    fn test_empty_id_matches_first_field() {
        let series = snapshot();
        let field = match_field(&series, &QuerySpec::default()).unwrap();
        assert_eq!(field.name, "A");
    }

    #[test]
    fn test_no_match() {
        let series = snapshot();
        assert!(match_field(&series, &QuerySpec::new("Z", "")).is_none());
        assert!(match_series(&series, &QuerySpec::new("Z", "")).is_none());
        assert!(match_field(&[], &QuerySpec::default()).is_none());
    }

    #[test]
    fn test_series_match_is_deterministic() {
        let series = snapshot();
        let query = QuerySpec::new("C", "");

        let first = match_series(&series, &query).map(|frame| frame as *const DataFrame);
        let second = match_series(&series, &query).map(|frame| frame as *const DataFrame);

        assert_eq!(first, Some(&series[1] as *const DataFrame));
        assert_eq!(first, second);
    }
}
