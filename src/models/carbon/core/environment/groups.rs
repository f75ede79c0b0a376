use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::EnvironmentError;

/// Named selections of indicator rows of `D1`.
///
/// Typical configurations separate greenhouse gases from other pressures,
/// e.g. `{"ghg": {0, 1, 2}, "other": {3, 4, 5, 6}}`. Groups may overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorGroups(BTreeMap<String, BTreeSet<usize>>);

impl IndicatorGroups {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a group, returning the updated mapping.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, rows: impl IntoIterator<Item = usize>) -> Self {
        self.insert(name, rows);
        self
    }

    /// Adds (or replaces) a group, returning the rows it replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        rows: impl IntoIterator<Item = usize>,
    ) -> Option<BTreeSet<usize>> {
        self.0.insert(name.into(), rows.into_iter().collect())
    }

    /// Rows of the named group.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BTreeSet<usize>> {
        self.0.get(name)
    }

    /// Group names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `(name, rows)` pairs in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<usize>)> {
        self.0.iter().map(|(name, rows)| (name.as_str(), rows))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks every group against the number of indicator rows.
    pub(super) fn validate(&self, indicators: usize) -> Result<(), EnvironmentError> {
        self.iter()
            .try_for_each(|(name, rows)| validate_rows(name, rows, indicators))
    }
}

impl<N, R> FromIterator<(N, R)> for IndicatorGroups
where
    N: Into<String>,
    R: IntoIterator<Item = usize>,
{
    fn from_iter<I: IntoIterator<Item = (N, R)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |groups, (name, rows)| groups.with(name, rows))
    }
}

/// Checks that `rows` is non-empty and within `0..indicators`.
pub(crate) fn validate_rows(
    group: &str,
    rows: &BTreeSet<usize>,
    indicators: usize,
) -> Result<(), EnvironmentError> {
    // BTreeSet iterates in ascending order, so the last row is the largest.
    match rows.last() {
        None => Err(EnvironmentError::EmptyGroup {
            group: group.to_string(),
        }),
        Some(&row) if row >= indicators => Err(EnvironmentError::IndicatorOutOfRange {
            group: group.to_string(),
            row,
            indicators,
        }),
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_pairs() {
        let groups: IndicatorGroups = [("ghg", vec![0, 1, 2]), ("other", vec![3, 4, 5, 6])]
            .into_iter()
            .collect();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups.names().collect::<Vec<_>>(), ["ghg", "other"]);
        assert_eq!(groups.get("other").map(BTreeSet::len), Some(4));
        assert!(groups.validate(7).is_ok());
    }

    #[test]
    fn rejects_rows_beyond_indicator_count() {
        let groups = IndicatorGroups::new().with("ghg", [0, 1, 7]);
        assert_eq!(
            groups.validate(7).unwrap_err(),
            EnvironmentError::IndicatorOutOfRange {
                group: "ghg".into(),
                row: 7,
                indicators: 7,
            }
        );
    }

    #[test]
    fn rejects_empty_group() {
        let groups = IndicatorGroups::new().with("other", []);
        assert_eq!(
            groups.validate(3).unwrap_err(),
            EnvironmentError::EmptyGroup {
                group: "other".into()
            }
        );
    }

    #[test]
    fn deserializes_from_json_object() {
        let groups: IndicatorGroups =
            serde_json::from_str(r#"{"ghg": [0, 1, 2], "other": [3]}"#).unwrap();
        assert_eq!(groups, IndicatorGroups::new().with("ghg", 0..3).with("other", [3]));
    }
}
