use serde::{Deserialize, Serialize};

use super::layout::{Dimension, PossibleValues};

/// One exclusion rule: an inclusive from/to range per dimension, any of
/// which may be left open. A null `from` leaves the dimension entirely
/// unconstrained (a `to` without a `from` is ignored); a `from` without a
/// `to` is a single-value range.
///
/// Range endpoints are stored as strings so numeric and alphabetic
/// dimensions share one shape; ordering is always the position in the
/// dimension's generated sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeRule {
    pub aisle_from: Option<String>,
    pub aisle_to: Option<String>,
    pub bay_from: Option<String>,
    pub bay_to: Option<String>,
    pub level_from: Option<String>,
    pub level_to: Option<String>,
    pub bin_from: Option<String>,
    pub bin_to: Option<String>,
}

/// A concrete slot address. Dimensions the warehouse does not use carry
/// no value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotCoordinate {
    pub aisle: Option<String>,
    pub bay: Option<String>,
    pub level: Option<String>,
    pub bin: Option<String>,
}

impl SlotCoordinate {
    pub fn value(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::Aisle => self.aisle.as_deref(),
            Dimension::Bay => self.bay.as_deref(),
            Dimension::Level => self.level.as_deref(),
            Dimension::Bin => self.bin.as_deref(),
        }
    }
}

impl RangeRule {
    /// The (from, to) endpoints for one dimension.
    pub fn range(&self, dimension: Dimension) -> (Option<&str>, Option<&str>) {
        match dimension {
            Dimension::Aisle => (self.aisle_from.as_deref(), self.aisle_to.as_deref()),
            Dimension::Bay => (self.bay_from.as_deref(), self.bay_to.as_deref()),
            Dimension::Level => (self.level_from.as_deref(), self.level_to.as_deref()),
            Dimension::Bin => (self.bin_from.as_deref(), self.bin_to.as_deref()),
        }
    }

    /// True when all eight endpoints are null. Such a rule would exclude
    /// every slot and is rejected at write time.
    pub fn is_unconstrained(&self) -> bool {
        Dimension::ALL
            .iter()
            .all(|&d| matches!(self.range(d), (None, None)))
    }

    /// Does this rule exclude the given coordinate? AND across dimensions:
    /// every constrained dimension must place the coordinate's value inside
    /// its closed range (in sequence order). A dimension with a null `from`
    /// matches everything.
    pub fn matches(&self, coordinate: &SlotCoordinate, values: &PossibleValues) -> bool {
        Dimension::ALL.iter().all(|&dimension| {
            let (from, to) = self.range(dimension);
            let from = match from {
                Some(f) => f,
                None => return true, // unconstrained, `to` ignored
            };

            let pos = match coordinate
                .value(dimension)
                .and_then(|v| values.position(dimension, v))
            {
                Some(p) => p,
                // No value (or an unknown one) cannot sit inside a range
                None => return false,
            };

            let start = match values.position(dimension, from) {
                Some(p) => p,
                None => return false, // stale endpoint after a config change
            };
            let end = to
                .and_then(|t| values.position(dimension, t))
                .unwrap_or(start);

            pos >= start && pos <= end
        })
    }
}

/// A coordinate is excluded when any rule in the set matches it.
pub fn is_excluded(rules: &[RangeRule], coordinate: &SlotCoordinate, values: &PossibleValues) -> bool {
    rules.iter().any(|rule| rule.matches(coordinate, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::dimension::{generate_sequence, DimensionKind};

    fn values() -> PossibleValues {
        PossibleValues {
            aisle: generate_sequence(Some(DimensionKind::Numeric), Some(3)),
            bay: Vec::new(),
            level: Vec::new(),
            bin: generate_sequence(Some(DimensionKind::Alphabetic), Some(26)),
        }
    }

    fn coord(aisle: &str, bin: &str) -> SlotCoordinate {
        SlotCoordinate {
            aisle: Some(aisle.into()),
            bin: Some(bin.into()),
            ..Default::default()
        }
    }

    #[test]
    fn constrained_dimensions_are_anded() {
        let rule = RangeRule {
            aisle_from: Some("2".into()),
            bin_from: Some("A".into()),
            bin_to: Some("C".into()),
            ..Default::default()
        };

        assert!(rule.matches(&coord("2", "B"), &values()));
        // aisle matches, bin outside range
        assert!(!rule.matches(&coord("2", "D"), &values()));
        // bin matches, aisle is a single-value range at "2"
        assert!(!rule.matches(&coord("1", "A"), &values()));
    }

    #[test]
    fn unconstrained_dimension_matches_all() {
        let rule = RangeRule {
            bin_from: Some("Y".into()),
            bin_to: Some("Z".into()),
            ..Default::default()
        };
        for aisle in ["1", "2", "3"] {
            assert!(rule.matches(&coord(aisle, "Z"), &values()));
        }
    }

    #[test]
    fn lone_to_is_ignored() {
        let rule = RangeRule {
            aisle_to: Some("1".into()),
            bin_from: Some("A".into()),
            ..Default::default()
        };
        // aisle_to without aisle_from leaves aisle unconstrained
        assert!(rule.matches(&coord("3", "A"), &values()));
    }

    #[test]
    fn missing_coordinate_value_never_matches_a_constraint() {
        let rule = RangeRule {
            bay_from: Some("1".into()),
            ..Default::default()
        };
        assert!(!rule.matches(&coord("1", "A"), &values()));
    }

    #[test]
    fn rule_set_is_ored() {
        let rules = vec![
            RangeRule {
                aisle_from: Some("1".into()),
                aisle_to: Some("1".into()),
                ..Default::default()
            },
            RangeRule {
                bin_from: Some("Z".into()),
                ..Default::default()
            },
        ];
        assert!(is_excluded(&rules, &coord("1", "M"), &values()));
        assert!(is_excluded(&rules, &coord("3", "Z"), &values()));
        assert!(!is_excluded(&rules, &coord("2", "M"), &values()));
    }

    #[test]
    fn detects_unconstrained_rule() {
        assert!(RangeRule::default().is_unconstrained());
        let rule = RangeRule {
            level_to: Some("2".into()),
            ..Default::default()
        };
        assert!(!rule.is_unconstrained());
    }
}
