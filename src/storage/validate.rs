use thiserror::Error;

use super::layout::{Dimension, PossibleValues};
use super::rule::RangeRule;

/// Why a candidate exclusion rule was rejected. The message names the
/// offending dimension and constraint so the caller can correct the rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("an exclusion rule must constrain at least one dimension")]
    Unconstrained,

    #[error("unknown {dimension} value '{value}'")]
    UnknownValue { dimension: Dimension, value: String },

    #[error("{dimension} range end '{to}' precedes start '{from}'")]
    InvertedRange {
        dimension: Dimension,
        from: String,
        to: String,
    },
}

/// Validate a candidate rule against the warehouse's current label
/// sequences. Runs identically on create and update; the caller supplies a
/// `possible_values` snapshot freshly derived from the warehouse row, so a
/// stale client can never persist endpoints the current configuration does
/// not generate.
pub fn validate_rule(rule: &RangeRule, values: &PossibleValues) -> Result<(), RuleViolation> {
    if rule.is_unconstrained() {
        return Err(RuleViolation::Unconstrained);
    }

    for dimension in Dimension::ALL {
        let (from, to) = rule.range(dimension);

        // Null `from` leaves the dimension unconstrained; a lone `to` is
        // ignored rather than rejected.
        let from = match from {
            Some(f) => f,
            None => continue,
        };

        let start = values.position(dimension, from).ok_or_else(|| {
            RuleViolation::UnknownValue {
                dimension,
                value: from.to_string(),
            }
        })?;

        if let Some(to) = to {
            let end = values.position(dimension, to).ok_or_else(|| {
                RuleViolation::UnknownValue {
                    dimension,
                    value: to.to_string(),
                }
            })?;

            if end < start {
                return Err(RuleViolation::InvertedRange {
                    dimension,
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
        }
    }

    Ok(())
}
