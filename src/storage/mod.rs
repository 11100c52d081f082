// Storage addressing core: warehouse slot coordinates and exclusion ranges.
//
// A warehouse addresses its slots over four dimensions (aisle, bay, level,
// bin). Each dimension is independently configured as numeric or alphabetic
// with a count, producing a finite ordered label sequence. Exclusion rules
// carve closed ranges out of that coordinate space; validation and matching
// both work in sequence order, never in lexicographic string order.

pub mod dimension;
pub mod layout;
pub mod rule;
pub mod validate;

pub use dimension::{generate_sequence, DimensionKind};
pub use layout::{Dimension, PossibleValues};
pub use rule::{is_excluded, RangeRule, SlotCoordinate};
pub use validate::{validate_rule, RuleViolation};
