use serde::Serialize;

/// The four independent storage dimensions of a warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Aisle,
    Bay,
    Level,
    Bin,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Aisle,
        Dimension::Bay,
        Dimension::Level,
        Dimension::Bin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Aisle => "aisle",
            Dimension::Bay => "bay",
            Dimension::Level => "level",
            Dimension::Bin => "bin",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The enumerable label sequences of a warehouse, one per dimension.
///
/// Recomputed from the warehouse configuration on every use; callers must
/// not assume stability across concurrent configuration changes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PossibleValues {
    pub aisle: Vec<String>,
    pub bay: Vec<String>,
    pub level: Vec<String>,
    pub bin: Vec<String>,
}

impl PossibleValues {
    pub fn sequence(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Aisle => &self.aisle,
            Dimension::Bay => &self.bay,
            Dimension::Level => &self.level,
            Dimension::Bin => &self.bin,
        }
    }

    /// Position of `value` in the dimension's sequence, if it is a valid
    /// label for that dimension.
    pub fn position(&self, dimension: Dimension, value: &str) -> Option<usize> {
        self.sequence(dimension).iter().position(|v| v == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_uses_sequence_order() {
        let values = PossibleValues {
            aisle: vec!["1".into(), "2".into(), "10".into()],
            ..Default::default()
        };
        // "10" sits after "2" in sequence order even though it sorts
        // before it as a string
        assert_eq!(values.position(Dimension::Aisle, "2"), Some(1));
        assert_eq!(values.position(Dimension::Aisle, "10"), Some(2));
        assert_eq!(values.position(Dimension::Aisle, "3"), None);
        assert_eq!(values.position(Dimension::Bay, "1"), None);
    }
}
