use serde::{Deserialize, Serialize};

/// How a storage dimension labels its positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DimensionKind {
    Numeric,
    Alphabetic,
}

impl DimensionKind {
    /// Parse the value stored in the warehouse row. Unknown strings are
    /// treated the same as an unconfigured dimension.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "numeric" => Some(Self::Numeric),
            "alphabetic" => Some(Self::Alphabetic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Alphabetic => "alphabetic",
        }
    }
}

/// Generate the ordered label sequence for one dimension.
///
/// Total over all inputs: a missing kind, a missing count, or a count of
/// zero or less all yield an empty sequence (the dimension is simply
/// unused). Numeric dimensions count "1".."n"; alphabetic dimensions walk
/// the bijective base-26 sequence "A".."Z", "AA", "AB", ...
pub fn generate_sequence(kind: Option<DimensionKind>, count: Option<i32>) -> Vec<String> {
    let count = match (kind, count) {
        (Some(_), Some(n)) if n > 0 => n as u32,
        _ => return Vec::new(),
    };

    match kind {
        Some(DimensionKind::Numeric) => (1..=count).map(|n| n.to_string()).collect(),
        Some(DimensionKind::Alphabetic) => (1..=count).map(alphabetic_label).collect(),
        None => unreachable!(),
    }
}

/// Label for 1-based position `n` in bijective base-26: 1 => "A",
/// 26 => "Z", 27 => "AA", 28 => "AB". There is no digit for zero, hence
/// the `n - 1` before every division.
fn alphabetic_label(mut n: u32) -> String {
    let mut buf = Vec::new();
    while n > 0 {
        n -= 1;
        buf.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    buf.reverse();
    // Only ASCII uppercase bytes are ever pushed
    String::from_utf8(buf).unwrap_or_default()
}
