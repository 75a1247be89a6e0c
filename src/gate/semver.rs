use std::cmp::Ordering;
use std::fmt;

/// A version as an ordered sequence of numeric components.
///
/// Parsing is total: a missing or non-numeric segment degrades to `0`, so a
/// malformed version string compares as the zero version instead of failing.
/// This fallback is a rule, not an accident, and is relied on by callers that
/// receive version strings from packaging metadata they do not control.
///
/// Comparison is component-wise numeric with zero padding, so trailing zeros
/// are insignificant: `"5.6" == "5.6.0"`.
#[derive(Debug, Clone, Default)]
pub struct SemanticVersion {
    components: Vec<u64>,
}

impl SemanticVersion {
    /// Parse a dot-separated version string. Never fails.
    ///
    /// Examples:
    /// - "5.6.22" -> [5, 6, 22]
    /// - "5.6" -> [5, 6]
    /// - "5.x.2" -> [5, 0, 2]
    /// - "" -> the zero version
    pub fn parse(version: &str) -> Self {
        let components = version
            .split('.')
            .map(|segment| segment.trim().parse::<u64>().unwrap_or(0))
            .collect();
        Self { components }
    }

    /// The zero version. Every version compares greater than or equal to it.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Whether every component is zero (including the parse fallback).
    pub fn is_zero(&self) -> bool {
        self.components.iter().all(|&c| c == 0)
    }

    fn component(&self, index: usize) -> u64 {
        self.components.get(index).copied().unwrap_or(0)
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            match self.component(i).cmp(&other.component(i)) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Equality must agree with the padded comparison, so it cannot be derived
// over the raw component vector.
impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SemanticVersion {}

impl From<&str> for SemanticVersion {
    fn from(version: &str) -> Self {
        Self::parse(version)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.components.is_empty() {
            return f.write_str("0");
        }
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{component}")?;
        }
        Ok(())
    }
}
