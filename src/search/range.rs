//! range.rs
//! Best-known input prefixes for one register state.

use serde::{Serialize, Deserialize};

/// The lexicographically smallest and largest input prefix known to reach a
/// register state.
///
/// **Invariant:** every range alive at the same search step has `min` and
/// `max` of equal length (the number of reads processed so far), and both
/// only contain the characters `'1'..='9'`. Under that invariant plain
/// string ordering is the same as numeric ordering of the digit sequence,
/// which is what [`InputRange::merge`] relies on. Digits are never converted
/// to integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct InputRange {
    pub min: String,
    pub max: String,
}

impl InputRange {
    /// The range of the initial frontier, before any input was read.
    pub fn empty() -> Self { Self::default() }

    /// A range reached by exactly one input.
    pub fn single(digits: &str) -> Self {
        Self { min: digits.to_string(), max: digits.to_string() }
    }

    pub fn new(min: impl Into<String>, max: impl Into<String>) -> Self {
        let range = Self { min: min.into(), max: max.into() };
        debug_assert_eq!(range.min.len(), range.max.len(), "unequal prefix lengths");
        range
    }

    /// Number of digits consumed to reach this range.
    #[inline(always)]
    pub fn len(&self) -> usize { self.min.len() }

    pub fn is_empty(&self) -> bool { self.min.is_empty() }

    /// Appends one input digit to both ends.
    pub fn extend(&self, digit: u8) -> Self {
        debug_assert!((1..=9).contains(&digit));
        let c = char::from(b'0' + digit);
        let mut min = String::with_capacity(self.min.len() + 1);
        min.push_str(&self.min);
        min.push(c);
        let mut max = String::with_capacity(self.max.len() + 1);
        max.push_str(&self.max);
        max.push(c);
        Self { min, max }
    }

    /// Combines two ranges for the same state, keeping the extremes.
    ///
    /// Idempotent, commutative and associative. Both operands must have the
    /// same length.
    pub fn merge(&self, other: &InputRange) -> InputRange {
        debug_assert_eq!(self.len(), other.len(), "merging prefixes of different lengths");
        InputRange {
            min: if other.min < self.min { other.min.clone() } else { self.min.clone() },
            max: if other.max > self.max { other.max.clone() } else { self.max.clone() },
        }
    }

    /// In-place form of [`merge`](Self::merge) that avoids cloning when
    /// `self` already holds the extremes.
    pub fn merge_from(&mut self, other: InputRange) {
        debug_assert_eq!(self.len(), other.len(), "merging prefixes of different lengths");
        if other.min < self.min {
            self.min = other.min;
        }
        if other.max > self.max {
            self.max = other.max;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn r(min: &str, max: &str) -> InputRange {
        InputRange::new(min, max)
    }

    #[rstest]
    #[case(r("12", "34"))]
    #[case(r("99", "99"))]
    #[case(InputRange::empty())]
    fn test_merge_idempotent(#[case] a: InputRange) {
        assert_eq!(a.merge(&a), a);
    }

    #[rstest]
    #[case(r("12", "34"), r("21", "98"))]
    #[case(r("55", "56"), r("11", "19"))]
    #[case(r("19", "91"), r("91", "91"))]
    fn test_merge_commutative(#[case] a: InputRange, #[case] b: InputRange) {
        assert_eq!(a.merge(&b), b.merge(&a));
    }

    #[test]
    fn test_merge_associative() {
        let a = r("345", "567");
        let b = r("123", "456");
        let c = r("234", "999");
        assert_eq!(a.merge(&b).merge(&c), a.merge(&b.merge(&c)));
        assert_eq!(a.merge(&b).merge(&c), r("123", "999"));
    }

    #[test]
    fn test_merge_keeps_min_not_greater_than_max() {
        let merged = r("88", "88").merge(&r("11", "11"));
        assert_eq!(merged, r("11", "88"));
        assert!(merged.min <= merged.max);
    }

    #[test]
    fn test_string_order_matches_numeric_order_at_equal_length() {
        // "9" < "19" as strings but not as numbers; equal lengths keep them aligned.
        let a = r("91", "91");
        let b = r("19", "19");
        let merged = a.merge(&b);
        assert_eq!(merged.min.parse::<u64>().unwrap(), 19);
        assert_eq!(merged.max.parse::<u64>().unwrap(), 91);
    }

    #[test]
    fn test_merge_from_matches_merge() {
        let a = r("456", "789");
        let b = r("123", "654");
        let mut c = a.clone();
        c.merge_from(b.clone());
        assert_eq!(c, a.merge(&b));
    }

    #[test]
    fn test_extend_appends_digit() {
        let base = r("13", "97");
        let next = base.extend(5);
        assert_eq!(next, r("135", "975"));
        assert_eq!(next.len(), 3);
        assert_eq!(InputRange::empty().extend(1), InputRange::single("1"));
    }
}
