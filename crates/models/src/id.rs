use derive_more::{Display, From, Into};
use std::str::FromStr;

/// Opaque identity of a resource, unique across a snapshot.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ResourceId(u64);
impl ResourceId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(&self) -> u64 {
        self.0
    }
}
impl FromStr for ResourceId {
    type Err = std::num::ParseIntError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("42", 42)]
    #[case(" 7 ", 7)]
    #[case("0", 0)]
    fn test_parse(#[case] input: &str, #[case] expected: u64) {
        assert_eq!(input.parse::<ResourceId>().unwrap(), ResourceId::new(expected));
    }

    #[rstest]
    #[case("")]
    #[case("-1")]
    #[case("abc")]
    fn test_parse_invalid(#[case] input: &str) {
        assert!(input.parse::<ResourceId>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ResourceId::new(999).to_string(), "999");
    }
}
