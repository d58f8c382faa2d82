//! Cursor holding a single numeric offset.

use std::str::FromStr;

use crate::cursor::{CursorParameters, CursorSchema, FieldRule, OpaqueCursor, decode_parameters};
use crate::error::{CursorResult, CursorValidationError};

const OFFSET_KEY: &str = "offset";

/// Cursor whose parameters are exactly `{offset: n}` with `n >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OffsetCursor {
    pub offset: u64,
}

impl OffsetCursor {
    /// Largest offset a cursor can carry.
    pub const MAX_OFFSET: u64 = i64::MAX as u64;

    pub fn new(offset: u64) -> Self {
        Self { offset }
    }

    /// Schema applied to decoded offset cursors.
    pub fn schema() -> CursorSchema {
        CursorSchema::new().field(FieldRule::integer(OFFSET_KEY).min(0).required())
    }
}

impl OpaqueCursor for OffsetCursor {
    fn to_parameters(&self) -> CursorParameters {
        let offset = i64::try_from(self.offset).unwrap_or(i64::MAX);
        CursorParameters::new().with(OFFSET_KEY, offset)
    }

    fn from_string(encoded: &str) -> CursorResult<Self> {
        let parameters = Self::schema().validate(&decode_parameters(encoded)?)?;
        let offset = parameters
            .get_i64(OFFSET_KEY)
            .and_then(|n| u64::try_from(n).ok())
            .ok_or_else(|| CursorValidationError::single("\"offset\" is required"))?;
        Ok(Self { offset })
    }
}

impl FromStr for OffsetCursor {
    type Err = CursorValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Cursor;
    use proptest::prelude::*;

    #[test]
    fn test_encodes_as_offset_query() {
        assert_eq!(OffsetCursor::new(5).encode(), "b2Zmc2V0PTU=");
        assert_eq!(
            OffsetCursor::new(5).encode(),
            Cursor::new([("offset", 5)]).encode()
        );
    }

    // Test critique: offsets négatifs, non numériques ou absents sont rejetés
    #[test]
    fn test_rejects_malformed_offsets() {
        let negative = Cursor::new([("offset", -1)]).encode();
        let err = negative.parse::<OffsetCursor>().unwrap_err();
        assert_eq!(
            err.problems,
            vec!["\"offset\" must be greater than or equal to 0".to_string()]
        );

        let text = Cursor::new([("offset", "ten")]).encode();
        assert_eq!(
            OffsetCursor::from_string(&text).unwrap_err().problems,
            vec!["\"offset\" must be a number".to_string()]
        );

        let missing = Cursor::new([("id", "node1")]).encode();
        assert_eq!(
            OffsetCursor::from_string(&missing).unwrap_err().problems,
            vec![
                "\"offset\" is required".to_string(),
                "\"id\" is not allowed".to_string()
            ]
        );

        let empty = Cursor::new([("offset", "")]).encode();
        assert!(OffsetCursor::from_string(&empty).is_err());
    }

    proptest! {
        #[test]
        fn prop_offset_round_trip(n in 0..=OffsetCursor::MAX_OFFSET) {
            let decoded = OffsetCursor::from_string(&OffsetCursor::new(n).encode()).unwrap();
            prop_assert_eq!(decoded.offset, n);
        }
    }
}
