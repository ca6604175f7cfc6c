use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Recurrence cadence for an admin-created event.
///
/// Deserialization never fails: strings go through [`RepeatPattern::parse`]
/// and anything else (null, numbers, objects) is `None`, so a bad selector
/// produces a single occurrence instead of a rejected request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatPattern {
    #[default]
    None,
    Daily,
    Weekdays,
    Weekly,
    Biweekly,
    Monthly,
}

impl RepeatPattern {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekdays => "weekdays",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
        }
    }

    /// Lenient parse: anything unrecognized is `None`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Self::Daily,
            "weekdays" => Self::Weekdays,
            "weekly" => Self::Weekly,
            "biweekly" => Self::Biweekly,
            "monthly" => Self::Monthly,
            _ => Self::None,
        }
    }
}

impl fmt::Display for RepeatPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct LenientPatternVisitor;

impl<'de> Visitor<'de> for LenientPatternVisitor {
    type Value = RepeatPattern;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a repeat pattern")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<RepeatPattern, E> {
        Ok(RepeatPattern::parse(value))
    }

    fn visit_bool<E: de::Error>(self, _value: bool) -> Result<RepeatPattern, E> {
        Ok(RepeatPattern::None)
    }

    fn visit_i64<E: de::Error>(self, _value: i64) -> Result<RepeatPattern, E> {
        Ok(RepeatPattern::None)
    }

    fn visit_u64<E: de::Error>(self, _value: u64) -> Result<RepeatPattern, E> {
        Ok(RepeatPattern::None)
    }

    fn visit_f64<E: de::Error>(self, _value: f64) -> Result<RepeatPattern, E> {
        Ok(RepeatPattern::None)
    }

    fn visit_none<E: de::Error>(self) -> Result<RepeatPattern, E> {
        Ok(RepeatPattern::None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<RepeatPattern, E> {
        Ok(RepeatPattern::None)
    }

    fn visit_some<D: Deserializer<'de>>(self, inner: D) -> Result<RepeatPattern, D::Error> {
        inner.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RepeatPattern, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(RepeatPattern::None)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RepeatPattern, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(RepeatPattern::None)
    }
}

impl<'de> Deserialize<'de> for RepeatPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LenientPatternVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_patterns() {
        assert_eq!(RepeatPattern::parse("daily"), RepeatPattern::Daily);
        assert_eq!(RepeatPattern::parse("Weekdays"), RepeatPattern::Weekdays);
        assert_eq!(RepeatPattern::parse(" biweekly "), RepeatPattern::Biweekly);
    }

    #[test]
    fn test_parse_unknown_is_none() {
        assert_eq!(RepeatPattern::parse("fortnightly"), RepeatPattern::None);
        assert_eq!(RepeatPattern::parse(""), RepeatPattern::None);
    }

    fn from_json(raw: &str) -> Option<RepeatPattern> {
        serde_json::from_str::<RepeatPattern>(raw).ok()
    }

    #[test]
    fn test_deserialize_unknown_is_none() {
        assert_eq!(from_json("\"yearly\""), Some(RepeatPattern::None));
        assert_eq!(from_json("\"monthly\""), Some(RepeatPattern::Monthly));
    }

    #[test]
    fn test_deserialize_is_case_insensitive() {
        assert_eq!(from_json("\"Weekly\""), Some(RepeatPattern::Weekly));
        assert_eq!(from_json("\" BIWEEKLY \""), Some(RepeatPattern::Biweekly));
    }

    #[test]
    fn test_deserialize_non_strings_are_none() {
        for raw in ["null", "7", "-1", "2.5", "true", "[\"weekly\"]", "{\"every\": \"week\"}"] {
            assert_eq!(from_json(raw), Some(RepeatPattern::None), "{raw}");
        }
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&RepeatPattern::Weekdays).ok().as_deref(),
            Some("\"weekdays\"")
        );
    }
}
