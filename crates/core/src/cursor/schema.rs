//! Declarative validation of decoded cursor parameters.
//!
//! A [`CursorSchema`] is a list of [`FieldRule`]s evaluated against the raw
//! string mapping produced by [`crate::cursor::decode_parameters`]. Values are
//! coerced to their declared type (numeric strings to numbers, `"true"` to
//! booleans). Every violation is collected so the resulting
//! [`CursorValidationError`] reports all of them at once.
//!
//! # Example
//!
//! ```
//! use folio_core::cursor::{CursorSchema, FieldRule};
//!
//! let schema = CursorSchema::new()
//!     .field(FieldRule::string("id").required())
//!     .field(FieldRule::integer("rank").min(0));
//! ```

use crate::cursor::params::{CursorParameters, ParamValue, RawCursorParameters};
use crate::error::{CursorResult, CursorValidationError};

/// Type and bounds accepted for a single field.
#[derive(Debug, Clone, PartialEq)]
enum FieldKind {
    String { allow_empty: bool },
    Integer { min: Option<i64>, max: Option<i64> },
    Number,
    Boolean,
}

/// Constraint set for one cursor field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    name: String,
    kind: FieldKind,
    required: bool,
}

impl FieldRule {
    fn with_kind(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
        }
    }

    /// String field. An empty string counts as absent unless [`Self::allow_empty`] is set.
    pub fn string(name: impl Into<String>) -> Self {
        Self::with_kind(name, FieldKind::String { allow_empty: false })
    }

    /// Integer field, coerced from its decimal representation.
    pub fn integer(name: impl Into<String>) -> Self {
        Self::with_kind(name, FieldKind::Integer { min: None, max: None })
    }

    /// Finite floating point field.
    pub fn number(name: impl Into<String>) -> Self {
        Self::with_kind(name, FieldKind::Number)
    }

    /// Boolean field, accepting `true` / `false` in any case.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::with_kind(name, FieldKind::Boolean)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Inclusive lower bound. Only meaningful for integer fields.
    pub fn min(mut self, bound: i64) -> Self {
        if let FieldKind::Integer { min, .. } = &mut self.kind {
            *min = Some(bound);
        }
        self
    }

    /// Inclusive upper bound. Only meaningful for integer fields.
    pub fn max(mut self, bound: i64) -> Self {
        if let FieldKind::Integer { max, .. } = &mut self.kind {
            *max = Some(bound);
        }
        self
    }

    /// Keep empty strings as values instead of treating them as missing.
    pub fn allow_empty(mut self) -> Self {
        if let FieldKind::String { allow_empty } = &mut self.kind {
            *allow_empty = true;
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Coerce a present raw value, returning a problem description on failure.
    fn coerce(&self, raw: &str) -> Result<ParamValue, String> {
        let name = &self.name;
        match &self.kind {
            FieldKind::String { .. } => Ok(ParamValue::Str(raw.to_string())),
            FieldKind::Integer { min, max } => {
                let trimmed = raw.trim();
                let value = match trimmed.parse::<i64>() {
                    Ok(v) => v,
                    Err(_) => match trimmed.parse::<f64>() {
                        Ok(f) if f.is_finite() => integral(f)
                            .ok_or_else(|| format!("\"{}\" must be an integer", name))?,
                        _ => return Err(format!("\"{}\" must be a number", name)),
                    },
                };
                if let Some(min) = min
                    && value < *min
                {
                    return Err(format!(
                        "\"{}\" must be greater than or equal to {}",
                        name, min
                    ));
                }
                if let Some(max) = max
                    && value > *max
                {
                    return Err(format!("\"{}\" must be less than or equal to {}", name, max));
                }
                Ok(ParamValue::Int(value))
            }
            FieldKind::Number => match raw.trim().parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(ParamValue::Float(f)),
                _ => Err(format!("\"{}\" must be a number", name)),
            },
            FieldKind::Boolean => {
                if raw.eq_ignore_ascii_case("true") {
                    Ok(ParamValue::Bool(true))
                } else if raw.eq_ignore_ascii_case("false") {
                    Ok(ParamValue::Bool(false))
                } else {
                    Err(format!("\"{}\" must be a boolean", name))
                }
            }
        }
    }

    fn treats_as_missing(&self, raw: &str) -> bool {
        raw.is_empty() && !matches!(self.kind, FieldKind::String { allow_empty: true })
    }
}

/// `f` as an integer when it has no fractional part and fits in `i64`.
fn integral(f: f64) -> Option<i64> {
    (f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64).then_some(f as i64)
}

/// Declarative field-constraint set for cursor parameters.
///
/// Unknown keys are rejected unless [`CursorSchema::allow_unknown`] is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CursorSchema {
    fields: Vec<FieldRule>,
    allow_unknown: bool,
}

impl CursorSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, rule: FieldRule) -> Self {
        self.fields.push(rule);
        self
    }

    /// Pass unknown keys through as string values.
    pub fn allow_unknown(mut self) -> Self {
        self.allow_unknown = true;
        self
    }

    /// Validate and coerce raw parameters.
    ///
    /// Problems are reported in field declaration order, followed by unknown
    /// keys in key order.
    pub fn validate(&self, raw: &RawCursorParameters) -> CursorResult<CursorParameters> {
        let mut problems = Vec::new();
        let mut parameters = CursorParameters::new();

        for rule in &self.fields {
            match raw.get(rule.name()) {
                Some(value) if !rule.treats_as_missing(value) => match rule.coerce(value) {
                    Ok(coerced) => parameters.insert(rule.name(), coerced),
                    Err(problem) => problems.push(problem),
                },
                _ if rule.required => problems.push(format!("\"{}\" is required", rule.name())),
                _ => {}
            }
        }

        for (key, value) in raw {
            if self.fields.iter().any(|rule| rule.name() == key) {
                continue;
            }
            if self.allow_unknown {
                parameters.insert(key.as_str(), value.as_str());
            } else {
                problems.push(format!("\"{}\" is not allowed", key));
            }
        }

        if problems.is_empty() {
            Ok(parameters)
        } else {
            Err(CursorValidationError::new(problems))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawCursorParameters {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn id_schema() -> CursorSchema {
        CursorSchema::new().field(FieldRule::string("id").required())
    }

    #[test]
    fn test_coerces_declared_types() {
        let schema = CursorSchema::new()
            .field(FieldRule::string("id").required())
            .field(FieldRule::integer("rank"))
            .field(FieldRule::number("score"))
            .field(FieldRule::boolean("pinned"));

        let params = schema
            .validate(&raw(&[
                ("id", "a"),
                ("rank", "7"),
                ("score", "0.5"),
                ("pinned", "TRUE"),
            ]))
            .unwrap();

        assert_eq!(
            params,
            CursorParameters::new()
                .with("id", "a")
                .with("rank", 7i64)
                .with("score", 0.5)
                .with("pinned", true)
        );
    }

    // Test critique: toutes les violations sont rapportées, pas seulement la première
    #[test]
    fn test_collects_every_violation() {
        let schema = CursorSchema::new()
            .field(FieldRule::string("id").required())
            .field(FieldRule::integer("offset").min(0).required());

        let err = schema
            .validate(&raw(&[("offset", "-1"), ("evil", "1")]))
            .unwrap_err();

        assert_eq!(
            err.problems,
            vec![
                "\"id\" is required".to_string(),
                "\"offset\" must be greater than or equal to 0".to_string(),
                "\"evil\" is not allowed".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let err = id_schema().validate(&raw(&[("id", "")])).unwrap_err();
        assert_eq!(err.problems, vec!["\"id\" is required".to_string()]);

        let schema = CursorSchema::new().field(FieldRule::string("id").allow_empty().required());
        assert_eq!(
            schema.validate(&raw(&[("id", "")])).unwrap().get_str("id"),
            Some("")
        );
    }

    #[test]
    fn test_integer_messages_distinguish_fractions_from_garbage() {
        let schema = CursorSchema::new().field(FieldRule::integer("n").max(10));

        let err = schema.validate(&raw(&[("n", "1.5")])).unwrap_err();
        assert_eq!(err.problems, vec!["\"n\" must be an integer".to_string()]);

        let err = schema.validate(&raw(&[("n", "abc")])).unwrap_err();
        assert_eq!(err.problems, vec!["\"n\" must be a number".to_string()]);

        let err = schema.validate(&raw(&[("n", "11")])).unwrap_err();
        assert_eq!(
            err.problems,
            vec!["\"n\" must be less than or equal to 10".to_string()]
        );
    }

    // Les nombres entiers écrits en notation décimale ou exponentielle sont convertis
    #[test]
    fn test_integral_floats_coerce_to_integers() {
        let schema = CursorSchema::new().field(FieldRule::integer("offset").min(0).required());

        let params = schema.validate(&raw(&[("offset", "5.0")])).unwrap();
        assert_eq!(params.get_i64("offset"), Some(5));

        let params = schema.validate(&raw(&[("offset", "1e3")])).unwrap();
        assert_eq!(params.get_i64("offset"), Some(1000));

        let err = schema.validate(&raw(&[("offset", "-2.0")])).unwrap_err();
        assert_eq!(
            err.problems,
            vec!["\"offset\" must be greater than or equal to 0".to_string()]
        );

        let err = schema.validate(&raw(&[("offset", "1e30")])).unwrap_err();
        assert_eq!(
            err.problems,
            vec!["\"offset\" must be an integer".to_string()]
        );
    }

    #[test]
    fn test_allow_unknown_passes_extra_keys_through() {
        let params = id_schema()
            .allow_unknown()
            .validate(&raw(&[("id", "x"), ("sort", "name")]))
            .unwrap();
        assert_eq!(params.get_str("sort"), Some("name"));
    }

    #[test]
    fn test_optional_field_may_be_absent() {
        let schema = CursorSchema::new().field(FieldRule::boolean("flag"));
        assert!(schema.validate(&raw(&[])).unwrap().is_empty());

        let err = schema.validate(&raw(&[("flag", "yes")])).unwrap_err();
        assert_eq!(err.problems, vec!["\"flag\" must be a boolean".to_string()]);
    }
}
