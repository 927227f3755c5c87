//! Constraint descriptors for capture options.
//!
//! A descriptor bundles the constraint kinds that apply to one option. Every
//! kind that is present is checked; a value must satisfy all of them.

use regex::Regex;

use crate::value::OptionValue;

/// Numeric type and range constraints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericConstraint {
    /// Whether the number must be a mathematical integer.
    pub integer: bool,
    /// Inclusive lower bound.
    pub min: Option<f64>,
    /// Inclusive upper bound.
    pub max: Option<f64>,
}

/// The allowed shape of a value for one option.
#[derive(Debug, Clone, Default)]
pub struct Descriptor {
    /// The value must be falsy (value-less switch).
    pub requires_null: bool,
    /// Numeric constraints.
    pub numeric: Option<NumericConstraint>,
    /// The canonical string form must match this pattern.
    pub pattern: Option<Regex>,
    /// The value must strictly equal one of these.
    pub allowed: Option<Vec<OptionValue>>,
}

impl Descriptor {
    /// A value-less switch such as `--hflip`.
    #[must_use]
    pub fn flag() -> Self {
        Self {
            requires_null: true,
            ..Self::default()
        }
    }

    /// Any number.
    #[must_use]
    pub fn number() -> Self {
        Self {
            numeric: Some(NumericConstraint::default()),
            ..Self::default()
        }
    }

    /// Any integer.
    #[must_use]
    pub fn integer() -> Self {
        Self {
            numeric: Some(NumericConstraint {
                integer: true,
                ..NumericConstraint::default()
            }),
            ..Self::default()
        }
    }

    /// Text matching `pattern`.
    #[must_use]
    pub fn matching(pattern: Regex) -> Self {
        Self {
            pattern: Some(pattern),
            ..Self::default()
        }
    }

    /// One of the given text values.
    #[must_use]
    pub fn one_of(values: &[&str]) -> Self {
        Self {
            allowed: Some(values.iter().map(|value| OptionValue::from(*value)).collect()),
            ..Self::default()
        }
    }

    /// Set the inclusive lower bound, adding a numeric constraint if needed.
    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.numeric.get_or_insert_with(NumericConstraint::default).min = Some(min);
        self
    }

    /// Set the inclusive upper bound, adding a numeric constraint if needed.
    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.numeric.get_or_insert_with(NumericConstraint::default).max = Some(max);
        self
    }

    /// Inclusive range shorthand.
    #[must_use]
    pub fn range(self, min: f64, max: f64) -> Self {
        self.min(min).max(max)
    }

    /// Number of constraint kinds present.
    pub fn constraint_count(&self) -> usize {
        [
            self.requires_null,
            self.numeric.is_some(),
            self.pattern.is_some(),
            self.allowed.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    /// Whether the option takes no value.
    pub const fn is_flag(&self) -> bool {
        self.requires_null
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_range() {
        let descriptor = Descriptor::integer().range(-100.0, 100.0);
        assert_eq!(
            descriptor.numeric,
            Some(NumericConstraint {
                integer: true,
                min: Some(-100.0),
                max: Some(100.0),
            })
        );
        assert_eq!(descriptor.constraint_count(), 1);
    }

    #[test]
    fn test_bound_without_numeric_adds_numeric() {
        let descriptor = Descriptor::default().max(1.0);
        let numeric = descriptor.numeric.expect("numeric constraint should exist");
        assert!(!numeric.integer);
        assert_eq!(numeric.min, None);
        assert_eq!(numeric.max, Some(1.0));
    }

    #[test]
    fn test_combined_kinds_are_counted() {
        let pattern = Regex::new("^[a-z]+$").expect("pattern should compile");
        let mut descriptor = Descriptor::matching(pattern);
        descriptor.allowed = Descriptor::one_of(&["auto", "off"]).allowed;
        assert_eq!(descriptor.constraint_count(), 2);
    }

    #[test]
    fn test_empty_descriptor_has_no_constraints() {
        assert_eq!(Descriptor::default().constraint_count(), 0);
        assert!(Descriptor::flag().is_flag());
    }
}
