//! Enforcement of option descriptors against candidate values.
//!
//! Validation never transforms the value: it either returns `Ok(())` or the
//! first violated constraint, in the order null, numeric, pattern, allowed.

use serde::Deserialize;

use crate::descriptor::{Descriptor, NumericConstraint};
use crate::error::{OptionError, Result, Violation};
use crate::registry;
use crate::value::OptionValue;

/// How numeric range bounds are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundsPolicy {
    /// Each bound is checked whenever it is present, including a minimum of 0.
    #[default]
    Independent,
    /// Both bounds only apply when the minimum is present and non-zero.
    ///
    /// Matches the behavior earlier wrappers shipped with, where `height`
    /// (maximum only) is effectively unbounded.
    Legacy,
}

/// Stateless option validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    bounds: BoundsPolicy,
}

impl Validator {
    /// Create a validator with the given bounds policy.
    #[must_use]
    pub const fn new(bounds: BoundsPolicy) -> Self {
        Self { bounds }
    }

    /// The bounds policy in effect.
    pub const fn bounds(&self) -> BoundsPolicy {
        self.bounds
    }

    /// Check `value` against the registered constraints of option `name`.
    ///
    /// # Errors
    ///
    /// * `InvalidOption` if `name` is not registered
    /// * `InvalidOptionValue` naming the first violated constraint otherwise
    pub fn ensure_valid(&self, name: &str, value: &OptionValue) -> Result<()> {
        let descriptor = registry::descriptor(name)?;
        self.check(descriptor, value).map_err(|violation| {
            log::debug!("rejected {name}={value}: must {violation}");
            OptionError::InvalidOptionValue {
                name: name.to_owned(),
                violation,
                value: value.to_string(),
            }
        })
    }

    /// Check `value` against an arbitrary descriptor.
    pub fn check(
        &self,
        descriptor: &Descriptor,
        value: &OptionValue,
    ) -> std::result::Result<(), Violation> {
        if descriptor.requires_null {
            log::trace!("checking {value} is empty");
            if value.is_truthy() {
                return Err(Violation::NotEmpty);
            }
        }

        if let Some(numeric) = &descriptor.numeric {
            log::trace!("checking {value} against {numeric:?}");
            self.check_numeric(numeric, value)?;
        }

        if let Some(pattern) = &descriptor.pattern {
            log::trace!("checking {value} against /{pattern}/");
            if !pattern.is_match(&value.to_string()) {
                return Err(Violation::PatternMismatch(pattern.as_str().to_owned()));
            }
        }

        if let Some(allowed) = &descriptor.allowed {
            log::trace!("checking {value} is one of {} values", allowed.len());
            if !allowed.iter().any(|candidate| candidate.strict_eq(value)) {
                return Err(Violation::NotAllowed(
                    allowed.iter().map(ToString::to_string).collect(),
                ));
            }
        }

        Ok(())
    }

    fn check_numeric(
        &self,
        numeric: &NumericConstraint,
        value: &OptionValue,
    ) -> std::result::Result<(), Violation> {
        let number = value.to_number();

        // Reject anything whose canonical form differs from what was given,
        // e.g. " 5", "05", "5.0" or "1e3".
        if number.is_nan() || OptionValue::Number(number).to_string() != value.to_string() {
            return Err(Violation::NotANumber);
        }

        let (min, max) = match self.bounds {
            BoundsPolicy::Independent => (numeric.min, numeric.max),
            BoundsPolicy::Legacy => match numeric.min {
                Some(min) if min != 0.0 && !min.is_nan() => (Some(min), numeric.max),
                _ => (None, None),
            },
        };

        if let Some(min) = min {
            if number < min {
                return Err(Violation::BelowMinimum(min));
            }
        }

        if let Some(max) = max {
            if number > max {
                return Err(Violation::AboveMaximum(max));
            }
        }

        if numeric.integer && !(number.is_finite() && number.fract() == 0.0) {
            return Err(Violation::NotAnInteger);
        }

        Ok(())
    }
}

/// Validate an option with the default bounds policy.
///
/// # Errors
///
/// See [`Validator::ensure_valid`].
pub fn ensure_valid_option(name: &str, value: &OptionValue) -> Result<()> {
    Validator::default().ensure_valid(name, value)
}
