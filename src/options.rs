//! Validated option sets rendered as capture arguments.

use std::ffi::OsString;

use crate::error::Result;
use crate::registry;
use crate::validator::Validator;
use crate::value::OptionValue;

/// An ordered set of options that have passed validation.
///
/// Options keep their first insertion position; setting an option again
/// replaces its value in place.
#[derive(Debug, Clone, Default)]
pub struct CaptureOptions {
    validator: Validator,
    entries: Vec<(String, OptionValue)>,
}

impl CaptureOptions {
    /// Create an empty set that validates with `validator`.
    #[must_use]
    pub const fn new(validator: Validator) -> Self {
        Self {
            validator,
            entries: Vec::new(),
        }
    }

    /// Validate and store an option.
    ///
    /// The set is left unchanged when validation fails.
    pub fn set<V: Into<OptionValue>>(&mut self, name: &str, value: V) -> Result<&mut Self> {
        let value = value.into();
        self.validator.ensure_valid(name, &value)?;

        match self.entries.iter_mut().find(|(existing, _)| existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name.to_owned(), value)),
        }
        Ok(self)
    }

    /// Value of an option, if set.
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.entries
            .iter()
            .find_map(|(existing, value)| (existing == name).then_some(value))
    }

    /// Number of options set.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no options are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Option names and values in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Render the options as arguments for the capture binary.
    ///
    /// Switches render as their bare flag, or not at all when explicitly set
    /// to `false`; all other options as the flag followed by the canonical
    /// value.
    pub fn to_args(&self) -> Result<Vec<OsString>> {
        let mut args = Vec::with_capacity(self.entries.len() * 2);
        for (name, value) in &self.entries {
            let is_switch = registry::option(name)?.descriptor.is_flag();
            if is_switch && matches!(value, OptionValue::Bool(false)) {
                log::debug!("switch {name} turned off");
                continue;
            }

            args.push(OsString::from(registry::flag(name)?));
            if !is_switch {
                args.push(OsString::from(value.to_string()));
            }
        }
        Ok(args)
    }
}
