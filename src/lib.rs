//! Pi-Cam-Still: validated option handling for the Raspberry Pi still camera
//!
//! This library checks named capture options against a fixed registry of
//! constraints and drives the `raspistill` binary to take pictures, with a
//! mockable process layer for testing without hardware.

pub mod capture;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod options;
pub mod registry;
pub mod validator;
pub mod value;

#[cfg(test)]
pub mod mock;

pub use capture::{take_picture, ProcessOutput, ProcessRunner, Raspistill, SystemRunner};
pub use config::Config;
pub use descriptor::{Descriptor, NumericConstraint};
pub use error::{CaptureError, ConfigError, OptionError, Violation};
pub use options::CaptureOptions;
pub use registry::{has_option, is_option_name};
pub use validator::{ensure_valid_option, BoundsPolicy, Validator};
pub use value::OptionValue;
