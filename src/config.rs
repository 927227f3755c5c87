//! TOML configuration for the capture wrapper.
//!
//! ```toml
//! program = "/usr/bin/raspistill"
//! output_dir = "/home/pi/captures"
//! bounds = "independent"
//!
//! [options]
//! width = 1920
//! awb = "auto"
//! hflip = true
//! ```
//!
//! Switches such as `hflip` are turned on with `true` and left off with
//! `false`.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::capture::{Raspistill, DEFAULT_PROGRAM};
use crate::descriptor::Descriptor;
use crate::error::ConfigError;
use crate::options::CaptureOptions;
use crate::registry;
use crate::validator::{BoundsPolicy, Validator};
use crate::value::OptionValue;

/// Capture wrapper configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Capture binary to run.
    pub program: PathBuf,
    /// Directory pictures are written to; the current directory if unset.
    pub output_dir: Option<PathBuf>,
    /// How option range bounds are applied.
    pub bounds: BoundsPolicy,
    /// Options applied to every capture.
    pub options: BTreeMap<String, OptionValue>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            output_dir: None,
            bounds: BoundsPolicy::default(),
            options: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded config from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Validator honoring the configured bounds policy.
    pub const fn validator(&self) -> Validator {
        Validator::new(self.bounds)
    }

    /// Validate the configured default options.
    pub fn capture_options(&self) -> Result<CaptureOptions, ConfigError> {
        let mut options = CaptureOptions::new(self.validator());
        for (name, value) in &self.options {
            let value = match value {
                OptionValue::Bool(true)
                    if registry::descriptor(name).is_ok_and(Descriptor::is_flag) =>
                {
                    OptionValue::Null
                }
                other => other.clone(),
            };
            options.set(name, value)?;
        }
        Ok(options)
    }

    /// Camera using the configured program and output directory.
    pub fn camera(&self) -> Raspistill {
        let camera = Raspistill::new().with_program(self.program.clone());
        match &self.output_dir {
            Some(dir) => camera.with_output_dir(dir.clone()),
            None => camera,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_toml_str("").expect("empty config should parse");
        assert_eq!(config.program, PathBuf::from("raspistill"));
        assert_eq!(config.output_dir, None);
        assert_eq!(config.bounds, BoundsPolicy::Independent);
        assert!(config.options.is_empty());
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml_str(
            r#"
            program = "/usr/bin/raspistill"
            output_dir = "/home/pi/captures"
            bounds = "legacy"

            [options]
            width = 1920
            height = 1080
            awb = "auto"
            hflip = true
            vflip = false
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.bounds, BoundsPolicy::Legacy);
        assert_eq!(
            config.camera().output_path("a"),
            PathBuf::from("/home/pi/captures/a.jpg")
        );
        assert_eq!(config.camera().program(), Path::new("/usr/bin/raspistill"));

        let options = config.capture_options().expect("options should be valid");
        assert_eq!(options.len(), 5);
        let args = options.to_args().expect("args should render");
        assert_eq!(
            args,
            ["--awb", "auto", "--height", "1080", "--hflip", "--width", "1920"]
        );
    }

    #[test]
    fn test_switch_booleans_follow_their_meaning() {
        let off = Config::from_toml_str("[options]\nhflip = false\n")
            .expect("config should parse")
            .capture_options()
            .expect("hflip = false should be valid");
        assert!(off.to_args().expect("args should render").is_empty());

        let on = Config::from_toml_str("[options]\nhflip = true\n")
            .expect("config should parse")
            .capture_options()
            .expect("hflip = true should be valid");
        assert_eq!(on.to_args().expect("args should render"), ["--hflip"]);
    }

    #[test]
    fn test_true_is_only_a_switch_value() {
        let config = Config::from_toml_str("[options]\nawb = true\n")
            .expect("config should parse");
        assert!(matches!(
            config.capture_options(),
            Err(ConfigError::Option(_))
        ));
    }

    #[test]
    fn test_invalid_default_option() {
        let config = Config::from_toml_str("[options]\nquality = 250\n")
            .expect("config should parse");
        let err = config
            .capture_options()
            .expect_err("quality 250 should be rejected");
        assert!(matches!(err, ConfigError::Option(_)));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = Config::from_toml_str("programme = \"raspistill\"\n")
            .expect_err("unknown field should be rejected");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file(Path::new("/nonexistent/pi-cam-still.toml"))
            .expect_err("missing file should fail");
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
