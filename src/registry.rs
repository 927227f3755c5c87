//! The registry of supported capture options.
//!
//! The registry is built once on first use and never changes afterwards. It is
//! only reachable through the accessor functions in this module.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use crate::descriptor::Descriptor;
use crate::error::{OptionError, Result};
use crate::value::OptionValue;

/// A registered option: its constraints and how the capture binary spells it.
#[derive(Debug)]
pub struct RegisteredOption {
    /// Short command-line flag, e.g. `-w`.
    pub short_flag: &'static str,
    /// Value constraints.
    pub descriptor: Descriptor,
}

static REGISTRY: Lazy<BTreeMap<&'static str, RegisteredOption>> = Lazy::new(build_registry);

/// Whether `name` is a registered option.
pub fn has_option(name: &str) -> bool {
    REGISTRY.contains_key(name)
}

/// Whether an arbitrary value names a registered option.
///
/// Only text can name an option; numbers, booleans, `Null` and `Undefined`
/// are never option names.
pub fn is_option_name(candidate: &OptionValue) -> bool {
    match candidate {
        OptionValue::Text(name) => has_option(name),
        _ => false,
    }
}

/// Look up a registered option.
pub fn option(name: &str) -> Result<&'static RegisteredOption> {
    REGISTRY.get(name).ok_or_else(|| {
        log::debug!("lookup of unknown option '{name}'");
        OptionError::InvalidOption(name.to_owned())
    })
}

/// Look up the constraints of a registered option.
pub fn descriptor(name: &str) -> Result<&'static Descriptor> {
    option(name).map(|registered| &registered.descriptor)
}

/// Long command-line flag for a registered option, e.g. `--width`.
pub fn flag(name: &str) -> Result<String> {
    option(name).map(|_| format!("--{name}"))
}

/// All registered option names in sorted order.
pub fn option_names() -> impl Iterator<Item = &'static str> {
    REGISTRY.keys().copied()
}

/// All registered options in name order.
pub fn options() -> impl Iterator<Item = (&'static str, &'static RegisteredOption)> {
    REGISTRY.iter().map(|(name, registered)| (*name, registered))
}

/// Decimal 0 to 255 without leading zeros.
const BYTE: &str = "(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])";

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("built-in option pattern is valid")
}

fn build_registry() -> BTreeMap<&'static str, RegisteredOption> {
    let entries = [
        // Image size and timing
        ("width", "-w", Descriptor::integer().min(1.0)),
        // Upper bound of 1 kept as historically registered
        ("height", "-h", Descriptor::integer().max(1.0)),
        (
            "timeout",
            "-t",
            Descriptor::integer().range(0.0, f64::INFINITY),
        ),
        ("quality", "-q", Descriptor::integer().range(0.0, 100.0)),
        ("raw", "-r", Descriptor::flag()),
        (
            "thumb",
            "-th",
            Descriptor::matching(pattern(r"^(none|[0-9]+:[0-9]+:[0-9]+)$")),
        ),
        (
            "encoding",
            "-e",
            Descriptor::one_of(&["jpg", "bmp", "gif", "png"]),
        ),
        ("burst", "-bm", Descriptor::flag()),
        ("mode", "-md", Descriptor::integer().range(0.0, 7.0)),
        // Image adjustments
        ("sharpness", "-sh", Descriptor::integer().range(-100.0, 100.0)),
        ("contrast", "-co", Descriptor::integer().range(-100.0, 100.0)),
        ("brightness", "-br", Descriptor::integer().range(0.0, 100.0)),
        ("saturation", "-sa", Descriptor::integer().range(-100.0, 100.0)),
        ("ISO", "-ISO", Descriptor::integer().range(100.0, 800.0)),
        ("vstab", "-vs", Descriptor::flag()),
        ("ev", "-ev", Descriptor::integer().range(-10.0, 10.0)),
        (
            "exposure",
            "-ex",
            Descriptor::one_of(&[
                "off",
                "auto",
                "night",
                "nightpreview",
                "backlight",
                "spotlight",
                "sports",
                "snow",
                "beach",
                "verylong",
                "fixedfps",
                "antishake",
                "fireworks",
            ]),
        ),
        (
            "flicker",
            "-fli",
            Descriptor::one_of(&["off", "auto", "50hz", "60hz"]),
        ),
        (
            "awb",
            "-awb",
            Descriptor::one_of(&[
                "off",
                "auto",
                "sun",
                "cloud",
                "shade",
                "tungsten",
                "fluorescent",
                "incandescent",
                "flash",
                "horizon",
            ]),
        ),
        (
            "imxfx",
            "-ifx",
            Descriptor::one_of(&[
                "none",
                "negative",
                "solarise",
                "sketch",
                "denoise",
                "emboss",
                "oilpaint",
                "hatch",
                "gpen",
                "pastel",
                "watercolour",
                "film",
                "blur",
                "saturation",
                "colourswap",
                "washedout",
                "posterise",
                "colourpoint",
                "colourbalance",
                "cartoon",
            ]),
        ),
        (
            "colfx",
            "-cfx",
            Descriptor::matching(pattern(&format!("^{BYTE}:{BYTE}$"))),
        ),
        (
            "metering",
            "-mm",
            Descriptor::one_of(&["average", "spot", "backlit", "matrix"]),
        ),
        ("rotation", "-rot", Descriptor::integer().range(0.0, 359.0)),
        ("hflip", "-hf", Descriptor::flag()),
        ("vflip", "-vf", Descriptor::flag()),
        (
            "roi",
            "-roi",
            Descriptor::matching(pattern(
                r"^(0(\.[0-9]+)?|1(\.0+)?)(,(0(\.[0-9]+)?|1(\.0+)?)){3}$",
            )),
        ),
        // Shutter speed in microseconds
        ("shutter", "-ss", Descriptor::integer().range(0.0, 6_000_000.0)),
        (
            "awbgains",
            "-awbg",
            Descriptor::matching(pattern(r"^[0-9]+(\.[0-9]+)?,[0-9]+(\.[0-9]+)?$")),
        ),
        ("drc", "-drc", Descriptor::one_of(&["off", "low", "med", "high"])),
        ("stats", "-st", Descriptor::flag()),
        ("analoggain", "-ag", Descriptor::number().range(1.0, 12.0)),
        ("digitalgain", "-dg", Descriptor::number().range(1.0, 64.0)),
    ];

    entries
        .into_iter()
        .map(|(name, short_flag, descriptor)| {
            (
                name,
                RegisteredOption {
                    short_flag,
                    descriptor,
                },
            )
        })
        .collect()
}
