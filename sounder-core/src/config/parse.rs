//! Keyer configuration parser
//!
//! Reads the small TOML subset used by `keyer.toml` without allocating.
//!
//! Supported:
//! - `[timing]` and `[output]` section headers
//! - `key = value` pairs (string, integer, boolean)
//! - Comments (`# ...`), whole-line or trailing
//!
//! ```toml
//! [timing]
//! wpm = 12          # or: unit_ms = 100
//!
//! [output]
//! pin = "!gpio15"   # '!' marks an active-low line
//! use_tone = true
//! tone_hz = 650
//! ```

use super::types::{ConfigError, KeyerConfig, PinConfig, TimingConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header
    InvalidSection { line: usize },
    /// Key not valid in its section
    UnknownKey { line: usize },
    /// Line is not `key = value`
    InvalidLine { line: usize },
    /// Value has the wrong type or is out of range for its type
    InvalidValue { line: usize },
    /// Pin string not of the form `gpioN` / `!gpioN`
    InvalidPin { line: usize },
    /// Parsed fine but failed validation
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Timing,
    Output,
}

/// Parse and validate a keyer configuration
///
/// Keys left out keep their defaults. If both `wpm` and `unit_ms` are
/// given, the later one wins.
pub fn parse_config(input: &str) -> Result<KeyerConfig, ParseError> {
    let mut config = KeyerConfig::default();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw).trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line, line_no)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine { line: line_no })?;
        apply_value(&mut config, section, key, value, line_no)?;
    }

    config.validate()?;
    Ok(config)
}

/// Parse a `[name]` header
fn parse_section_header(line: &str, line_no: usize) -> Result<Section, ParseError> {
    let name = line
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection { line: line_no })?;

    match name.trim() {
        "timing" => Ok(Section::Timing),
        "output" => Ok(Section::Output),
        _ => Err(ParseError::InvalidSection { line: line_no }),
    }
}

fn apply_value(
    config: &mut KeyerConfig,
    section: Section,
    key: &str,
    value: &str,
    line: usize,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Timing, "unit_ms") => {
            config.timing = TimingConfig::from_unit_ms(parse_int(value, line)?);
        }
        (Section::Timing, "wpm") => {
            config.timing = TimingConfig::from_wpm(parse_int(value, line)?)?;
        }
        (Section::Output, "pin") => {
            config.output.pin = parse_pin(value, line)?;
        }
        (Section::Output, "use_tone") => {
            config.output.use_tone = parse_bool(value, line)?;
        }
        (Section::Output, "tone_hz") => {
            config.output.tone_hz = parse_int(value, line)?;
        }
        _ => return Err(ParseError::UnknownKey { line }),
    }
    Ok(())
}

/// Cut a trailing `#` comment that is not inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Split "key = value"
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Strip surrounding quotes
fn parse_string(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(value)
}

fn parse_int<T: core::str::FromStr>(value: &str, line: usize) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue { line })
}

fn parse_bool(value: &str, line: usize) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue { line }),
    }
}

/// Parse a pin string like "gpio15" or "!gpio15"
fn parse_pin(value: &str, line: usize) -> Result<PinConfig, ParseError> {
    let value = parse_string(value);
    let (inverted, name) = match value.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, value),
    };

    let gpio: u8 = name
        .strip_prefix("gpio")
        .and_then(|n| n.parse().ok())
        .ok_or(ParseError::InvalidPin { line })?;

    // RP2040 exposes GPIO0..=GPIO29
    if gpio > 29 {
        return Err(ParseError::InvalidPin { line });
    }

    Ok(PinConfig { gpio, inverted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{DEFAULT_TONE_HZ, DEFAULT_UNIT_MS};

    #[test]
    fn test_empty_is_default() {
        assert_eq!(parse_config(""), Ok(KeyerConfig::default()));
        assert_eq!(
            parse_config("# nothing here\n\n"),
            Ok(KeyerConfig::default())
        );
    }

    #[test]
    fn test_full_config() {
        let input = r#"
# Beacon keyer
[timing]
unit_ms = 180

[output]
pin = "!gpio22"    # open-collector transistor
use_tone = true
tone_hz = 650
"#;
        let config = parse_config(input).unwrap();

        assert_eq!(config.timing.unit_ms, 180);
        assert_eq!(config.output.pin, PinConfig::inverted(22));
        assert!(config.output.use_tone);
        assert_eq!(config.output.tone_hz, 650);
    }

    #[test]
    fn test_wpm_sets_unit() {
        let config = parse_config("[timing]\nwpm = 20\n").unwrap();
        assert_eq!(config.timing.unit_ms, 60);
        assert_eq!(config.output.tone_hz, DEFAULT_TONE_HZ);
    }

    #[test]
    fn test_later_timing_key_wins() {
        let config = parse_config("[timing]\nwpm = 20\nunit_ms = 200\n").unwrap();
        assert_eq!(config.timing.unit_ms, 200);
    }

    #[test]
    fn test_unquoted_pin() {
        let config = parse_config("[output]\npin = gpio3\n").unwrap();
        assert_eq!(config.output.pin, PinConfig::new(3));
        assert_eq!(config.timing.unit_ms, DEFAULT_UNIT_MS);
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        assert_eq!(
            parse_config("[timing]\n[beacon]\n"),
            Err(ParseError::InvalidSection { line: 2 })
        );
        assert_eq!(
            parse_config("[timing]\npin = \"gpio1\"\n"),
            Err(ParseError::UnknownKey { line: 2 })
        );
        assert_eq!(
            parse_config("unit_ms = 100\n"),
            Err(ParseError::UnknownKey { line: 1 })
        );
        assert_eq!(
            parse_config("[output]\nuse_tone\n"),
            Err(ParseError::InvalidLine { line: 2 })
        );
        assert_eq!(
            parse_config("[output]\n\nuse_tone = yes\n"),
            Err(ParseError::InvalidValue { line: 3 })
        );
        assert_eq!(
            parse_config("[timing]\nunit_ms = -5\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
    }

    #[test]
    fn test_bad_pins() {
        for pin in ["\"led\"", "\"gpio\"", "\"gpio30\"", "\"!!gpio1\"", "\"GPIO4\""] {
            let input = format!("[output]\npin = {}\n", pin);
            assert_eq!(
                parse_config(&input),
                Err(ParseError::InvalidPin { line: 2 }),
                "{}",
                pin
            );
        }
    }

    #[test]
    fn test_validation_runs_after_parse() {
        assert_eq!(
            parse_config("[timing]\nunit_ms = 0\n"),
            Err(ParseError::Invalid(ConfigError::ZeroUnit))
        );
        assert_eq!(
            parse_config("[timing]\nwpm = 99\n"),
            Err(ParseError::Invalid(ConfigError::InvalidWpm))
        );
        assert_eq!(
            parse_config("[output]\nuse_tone = true\ntone_hz = 50\n"),
            Err(ParseError::Invalid(ConfigError::ToneOutOfRange))
        );
    }

    #[test]
    fn test_hash_inside_string_is_kept() {
        // '#' inside quotes is not a comment, so the pin string is invalid
        assert_eq!(
            parse_config("[output]\npin = \"gpio#1\"\n"),
            Err(ParseError::InvalidPin { line: 2 })
        );
    }
}
