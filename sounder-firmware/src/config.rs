//! Startup configuration
//!
//! The keyer configuration is compiled in from `keyer.toml` and parsed once
//! at boot. build.rs has already validated the file, so a parse failure
//! here means the file and the parser disagree; the firmware logs it and
//! keys with defaults rather than refusing to start.

use defmt::*;

use sounder_core::config::{parse_config, KeyerConfig, DEFAULT_KEY_GPIO};

/// Embedded configuration (edit keyer.toml and rebuild to customize)
const EMBEDDED_CONFIG: &str = include_str!("../keyer.toml");

/// Load the embedded configuration, falling back to defaults
pub fn load_config() -> KeyerConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("keyer.toml rejected: {}, using defaults", e);
            KeyerConfig::default()
        }
    };

    info!(
        "Timing: unit={}ms (~{} WPM)",
        config.timing.unit_ms,
        config.timing.wpm()
    );

    if config.output.pin.gpio != DEFAULT_KEY_GPIO {
        // The keying line is fixed by the board wiring
        warn!(
            "Config asks for GPIO{}, this board keys GPIO{}",
            config.output.pin.gpio, DEFAULT_KEY_GPIO
        );
    }

    config
}
