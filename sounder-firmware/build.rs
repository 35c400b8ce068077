//! Build script for sounder-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates keyer.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate keyer.toml at compile time
///
/// The firmware parses the same file again at startup; catching mistakes
/// here means a bad edit fails the build instead of silently falling back
/// to defaults on the board.
fn validate_config() {
    println!("cargo:rerun-if-changed=keyer.toml");

    let config_path = Path::new("keyer.toml");

    if !config_path.exists() {
        fail("keyer.toml not found", &["Create one in the sounder-firmware directory."]);
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read keyer.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => fail(
            "Invalid TOML syntax in keyer.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_timing(&config, &mut errors);
    validate_output(&config, &mut errors);

    if !errors.is_empty() {
        fail("Invalid keyer configuration", &errors);
    }

    println!("cargo:warning=keyer.toml validated successfully");
}

/// Only [timing] and [output] are understood
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(table) = config.as_table() else {
        return;
    };

    for (name, value) in table {
        match (name.as_str(), value) {
            ("timing" | "output", toml::Value::Table(_)) => {}
            ("timing" | "output", _) => errors.push(format!("[{}] must be a table", name)),
            _ => errors.push(format!("unknown section or key '{}'", name)),
        }
    }
}

fn validate_timing(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(timing) = config.get("timing").and_then(|t| t.as_table()) else {
        return;
    };

    for key in timing.keys() {
        if !["unit_ms", "wpm"].contains(&key.as_str()) {
            errors.push(format!("[timing] unknown key '{}'", key));
        }
    }

    match timing.get("unit_ms") {
        Some(toml::Value::Integer(ms)) if (1..=2000).contains(ms) => {}
        Some(_) => errors.push("[timing] unit_ms must be an integer 1-2000".to_string()),
        None => {}
    }

    match timing.get("wpm") {
        Some(toml::Value::Integer(wpm)) if (1..=60).contains(wpm) => {}
        Some(_) => errors.push("[timing] wpm must be an integer 1-60".to_string()),
        None => {}
    }
}

fn validate_output(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(output) = config.get("output").and_then(|o| o.as_table()) else {
        return;
    };

    for key in output.keys() {
        if !["pin", "use_tone", "tone_hz"].contains(&key.as_str()) {
            errors.push(format!("[output] unknown key '{}'", key));
        }
    }

    if let Some(pin) = output.get("pin") {
        let valid = pin
            .as_str()
            .map(|s| s.strip_prefix('!').unwrap_or(s))
            .and_then(|s| s.strip_prefix("gpio"))
            .and_then(|n| n.parse::<u8>().ok())
            .is_some_and(|n| n <= 29);
        if !valid {
            errors.push("[output] pin must look like \"gpio15\" or \"!gpio15\" (0-29)".to_string());
        }
    }

    let use_tone = match output.get("use_tone") {
        Some(toml::Value::Boolean(b)) => *b,
        Some(_) => {
            errors.push("[output] use_tone must be true or false".to_string());
            false
        }
        None => false,
    };

    match output.get("tone_hz") {
        Some(toml::Value::Integer(hz)) if !use_tone || (100..=4000).contains(hz) => {}
        Some(toml::Value::Integer(_)) => {
            errors.push("[output] tone_hz must be 100-4000 when use_tone = true".to_string())
        }
        Some(_) => errors.push("[output] tone_hz must be an integer".to_string()),
        None => {}
    }
}

/// Abort the build with a boxed error report
fn fail<S: AsRef<str>>(title: &str, lines: &[S]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        format_error_lines(lines)
    );
}

/// Format error message lines with box drawing
fn format_error_lines<S: AsRef<str>>(lines: &[S]) -> String {
    lines
        .iter()
        .map(|line| {
            let line = line.as_ref();
            let truncated = if line.chars().count() > 62 {
                format!("{}...", line.chars().take(59).collect::<String>())
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
