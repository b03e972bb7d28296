//! Build script for pipboy-firmware
//!
//! Validates pipboy.toml at compile time

use std::fs;
use std::path::Path;

fn main() {
    validate_config();
}

/// Validate pipboy.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=pipboy.toml");
    println!("cargo:rerun-if-changed=build.rs");

    let config_path = Path::new("pipboy.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: pipboy.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The default configuration is embedded into the binary.          ║\n\
            ║  Please create one in the pipboy-firmware directory.             ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read pipboy.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in pipboy.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_display(&config, &mut errors);
    validate_tint(&config, &mut errors);
    validate_sound(&config, &mut errors);
    validate_serial(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in pipboy.toml                     ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn int_in_range(
    section: &toml::Value,
    name: &str,
    key: &str,
    range: std::ops::RangeInclusive<i64>,
    errors: &mut Vec<String>,
) {
    match section.get(key) {
        None => {}
        Some(toml::Value::Integer(v)) if range.contains(v) => {}
        Some(_) => errors.push(format!(
            "[{}] {} must be {}-{}",
            name,
            key,
            range.start(),
            range.end()
        )),
    }
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(display) = config.get("display") else {
        return;
    };
    int_in_range(display, "display", "width", 16..=4096, errors);
    int_in_range(display, "display", "height", 16..=4096, errors);
    int_in_range(display, "display", "fps", 1..=120, errors);
    if let Some(backend) = display.get("backend") {
        if !matches!(backend.as_str(), Some("framebuffer") | Some("memory")) {
            errors.push("[display] backend must be 'framebuffer' or 'memory'".into());
        }
    }
}

fn validate_tint(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(color) = config.get("tint").and_then(|t| t.get("color")) else {
        return;
    };
    let valid = color.as_array().is_some_and(|c| {
        c.len() == 3
            && c.iter()
                .all(|v| v.as_integer().is_some_and(|v| (0..=255).contains(&v)))
    });
    if !valid {
        errors.push("[tint] color must be three integers 0-255".into());
    }
}

fn validate_sound(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(sound) = config.get("sound") else {
        return;
    };
    let volume = |key: &str| sound.get(key).and_then(|v| v.as_float());
    for key in ["min_hum_volume", "max_hum_volume"] {
        if let Some(v) = volume(key) {
            if !(0.0..=1.0).contains(&v) {
                errors.push(format!("[sound] {} must be 0.0-1.0", key));
            }
        }
    }
    if let (Some(min), Some(max)) = (volume("min_hum_volume"), volume("max_hum_volume")) {
        if min > max {
            errors.push("[sound] min_hum_volume is above max_hum_volume".into());
        }
    }
}

fn validate_serial(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(serial) = config.get("serial") else {
        return;
    };
    int_in_range(serial, "serial", "baudrate", 50..=4_000_000, errors);
    int_in_range(serial, "serial", "gauge_mode", 0..=255, errors);
}
