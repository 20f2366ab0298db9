//! User-Friendly Error Formatting
//!
//! Provides user-friendly error messages with troubleshooting hints
//! for common error scenarios.

use std::fmt::Write;

use crate::input::{classify_error, ErrorType, MouseError};

/// Format error for user consumption
///
/// Takes technical error and produces user-friendly message with
/// troubleshooting steps and context.
pub fn format_user_error(error: &anyhow::Error) -> String {
    let mut output = String::new();

    // Header
    writeln!(&mut output).ok();
    writeln!(
        &mut output,
        "╔════════════════════════════════════════════════════════════╗"
    )
    .ok();
    writeln!(
        &mut output,
        "║                     ERROR                                  ║"
    )
    .ok();
    writeln!(
        &mut output,
        "╚════════════════════════════════════════════════════════════╝"
    )
    .ok();
    writeln!(&mut output).ok();

    let error_msg = format!("{:#}", error);

    // Prefer the typed error anywhere in the chain, fall back to the message
    let mouse_error = error.chain().find_map(|e| e.downcast_ref::<MouseError>());

    match mouse_error.map(classify_error) {
        Some(ErrorType::Initialization) => format_event_source_error(&mut output, &error_msg),
        Some(ErrorType::Configuration) => format_bounds_error(&mut output, &error_msg),
        Some(ErrorType::Script) => format_script_error(&mut output, &error_msg),
        None if error_msg.contains("script") => format_script_error(&mut output, &error_msg),
        None if error_msg.contains("config") => format_config_error(&mut output, &error_msg),
        None => format_generic_error(&mut output, &error_msg),
    }

    // Technical details
    writeln!(&mut output).ok();
    writeln!(
        &mut output,
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"
    )
    .ok();
    writeln!(&mut output, "Technical Details:").ok();
    writeln!(&mut output).ok();
    writeln!(&mut output, "{}", error_msg).ok();
    writeln!(&mut output).ok();

    // Footer with help
    writeln!(
        &mut output,
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"
    )
    .ok();
    writeln!(&mut output, "Need Help?").ok();
    writeln!(
        &mut output,
        "  - Run with --verbose for detailed logs: lamco-mouse -vv"
    )
    .ok();
    writeln!(
        &mut output,
        "  - Report issues: https://github.com/lamco-admin/wayland-rdp/issues"
    )
    .ok();
    writeln!(
        &mut output,
        "╚════════════════════════════════════════════════════════════╝"
    )
    .ok();

    output
}

fn format_event_source_error(output: &mut String, _error: &str) {
    writeln!(output, "Input Device Error").ok();
    writeln!(output).ok();
    writeln!(output, "Could not open the window-system event source.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. No display connection").ok();
    writeln!(output, "     → Check: echo $DISPLAY / echo $WAYLAND_DISPLAY").ok();
    writeln!(output, "     → Run from inside a graphical session").ok();
    writeln!(output).ok();
    writeln!(output, "  2. Pointer events could not be subscribed").ok();
    writeln!(
        output,
        "     → Another client may hold an exclusive button grab"
    )
    .ok();
    writeln!(output, "     → Close other applications grabbing the pointer").ok();
}

fn format_bounds_error(output: &mut String, _error: &str) {
    writeln!(output, "Window Size Error").ok();
    writeln!(output).ok();
    writeln!(output, "The mouse cannot be confined to the given window.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. Width or height is zero or negative").ok();
    writeln!(output, "     → Check [device] width and height in config.toml").ok();
    writeln!(output, "     → Both must be at least 1 pixel").ok();
}

fn format_script_error(output: &mut String, _error: &str) {
    writeln!(output, "Event Script Error").ok();
    writeln!(output).ok();
    writeln!(output, "Could not load the input event script.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. Script file not found").ok();
    writeln!(output, "     → Specify: lamco-mouse --script /path/to/script.json").ok();
    writeln!(output).ok();
    writeln!(output, "  2. Invalid JSON").ok();
    writeln!(output, "     → Top level must be an object with a \"frames\" array").ok();
    writeln!(
        output,
        "     → Event kinds: motion, enter_region, leave_region, button_down, button_up"
    )
    .ok();
}

fn format_config_error(output: &mut String, _error: &str) {
    writeln!(output, "Configuration Error").ok();
    writeln!(output).ok();
    writeln!(output, "Problem with configuration file.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. Invalid TOML syntax").ok();
    writeln!(output, "     → Check for typos, missing quotes, etc.").ok();
    writeln!(output).ok();
    writeln!(output, "  2. Invalid values").ok();
    writeln!(
        output,
        "     → [logging] level: trace, debug, info, warn or error"
    )
    .ok();
    writeln!(output, "     → [logging] format: pretty, compact or json").ok();
}

fn format_generic_error(output: &mut String, error: &str) {
    writeln!(output, "Mouse Input Error").ok();
    writeln!(output).ok();
    writeln!(output, "An error occurred while processing mouse input.").ok();
    writeln!(output).ok();
    writeln!(output, "Error: {}", error).ok();
}
