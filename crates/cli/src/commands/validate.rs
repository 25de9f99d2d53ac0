use std::path::Path;

use tally_core::{sanitize, validate_str};

use super::Session;
use crate::OutputFormat;

static STATE_SCHEMA_STR: &str = include_str!("../../../../schema/state-schema.json");

/// Validate a stored challenge file.
///
/// Exits 0 when the file needs no repair, or when `fix` rewrote it. A file
/// can be valid yet not canonical: legacy note layouts migrate silently, and
/// only the schema check tells them apart.
pub(crate) fn cmd_validate(session: &Session, file: &Path, fix: bool) {
    let schema: serde_json::Value = match serde_json::from_str(STATE_SCHEMA_STR) {
        Ok(s) => s,
        Err(e) => session.fail(&format!(
            "internal error: failed to parse embedded state schema: {}",
            e
        )),
    };
    let validator = match jsonschema::validator_for(&schema) {
        Ok(v) => v,
        Err(e) => session.fail(&format!("internal error: failed to compile schema: {}", e)),
    };

    let blob = match std::fs::read_to_string(file) {
        Ok(s) => s,
        Err(e) => session.fail(&format!("error reading file '{}': {}", file.display(), e)),
    };

    let validation = validate_str(&blob, &session.clock);
    let problems = validation.problems;
    let Some(state) = validation.state else {
        let reason: Vec<String> = problems.iter().map(ToString::to_string).collect();
        session.fail(&format!("invalid: {}: {}", file.display(), reason.join("; ")));
    };

    let canonical = serde_json::from_str::<serde_json::Value>(&blob)
        .map(|raw| validator.is_valid(&raw))
        .unwrap_or(false);

    if fix {
        let clean = sanitize(state);
        let out = match serde_json::to_string_pretty(&clean) {
            Ok(s) => s,
            Err(e) => session.fail(&format!("error encoding challenge: {}", e)),
        };
        if let Err(e) = std::fs::write(file, out + "\n") {
            session.fail(&format!("error writing file '{}': {}", file.display(), e));
        }
    }

    let valid = problems.is_empty();
    let json = serde_json::json!({
        "valid": valid,
        "canonical": canonical,
        "fixed": fix,
        "problems": problems,
    });

    if valid || fix {
        let text = match (valid, canonical, fix) {
            (true, true, _) => "valid".to_string(),
            (true, false, false) => "valid (legacy layout; --fix rewrites it)".to_string(),
            (true, false, true) => "valid; rewritten in canonical layout".to_string(),
            (false, _, _) => format!("fixed {} problem(s)", problems.len()),
        };
        session.warn_problems(&problems, true);
        session.emit(&text, &json);
        return;
    }

    if !session.quiet {
        match session.output {
            OutputFormat::Text => {
                eprintln!("invalid: {} problem(s)", problems.len());
                for p in &problems {
                    eprintln!("  - {}", p);
                }
            }
            OutputFormat::Json => {
                eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&json).unwrap_or_default()
                );
            }
        }
    }
    std::process::exit(1);
}
