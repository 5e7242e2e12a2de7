use std::fs;
use std::path::Path;

use pricely_core::{PricingEngine, PricingRequest};

use crate::commands::CommandResult;

/// Runs the engine over a JSON scenario file. The file is a single
/// `PricingRequest`: product cost, cost rules, mode, and value. The output
/// is the breakdown itself, not a status envelope, so it can be piped.
pub fn run(file: &Path, pretty: bool) -> CommandResult {
    let raw = match fs::read_to_string(file) {
        Ok(raw) => raw,
        Err(error) => {
            return CommandResult::failure(
                "evaluate",
                "io",
                format!("could not read `{}`: {error}", file.display()),
                1,
            );
        }
    };

    let request: PricingRequest = match serde_json::from_str(&raw) {
        Ok(request) => request,
        Err(error) => {
            return CommandResult::failure(
                "evaluate",
                "parse",
                format!("`{}` is not a valid scenario: {error}", file.display()),
                1,
            );
        }
    };

    let breakdown = match PricingEngine::new().evaluate(&request) {
        Ok(breakdown) => breakdown,
        Err(error) => {
            return CommandResult::failure("evaluate", "pricing", error.to_string(), 2);
        }
    };

    let serialized = if pretty {
        serde_json::to_string_pretty(&breakdown)
    } else {
        serde_json::to_string(&breakdown)
    };

    match serialized {
        Ok(output) => CommandResult { exit_code: 0, output },
        Err(error) => CommandResult::failure("evaluate", "serialization", error.to_string(), 1),
    }
}
