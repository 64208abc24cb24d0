use anyhow::{anyhow, Result};
use serde_json::json;

use vfx_director::error_codes::{CodedError, ErrorCode};

pub const SAMPLE_PROMPTS: [&str; 3] = [
    "Monsoon-drenched Mumbai alley at midnight, chase between a cybernetic detective and a rogue drone, neon reflections, handheld camera.",
    "Mythic temple courtyard at dawn with a fire priestess summoning a phoenix of embers while rain cools the stone, sweeping steadicam.",
    "Desert battlefield at dusk, armored warrior vs sandstorm titan, dramatic dolly push with arcane lightning.",
];

pub fn sample_prompt(index: usize) -> Result<&'static str> {
    SAMPLE_PROMPTS.get(index).copied().ok_or_else(|| {
        anyhow!(CodedError::new(
            ErrorCode::InvalidSampleIndex,
            format!("no sample prompt at index {index}"),
        )
        .with_details(json!({
            "provided": index,
            "allowed": format!("0..={}", SAMPLE_PROMPTS.len() - 1),
        })))
    })
}

/// Short button-style title: the prompt up to its first comma.
pub fn sample_title(prompt: &str) -> &str {
    prompt.split(',').next().unwrap_or(prompt)
}
