//! # Structured Output
//!
//! Every agent that needs machine-readable output from the model goes through
//! this module: one generation call, one lenient parse, and at most one
//! corrective retry before the caller is handed an explicitly degraded result.
//! Transport and API failures still propagate as errors; only response *shape*
//! failures are absorbed here.

use crate::{
    errors::PromptError,
    prompts::core::{JSON_ONLY_INSTRUCTION, JSON_RETRY_SYSTEM_PROMPT},
    providers::ai::{AiProvider, GenerationOptions},
};
use regex::Regex;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// The outcome of a structured generation call.
///
/// `value` is `None` exactly when `degraded` is true: the model replied, but
/// not in a shape we could use, even after the corrective retry.
#[derive(Debug, Clone)]
pub struct Structured<T> {
    pub value: Option<T>,
    pub degraded: bool,
}

/// Extracts and deserializes a JSON document from a raw model reply.
///
/// Markdown code fences are stripped first. If the remainder still fails to
/// parse, the widest `{...}` (or `[...]`) slice is tried once, which copes
/// with models that wrap their JSON in commentary.
pub fn parse_llm_json<T: DeserializeOwned>(raw: &str) -> Result<T, serde_json::Error> {
    let fenced = Regex::new(r"```(?:json)?\n?([\s\S]*?)```")
        .ok()
        .and_then(|re| re.captures(raw))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(raw);
    let candidate = fenced.trim();

    match serde_json::from_str(candidate) {
        Ok(value) => Ok(value),
        Err(err) => {
            let salvaged =
                widest_slice(candidate, '{', '}').or_else(|| widest_slice(candidate, '[', ']'));
            match salvaged {
                Some(slice) => serde_json::from_str(slice),
                None => Err(err),
            }
        }
    }
}

fn widest_slice(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

/// Runs a generation call that must produce JSON matching `T`.
///
/// The first attempt uses the caller's prompts with a JSON-only instruction
/// appended. If the reply does not parse, a single retry is made with a
/// stripped-down system prompt that demands bare JSON, at a clamped
/// temperature. A second parse failure yields `Structured { value: None,
/// degraded: true }` rather than an error, so callers can fall back without
/// losing the signal.
pub async fn generate_structured<T: DeserializeOwned>(
    ai_provider: &dyn AiProvider,
    system_prompt: &str,
    user_prompt: &str,
    options: &GenerationOptions,
) -> Result<Structured<T>, PromptError> {
    let user_prompt = format!("{user_prompt}{JSON_ONLY_INSTRUCTION}");

    let response = ai_provider
        .generate_with(system_prompt, &user_prompt, options)
        .await?;
    match parse_llm_json(&response) {
        Ok(value) => {
            return Ok(Structured {
                value: Some(value),
                degraded: false,
            })
        }
        Err(e) => {
            warn!("Structured response did not parse ({e}), retrying with strict instruction");
            debug!("Unparseable response: {response}");
        }
    }

    let retry_options = GenerationOptions {
        temperature: options.temperature.min(0.3),
        max_tokens: options.max_tokens,
    };
    let retry_response = ai_provider
        .generate_with(JSON_RETRY_SYSTEM_PROMPT, &user_prompt, &retry_options)
        .await?;
    match parse_llm_json(&retry_response) {
        Ok(value) => Ok(Structured {
            value: Some(value),
            degraded: false,
        }),
        Err(e) => {
            warn!("Structured retry did not parse either ({e}), returning degraded result");
            debug!("Unparseable retry response: {retry_response}");
            Ok(Structured {
                value: None,
                degraded: true,
            })
        }
    }
}
