//! Chat request preparation
//!
//! Bridges a parsed chat completion request and the prompt adapters:
//! resolve the adapter for `model`, render the conversation, then combine
//! the adapter's stop sequences with the ones the caller asked for.

use super::protocol::ChatCompletionCreateParams;
use crate::error::AdapterError;
use crate::prompt::AdapterRegistry;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How adapter stop sequences combine with the request's `stop`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopPolicy {
    /// Caller sequences first, then adapter sequences, without duplicates
    #[default]
    Merge,
    /// Adapter sequences are used only when the caller gave none
    CallerOnly,
}

/// Everything the inference backend needs from the prompt layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedPrompt {
    pub model: String,
    pub adapter: &'static str,
    pub prompt: String,
    pub stop: Option<Vec<String>>,
}

/// Concatenate caller and adapter stops, caller first, keeping the first
/// occurrence of each sequence
pub fn merge_stop(caller: Option<&[String]>, adapter: Option<&[String]>) -> Option<Vec<String>> {
    if caller.is_none() && adapter.is_none() {
        return None;
    }
    let mut merged: Vec<String> = Vec::new();
    for seq in caller.into_iter().chain(adapter).flatten() {
        if !merged.contains(seq) {
            merged.push(seq.clone());
        }
    }
    Some(merged)
}

/// Resolve, render and combine stops for a chat completion request
pub fn prepare_chat(
    registry: &AdapterRegistry,
    params: &ChatCompletionCreateParams,
    policy: StopPolicy,
) -> Result<PreparedPrompt, AdapterError> {
    let adapter = registry.resolve(&params.model)?;
    let rendered = adapter.render(&params.conversation());

    let caller = params.stop.as_ref().map(|s| s.to_vec());
    let stop = match (policy, caller) {
        (StopPolicy::CallerOnly, Some(caller)) if !caller.is_empty() => Some(caller),
        (_, caller) => merge_stop(caller.as_deref(), rendered.stop.as_deref()),
    };

    debug!(
        model = %params.model,
        adapter = adapter.name(),
        prompt_len = rendered.prompt.len(),
        stop_count = stop.as_ref().map_or(0, Vec::len),
        "prepared chat prompt"
    );

    Ok(PreparedPrompt {
        model: params.model.clone(),
        adapter: adapter.name(),
        prompt: rendered.prompt,
        stop,
    })
}
