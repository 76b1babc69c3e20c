//! Validated prompt adapters and the conversation renderer
//!
//! Every adapter is rendered by the same function: the system preamble,
//! followed by one template expansion per user or assistant turn. System,
//! function and tool turns are not part of the textual transcript and are
//! skipped; system text is expected to be carried by the preamble.

use super::rules::AdapterRule;
use super::template::Template;
use crate::api::openai::{ChatMessage, Role};
use crate::error::AdapterError;
use serde::Serialize;
use tracing::trace;

/// How an adapter decides whether it applies to a model identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelMatch {
    /// Case-sensitive substring match against the model name
    Contains(&'static str),
    /// Always applies
    Any,
}

impl ModelMatch {
    pub fn matches(&self, model_name: &str) -> bool {
        match *self {
            ModelMatch::Contains(marker) => model_name.contains(marker),
            ModelMatch::Any => true,
        }
    }

    /// The marker token, if any
    pub fn marker(&self) -> Option<&'static str> {
        match *self {
            ModelMatch::Contains(marker) => Some(marker),
            ModelMatch::Any => None,
        }
    }
}

/// A rendered prompt ready for the inference backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPrompt {
    pub prompt: String,
    pub stop: Option<Vec<String>>,
}

/// A registered adapter with pre-split templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptAdapter {
    name: &'static str,
    matches: ModelMatch,
    system: String,
    user: Template,
    assistant: Template,
    stop: Option<Vec<String>>,
}

impl PromptAdapter {
    /// Validate a static definition. Both templates must carry exactly one
    /// placeholder.
    pub fn from_rule(rule: &AdapterRule) -> Result<Self, AdapterError> {
        Ok(Self {
            name: rule.name,
            matches: rule.matches,
            system: rule.system.to_string(),
            user: Template::parse(rule.user, rule.name, Role::User)?,
            assistant: Template::parse(rule.assistant, rule.name, Role::Assistant)?,
            stop: rule
                .stop
                .map(|seqs| seqs.iter().map(|s| s.to_string()).collect()),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn model_match(&self) -> ModelMatch {
        self.matches
    }

    pub fn matches(&self, model_name: &str) -> bool {
        self.matches.matches(model_name)
    }

    pub fn system_preamble(&self) -> &str {
        &self.system
    }

    pub fn stop_sequences(&self) -> Option<&[String]> {
        self.stop.as_deref()
    }

    /// Render a conversation into the prompt text this model family expects.
    ///
    /// Pure: identical input always yields identical output.
    pub fn render(&self, conversation: &[ChatMessage]) -> RenderedPrompt {
        let mut prompt = self.system.clone();
        for (index, message) in conversation.iter().enumerate() {
            match message.role {
                Role::User => self.user.render_into(&message.content, &mut prompt),
                Role::Assistant => self.assistant.render_into(&message.content, &mut prompt),
                Role::System | Role::Function | Role::Tool => {
                    trace!(
                        adapter = self.name,
                        index,
                        role = %message.role,
                        "skipping message not representable in template"
                    );
                }
            }
        }
        RenderedPrompt {
            prompt,
            stop: self.stop.clone(),
        }
    }
}
