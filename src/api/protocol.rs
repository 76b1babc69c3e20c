//! OpenAI-compatible request and response schemas
//!
//! Covers the chat, completion, embedding and rerank surfaces. Defaults
//! follow the serving layer's conventions, including the vLLM-style
//! sampling extras. The prompt core only reads `model` and `messages`; the
//! remaining fields pass through to the inference backend untouched.

use super::openai::{ChatMessage, Role};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

fn some_true() -> Option<bool> {
    Some(true)
}

fn some_false() -> Option<bool> {
    Some(false)
}

fn some_one() -> Option<u32> {
    Some(1)
}

fn some_zero_f32() -> Option<f32> {
    Some(0.0)
}

fn some_one_f32() -> Option<f32> {
    Some(1.0)
}

fn default_chat_temperature() -> Option<f32> {
    Some(0.9)
}

fn default_repetition_penalty() -> Option<f32> {
    Some(1.03)
}

fn default_completion_max_tokens() -> Option<u32> {
    Some(16)
}

/// OpenAI `stop`: a single string or a list of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StopSequences {
    Single(String),
    Many(Vec<String>),
}

impl StopSequences {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            StopSequences::Single(s) => vec![s.clone()],
            StopSequences::Many(v) => v.clone(),
        }
    }
}

/// One element of an array-form message content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text {
        text: String,
    },
    ImageUrl {
        image_url: Value,
    },
    InputAudio {
        input_audio: Value,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl MessageContent {
    /// Plain text of the content; non-text parts contribute nothing
    pub fn text(&self) -> String {
        match self {
            MessageContent::Text(s) => s.clone(),
            MessageContent::Parts(parts) => parts
                .iter()
                .filter_map(|p| match p {
                    ContentPart::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect(),
        }
    }
}

/// A message as it arrives in a chat completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionMessageParam {
    pub role: Role,
    #[serde(default)]
    pub content: Option<MessageContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<Value>,
}

impl ChatCompletionMessageParam {
    pub fn to_chat_message(&self) -> ChatMessage {
        ChatMessage {
            role: self.role,
            content: self.content.as_ref().map(|c| c.text()).unwrap_or_default(),
        }
    }
}

/// Sampling extras shared by chat and completion requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingExtras {
    #[serde(default = "default_repetition_penalty")]
    pub repetition_penalty: Option<f32>,
    #[serde(default)]
    pub typical_p: Option<f32>,
    #[serde(default = "some_false")]
    pub watermark: Option<bool>,
    #[serde(default = "some_false")]
    pub ignore_eos: Option<bool>,
    #[serde(default = "some_false")]
    pub use_beam_search: Option<bool>,
    #[serde(default)]
    pub stop_token_ids: Option<Vec<u32>>,
    #[serde(default = "some_true")]
    pub skip_special_tokens: Option<bool>,
    #[serde(default = "some_true")]
    pub spaces_between_special_tokens: Option<bool>,
    #[serde(default = "some_zero_f32")]
    pub min_p: Option<f32>,
    #[serde(default = "some_false")]
    pub include_stop_str_in_output: Option<bool>,
    #[serde(default = "some_one_f32")]
    pub length_penalty: Option<f32>,
    #[serde(default)]
    pub guided_json: Option<Value>,
    #[serde(default)]
    pub guided_regex: Option<String>,
    #[serde(default)]
    pub guided_choice: Option<Vec<String>>,
    #[serde(default)]
    pub guided_grammar: Option<String>,
}

impl Default for SamplingExtras {
    fn default() -> Self {
        Self {
            repetition_penalty: default_repetition_penalty(),
            typical_p: None,
            watermark: Some(false),
            ignore_eos: Some(false),
            use_beam_search: Some(false),
            stop_token_ids: None,
            skip_special_tokens: Some(true),
            spaces_between_special_tokens: Some(true),
            min_p: Some(0.0),
            include_stop_str_in_output: Some(false),
            length_penalty: Some(1.0),
            guided_json: None,
            guided_regex: None,
            guided_choice: None,
            guided_grammar: None,
        }
    }
}

/// `POST /v1/chat/completions` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionCreateParams {
    pub messages: Vec<ChatCompletionMessageParam>,
    pub model: String,
    #[serde(default = "some_zero_f32")]
    pub frequency_penalty: Option<f32>,
    #[serde(default)]
    pub function_call: Option<Value>,
    #[serde(default)]
    pub functions: Option<Vec<Value>>,
    #[serde(default)]
    pub logit_bias: Option<HashMap<String, i32>>,
    #[serde(default = "some_false")]
    pub logprobs: Option<bool>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default = "some_one")]
    pub n: Option<u32>,
    #[serde(default = "some_zero_f32")]
    pub presence_penalty: Option<f32>,
    #[serde(default)]
    pub response_format: Option<Value>,
    #[serde(default)]
    pub seed: Option<i64>,
    #[serde(default)]
    pub stop: Option<StopSequences>,
    #[serde(default = "default_chat_temperature")]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub tool_choice: Option<Value>,
    #[serde(default)]
    pub tools: Option<Vec<Value>>,
    #[serde(default)]
    pub top_logprobs: Option<u32>,
    #[serde(default = "some_one_f32")]
    pub top_p: Option<f32>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default = "some_false")]
    pub stream: Option<bool>,
    #[serde(default = "some_one")]
    pub best_of: Option<u32>,
    #[serde(flatten)]
    pub extras: SamplingExtras,
}

impl ChatCompletionCreateParams {
    /// The conversation handed to the prompt core
    pub fn conversation(&self) -> Vec<ChatMessage> {
        self.messages.iter().map(|m| m.to_chat_message()).collect()
    }
}

/// `prompt` of a completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompletionPrompt {
    Text(String),
    Texts(Vec<String>),
    Tokens(Vec<u32>),
    TokenBatches(Vec<Vec<u32>>),
}

/// `POST /v1/completions` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionCreateParams {
    pub model: String,
    #[serde(default)]
    pub prompt: Option<CompletionPrompt>,
    #[serde(default = "some_one")]
    pub best_of: Option<u32>,
    #[serde(default = "some_false")]
    pub echo: Option<bool>,
    #[serde(default = "some_zero_f32")]
    pub frequency_penalty: Option<f32>,
    #[serde(default)]
    pub logit_bias: Option<HashMap<String, i32>>,
    #[serde(default)]
    pub logprobs: Option<u32>,
    #[serde(default = "default_completion_max_tokens")]
    pub max_tokens: Option<u32>,
    #[serde(default = "some_one")]
    pub n: Option<u32>,
    #[serde(default = "some_zero_f32")]
    pub presence_penalty: Option<f32>,
    #[serde(default)]
    pub seed: Option<i64>,
    #[serde(default)]
    pub stop: Option<StopSequences>,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default = "some_one_f32")]
    pub temperature: Option<f32>,
    #[serde(default = "some_one_f32")]
    pub top_p: Option<f32>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default = "some_false")]
    pub stream: Option<bool>,
    #[serde(flatten)]
    pub extras: SamplingExtras,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingFormat {
    #[default]
    Float,
    Base64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingInput {
    Text(String),
    Texts(Vec<String>),
    Tokens(Vec<u32>),
    TokenBatches(Vec<Vec<u32>>),
}

/// `POST /v1/embeddings` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingCreateParams {
    pub input: EmbeddingInput,
    pub model: String,
    #[serde(default)]
    pub encoding_format: EncodingFormat,
    #[serde(default)]
    pub dimensions: Option<u32>,
    #[serde(default)]
    pub user: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    /// Float list, or a base64 string when requested
    pub embedding: Value,
    pub index: u32,
    pub object: String,
}

impl Embedding {
    pub fn new(index: u32, embedding: Value) -> Self {
        Self {
            embedding,
            index,
            object: "embedding".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEmbeddingResponse {
    pub data: Vec<Embedding>,
    pub model: String,
    pub object: String,
    pub usage: Usage,
}

impl CreateEmbeddingResponse {
    pub fn new(model: impl Into<String>, data: Vec<Embedding>, usage: Usage) -> Self {
        Self {
            data,
            model: model.into(),
            object: "list".to_string(),
            usage,
        }
    }
}

/// `POST /v1/rerank` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RerankRequest {
    pub model: String,
    pub query: String,
    pub documents: Vec<String>,
    #[serde(default)]
    pub top_n: Option<u32>,
    #[serde(default = "some_false")]
    pub return_documents: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RerankDocument {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankResult {
    pub index: u32,
    pub relevance_score: f32,
    pub document: Option<RerankDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RerankResponse {
    pub id: Option<String>,
    pub results: Vec<RerankResult>,
}

/// Error body returned by every endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub object: String,
    pub message: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, code: u16) -> Self {
        Self {
            object: "error".to_string(),
            message: message.into(),
            code,
        }
    }
}

impl From<&crate::error::AdapterError> for ErrorResponse {
    fn from(err: &crate::error::AdapterError) -> Self {
        Self::new(err.to_string(), err.status_code())
    }
}
