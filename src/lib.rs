//! Prompt adapters for serving open-source chat models behind an
//! OpenAI-compatible API.
//!
//! A model name selects an adapter from an [`AdapterRegistry`]; the adapter
//! renders the conversation into the exact text format the model family was
//! trained on, together with the stop sequences that end its turn.

pub mod api;
pub mod config;
pub mod error;
pub mod prompt;

pub use api::{prepare_chat, ChatMessage, PreparedPrompt, Role, StopPolicy};
pub use error::AdapterError;
pub use prompt::{AdapterRegistry, PromptAdapter, RenderedPrompt, SharedRegistry};
