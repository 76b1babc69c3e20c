//! OpenAI-compatible request surface as seen by the prompt layer

pub mod chat;
pub mod openai;
pub mod protocol;

pub use chat::{merge_stop, prepare_chat, PreparedPrompt, StopPolicy};
pub use openai::{ChatMessage, Role};
