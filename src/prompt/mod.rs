//! Model-family prompt adapters
//!
//! Turns a structured conversation into the literal prompt text a given
//! open-source model was trained on, plus the stop sequences that end its
//! turn.

pub mod adapter;
pub mod registry;
pub mod rules;
pub mod template;

pub use adapter::{ModelMatch, PromptAdapter, RenderedPrompt};
pub use registry::{AdapterRegistry, SharedRegistry};
pub use rules::AdapterRule;
pub use template::Template;
