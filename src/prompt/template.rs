//! Single-placeholder text templates
//!
//! A template is split once, at parse time, around its only `{content}`
//! placeholder. Rendering is then plain concatenation: the content is
//! inserted verbatim with no escaping or truncation.

use crate::api::openai::Role;
use crate::error::AdapterError;

/// The insertion point marker
pub const PLACEHOLDER: &str = "{content}";

/// A template with exactly one insertion point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    prefix: String,
    suffix: String,
}

impl Template {
    /// Split `text` around its placeholder. `adapter` and `role` only label
    /// the error when the placeholder count is not exactly one.
    pub fn parse(text: &str, adapter: &str, role: Role) -> Result<Self, AdapterError> {
        let invalid = |found| AdapterError::InvalidTemplate {
            adapter: adapter.to_string(),
            role,
            found,
        };
        let found = text.matches(PLACEHOLDER).count();
        if found != 1 {
            return Err(invalid(found));
        }
        let (prefix, suffix) = text.split_once(PLACEHOLDER).ok_or_else(|| invalid(found))?;
        Ok(Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        })
    }

    /// Append the template with `content` substituted onto `out`
    pub fn render_into(&self, content: &str, out: &mut String) {
        out.reserve(self.prefix.len() + content.len() + self.suffix.len());
        out.push_str(&self.prefix);
        out.push_str(content);
        out.push_str(&self.suffix);
    }

    #[cfg(test)]
    fn render(&self, content: &str) -> String {
        let mut out = String::new();
        self.render_into(content, &mut out);
        out
    }
}
