//! Prompt Template System
//!
//! Loads and renders `.pmt` (prompt template) files for every language-model
//! call the crate makes.
//!
//! Template loading chain:
//! 1. `{prompts.dir}/{name}.pmt` (user override, see config)
//! 2. Embedded fallback compiled into the binary
//!
//! Templates use Handlebars syntax for variable substitution.

pub mod embedded;
mod loader;

pub use loader::{PromptLoader, PromptTemplate};
