//! Template layer for lath: front-matter extraction and Handlebars rendering.
//!
//! This crate provides the pieces the site builder composes pages from:
//! splitting an optional `---` metadata block off a template source, and a
//! [`TemplateEngine`] wrapping a Handlebars registry with the site's
//! partials and helpers.

pub mod engine;
pub mod frontmatter;

pub use engine::{EngineError, TemplateEngine, TEMPLATE_EXT};
pub use frontmatter::{extract, FrontMatter};
