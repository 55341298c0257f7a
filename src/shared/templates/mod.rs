//! Email template rendering.
//!
//! HTML report bodies live in `templates/email/` and use Jinja2 syntax.

pub mod engine;

pub use engine::{render_template, TemplateError};
