//! Template rendering for scaffold.
//! A single stateless substitution function is shared by path rendering and
//! file content rendering, backed by MiniJinja.
use crate::context::Context;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `name` - Key identifying the template, used in error messages
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String, minijinja::Error>` - Rendered template string
    fn render(
        &self,
        name: &str,
        template: &str,
        context: &Context,
    ) -> Result<String, minijinja::Error>;
}

/// MiniJinja-based template rendering engine.
///
/// Undefined variables render as an empty string, output is never
/// auto-escaped whatever the extension of the template name, and trailing
/// newlines of the template source are kept.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a new MiniJinjaRenderer instance with default environment.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Lenient);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// The template is compiled under `name` for this call only; nothing is
    /// kept in the environment between calls.
    ///
    /// # Errors
    /// * `minijinja::Error` if the template fails to parse or to render
    fn render(
        &self,
        name: &str,
        template: &str,
        context: &Context,
    ) -> Result<String, minijinja::Error> {
        self.env.render_named_str(name, template, context)
    }
}
