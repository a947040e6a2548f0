use std::io::Write;

use crate::compiler::Program;
use crate::context::Context;
use crate::errors::Result;

/// A compiled template together with the data it was last given.
///
/// Compiling happens once, in [`Engine::compile`](crate::Engine::compile); rendering again
/// with new data only executes the stored program.
#[derive(Clone, Debug)]
pub struct Template {
    program: Program,
    context: Context,
}

impl Template {
    pub(crate) fn new(program: Program, context: Context) -> Template {
        Template { program, context }
    }

    /// The compiled program
    pub fn program(&self) -> &Program {
        &self.program
    }

    /// The data used when rendering without new data
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Renders the template, first replacing the stored data if some is given.
    ///
    /// ```rust
    /// # use htmpl::{Context, Engine, MemoryLoader, Source};
    /// let engine = Engine::new(MemoryLoader::new());
    /// let mut template = engine
    ///     .compile(Source::Text(r#"Hi <tmpl_var name="name">"#.into()), None)
    ///     .unwrap();
    ///
    /// let mut context = Context::new();
    /// context.insert("name", "Bob");
    /// assert_eq!(template.render(Some(context)), "Hi Bob");
    /// // the data is kept for the next render
    /// assert_eq!(template.render(None), "Hi Bob");
    /// ```
    pub fn render(&mut self, context: Option<Context>) -> String {
        if let Some(context) = context {
            self.context = context;
        }
        self.program.render(&self.context)
    }

    /// Renders the template like [`Template::render`] and writes the output to `write`
    pub fn render_to(&mut self, context: Option<Context>, mut write: impl Write) -> Result<()> {
        let output = self.render(context);
        write.write_all(output.as_bytes())?;
        Ok(())
    }
}
