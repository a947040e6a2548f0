use log::debug;

use crate::compiler::Compiler;
use crate::config::Config;
use crate::context::Context;
use crate::errors::{Error, Result};
use crate::loader::{FileSystemLoader, Loader, MemoryLoader};
use crate::template::Template;

/// Where the text of a template comes from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// The template itself
    Text(String),
    /// A location handed to the engine's loader
    Location(String),
}

/// Compiles templates, fetching them and their includes through a [`Loader`]
pub struct Engine {
    loader: Box<dyn Loader>,
    config: Config,
}

impl Engine {
    /// Creates an engine with the default config
    pub fn new(loader: impl Loader + 'static) -> Engine {
        Engine::with_config(loader, Config::default())
    }

    /// Creates an engine with the given config
    pub fn with_config(loader: impl Loader + 'static, config: Config) -> Engine {
        Engine { loader: Box::new(loader), config }
    }

    /// The config used when compiling
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Turns strict checking of block tags on or off
    pub fn strict_blocks(&mut self, strict: bool) {
        self.config.strict_blocks = strict;
    }

    /// Compiles a template.
    ///
    /// `context` is the initial data of the template, and the data includes are rendered with.
    /// Fails with `MissingTemplate` if the text is empty or the location can't be loaded.
    pub fn compile(&self, source: Source, context: Option<Context>) -> Result<Template> {
        let text = match source {
            Source::Text(text) if !text.is_empty() => text,
            Source::Text(_) => return Err(Error::missing_template(None)),
            Source::Location(location) => match self.loader.fetch(&location) {
                Some(text) if !text.is_empty() => {
                    debug!("Compiling template `{}`", location);
                    text
                }
                _ => return Err(Error::missing_template(Some(&location))),
            },
        };

        let context = context.unwrap_or_default();
        let program = Compiler::new(&*self.loader, &self.config, &context).compile(&text)?;
        Ok(Template::new(program, context))
    }
}

impl Default for Engine {
    /// Loads templates from the current directory
    fn default() -> Engine {
        Engine::new(FileSystemLoader::new("."))
    }
}

/// Renders a one off template. `<tmpl_include>` can't be resolved and will fail.
///
/// ```rust
/// # use htmpl::{render_str, Context};
/// let mut context = Context::new();
/// context.insert("x", "<b>");
/// let output = render_str(r#"<tmpl_var name="x" escape="html">"#, &context).unwrap();
/// assert_eq!(output, "&lt;b&gt;");
/// ```
pub fn render_str(input: &str, context: &Context) -> Result<String> {
    let engine = Engine::new(MemoryLoader::new());
    let mut template = engine.compile(Source::Text(input.to_string()), Some(context.clone()))?;
    Ok(template.render(None))
}
