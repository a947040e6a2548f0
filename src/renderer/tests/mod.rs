use serde::Serialize;

use crate::compiler::Compiler;
use crate::config::Config;
use crate::context::Context;
use crate::errors::Result;
use crate::loader::MemoryLoader;

mod basic;

#[derive(Debug, Serialize)]
pub struct Review {
    title: String,
    paragraphs: Vec<String>,
}

impl Review {
    pub fn new() -> Review {
        Review {
            title: "My review".to_owned(),
            paragraphs: vec!["A".to_owned(), "B".to_owned(), "C".to_owned()],
        }
    }
}

pub fn render_template(content: &str, context: &Context) -> Result<String> {
    render_with_loader(content, context, &MemoryLoader::new())
}

pub fn render_with_loader(
    content: &str,
    context: &Context,
    loader: &MemoryLoader,
) -> Result<String> {
    let config = Config::default();
    let program = Compiler::new(loader, &config, context).compile(content)?;
    Ok(program.render(context))
}
