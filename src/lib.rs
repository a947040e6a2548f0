#![doc(html_root_url = "https://docs.rs/htmpl")]
//! # htmpl
//!
//! Compiles [HTML::Template] style templates once and renders them as many times as needed.
//!
//! The template language is small: variable interpolation with optional HTML or URL escaping,
//! conditionals, negated conditionals, loops (nested at will) and static includes, embedded in
//! otherwise literal text.
//!
//! ```text
//! <tmpl_var name="title" escape="html">
//! <tmpl_if name="items"> ... <tmpl_else> ... </tmpl_if>
//! <tmpl_unless name="logged_in"> ... </tmpl_unless>
//! <tmpl_loop name="items"> <tmpl_var name="label"> </tmpl_loop>
//! <tmpl_include name="footer.tmpl">
//! ```
//!
//! Inside a loop, names are looked up in the current item. Conditions only test truthiness:
//! empty strings, `0`, `false`, `null` and missing values are falsy, and `<tmpl_if>` also treats
//! an empty array as false. Missing values never cause an error, they render as nothing.
//!
//! Includes are resolved when the template is compiled, with the data given at that time:
//! rendering again with other data doesn't change what they contributed.
//!
//! ## Example
//!
//! ```rust
//! use htmpl::{Context, Engine, MemoryLoader, Source};
//!
//! let engine = Engine::new(MemoryLoader::new());
//! let mut template = engine
//!     .compile(
//!         Source::Text(r#"<tmpl_loop name="rows"><tmpl_var name="v"></tmpl_loop>"#.to_string()),
//!         None,
//!     )
//!     .unwrap();
//!
//! let mut context = Context::new();
//! context.insert("rows", &vec![serde_json::json!({"v": 1}), serde_json::json!({"v": 2})]);
//! assert_eq!(template.render(Some(context)), "12");
//! ```
//!
//! [HTML::Template]: https://metacpan.org/pod/HTML::Template

#![deny(missing_docs)]

mod compiler;
mod config;
mod context;
mod engine;
mod errors;
mod loader;
mod parser;
mod renderer;
mod template;
mod utils;

// Library exports.

pub use crate::compiler::{BlockKind, Compiler, Op, Path, Program, Segment};
pub use crate::config::Config;
pub use crate::context::{is_truthy, Context};
pub use crate::engine::{render_str, Engine, Source};
pub use crate::errors::{Error, ErrorKind, Result};
pub use crate::loader::{FileSystemLoader, Loader, MemoryLoader};
pub use crate::parser::{tokenize, EscapeMode, Token};
pub use crate::template::Template;
pub use crate::utils::{encode_uri, escape_html};
// Re-export Value and other useful things from serde
// so apps/tools can encode data in template types
pub use serde_json::value::{from_value, to_value, Map, Number, Value};
