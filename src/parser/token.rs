use std::fmt;

/// How the value of a `<tmpl_var>` is escaped before being written out
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscapeMode {
    /// Written as is
    None,
    /// `escape="html"`
    Html,
    /// `escape="url"`
    Url,
}

impl Default for EscapeMode {
    fn default() -> Self {
        EscapeMode::None
    }
}

/// A piece of a template: either literal text or one of the `<tmpl_*>` tags.
///
/// Names and paths are kept as written, keywords are already lowercased.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    /// Text to output as is
    Literal(String),
    /// `<tmpl_var name="path" escape="...">`
    Var(String, EscapeMode),
    /// `<tmpl_if name="path">`
    If(String),
    /// `<tmpl_unless name="path">`, the path is empty for a bare `<tmpl_unless>`
    Unless(String),
    /// `<tmpl_loop name="path">`
    Loop(String),
    /// `<tmpl_else>`
    Else,
    /// `</tmpl_kind>`, with whatever kind was written
    Close(String),
    /// `<tmpl_include name="location">`
    Include(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(text) => write!(f, "{}", text),
            Token::Var(path, EscapeMode::None) => write!(f, "<tmpl_var name=\"{}\">", path),
            Token::Var(path, EscapeMode::Html) => {
                write!(f, "<tmpl_var name=\"{}\" escape=\"html\">", path)
            }
            Token::Var(path, EscapeMode::Url) => {
                write!(f, "<tmpl_var name=\"{}\" escape=\"url\">", path)
            }
            Token::If(path) => write!(f, "<tmpl_if name=\"{}\">", path),
            Token::Unless(path) if path.is_empty() => write!(f, "<tmpl_unless>"),
            Token::Unless(path) => write!(f, "<tmpl_unless name=\"{}\">", path),
            Token::Loop(path) => write!(f, "<tmpl_loop name=\"{}\">", path),
            Token::Else => write!(f, "<tmpl_else>"),
            Token::Close(kind) => write!(f, "</tmpl_{}>", kind),
            Token::Include(path) => write!(f, "<tmpl_include name=\"{}\">", path),
        }
    }
}
