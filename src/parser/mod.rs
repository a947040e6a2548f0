use lazy_static::lazy_static;
use log::{debug, trace};
use regex::{Captures, Regex};

mod token;


pub use self::token::{EscapeMode, Token};

lazy_static! {
    // Alternatives are tried in order: opening tags with a name, closing tags,
    // then the two tags that are accepted without a name.
    static ref TAG_RE: Regex = Regex::new(concat!(
        r#"(?i)<tmpl_([a-z]+)\s+(?:name=)?"?([a-z0-9_\-.]+)"?\s*(?:escape="?(url|html)"?)?\s*>"#,
        r#"|</tmpl_([a-z]+)>|<tmpl_(else)>|<tmpl_(unless)>"#,
    ))
    .unwrap();
}

/// Splits a template into literal text and tags.
///
/// Tags are only recognized within a single line. Every `\n` is kept as its own
/// literal token so concatenating the literals of a tag-free template gives back the input.
/// Anything that looks like a tag but doesn't match the grammar is left as literal text,
/// while a well formed opening tag with an unknown keyword is dropped.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lines = input.split('\n').peekable();

    while let Some(line) = lines.next() {
        tokenize_line(line, &mut tokens);
        if lines.peek().is_some() {
            tokens.push(Token::Literal("\n".to_string()));
        }
    }

    tokens
}

fn tokenize_line(line: &str, tokens: &mut Vec<Token>) {
    let mut last_end = 0;

    for caps in TAG_RE.captures_iter(line) {
        let whole = caps.get(0).expect("group 0 is always set");
        if whole.start() > last_end {
            tokens.push(Token::Literal(line[last_end..whole.start()].to_string()));
        }

        match tag_to_token(&caps) {
            Some(token) => {
                trace!("Tokenized {:?}", token);
                tokens.push(token);
            }
            None => debug!("Dropping tag with unknown keyword `{}`", whole.as_str()),
        }
        last_end = whole.end();
    }

    if last_end < line.len() {
        tokens.push(Token::Literal(line[last_end..].to_string()));
    }
}

/// Unknown keywords in otherwise well formed opening tags give `None`: the tag outputs nothing.
fn tag_to_token(caps: &Captures) -> Option<Token> {
    if let (Some(keyword), Some(name)) = (caps.get(1), caps.get(2)) {
        let name = name.as_str().to_string();
        return match keyword.as_str().to_lowercase().as_str() {
            "var" => Some(Token::Var(name, escape_mode(caps))),
            "if" => Some(Token::If(name)),
            "unless" => Some(Token::Unless(name)),
            "loop" => Some(Token::Loop(name)),
            "include" => Some(Token::Include(name)),
            "else" => Some(Token::Else),
            _ => None,
        };
    }

    if let Some(kind) = caps.get(4) {
        return Some(Token::Close(kind.as_str().to_lowercase()));
    }
    if caps.get(5).is_some() {
        return Some(Token::Else);
    }
    if caps.get(6).is_some() {
        return Some(Token::Unless(String::new()));
    }

    Some(Token::Literal(caps[0].to_string()))
}

fn escape_mode(caps: &Captures) -> EscapeMode {
    match caps.get(3).map(|m| m.as_str().to_lowercase()) {
        Some(ref mode) if mode == "html" => EscapeMode::Html,
        Some(ref mode) if mode == "url" => EscapeMode::Url,
        _ => EscapeMode::None,
    }
}
