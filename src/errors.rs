use std::error::Error as StdError;
use std::fmt;

/// The kind of an error (non-exhaustive)
#[non_exhaustive]
#[derive(Debug)]
pub enum ErrorKind {
    /// Neither literal text nor a successful fetch gave us a template.
    /// Holds the location when one was asked for.
    MissingTemplate(Option<String>),
    /// A close tag with nothing open, or a block left open at the end of the template
    UnbalancedBlock(String),
    /// A close tag or `<tmpl_else>` that doesn't fit the innermost open block.
    /// Only raised when strict blocks are enabled.
    StructuralMismatch {
        /// What the innermost open block needed
        expected: String,
        /// What the template contained
        found: String,
    },
    /// Includes nested deeper than the configured limit
    IncludeDepthExceeded(usize),
    /// An error while (de)serializing data
    Json(serde_json::Error),
    /// An IO error occurred
    Io(std::io::ErrorKind),
    /// Generic error
    Msg(String),
}

/// The Error type
#[derive(Debug)]
pub struct Error {
    /// Kind of error
    pub kind: ErrorKind,
    source: Option<Box<dyn StdError + Sync + Send>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::MissingTemplate(None) => write!(f, "No template supplied."),
            ErrorKind::MissingTemplate(Some(ref location)) => {
                write!(f, "No template supplied: could not load `{}`", location)
            }
            ErrorKind::UnbalancedBlock(ref message) => write!(f, "{}", message),
            ErrorKind::StructuralMismatch { ref expected, ref found } => {
                write!(f, "Expected `{}` but found `{}`", expected, found)
            }
            ErrorKind::IncludeDepthExceeded(depth) => {
                write!(f, "Includes are nested more than {} levels deep", depth)
            }
            ErrorKind::Json(ref e) => write!(f, "{}", e),
            ErrorKind::Io(ref io_error) => {
                write!(f, "Io error while writing rendered value to output: {:?}", io_error)
            }
            ErrorKind::Msg(ref message) => write!(f, "{}", message),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_ref().map(|c| &**c as &(dyn StdError + 'static))
    }
}

impl Error {
    /// Creates generic error
    pub fn msg(value: impl ToString) -> Self {
        Self { kind: ErrorKind::Msg(value.to_string()), source: None }
    }

    /// Creates generic error with a source
    pub fn chain(value: impl ToString, source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self { kind: ErrorKind::Msg(value.to_string()), source: Some(source.into()) }
    }

    /// Creates a missing template error, optionally for a location
    pub fn missing_template(location: Option<&str>) -> Self {
        Self { kind: ErrorKind::MissingTemplate(location.map(String::from)), source: None }
    }

    /// Creates an unbalanced block error
    pub fn unbalanced_block(message: impl ToString) -> Self {
        Self { kind: ErrorKind::UnbalancedBlock(message.to_string()), source: None }
    }

    /// Creates a structural mismatch error
    pub fn structural_mismatch(expected: impl ToString, found: impl ToString) -> Self {
        Self {
            kind: ErrorKind::StructuralMismatch {
                expected: expected.to_string(),
                found: found.to_string(),
            },
            source: None,
        }
    }

    /// Creates an include depth error
    pub fn include_depth_exceeded(max_depth: usize) -> Self {
        Self { kind: ErrorKind::IncludeDepthExceeded(max_depth), source: None }
    }

    /// Creates JSON error
    pub fn json(value: serde_json::Error) -> Self {
        Self { kind: ErrorKind::Json(value), source: None }
    }

    /// Creates an IO error
    pub fn io_error(error: std::io::Error) -> Self {
        Self { kind: ErrorKind::Io(error.kind()), source: Some(Box::new(error)) }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::io_error(error)
    }
}
impl From<&str> for Error {
    fn from(e: &str) -> Self {
        Self::msg(e)
    }
}
impl From<String> for Error {
    fn from(e: String) -> Self {
        Self::msg(e)
    }
}
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::json(e)
    }
}
/// Convenient wrapper around std::Result.
pub type Result<T> = ::std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_send_and_sync() {
        fn test_send_sync<T: Send + Sync>() {}

        test_send_sync::<super::Error>();
    }

    #[test]
    fn missing_template_messages() {
        assert_eq!(Error::missing_template(None).to_string(), "No template supplied.");
        assert_eq!(
            Error::missing_template(Some("nav.tmpl")).to_string(),
            "No template supplied: could not load `nav.tmpl`"
        );
    }

    #[test]
    fn io_error_keeps_its_source() {
        let err = Error::from(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"));
        assert!(matches!(err.kind, ErrorKind::Io(std::io::ErrorKind::BrokenPipe)));
        assert_eq!(err.source().unwrap().to_string(), "gone");
    }
}
