use serde::Deserialize;

use crate::errors::{Error, Result};

/// Settings applied when compiling templates
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reject `</tmpl_*>` tags whose kind doesn't match the innermost open block, as well as
    /// `<tmpl_else>` outside of a conditional or repeated within one.
    /// When off, a close tag always closes the innermost block and a misplaced else is ignored.
    pub strict_blocks: bool,
    /// How many `<tmpl_include>` can be nested before compilation fails
    pub max_include_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config { strict_blocks: false, max_include_depth: 16 }
    }
}

impl Config {
    /// Reads a config from JSON, missing fields take their default value
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|e| Error::chain("Invalid config", e))
    }
}
