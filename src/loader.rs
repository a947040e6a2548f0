//! Where templates come from, both the ones compiled by location and the ones pulled in
//! by `<tmpl_include>`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use globwalk::GlobWalkerBuilder;
use log::debug;

use crate::errors::{Error, Result};

/// Fetches the text of a template by location.
///
/// A fetch is synchronous and failures are not distinguished from a missing template:
/// both return `None`.
pub trait Loader {
    /// Returns the text of the template at `location`, if any
    fn fetch(&self, location: &str) -> Option<String>;
}

impl<F> Loader for F
where
    F: Fn(&str) -> Option<String>,
{
    fn fetch(&self, location: &str) -> Option<String> {
        self(location)
    }
}

/// Reads templates from files, locations being relative to a root directory
#[derive(Clone, Debug)]
pub struct FileSystemLoader {
    root: PathBuf,
}

impl FileSystemLoader {
    /// Creates a loader reading from `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileSystemLoader { root: root.into() }
    }

    /// The directory locations are relative to
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Loader for FileSystemLoader {
    fn fetch(&self, location: &str) -> Option<String> {
        let path = self.root.join(location);
        match fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(e) => {
                debug!("Couldn't read template {:?}: {}", path, e);
                None
            }
        }
    }
}

/// Templates kept in memory, keyed by name
#[derive(Clone, Debug, Default)]
pub struct MemoryLoader {
    templates: HashMap<String, String>,
}

impl MemoryLoader {
    /// Creates an empty loader
    pub fn new() -> Self {
        MemoryLoader::default()
    }

    /// Loads every file matching the glob, eg `templates/**/*.tmpl`.
    ///
    /// Templates are named after their path relative to the part of the glob before the
    /// first `*`, with forward slashes: `templates/users/list.tmpl` is `users/list.tmpl`.
    pub fn from_glob(glob: &str) -> Result<Self> {
        let star = match glob.find('*') {
            Some(i) => i,
            None => {
                return Err(Error::msg(format!(
                    "Expected a glob as input, no * were found in `{}`",
                    glob
                )))
            }
        };
        let (parent_dir, glob_end) = glob.split_at(star);
        let parent_dir = if parent_dir.is_empty() { "." } else { parent_dir };
        // An invalid dir means no templates rather than an error
        let parent_dir = match fs::canonicalize(parent_dir) {
            Ok(dir) => dir,
            Err(_) => return Ok(MemoryLoader::new()),
        };

        let walker = GlobWalkerBuilder::from_patterns(&parent_dir, &[glob_end])
            .follow_links(true)
            .build()
            .map_err(|e| Error::msg(format!("Invalid glob `{}`: {}", glob, e)))?;

        let mut loader = MemoryLoader::new();
        for entry in walker.filter_map(std::result::Result::ok) {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = match path.strip_prefix(&parent_dir) {
                Ok(relative) => relative.to_string_lossy().replace('\\', "/"),
                Err(_) => continue,
            };
            let text = fs::read_to_string(path)
                .map_err(|e| Error::chain(format!("Couldn't open template {:?}", path), e))?;
            debug!("Loaded template `{}`", name);
            loader.add(name, text);
        }

        Ok(loader)
    }

    /// Adds a template, replacing any template with the same name
    pub fn add(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.templates.insert(name.into(), text.into());
    }

    /// Whether a template with that name exists
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// The names of all templates, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }
}

impl Loader for MemoryLoader {
    fn fetch(&self, location: &str) -> Option<String> {
        self.templates.get(location).cloned()
    }
}
