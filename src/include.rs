// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use log::{info, warn};

use crate::ast::{Root, Value};
use crate::merge::merge;
use crate::parser;
use crate::HoconError;

/// An `include` directive as written in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct IncludeSpec {
    pub pattern: String,
    /// `include required("...")`: matching nothing is an error.
    pub required: bool,
}

impl IncludeSpec {
    pub fn new(pattern: impl Into<String>, required: bool) -> Self {
        Self {
            pattern: pattern.into(),
            required,
        }
    }
}

/// Callback the parser uses for every `include` directive.
pub trait Includer {
    fn include(&mut self, spec: &IncludeSpec) -> Result<Root, HoconError>;
}

impl<F> Includer for F
where
    F: FnMut(&IncludeSpec) -> Result<Root, HoconError>,
{
    fn include(&mut self, spec: &IncludeSpec) -> Result<Root, HoconError> {
        self(spec)
    }
}

/// Resolves include patterns against the directory of the including file.
///
/// Matches are processed in sorted order; each file is parsed with a child
/// resolver rooted at that file's own directory, so nested relative includes
/// work without touching the process working directory.
#[derive(Debug, Clone)]
pub struct IncludeResolver {
    base_dir: PathBuf,
    // files currently being included, outermost first
    chain: Vec<PathBuf>,
}

impl IncludeResolver {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            chain: Vec::new(),
        }
    }

    /// Resolver for the top-level file itself, so a file including itself is caught.
    pub fn for_file<P: AsRef<Path>>(file: P) -> Self {
        let file = file.as_ref();
        let base_dir = parent_dir(file);
        Self {
            base_dir,
            chain: vec![canonical(file)],
        }
    }

    /// Like `for_file`, but includes resolve against `base_dir`.
    pub fn for_file_with_base<P: AsRef<Path>, B: AsRef<Path>>(file: P, base_dir: B) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            chain: vec![canonical(file.as_ref())],
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Expand `spec.pattern`, then parse and merge every match in order.
    pub fn resolve_include(&self, spec: &IncludeSpec) -> Result<Root, HoconError> {
        let files = self.expand(&spec.pattern)?;

        if files.is_empty() {
            if spec.required {
                return Err(HoconError::FileError {
                    message: "Required include matched no file".into(),
                    path: spec.pattern.clone(),
                    hint: Some("Check the path, or drop required(...) to make it optional".into()),
                    code: Some(303),
                });
            }
            warn!("[{}] does not match any file", spec.pattern);
            return Ok(Root::empty());
        }

        files
            .iter()
            .try_fold(Root::empty(), |acc, file| self.fold_file(acc, file))
    }

    fn fold_file(&self, mut acc: Root, file: &Path) -> Result<Root, HoconError> {
        info!("Loading configurations from file [{}]", file.display());
        let parsed = self.load_file(file)?;

        match (&mut acc.value, parsed.value) {
            (Value::Object(base), Value::Object(incoming)) => merge(base, incoming),
            (_, other) => {
                return Err(HoconError::FileError {
                    message: format!("Included file holds {}, not an object", other.kind()),
                    path: file.display().to_string(),
                    hint: None,
                    code: Some(304),
                });
            }
        }
        acc.substitutions.extend(parsed.substitutions);
        Ok(acc)
    }

    /// Read and parse one file; its own includes resolve next to it.
    pub fn load_file(&self, file: &Path) -> Result<Root, HoconError> {
        let key = canonical(file);
        if self.chain.contains(&key) {
            return Err(HoconError::IncludeCycle {
                path: file.display().to_string(),
                code: Some(305),
            });
        }

        let content = fs::read_to_string(file).map_err(|e| HoconError::FileError {
            message: format!("Failed to read include file: {}", e),
            path: file.display().to_string(),
            hint: Some("Check that the included file is readable".into()),
            code: Some(302),
        })?;

        let mut child = IncludeResolver {
            base_dir: parent_dir(file),
            chain: self.chain.clone(),
        };
        child.chain.push(key);

        parser::parse(&content, &mut child)
    }

    fn expand(&self, raw: &str) -> Result<Vec<PathBuf>, HoconError> {
        let pattern = self.absolute_pattern(raw)?;
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };

        let entries = glob::glob_with(&pattern, options).map_err(|e| HoconError::GlobError {
            message: e.to_string(),
            pattern: raw.to_string(),
            code: Some(306),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| HoconError::GlobError {
                message: e.to_string(),
                pattern: raw.to_string(),
                code: Some(307),
            })?;
            if path.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Expand "~/" and anchor relative patterns at the base directory.
    /// The base directory is escaped so only the written pattern globs.
    fn absolute_pattern(&self, raw: &str) -> Result<String, HoconError> {
        if let Some(rest) = raw.strip_prefix("~/") {
            let home = dirs::home_dir().ok_or_else(|| HoconError::FileError {
                message: "Could not determine home directory for ~ expansion".into(),
                path: raw.to_string(),
                hint: Some("Set HOME or use an absolute path in the include".into()),
                code: Some(300),
            })?;
            return Ok(format!("{}/{}", Pattern::escape(&home.to_string_lossy()), rest));
        }

        if Path::new(raw).is_absolute() {
            return Ok(raw.to_string());
        }

        let base = Pattern::escape(&self.base_dir.to_string_lossy());
        if base.is_empty() {
            Ok(raw.to_string())
        } else {
            Ok(format!("{}/{}", base.trim_end_matches('/'), raw))
        }
    }
}

impl Includer for IncludeResolver {
    fn include(&mut self, spec: &IncludeSpec) -> Result<Root, HoconError> {
        self.resolve_include(spec)
    }
}

fn parent_dir(file: &Path) -> PathBuf {
    match file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn canonical(file: &Path) -> PathBuf {
    fs::canonicalize(file).unwrap_or_else(|_| file.to_path_buf())
}
