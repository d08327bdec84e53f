// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::ast::Value;
use crate::export;
use crate::include::IncludeResolver;
use crate::parser;
use crate::resolver;
use crate::HoconError;

mod access;
mod conversion;

/// A fully loaded HOCON document: includes merged, substitutions resolved.
pub struct HoconConfig {
    value: Value,
    source: Option<PathBuf>,
}

impl HoconConfig {
    /// Load a HOCON file; includes resolve relative to the file's directory.
    ///
    /// # Example
    /// ```no_run
    /// # use hocon_json::HoconConfig;
    /// let config = HoconConfig::from_file("application.conf")?;
    /// let port: u16 = config.get("server.port")?;
    /// # Ok::<(), hocon_json::HoconError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, HoconError> {
        let path = path.as_ref();
        Self::load(path, IncludeResolver::for_file(path))
    }

    /// Load a HOCON file, resolving its includes against `base_dir` instead.
    pub fn from_file_with_base<P: AsRef<Path>, B: AsRef<Path>>(path: P, base_dir: B) -> Result<Self, HoconError> {
        let path = path.as_ref();
        Self::load(path, IncludeResolver::for_file_with_base(path, base_dir))
    }

    /// Parse HOCON text. Includes resolve against the current directory.
    pub fn from_str(content: &str) -> Result<Self, HoconError> {
        let mut includer = IncludeResolver::new(".");
        let root = parser::parse(content, &mut includer)?;
        Ok(Self {
            value: resolver::resolve(root)?,
            source: None,
        })
    }

    fn load(path: &Path, mut includer: IncludeResolver) -> Result<Self, HoconError> {
        let content = fs::read_to_string(path).map_err(|e| HoconError::FileError {
            message: format!("Failed to read file: {}", e),
            path: path.display().to_string(),
            hint: Some("Check that the file exists and is readable".into()),
            code: Some(301),
        })?;

        debug!("Parsing [{}] with includes from [{}]", path.display(), includer.base_dir().display());
        let root = parser::parse(&content, &mut includer)?;
        debug!("{} substitution(s) pending", root.substitutions.len());

        Ok(Self {
            value: resolver::resolve(root)?,
            source: Some(path.to_path_buf()),
        })
    }

    /// The resolved root object.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// File this configuration was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn to_json(&self) -> Result<serde_json::Value, HoconError> {
        export::project(&self.value)
    }

    /// Compact JSON text, as the command line tool prints it.
    pub fn to_json_string(&self) -> Result<String, HoconError> {
        export::to_json_string(&self.value)
    }

    pub fn to_json_string_pretty(&self) -> Result<String, HoconError> {
        export::to_json_string_pretty(&self.value)
    }
}
