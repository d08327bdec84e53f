use super::*;

impl HoconConfig {
    /// Get a typed value using dot notation.
    ///
    /// # Examples
    /// ```no_run
    /// # use hocon_json::HoconConfig;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// # let config = HoconConfig::from_file("application.conf")?;
    /// let host: String = config.get("server.host")?;
    /// let port: u16 = config.get("server.port")?;
    /// let debug: bool = config.get("debug")?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    /// Returns error if the path doesn't exist or the value can't be converted to `T`.
    pub fn get<T>(&self, path: &str) -> Result<T, HoconError>
    where
        T: TryFrom<Value, Error = HoconError>,
    {
        let value = self.get_value(path)?;
        T::try_from(value.clone()).map_err(|e| with_path(e, path))
    }

    /// Like `get`, but a missing path or a `null` value gives `None`.
    pub fn get_optional<T>(&self, path: &str) -> Result<Option<T>, HoconError>
    where
        T: TryFrom<Value, Error = HoconError>,
    {
        match self.get_value(path) {
            Ok(Value::Empty) => Ok(None),
            Ok(value) => T::try_from(value.clone())
                .map(Some)
                .map_err(|e| with_path(e, path)),
            Err(HoconError::PathNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get a value with a fallback default.
    ///
    /// # Examples
    /// ```no_run
    /// # use hocon_json::HoconConfig;
    /// # let config = HoconConfig::from_file("application.conf").unwrap();
    /// let timeout = config.get_or("server.timeout", 30u64);
    /// ```
    pub fn get_or<T>(&self, path: &str, default: T) -> T
    where
        T: TryFrom<Value, Error = HoconError>,
    {
        self.get(path).unwrap_or(default)
    }

    /// Raw value at `path`; an empty path is the root object.
    pub fn get_value(&self, path: &str) -> Result<&Value, HoconError> {
        if path.trim().is_empty() {
            return Ok(&self.value);
        }

        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        self.value
            .lookup(&segments)
            .ok_or_else(|| HoconError::PathNotFound {
                path: path.to_string(),
                code: Some(410),
            })
    }

    /// Keys of the object at `path`, in document order.
    pub fn get_keys(&self, path: &str) -> Result<Vec<String>, HoconError> {
        match self.get_value(path)? {
            Value::Object(items) => Ok(items.keys().cloned().collect()),
            other => Err(HoconError::TypeError {
                message: format!("Path '{}' is {}, not an object", path, other.kind()),
                hint: Some("Only objects have keys".into()),
                code: Some(411),
            }),
        }
    }

    pub fn has(&self, path: &str) -> bool {
        self.get_value(path).is_ok()
    }
}

/// Name the offending path in conversion errors.
fn with_path(e: HoconError, path: &str) -> HoconError {
    match e {
        HoconError::TypeError { message, hint, code } => HoconError::TypeError {
            message: format!("{} (at '{}')", message, path),
            hint,
            code,
        },
        other => other,
    }
}
