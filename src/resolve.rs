use serde_json::Value;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

/// Flat key/value view of one environment's JSON file.
pub type ConfigMap = serde_json::Map<String, Value>;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The file exists but is not valid JSON.
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Anything other than "not found" while reading the file.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Outcome of looking up one environment file.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(ConfigMap),
    NotFound,
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    pub fn into_map(self) -> ConfigMap {
        match self {
            Resolution::Found(map) => map,
            Resolution::NotFound => ConfigMap::new(),
        }
    }
}

/// Maps an environment name to `<base_dir>/<name>.json`.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    base_dir: PathBuf,
}

impl ConfigResolver {
    pub fn new<P: Into<PathBuf>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn path_for(&self, env: &str) -> PathBuf {
        self.base_dir.join(format!("{env}.json"))
    }

    /// Resolve `env` to its mapping. A missing file, an empty file, or a
    /// non-object top level all yield an empty map; malformed JSON does not.
    pub fn resolve(&self, env: &str) -> Result<ConfigMap, ResolveError> {
        Ok(self.resolution(env)?.into_map())
    }

    pub fn resolution(&self, env: &str) -> Result<Resolution, ResolveError> {
        let path = self.path_for(env);

        // Bytes, not a String: invalid UTF-8 must surface as a parse error.
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(env, path = %path.display(), "no config file for environment");
                return Ok(Resolution::NotFound);
            }
            Err(source) => return Err(ResolveError::Read { path, source }),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            debug!(env, path = %path.display(), "config file is empty");
            return Ok(Resolution::Found(ConfigMap::new()));
        }

        let parsed: Value = serde_json::from_slice(&bytes)
            .map_err(|source| ResolveError::Parse {
                path: path.clone(),
                source,
            })?;

        match parsed {
            Value::Object(map) => {
                debug!(env, path = %path.display(), keys = map.len(), "loaded config");
                Ok(Resolution::Found(map))
            }
            other => {
                warn!(
                    env,
                    path = %path.display(),
                    found = json_kind(&other),
                    "config top level is not an object; ignoring"
                );
                Ok(Resolution::Found(ConfigMap::new()))
            }
        }
    }
}

pub(crate) fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
