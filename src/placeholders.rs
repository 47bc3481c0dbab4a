use anyhow::{bail, Result};
use regex::Regex;
use std::{collections::BTreeMap, sync::LazyLock};
use tracing::debug;

use crate::{
    extract::get_str,
    resolve::{json_kind, ConfigMap},
};

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_.]*)\}").expect("placeholder pattern is valid")
});

/// Build-time placeholder table (name -> value), seeded with defaults and
/// then overlaid from an environment's config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    vars: BTreeMap<String, String>,
}

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults<I, K, V>(defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: defaults
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Overlay string values for `keys` from `cfg`. Absent or non-string
    /// values leave the table untouched, so an undeclared key only appears
    /// when the config supplies a string for it. Returns the keys that were
    /// overridden.
    pub fn apply<'k, I>(&mut self, cfg: &ConfigMap, keys: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'k str>,
    {
        let mut overridden = Vec::new();

        for key in keys {
            match get_str(cfg, key) {
                Some(v) => {
                    self.vars.insert(key.to_string(), v.to_string());
                    overridden.push(key.to_string());
                }
                None => {
                    if let Some(other) = cfg.get(key) {
                        debug!(key, found = json_kind(other), "ignoring non-string value");
                    }
                }
            }
        }

        overridden
    }

    /// Replace every `${NAME}` in `text`. Unknown names are an error.
    pub fn substitute(&self, text: &str) -> Result<String> {
        // Fast path
        if !text.contains("${") {
            return Ok(text.to_string());
        }

        let mut out = String::with_capacity(text.len());
        let mut last = 0;

        for caps in PLACEHOLDER_RE.captures_iter(text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let Some(value) = self.vars.get(name.as_str()) else {
                bail!("unknown placeholder: ${{{}}}", name.as_str());
            };

            out.push_str(&text[last..whole.start()]);
            out.push_str(value);
            last = whole.end();
        }

        out.push_str(&text[last..]);
        Ok(out)
    }

    pub fn render_redacted(&self, redact: bool) -> String {
        let mut out = String::new();
        for (k, v) in &self.vars {
            if redact && looks_sensitive_key(k) && !v.is_empty() {
                out.push_str(&format!("{k}=<redacted>\n"));
            } else {
                out.push_str(&format!("{k}={v}\n"));
            }
        }
        out
    }
}

fn looks_sensitive_key(k: &str) -> bool {
    let u = k.to_ascii_uppercase();
    u.contains("KEY")
        || u.contains("TOKEN")
        || u.contains("SECRET")
        || u.contains("PASSWORD")
        || u.contains("PRIVATE")
}
