use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing::debug;

use crate::{config::ProjectConfig, placeholders::Placeholders, resolve::ConfigResolver};

/// Placeholder values for one build variant after its config was applied.
#[derive(Debug, Clone)]
pub struct VariantBuild {
    pub name: String,
    pub source: PathBuf,
    pub found: bool,
    pub overridden: Vec<String>,
    pub placeholders: Placeholders,
}

impl VariantBuild {
    pub fn run(project: &ProjectConfig, resolver: &ConfigResolver, name: &str) -> Result<Self> {
        let mut placeholders = Placeholders::with_defaults(project.placeholders.clone());

        let resolution = resolver
            .resolution(name)
            .with_context(|| format!("variant {name}"))?;
        let found = resolution.is_found();
        let cfg = resolution.into_map();

        let keys = project.variant_keys(name);
        let overridden = placeholders.apply(&cfg, keys.iter().map(String::as_str));

        debug!(variant = name, found, overridden = ?overridden, "variant placeholders ready");

        Ok(Self {
            name: name.to_string(),
            source: resolver.path_for(name),
            found,
            overridden,
            placeholders,
        })
    }

    pub fn render(&self, text: &str) -> Result<String> {
        self.placeholders
            .substitute(text)
            .with_context(|| format!("variant {}", self.name))
    }
}
