use anyhow::{bail, Context as _, Result};
use serde::Deserialize;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::resolve::ConfigResolver;

pub const DEFAULT_PROJECT_FILE: &str = "envkey.toml";
pub const CONFIG_ENV_VAR: &str = "ENVKEY_CONFIG";

pub type PlaceholderDefaults = BTreeMap<String, String>;

/// `envkey.toml`: where the environment files live, which placeholders
/// exist (with their defaults) and which keys each variant pulls in.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default)]
    pub envkey: EnvkeyMeta,

    #[serde(default)]
    pub placeholders: PlaceholderDefaults,

    #[serde(default = "default_variants")]
    pub variants: BTreeMap<String, VariantConfig>,

    /// Directory the project file was loaded from; relative paths hang off it.
    #[serde(skip)]
    pub root: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvkeyMeta {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default = "default_config_dir")]
    pub config_dir: String,
}

impl Default for EnvkeyMeta {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            config_dir: default_config_dir(),
        }
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariantConfig {
    /// Keys to read from `<variant>.json`. Empty means every declared placeholder.
    #[serde(default)]
    pub keys: Vec<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_config_dir() -> String {
    "config".to_string()
}

fn default_variants() -> BTreeMap<String, VariantConfig> {
    ["debug", "release"]
        .into_iter()
        .map(|v| (v.to_string(), VariantConfig::default()))
        .collect()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            envkey: EnvkeyMeta::default(),
            placeholders: PlaceholderDefaults::new(),
            variants: default_variants(),
            root: PathBuf::from("."),
        }
    }
}

impl ProjectConfig {
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read project file {}", path.display()))?;
        let mut cfg: Self = toml::from_str(&text)
            .with_context(|| format!("failed to parse project file {}", path.display()))?;

        if cfg.envkey.schema_version != 1 {
            bail!(
                "unsupported schema_version {} in {}",
                cfg.envkey.schema_version,
                path.display()
            );
        }

        cfg.root = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(cfg)
    }

    /// Project file precedence:
    /// 1) explicit path (must exist)
    /// 2) ENVKEY_CONFIG (must exist)
    /// 3) ./envkey.toml if present, else built-in defaults
    pub fn locate(explicit: Option<&Path>, env_value: Option<&str>) -> Result<Self> {
        if let Some(p) = explicit {
            if !p.exists() {
                bail!("config file does not exist: {}", p.display());
            }
            return Self::load_from_path(p);
        }

        if let Some(v) = env_value.map(str::trim).filter(|s| !s.is_empty()) {
            let p = PathBuf::from(v);
            if !p.exists() {
                bail!("{CONFIG_ENV_VAR} is set but file does not exist: {}", p.display());
            }
            return Self::load_from_path(&p);
        }

        let p = PathBuf::from(DEFAULT_PROJECT_FILE);
        if p.exists() {
            return Self::load_from_path(&p);
        }

        tracing::debug!("no {DEFAULT_PROJECT_FILE} found; using built-in defaults");
        Ok(Self::default())
    }

    /// Absolute-or-root-relative config directory, with `~/` expanded.
    pub fn config_dir(&self) -> PathBuf {
        let raw = self.envkey.config_dir.as_str();
        if let Some(rest) = raw.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        let p = Path::new(raw);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.root.join(p)
        }
    }

    pub fn resolver(&self) -> ConfigResolver {
        ConfigResolver::new(self.config_dir())
    }

    /// Keys a variant reads. Unlisted variants, or listed ones without
    /// `keys`, fall back to every declared placeholder.
    pub fn variant_keys(&self, variant: &str) -> Vec<String> {
        match self.variants.get(variant) {
            Some(v) if !v.keys.is_empty() => v.keys.clone(),
            _ => self.placeholders.keys().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
[envkey]
schema_version = 1
config_dir = "../config"

[placeholders]
KAKAO_NATIVE_APP_KEY = ""
APP_LABEL = "Coach"

[variants.release]
keys = ["KAKAO_NATIVE_APP_KEY"]

[variants.debug]
"#;

    #[test]
    fn loads_sample_and_resolves_config_dir() {
        let dir = TempDir::new().unwrap();
        let android = dir.path().join("android");
        fs::create_dir(&android).unwrap();
        let path = android.join("envkey.toml");
        fs::write(&path, SAMPLE).unwrap();

        let cfg = ProjectConfig::load_from_path(&path).unwrap();
        assert_eq!(cfg.placeholders.get("APP_LABEL").map(String::as_str), Some("Coach"));
        assert_eq!(cfg.config_dir(), android.join("../config"));
        assert_eq!(cfg.resolver().path_for("debug"), android.join("../config/debug.json"));
    }

    #[test]
    fn variant_keys_fall_back_to_placeholders() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("envkey.toml");
        fs::write(&path, SAMPLE).unwrap();
        let cfg = ProjectConfig::load_from_path(&path).unwrap();

        assert_eq!(cfg.variant_keys("release"), vec!["KAKAO_NATIVE_APP_KEY"]);
        assert_eq!(cfg.variant_keys("debug"), vec!["APP_LABEL", "KAKAO_NATIVE_APP_KEY"]);
        assert_eq!(cfg.variant_keys("staging"), vec!["APP_LABEL", "KAKAO_NATIVE_APP_KEY"]);
    }

    #[test]
    fn defaults_when_sections_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("envkey.toml");
        fs::write(&path, "").unwrap();

        let cfg = ProjectConfig::load_from_path(&path).unwrap();
        assert_eq!(cfg.envkey.config_dir, "config");
        assert!(cfg.variants.contains_key("debug"));
        assert!(cfg.variants.contains_key("release"));
        assert!(cfg.placeholders.is_empty());
    }

    #[test]
    fn rejects_unknown_fields_and_schema() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("envkey.toml");

        fs::write(&path, "[envkey]\nconfig_dri = \"x\"\n").unwrap();
        assert!(ProjectConfig::load_from_path(&path).is_err());

        fs::write(&path, "[envkey]\nschema_version = 9\n").unwrap();
        let err = ProjectConfig::load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("schema_version"), "{err}");
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(ProjectConfig::locate(Some(missing.as_path()), None).is_err());
        assert!(ProjectConfig::locate(None, Some(missing.to_str().unwrap())).is_err());
    }

    #[test]
    fn absolute_config_dir_is_kept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("envkey.toml");
        let abs = dir.path().join("elsewhere");
        fs::write(
            &path,
            format!("[envkey]\nconfig_dir = {:?}\n", abs.to_string_lossy()),
        )
        .unwrap();

        let cfg = ProjectConfig::load_from_path(&path).unwrap();
        assert_eq!(cfg.config_dir(), abs);
    }
}
