use anyhow::{Context as _, Result};
use std::path::Path;

/// Names of the environments that have a `<name>.json` in `base_dir`, sorted.
pub fn list_environments(base_dir: &Path) -> Result<Vec<String>> {
    if !base_dir.is_dir() {
        return Ok(Vec::new());
    }

    // Escape the directory so brackets etc. in it are matched literally.
    let dir = glob::Pattern::escape(&base_dir.to_string_lossy());
    let pattern = format!("{dir}/*.json");

    let mut out = Vec::new();
    for entry in glob::glob(&pattern).with_context(|| format!("invalid glob pattern: {pattern}"))?
    {
        let path = entry.with_context(|| format!("failed to scan {}", base_dir.display()))?;
        if !path.is_file() {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            out.push(stem.to_string());
        }
    }

    out.sort();
    out.dedup();
    Ok(out)
}
