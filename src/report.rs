use crate::{config::ProjectConfig, variant::VariantBuild};

pub fn build_report(project: &ProjectConfig, builds: &[VariantBuild]) -> String {
    let mut out = String::new();

    out.push_str("envkey report\n");
    out.push_str("=============\n");
    out.push_str(&format!("config_dir: {}\n", project.config_dir().display()));
    out.push_str(&format!("placeholders: {}\n", project.placeholders.len()));

    out.push_str("\nvariants\n");
    for b in builds {
        out.push_str(&format!(
            "  - {} (file={}, found={}, overridden={})\n",
            b.name,
            b.source.display(),
            b.found,
            b.overridden.len()
        ));
        for (k, _) in b.placeholders.iter() {
            let state = if b.overridden.iter().any(|o| o == k) {
                "from config"
            } else {
                "default"
            };
            out.push_str(&format!("      {k}: {state}\n"));
        }
    }

    out
}
