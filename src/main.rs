use anyhow::{Context as _, Result};
use clap::Parser;
use std::fs;

use envkey::{
    cli::{Args, Command},
    ConfigResolver, ProjectConfig, VariantBuild,
};

fn main() -> Result<()> {
    envkey::logging::init();

    let args = Args::parse();
    // clap already folds ENVKEY_CONFIG into --config.
    let project = ProjectConfig::locate(args.config.as_deref(), None)?;

    match args.command {
        Command::Resolve { env, config_dir } => {
            let resolver = match config_dir {
                Some(dir) => ConfigResolver::new(dir),
                None => project.resolver(),
            };
            let map = resolver.resolve(&env)?;
            println!("{}", serde_json::to_string_pretty(&map)?);
        }

        Command::Placeholders { variant, no_redact } => {
            let build = VariantBuild::run(&project, &project.resolver(), &variant)?;
            print!("{}", build.placeholders.render_redacted(!no_redact));
        }

        Command::Render {
            variant,
            input,
            output,
        } => {
            let build = VariantBuild::run(&project, &project.resolver(), &variant)?;
            let text = fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let rendered = build
                .render(&text)
                .with_context(|| format!("failed to render {}", input.display()))?;

            match output {
                Some(path) => fs::write(&path, rendered)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => print!("{rendered}"),
            }
        }

        Command::Envs => {
            for name in envkey::list_environments(&project.config_dir())? {
                println!("{name}");
            }
        }

        Command::Check => {
            let resolver = project.resolver();
            let mut builds = Vec::new();
            for name in project.variants.keys() {
                builds.push(VariantBuild::run(&project, &resolver, name)?);
            }
            print!("{}", envkey::report::build_report(&project, &builds));
        }
    }

    Ok(())
}
