use crate::cli_args::Cli;
use crate::output;
use anyhow::{Context, Result};
use gentree_core::{Config, GenerateOptions, generate_tree};
use log;
use std::path::Path;

pub fn handle_generate_command(args: &Cli) -> Result<()> {
    let project_root = Config::determine_project_root(args.base_dir.as_ref())
        .context("Failed to determine base directory")?;
    log::info!("Base directory determined: {}", project_root.display());

    let config = load_config(&project_root, args)?;

    let paths = config.resolve_output_paths(
        &project_root,
        args.output.output_dir.as_ref(),
        args.output.json_file.as_ref(),
        args.output.mermaid_file.as_ref(),
    );
    log::debug!("Resolved output paths: {:?}", paths);

    let options = GenerateOptions::new(&project_root, paths).with_config(&config);
    let report = generate_tree(&options).with_context(|| {
        format!(
            "Failed to generate tree for {}",
            project_root.display()
        )
    })?;

    // stdout carries only the tree when it is requested
    if args.output.stdout {
        output::write_to_stdout(&report.tree_text)?;
    } else {
        output::print_generation_summary(&report, args.quiet);
    }
    Ok(())
}

fn load_config(project_root: &Path, args: &Cli) -> Result<Config> {
    let config_path = Config::resolve_config_path(
        project_root,
        args.project_config.config.as_ref(),
        args.project_config.no_config,
    )
    .context("Failed to resolve configuration path")?;

    match &config_path {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(Config::default()),
    }
}
