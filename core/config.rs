use crate::comments::CommentMap;
use crate::error::{AppError, Result};
use log;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILENAME: &str = ".gentree.toml";
pub const DEFAULT_OUTPUT_DIR: &str = "trees";
pub const TREE_TEXT_FILENAME: &str = "tree.txt";
pub const COMMENTS_FILENAME: &str = "comments.json";
pub const MERMAID_FILENAME: &str = "tree.mmd";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub ignore: IgnoreConfig,
    #[serde(default)]
    pub comments: CommentMap,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub comments_file: Option<PathBuf>,
    #[serde(default)]
    pub mermaid_file: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct IgnoreConfig {
    #[serde(default = "default_true")]
    pub use_gitignore: bool,
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            use_gitignore: default_true(),
            patterns: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Output locations after CLI flags, config values and defaults are combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub output_dir: PathBuf,
    pub comments_file: PathBuf,
    pub mermaid_file: PathBuf,
}

impl Config {
    pub fn determine_project_root(cli_project_root: Option<&PathBuf>) -> Result<PathBuf> {
        let path_to_resolve = match cli_project_root {
            Some(p) => {
                let expanded = shellexpand::tilde(&p.to_string_lossy()).into_owned();
                let path = PathBuf::from(expanded);
                if path.is_absolute() {
                    path
                } else {
                    env::current_dir().map_err(AppError::Io)?.join(path)
                }
            }
            None => env::current_dir().map_err(AppError::Io)?,
        };

        let canonical = path_to_resolve.canonicalize().map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to canonicalize base directory '{}': {}",
                    path_to_resolve.display(),
                    e
                ),
            ))
        })?;

        if !canonical.is_dir() {
            return Err(AppError::InvalidArgument(format!(
                "Base directory '{}' is not a directory",
                canonical.display()
            )));
        }
        Ok(canonical)
    }

    pub fn resolve_config_path(
        project_root: &Path,
        cli_config_file: Option<&PathBuf>,
        cli_disable_config: bool,
    ) -> Result<Option<PathBuf>> {
        if cli_disable_config {
            log::debug!("Config file loading disabled via CLI flag.");
            return Ok(None);
        }

        match cli_config_file {
            Some(p) => {
                let path = resolve_against(project_root, p);
                if !path.exists() {
                    return Err(AppError::Config(format!(
                        "Specified config file not found at path: {}",
                        path.display()
                    )));
                }
                log::debug!("Using specified config file path: {}", path.display());
                Ok(Some(path))
            }
            None => {
                let default_path = project_root.join(DEFAULT_CONFIG_FILENAME);
                if default_path.is_file() {
                    log::debug!("Using default config file path: {}", default_path.display());
                    Ok(Some(default_path))
                } else {
                    log::debug!(
                        "No config file specified and default not found at: {}",
                        default_path.display()
                    );
                    Ok(None)
                }
            }
        }
    }

    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        log::info!("Loading configuration from: {}", config_path.display());
        let toml_content = fs::read_to_string(config_path).map_err(|e| AppError::FileRead {
            path: config_path.to_path_buf(),
            source: e,
        })?;
        toml::from_str::<Config>(&toml_content).map_err(|e| {
            AppError::TomlParse(format!(
                "Error parsing config file '{}': {}. Check TOML syntax and structure.",
                config_path.display(),
                e
            ))
        })
    }

    /// Combines CLI overrides with the `[output]` section.
    ///
    /// The comment and Mermaid files land inside the output directory unless
    /// a location was explicitly given, either on the command line or in the
    /// config file. Explicit relative locations resolve against the project
    /// root, not the output directory.
    pub fn resolve_output_paths(
        &self,
        project_root: &Path,
        cli_output_dir: Option<&PathBuf>,
        cli_comments_file: Option<&PathBuf>,
        cli_mermaid_file: Option<&PathBuf>,
    ) -> OutputPaths {
        let output_dir = cli_output_dir
            .or(self.output.dir.as_ref())
            .map(|p| resolve_against(project_root, p))
            .unwrap_or_else(|| project_root.join(DEFAULT_OUTPUT_DIR));

        let comments_file = cli_comments_file
            .or(self.output.comments_file.as_ref())
            .map(|p| resolve_against(project_root, p))
            .unwrap_or_else(|| output_dir.join(COMMENTS_FILENAME));

        let mermaid_file = cli_mermaid_file
            .or(self.output.mermaid_file.as_ref())
            .map(|p| resolve_against(project_root, p))
            .unwrap_or_else(|| output_dir.join(MERMAID_FILENAME));

        OutputPaths {
            output_dir,
            comments_file,
            mermaid_file,
        }
    }
}

/// Expands `~` and joins relative paths onto `base`; absolute paths pass through.
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
    if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    }
}
