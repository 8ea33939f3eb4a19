use crate::config::{DEFAULT_CONFIG_FILENAME, DEFAULT_OUTPUT_DIR};
use crate::error::{AppError, Result};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use log;
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const IGNORE_FILENAME: &str = ".gitignore";
const VCS_DIR: &str = ".git";

/// One origin of ignore patterns, kept in the order it was added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSource {
    pub origin: String,
    pub file: Option<PathBuf>,
    pub patterns: Vec<String>,
}

/// Ordered pattern sources; compiled once into an [`IgnoreMatcher`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IgnoreRuleSet {
    sources: Vec<PatternSource>,
}

impl IgnoreRuleSet {
    /// Version-control metadata, the ignore file, the tool's config file and
    /// the default output directory.
    pub fn baseline() -> Self {
        Self::default().with_patterns(
            "builtin",
            vec![
                VCS_DIR.to_string(),
                IGNORE_FILENAME.to_string(),
                DEFAULT_CONFIG_FILENAME.to_string(),
                format!("{}/", DEFAULT_OUTPUT_DIR),
            ],
        )
    }

    pub fn with_patterns(mut self, origin: &str, patterns: Vec<String>) -> Self {
        if !patterns.is_empty() {
            self.sources.push(PatternSource {
                origin: origin.to_string(),
                file: None,
                patterns,
            });
        }
        self
    }

    /// Adds the project ignore file when present. A missing file is not an error.
    pub fn with_project_ignore_file(mut self, root: &Path) -> Result<Self> {
        let ignore_path = root.join(IGNORE_FILENAME);
        if !ignore_path.is_file() {
            log::debug!("No ignore file at {}", ignore_path.display());
            return Ok(self);
        }
        let content = fs::read_to_string(&ignore_path).map_err(|e| AppError::FileRead {
            path: ignore_path.clone(),
            source: e,
        })?;
        let patterns: Vec<String> = content.lines().map(String::from).collect();
        log::debug!(
            "Loaded {} lines from {}",
            patterns.len(),
            ignore_path.display()
        );
        self.sources.push(PatternSource {
            origin: IGNORE_FILENAME.to_string(),
            file: Some(ignore_path),
            patterns,
        });
        Ok(self)
    }

    /// Excludes an output directory that lives inside `root` under a non-default name.
    pub fn with_output_dir(self, root: &Path, output_dir: &Path) -> Self {
        let Ok(relative) = output_dir.strip_prefix(root) else {
            return self;
        };
        let mut segments = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(name) => segments.push(name.to_string_lossy().into_owned()),
                Component::CurDir => {}
                _ => return self,
            }
        }
        if segments.is_empty() || (segments.len() == 1 && segments[0] == DEFAULT_OUTPUT_DIR) {
            return self;
        }
        let pattern = format!("/{}/", segments.join("/"));
        self.with_patterns("output", vec![pattern])
    }

    pub fn sources(&self) -> &[PatternSource] {
        &self.sources
    }

    pub fn compile(&self, root: &Path) -> Result<IgnoreMatcher> {
        let mut builder = GitignoreBuilder::new(root);
        for source in &self.sources {
            for line in &source.patterns {
                if let Err(e) = builder.add_line(source.file.clone(), line) {
                    log::warn!(
                        "Skipping invalid ignore pattern \"{}\" from {}: {}",
                        line,
                        source.origin,
                        e
                    );
                } else {
                    log::trace!("Added ignore pattern \"{}\" ({})", line, source.origin);
                }
            }
        }
        let gitignore = builder.build()?;
        log::debug!(
            "Compiled ignore matcher with {} globs from {} sources",
            gitignore.num_ignores() + gitignore.num_whitelists(),
            self.sources.len()
        );
        Ok(IgnoreMatcher { gitignore })
    }
}

/// Exclusion predicate over root-relative, forward-slash paths.
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    gitignore: Gitignore,
}

impl IgnoreMatcher {
    /// Directory paths are passed with a trailing `/`. Paths with a root are
    /// never under the project and are not ignored.
    pub fn ignores(&self, relative_path: &str) -> bool {
        let is_dir = relative_path.ends_with('/');
        let trimmed = relative_path.trim_start_matches("./").trim_end_matches('/');
        if trimmed.is_empty() || Path::new(trimmed).has_root() {
            return false;
        }
        self.gitignore
            .matched_path_or_any_parents(Path::new(trimmed), is_dir)
            .is_ignore()
    }
}
